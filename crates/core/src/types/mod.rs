//! Core types for ShopSphere.
//!
//! This module provides type-safe wrappers for common storefront concepts.

pub mod date;
pub mod id;
pub mod password;
pub mod phone;
pub mod price;
pub mod severity;

pub use date::{DateFormatError, format_date, format_date_str};
pub use id::*;
pub use password::{PasswordError, check_password_strength, passwords_match};
pub use phone::{IndianMobile, PhoneError};
pub use price::{Price, format_inr};
pub use severity::Severity;
