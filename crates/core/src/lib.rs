//! ShopSphere Core - Shared types library.
//!
//! This crate provides the types and rules used by the storefront UI layer
//! and its hosts:
//! - `storefront` - Presentation layer (cart, search, forms, notifications)
//! - `cli` - Terminal host for the presentation layer
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no timers,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, severities, prices, dates, phone numbers and
//!   password rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
