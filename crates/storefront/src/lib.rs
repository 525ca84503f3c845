//! ShopSphere Storefront UI layer.
//!
//! Client-side presentation glue for the storefront: cart badge and quantity
//! buttons, debounced search, form validation, lazy images, toasts, the
//! loading overlay, and backend actions (add to cart, wishlist, like).
//!
//! # Architecture
//!
//! - [`Storefront`] is the facade hosts hold; page events go in, page
//!   updates come out through the host's [`Presenter`]
//! - Components own their ephemeral state; the page is never read back
//! - Timers (debounce, toast auto-dismiss) are Tokio tasks
//! - Backend calls go through [`backend::StorefrontApi`] and never follow
//!   redirects; a redirect becomes a navigation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod components;
pub mod config;
pub mod debounce;
pub mod error;
pub mod page;
pub mod presenter;
pub mod services;
pub mod state;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::StorefrontConfig;
pub use error::{Error, Result};
pub use page::PageSnapshot;
pub use presenter::{Download, ElementId, Presenter, Toast, ToastId};
pub use state::{Storefront, StorefrontBuilder};
