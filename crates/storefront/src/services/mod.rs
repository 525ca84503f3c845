//! Storefront services.
//!
//! # Services
//!
//! - `products` - Cart, wishlist and like actions against the backend
//! - `storage` - JSON local storage over memory or file backends
//! - `export` - Table to CSV download
//! - `preview` - Selected image files as `data:` URLs
//! - `tracking` - Event tracking through logs and Sentry breadcrumbs

pub mod export;
pub mod preview;
pub mod products;
pub mod storage;
pub mod tracking;

pub use export::{export_table_to_csv, table_to_csv};
pub use preview::SelectedFile;
pub use products::{ActionResult, ProductActions};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageBackend, StorageError};
pub use tracking::track_event;
