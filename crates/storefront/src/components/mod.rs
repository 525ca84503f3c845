//! Page components.
//!
//! Each component owns its ephemeral state and talks to the page only
//! through the [`Presenter`](crate::presenter::Presenter).

pub mod cart;
pub mod forms;
pub mod lazy_images;
pub mod notifications;
pub mod overlay;
pub mod search;

pub use cart::{
    CartBadge, CartCountSource, CartQuantityClick, QuantityAction, QuantityClickError, StubCartCount,
};
pub use forms::{FieldKind, FieldSpec, FormSpec, FormValidator, SubmitDecision};
pub use lazy_images::{IntersectionEntry, LazyImage, LazyImageLoader, VisibilitySupport};
pub use notifications::{FlashAlert, Notifier};
pub use overlay::{LoadingOverlay, SpinnerGuard};
pub use search::{LogSearch, SearchBox, SearchHook, perform_search};
