//! What the host reports about the page when it is ready.

use serde::{Deserialize, Serialize};

use crate::components::{FlashAlert, FormSpec, LazyImage, VisibilitySupport};
use crate::presenter::ElementId;

/// Elements of the page the storefront layer wires up at start.
///
/// Hosts build this from the rendered document (or deserialise it from JSON
/// emitted by the templates); every list may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    /// `[data-bs-toggle="tooltip"]` elements
    pub tooltips: Vec<ElementId>,
    /// Whether the page has a `.cart-badge`
    pub has_cart_badge: bool,
    /// Whether the page has a `#searchInput`
    pub has_search_input: bool,
    /// `.needs-validation` forms
    pub forms: Vec<FormSpec>,
    /// `img[data-src]` elements
    pub lazy_images: Vec<LazyImage>,
    /// Whether the host reports image visibility
    pub visibility: VisibilitySupport,
    /// Server-rendered `.alert` elements
    pub alerts: Vec<FlashAlert>,
}
