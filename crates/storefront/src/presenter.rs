//! Presentation adapter.
//!
//! Everything the storefront layer does to the page goes through
//! [`Presenter`]. A browser host implements it on top of the DOM and the UI
//! toolkit (tooltips, dismissible alerts); the CLI host prints to the
//! terminal; tests record calls.
//!
//! Implementations must not call back into the storefront layer from these
//! methods: the overlay and notification services hold their state lock
//! while rendering.

use core::fmt;

use serde::{Deserialize, Serialize};
use shopsphere_core::{ProductId, Severity};
use url::Url;

use crate::backend::LikeStatus;

/// Identifier of an element on the page (its DOM id or a host handle).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new element id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a toast created by the notification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric id.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// A dismissible notification.
///
/// `message` is plain text; presenters must escape it before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
}

/// A client-side file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: Vec<u8>,
}

/// Page operations the storefront layer depends on.
pub trait Presenter: Send + Sync {
    /// Attach toolkit tooltips to the given elements.
    fn init_tooltips(&self, elements: &[ElementId]);

    /// Ask the user to confirm an action.
    fn confirm(&self, message: &str) -> bool;

    /// Render the cart count; the badge is hidden when `visible` is false.
    fn render_cart_badge(&self, count: u32, visible: bool);

    /// Create the fixed-position notification container.
    fn create_notification_container(&self);

    /// Append a toast to the notification container.
    fn append_toast(&self, toast: &Toast);

    /// Close a toast.
    fn close_toast(&self, id: ToastId);

    /// Whether a server-rendered alert is still shown.
    fn is_alert_shown(&self, alert: &ElementId) -> bool;

    /// Close a server-rendered alert.
    fn close_alert(&self, alert: &ElementId);

    /// Create the full-viewport loading overlay (initially hidden).
    fn create_loading_overlay(&self);

    /// Show or hide the loading overlay.
    fn set_loading_overlay_visible(&self, visible: bool);

    /// Start reporting visibility changes for an image.
    fn observe_image(&self, image: &ElementId);

    /// Stop reporting visibility changes for an image.
    fn unobserve_image(&self, image: &ElementId);

    /// Set an image element's live source.
    fn set_image_source(&self, image: &ElementId, src: &str);

    /// Add a class to an element.
    fn add_class(&self, element: &ElementId, class: &str);

    /// Remove a class from an element.
    fn remove_class(&self, element: &ElementId, class: &str);

    /// Set a field's custom validity message; an empty message clears it.
    fn set_custom_validity(&self, field: &ElementId, message: &str);

    /// Text of every cell, row by row, of a table; `None` when there is no such table.
    fn table_rows(&self, table: &ElementId) -> Option<Vec<Vec<String>>>;

    /// Hand a file to the user.
    fn download(&self, file: Download);

    /// Navigate the page to another URL.
    fn navigate(&self, url: &Url);

    /// Render a product's like state.
    fn render_like(&self, product_id: ProductId, status: &LikeStatus);
}
