//! Request and response types for the storefront backend.

use serde::{Deserialize, Serialize};
use shopsphere_core::ProductId;
use url::Url;

/// Size used by quick add-to-cart when the caller does not pick one.
pub const DEFAULT_SIZE: &str = "M";

/// Result of a backend action that answers with a redirect or a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend redirected; the page should navigate to the target.
    Redirect(Url),
    /// The action completed with a (possibly empty) text body.
    Completed(String),
}

/// Quick add-to-cart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub size: String,
    pub quantity: u32,
}

impl AddToCartRequest {
    /// A single unit of a product in the given size (default `M`).
    #[must_use]
    pub fn single(product_id: ProductId, size: Option<&str>) -> Self {
        Self {
            product_id,
            size: size.unwrap_or(DEFAULT_SIZE).to_string(),
            quantity: 1,
        }
    }
}

/// Like state of a product after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes_count: u32,
}

/// Result of a like toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The backend redirected (usually to the login page).
    Redirect(Url),
    /// The new like state.
    Updated(LikeStatus),
}
