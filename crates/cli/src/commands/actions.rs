//! Backend actions.
//!
//! # Environment Variables
//!
//! - `SHOPSPHERE_BASE_URL` - Storefront backend to talk to
//! - `SHOPSPHERE_HTTP_TIMEOUT_SECS` - Optional request timeout

use std::sync::Arc;

use shopsphere_core::{ParseIdError, ProductId};
use shopsphere_storefront::components::{CartQuantityClick, QuantityClickError};
use shopsphere_storefront::services::ActionResult;
use shopsphere_storefront::{PageSnapshot, Storefront, StorefrontConfig};
use thiserror::Error;

use crate::console::ConsolePresenter;

/// Errors that can occur while running a backend action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Configuration or client setup failed.
    #[error(transparent)]
    Storefront(#[from] shopsphere_storefront::Error),

    /// A product or cart line ID did not parse.
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    /// A quantity button click did not parse.
    #[error(transparent)]
    InvalidClick(#[from] QuantityClickError),

    /// The backend request failed.
    #[error("{action} failed: {source}")]
    Failed {
        action: &'static str,
        source: shopsphere_storefront::backend::ClientError,
    },
}

/// Build a storefront for a page with a cart badge.
fn storefront() -> Result<Storefront, ActionError> {
    let config = StorefrontConfig::from_env().map_err(shopsphere_storefront::Error::from)?;
    tracing::debug!(base_url = %config.base_url, "Using storefront backend");
    let storefront = Storefront::new(config, Arc::new(ConsolePresenter::new()))?;
    storefront.init(&PageSnapshot {
        has_cart_badge: true,
        ..PageSnapshot::default()
    });
    Ok(storefront)
}

fn finish(action: &'static str, result: ActionResult) -> Result<(), ActionError> {
    match result {
        ActionResult::Navigated(_) | ActionResult::Updated => Ok(()),
        ActionResult::Failed(source) => Err(ActionError::Failed { action, source }),
    }
}

/// Quick add one unit of a product to the cart.
///
/// # Errors
///
/// Returns error if the product ID is invalid, configuration is missing,
/// or the request fails.
pub async fn add_to_cart(product_id: &str, size: Option<&str>) -> Result<(), ActionError> {
    let product_id: ProductId = product_id.parse()?;
    let storefront = storefront()?;
    finish(
        "add to cart",
        storefront.quick_add_to_cart(product_id, size).await,
    )
}

/// Increase or decrease the quantity of a cart line.
///
/// # Errors
///
/// Returns error if the arguments are invalid, configuration is missing,
/// or the request fails.
pub async fn update_quantity(item_id: &str, action: &str, current: &str) -> Result<(), ActionError> {
    let click = CartQuantityClick::from_attributes(action, item_id, current)?;
    let storefront = storefront()?;
    tracing::info!(
        item_id = %click.item_id,
        quantity = click.new_quantity(),
        "Updating cart line"
    );
    finish(
        "update cart",
        storefront.on_cart_quantity_click(click).await,
    )
}

/// Add a product to the wishlist.
///
/// # Errors
///
/// Returns error if the product ID is invalid, configuration is missing,
/// or the request fails.
pub async fn add_to_wishlist(product_id: &str) -> Result<(), ActionError> {
    let product_id: ProductId = product_id.parse()?;
    let storefront = storefront()?;
    finish(
        "add to wishlist",
        storefront.add_to_wishlist(product_id).await,
    )
}

/// Toggle the like on a product.
///
/// # Errors
///
/// Returns error if the product ID is invalid, configuration is missing,
/// or the request fails.
pub async fn toggle_like(product_id: &str) -> Result<(), ActionError> {
    let product_id: ProductId = product_id.parse()?;
    let storefront = storefront()?;
    finish("like", storefront.toggle_like(product_id).await)
}
