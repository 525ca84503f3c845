//! Product and cart actions.
//!
//! Every action holds the loading overlay for the duration of its request,
//! then updates the page in place: a redirect navigates, a success refreshes
//! the cart badge or like button and shows a toast, a failure is reported
//! and shown as a danger toast.

use std::sync::Arc;

use shopsphere_core::{ProductId, Severity};
use tracing::{info, instrument};
use url::Url;

use crate::backend::{ActionOutcome, AddToCartRequest, ClientError, LikeOutcome, StorefrontApi};
use crate::components::{CartBadge, CartQuantityClick, LoadingOverlay, Notifier};
use crate::error::{add_breadcrumb, report};
use crate::presenter::Presenter;

pub const CART_UPDATED_MESSAGE: &str = "Cart updated successfully";
pub const CART_UPDATE_FAILED_MESSAGE: &str = "Failed to update cart";
pub const ADDED_TO_CART_MESSAGE: &str = "Item added to cart!";
pub const ADD_TO_CART_FAILED_MESSAGE: &str = "Failed to add to cart";
pub const ADDED_TO_WISHLIST_MESSAGE: &str = "Added to wishlist";
pub const ADD_TO_WISHLIST_FAILED_MESSAGE: &str = "Failed to add to wishlist";
pub const LIKE_FAILED_MESSAGE: &str = "Failed to update like";

/// How a product action ended.
#[derive(Debug)]
pub enum ActionResult {
    /// The backend redirected and the page navigated to the target.
    Navigated(Url),
    /// The page was updated in place.
    Updated,
    /// The request failed; the user saw a danger toast.
    Failed(ClientError),
}

impl ActionResult {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Backend-driven product actions.
#[derive(Clone)]
pub struct ProductActions {
    api: StorefrontApi,
    presenter: Arc<dyn Presenter>,
    overlay: LoadingOverlay,
    notifier: Notifier,
    badge: Arc<CartBadge>,
}

impl ProductActions {
    #[must_use]
    pub fn new(
        api: StorefrontApi,
        presenter: Arc<dyn Presenter>,
        overlay: LoadingOverlay,
        notifier: Notifier,
        badge: Arc<CartBadge>,
    ) -> Self {
        Self {
            api,
            presenter,
            overlay,
            notifier,
            badge,
        }
    }

    /// Add one unit of a product to the cart, in `size` (default `M`).
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn quick_add_to_cart(&self, product_id: ProductId, size: Option<&str>) -> ActionResult {
        let request = AddToCartRequest::single(product_id, size);
        add_breadcrumb(
            "cart",
            "Quick add to cart",
            serde_json::json!({"product_id": product_id, "size": request.size}).as_object(),
        );

        let outcome = {
            let _spinner = self.overlay.acquire();
            self.api.add_to_cart(&request).await
        };

        match outcome {
            Ok(ActionOutcome::Redirect(target)) => self.navigate(target),
            Ok(ActionOutcome::Completed(_)) => {
                self.badge.update();
                self.notifier.show(ADDED_TO_CART_MESSAGE, Severity::Success);
                info!("Item added to cart");
                ActionResult::Updated
            }
            Err(e) => self.fail("add_to_cart", e, ADD_TO_CART_FAILED_MESSAGE),
        }
    }

    /// Add a product to the wishlist.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_wishlist(&self, product_id: ProductId) -> ActionResult {
        let outcome = {
            let _spinner = self.overlay.acquire();
            self.api.add_to_wishlist(product_id).await
        };

        match outcome {
            Ok(ActionOutcome::Redirect(target)) => self.navigate(target),
            Ok(ActionOutcome::Completed(_)) => {
                self.notifier.show(ADDED_TO_WISHLIST_MESSAGE, Severity::Success);
                ActionResult::Updated
            }
            Err(e) => self.fail("add_to_wishlist", e, ADD_TO_WISHLIST_FAILED_MESSAGE),
        }
    }

    /// Toggle the user's like on a product and render the new state.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn toggle_like(&self, product_id: ProductId) -> ActionResult {
        let outcome = {
            let _spinner = self.overlay.acquire();
            self.api.toggle_like(product_id).await
        };

        match outcome {
            Ok(LikeOutcome::Redirect(target)) => self.navigate(target),
            Ok(LikeOutcome::Updated(status)) => {
                self.presenter.render_like(product_id, &status);
                ActionResult::Updated
            }
            Err(e) => self.fail("toggle_like", e, LIKE_FAILED_MESSAGE),
        }
    }

    /// Apply a quantity button click to its cart line.
    #[instrument(skip(self), fields(item_id = %click.item_id, action = %click.action))]
    pub async fn update_cart_item_quantity(&self, click: CartQuantityClick) -> ActionResult {
        let quantity = click.new_quantity();
        let outcome = {
            let _spinner = self.overlay.acquire();
            self.api.update_cart_quantity(click.item_id, quantity).await
        };

        match outcome {
            Ok(ActionOutcome::Redirect(target)) => self.navigate(target),
            Ok(ActionOutcome::Completed(_)) => {
                self.badge.update();
                self.notifier.show(CART_UPDATED_MESSAGE, Severity::Success);
                info!(quantity, "Cart line updated");
                ActionResult::Updated
            }
            Err(e) => self.fail("update_cart", e, CART_UPDATE_FAILED_MESSAGE),
        }
    }

    fn navigate(&self, target: Url) -> ActionResult {
        self.presenter.navigate(&target);
        ActionResult::Navigated(target)
    }

    fn fail(&self, action: &str, err: ClientError, message: &str) -> ActionResult {
        report(action, &err);
        self.notifier.show(message, Severity::Danger);
        ActionResult::Failed(err)
    }
}
