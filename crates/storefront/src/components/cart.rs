//! Cart badge and quantity controls.

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use shopsphere_core::CartItemId;
use thiserror::Error;
use tracing::debug;

use crate::presenter::Presenter;

/// Source of the number of items in the cart.
pub trait CartCountSource: Send + Sync {
    fn cart_items_count(&self) -> u32;
}

/// Count source used until a real one is plugged in; always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubCartCount;

impl CartCountSource for StubCartCount {
    fn cart_items_count(&self) -> u32 {
        0
    }
}

/// The cart badge in the navigation bar.
pub struct CartBadge {
    presenter: Arc<dyn Presenter>,
    source: Arc<dyn CartCountSource>,
    present: AtomicBool,
}

impl CartBadge {
    /// A badge assumed present on the page until told otherwise.
    #[must_use]
    pub fn new(presenter: Arc<dyn Presenter>, source: Arc<dyn CartCountSource>) -> Self {
        Self {
            presenter,
            source,
            present: AtomicBool::new(true),
        }
    }

    /// Record whether the page has a `.cart-badge`.
    pub fn set_present(&self, present: bool) {
        self.present.store(present, Ordering::Relaxed);
    }

    /// Re-read the count and render it; the badge shows only for a non-empty cart.
    ///
    /// Returns the rendered count, or `None` when the page has no badge.
    pub fn update(&self) -> Option<u32> {
        if !self.present.load(Ordering::Relaxed) {
            return None;
        }
        let count = self.source.cart_items_count();
        debug!(count, "Updating cart badge");
        self.presenter.render_cart_badge(count, count > 0);
        Some(count)
    }
}

/// `data-action` of a quantity button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityAction {
    Increase,
    Decrease,
}

impl QuantityAction {
    /// The quantity after applying the action; decreasing stops at zero.
    #[must_use]
    pub const fn apply(self, current: u32) -> u32 {
        match self {
            Self::Increase => current.saturating_add(1),
            Self::Decrease => current.saturating_sub(1),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

impl fmt::Display for QuantityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised `data-action` value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quantity action: {0:?}")]
pub struct UnknownQuantityAction(pub String);

impl FromStr for QuantityAction {
    type Err = UnknownQuantityAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            other => Err(UnknownQuantityAction(other.to_string())),
        }
    }
}

/// A click on a `.cart-quantity-btn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartQuantityClick {
    pub item_id: CartItemId,
    pub action: QuantityAction,
    /// Quantity shown in the line's input when the button was clicked
    pub current_quantity: u32,
}

/// Raw `data-*` attributes of a quantity button that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityClickError {
    #[error(transparent)]
    Action(#[from] UnknownQuantityAction),
    #[error(transparent)]
    ItemId(#[from] shopsphere_core::ParseIdError),
    #[error("invalid quantity: {0:?}")]
    Quantity(String),
}

impl CartQuantityClick {
    /// Build a click from the button's `data-action`, `data-item-id` and the
    /// line's current quantity text.
    ///
    /// # Errors
    ///
    /// Returns error if any attribute does not parse.
    pub fn from_attributes(
        action: &str,
        item_id: &str,
        current_quantity: &str,
    ) -> Result<Self, QuantityClickError> {
        let current = current_quantity.trim();
        Ok(Self {
            action: action.parse()?,
            item_id: item_id.parse()?,
            current_quantity: current
                .parse()
                .map_err(|_| QuantityClickError::Quantity(current.to_string()))?,
        })
    }

    /// The quantity the line should be set to.
    #[must_use]
    pub const fn new_quantity(&self) -> u32 {
        self.action.apply(self.current_quantity)
    }
}
