//! Integration tests for cart quantity buttons.
//!
//! Run with: cargo test -p shopsphere-integration-tests

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::routing::post;
use axum::{Form, Router};
use shopsphere_core::Severity;
use shopsphere_integration_tests::{Received, spawn_backend, storefront};
use shopsphere_storefront::backend::ClientError;
use shopsphere_storefront::components::CartQuantityClick;
use shopsphere_storefront::services::ActionResult;
use shopsphere_storefront::services::products::{
    CART_UPDATE_FAILED_MESSAGE, CART_UPDATED_MESSAGE,
};

async fn update_cart(
    State(received): State<Received>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    for (name, value) in fields {
        received.push(name, value);
    }
    "Cart updated"
}

async fn backend() -> (Received, url::Url) {
    let received = Received::default();
    let base = spawn_backend(
        Router::new()
            .route("/update_cart", post(update_cart))
            .with_state(received.clone()),
    )
    .await;
    (received, base)
}

#[tokio::test]
async fn test_increase_posts_new_quantity() {
    let (received, base) = backend().await;
    let (presenter, storefront) = storefront(base);

    let click = CartQuantityClick::from_attributes("increase", "7", "2").unwrap();
    let result = storefront.on_cart_quantity_click(click).await;

    assert!(matches!(result, ActionResult::Updated));
    assert_eq!(received.fields(), vec![("quantity_7".to_string(), "3".to_string())]);
    assert_eq!(
        presenter.toasts(),
        vec![(CART_UPDATED_MESSAGE.to_string(), Severity::Success)]
    );
    assert_eq!(presenter.cart_badge(), Some((0, false)));
    assert_eq!(presenter.overlay_visible(), Some(false));
}

#[tokio::test]
async fn test_decrease_to_zero_removes_line() {
    let (received, base) = backend().await;
    let (_presenter, storefront) = storefront(base);

    let click = CartQuantityClick::from_attributes("decrease", "7", "1").unwrap();
    storefront.on_cart_quantity_click(click).await;
    let click = CartQuantityClick::from_attributes("decrease", "8", "0").unwrap();
    storefront.on_cart_quantity_click(click).await;

    assert_eq!(received.get("quantity_7").as_deref(), Some("0"));
    assert_eq!(received.get("quantity_8").as_deref(), Some("0"));
}

#[tokio::test]
async fn test_rejected_update_shows_failure() {
    let base = spawn_backend(Router::new().route(
        "/update_cart",
        post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "Not enough stock") }),
    ))
    .await;
    let (presenter, storefront) = storefront(base);

    let click = CartQuantityClick::from_attributes("increase", "7", "9").unwrap();
    let result = storefront.on_cart_quantity_click(click).await;

    match result {
        ActionResult::Failed(ClientError::Status { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Not enough stock");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(
        presenter.toasts(),
        vec![(CART_UPDATE_FAILED_MESSAGE.to_string(), Severity::Danger)]
    );
    assert_eq!(presenter.overlay_visible(), Some(false));
}

#[tokio::test]
async fn test_update_redirect_navigates_without_toast() {
    let base = spawn_backend(Router::new().route(
        "/update_cart",
        post(|| async { Redirect::to("/login?next=/cart") }),
    ))
    .await;
    let (presenter, storefront) = storefront(base.clone());

    let click = CartQuantityClick::from_attributes("increase", "7", "2").unwrap();
    let result = storefront.on_cart_quantity_click(click).await;

    let expected = base.join("/login?next=/cart").unwrap();
    assert!(matches!(result, ActionResult::Navigated(ref url) if *url == expected));
    assert_eq!(presenter.navigations(), vec![expected]);
    assert!(presenter.toasts().is_empty());
    assert_eq!(presenter.overlay_visible(), Some(false));
}

#[tokio::test]
async fn test_quantity_button_attributes_post_update() {
    let (received, base) = backend().await;
    let (presenter, storefront) = storefront(base);

    let result = storefront
        .on_cart_quantity_button("decrease", " 12 ", "4")
        .await;

    assert!(matches!(result, Some(ActionResult::Updated)));
    assert_eq!(received.fields(), vec![("quantity_12".to_string(), "3".to_string())]);
    assert_eq!(
        presenter.toasts(),
        vec![(CART_UPDATED_MESSAGE.to_string(), Severity::Success)]
    );
}
