//! Integration tests for add to cart, wishlist and like actions.
//!
//! Each test runs the storefront layer against an in-process mock backend.
//!
//! Run with: cargo test -p shopsphere-integration-tests

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use shopsphere_core::{ProductId, Severity};
use shopsphere_integration_tests::{Received, closed_backend, spawn_backend, storefront};
use shopsphere_storefront::backend::{ClientError, LikeStatus};
use shopsphere_storefront::services::ActionResult;
use shopsphere_storefront::services::products::{
    ADD_TO_CART_FAILED_MESSAGE, ADD_TO_WISHLIST_FAILED_MESSAGE, ADDED_TO_CART_MESSAGE,
    ADDED_TO_WISHLIST_MESSAGE, LIKE_FAILED_MESSAGE,
};
use shopsphere_storefront::testing::Call;
use tokio::sync::Notify;

async fn record_multipart(State(received): State<Received>, mut multipart: Multipart) -> &'static str {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap().to_string();
        let value = field.text().await.unwrap();
        received.push(name, value);
    }
    "OK"
}

// ============================================================================
// Add to cart
// ============================================================================

#[tokio::test]
async fn test_quick_add_to_cart_success() {
    let received = Received::default();
    let base = spawn_backend(
        Router::new()
            .route("/add_to_cart", post(record_multipart))
            .with_state(received.clone()),
    )
    .await;
    let (presenter, storefront) = storefront(base);

    let result = storefront.quick_add_to_cart(ProductId::new(42), None).await;

    assert!(matches!(result, ActionResult::Updated));
    assert_eq!(received.get("product_id").as_deref(), Some("42"));
    assert_eq!(received.get("size").as_deref(), Some("M"));
    assert_eq!(received.get("quantity").as_deref(), Some("1"));
    assert_eq!(
        presenter.toasts(),
        vec![(ADDED_TO_CART_MESSAGE.to_string(), Severity::Success)]
    );
    assert_eq!(presenter.cart_badge(), Some((0, false)));
    assert_eq!(presenter.overlay_visible(), Some(false));
}

#[tokio::test]
async fn test_quick_add_to_cart_with_size() {
    let received = Received::default();
    let base = spawn_backend(
        Router::new()
            .route("/add_to_cart", post(record_multipart))
            .with_state(received.clone()),
    )
    .await;
    let (_presenter, storefront) = storefront(base);

    storefront.quick_add_to_cart(ProductId::new(7), Some("XL")).await;
    assert_eq!(received.get("size").as_deref(), Some("XL"));
}

#[tokio::test]
async fn test_quick_add_to_cart_redirect_navigates() {
    let base = spawn_backend(Router::new().route(
        "/add_to_cart",
        post(|| async { Redirect::to("/login?next=/cart") }),
    ))
    .await;
    let (presenter, storefront) = storefront(base.clone());

    let result = storefront.quick_add_to_cart(ProductId::new(42), None).await;

    let expected = base.join("/login?next=/cart").unwrap();
    assert!(matches!(result, ActionResult::Navigated(ref url) if *url == expected));
    assert_eq!(presenter.navigations(), vec![expected]);
    assert!(presenter.toasts().is_empty());
    assert_eq!(presenter.overlay_visible(), Some(false));
}

#[tokio::test]
async fn test_quick_add_to_cart_server_error() {
    let base = spawn_backend(Router::new().route(
        "/add_to_cart",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await;
    let (presenter, storefront) = storefront(base);

    let result = storefront.quick_add_to_cart(ProductId::new(42), None).await;

    assert!(matches!(
        result,
        ActionResult::Failed(ClientError::Status { status: 500, .. })
    ));
    assert_eq!(
        presenter.toasts(),
        vec![(ADD_TO_CART_FAILED_MESSAGE.to_string(), Severity::Danger)]
    );
    assert_eq!(presenter.overlay_visible(), Some(false));
    assert!(presenter.navigations().is_empty());
}

// ============================================================================
// Wishlist
// ============================================================================

#[tokio::test]
async fn test_add_to_wishlist_updates_in_place() {
    let received = Received::default();
    let base = spawn_backend(
        Router::new()
            .route(
                "/add_to_wishlist/{id}",
                get(|State(received): State<Received>, Path(id): Path<String>| async move {
                    received.push("product_id", id);
                    "Added"
                }),
            )
            .with_state(received.clone()),
    )
    .await;
    let (presenter, storefront) = storefront(base);

    let result = storefront.add_to_wishlist(ProductId::new(9)).await;

    assert!(matches!(result, ActionResult::Updated));
    assert_eq!(received.get("product_id").as_deref(), Some("9"));
    assert_eq!(
        presenter.toasts(),
        vec![(ADDED_TO_WISHLIST_MESSAGE.to_string(), Severity::Success)]
    );
    assert!(presenter.navigations().is_empty());
}

#[tokio::test]
async fn test_add_to_wishlist_connection_failure() {
    let (presenter, storefront) = storefront(closed_backend().await);

    let result = storefront.add_to_wishlist(ProductId::new(9)).await;

    assert!(matches!(result, ActionResult::Failed(ClientError::Http(_))));
    assert_eq!(
        presenter.toasts(),
        vec![(ADD_TO_WISHLIST_FAILED_MESSAGE.to_string(), Severity::Danger)]
    );
    assert_eq!(presenter.overlay_visible(), Some(false));
}

// ============================================================================
// Like
// ============================================================================

#[tokio::test]
async fn test_toggle_like_renders_status() {
    let base = spawn_backend(Router::new().route(
        "/like_product/{id}",
        get(|| async { Json(json!({"liked": true, "likes_count": 5})) }),
    ))
    .await;
    let (presenter, storefront) = storefront(base);

    let result = storefront.toggle_like(ProductId::new(3)).await;

    assert!(matches!(result, ActionResult::Updated));
    assert_eq!(
        presenter.count(|c| *c
            == Call::Like {
                product_id: ProductId::new(3),
                status: LikeStatus {
                    liked: true,
                    likes_count: 5
                }
            }),
        1
    );
    assert!(presenter.toasts().is_empty());
}

#[tokio::test]
async fn test_toggle_like_malformed_body() {
    let base = spawn_backend(Router::new().route(
        "/like_product/{id}",
        get(|| async { "<html>login</html>" }),
    ))
    .await;
    let (presenter, storefront) = storefront(base);

    let result = storefront.toggle_like(ProductId::new(3)).await;

    assert!(matches!(result, ActionResult::Failed(ClientError::Parse(_))));
    assert_eq!(
        presenter.toasts(),
        vec![(LIKE_FAILED_MESSAGE.to_string(), Severity::Danger)]
    );
}

#[tokio::test]
async fn test_toggle_like_redirects_to_login() {
    let base = spawn_backend(Router::new().route(
        "/like_product/{id}",
        get(|| async { Redirect::to("/login") }),
    ))
    .await;
    let (presenter, storefront) = storefront(base.clone());

    storefront.toggle_like(ProductId::new(3)).await;
    assert_eq!(presenter.navigations(), vec![base.join("/login").unwrap()]);
}

// ============================================================================
// Shared overlay
// ============================================================================

#[derive(Clone)]
struct Gate {
    arrived: Arc<Notify>,
    release: Arc<Notify>,
}

async fn gated(State(gate): State<Gate>) -> impl IntoResponse {
    gate.arrived.notify_one();
    gate.release.notified().await;
    "Added"
}

#[tokio::test]
async fn test_overlay_stays_visible_while_any_action_is_pending() {
    let gate = Gate {
        arrived: Arc::new(Notify::new()),
        release: Arc::new(Notify::new()),
    };
    let base = spawn_backend(
        Router::new()
            .route("/add_to_wishlist/{id}", get(gated))
            .route("/add_to_cart", post(|| async { "OK" }))
            .with_state(gate.clone()),
    )
    .await;
    let (presenter, storefront) = storefront(base);

    let slow = {
        let storefront = storefront.clone();
        tokio::spawn(async move { storefront.add_to_wishlist(ProductId::new(1)).await })
    };
    gate.arrived.notified().await;

    let fast = storefront.quick_add_to_cart(ProductId::new(2), None).await;
    assert!(matches!(fast, ActionResult::Updated));
    assert!(storefront.overlay().is_visible());
    assert_eq!(presenter.overlay_visible(), Some(true));

    gate.release.notify_one();
    assert!(matches!(slow.await.unwrap(), ActionResult::Updated));
    assert!(!storefront.overlay().is_visible());
    assert_eq!(presenter.overlay_visible(), Some(false));
}
