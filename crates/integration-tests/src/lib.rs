//! Integration test support for the ShopSphere storefront layer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopsphere-integration-tests
//! ```
//!
//! Each test starts an in-process `axum` mock of the storefront backend on
//! an ephemeral port and drives the storefront layer against it with a
//! recording presenter.

use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use shopsphere_storefront::testing::RecordingPresenter;
use shopsphere_storefront::{PageSnapshot, Storefront, StorefrontConfig};
use tokio::net::TcpListener;
use url::Url;

/// Form fields received by a mock endpoint, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Received {
    fields: Arc<Mutex<Vec<(String, String)>>>,
}

impl Received {
    /// Record a field.
    pub fn push(&self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.into(), value.into()));
    }

    /// All recorded fields.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, String)> {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The last value recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.fields()
            .into_iter()
            .rev()
            .find_map(|(n, v)| (n == name).then_some(v))
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn_backend(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Mock backend has no address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Url::parse(&format!("http://{addr}/")).expect("Mock backend URL is valid")
}

/// A base URL nothing is listening on.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn closed_backend() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("Probe URL is valid")
}

/// A storefront for a page with a cart badge, talking to `base_url`.
///
/// # Panics
///
/// Panics if the storefront cannot be built.
#[must_use]
pub fn storefront(base_url: Url) -> (Arc<RecordingPresenter>, Storefront) {
    let presenter = Arc::new(RecordingPresenter::new());
    let storefront = Storefront::new(StorefrontConfig::new(base_url), presenter.clone())
        .expect("Failed to build storefront");
    storefront.init(&PageSnapshot {
        has_cart_badge: true,
        ..PageSnapshot::default()
    });
    presenter.clear();
    (presenter, storefront)
}
