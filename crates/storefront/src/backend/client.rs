//! HTTP client for the storefront backend endpoints.

use reqwest::header::LOCATION;
use reqwest::{Response, redirect};
use shopsphere_core::{CartItemId, ProductId};
use tracing::{debug, instrument};
use url::Url;

use super::{ActionOutcome, AddToCartRequest, ClientError, LikeOutcome, LikeStatus};
use crate::config::StorefrontConfig;

/// Client for the storefront backend.
///
/// Cheap to clone; clones share the underlying connection pool. No cookie
/// store is kept, so login-protected endpoints answer with a redirect to the
/// login page, which callers surface as a navigation.
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: reqwest::Client,
    base_url: Url,
}

impl StorefrontApi {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().redirect(redirect::Policy::none());
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    /// The base URL endpoint paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Add a product to the signed-in user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers with an
    /// error status.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_wishlist(&self, product_id: ProductId) -> Result<ActionOutcome, ClientError> {
        let url = self.endpoint(&format!("add_to_wishlist/{product_id}"))?;
        let response = self.client.get(url).send().await?;
        action_outcome(response).await
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers with an
    /// error status.
    #[instrument(skip(self), fields(product_id = %request.product_id, size = %request.size))]
    pub async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<ActionOutcome, ClientError> {
        let url = self.endpoint("add_to_cart")?;
        let form = reqwest::multipart::Form::new()
            .text("product_id", request.product_id.to_string())
            .text("size", request.size.clone())
            .text("quantity", request.quantity.to_string());

        let response = self.client.post(url).multipart(form).send().await?;
        action_outcome(response).await
    }

    /// Set the quantity of a cart line; a quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers with an
    /// error status.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_cart_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<ActionOutcome, ClientError> {
        let url = self.endpoint("update_cart")?;
        let field = format!("quantity_{item_id}");
        let value = quantity.to_string();

        let response = self
            .client
            .post(url)
            .form(&[(field.as_str(), value.as_str())])
            .send()
            .await?;
        action_outcome(response).await
    }

    /// Toggle the signed-in user's like on a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend answers with an error
    /// status, or the body is not a like status.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn toggle_like(&self, product_id: ProductId) -> Result<LikeOutcome, ClientError> {
        let url = self.endpoint(&format!("like_product/{product_id}"))?;
        let response = self.client.get(url).send().await?;

        if let Some(target) = redirect_target(&response)? {
            return Ok(LikeOutcome::Redirect(target));
        }
        let response = ensure_success(response).await?;

        let status: LikeStatus = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(LikeOutcome::Updated(status))
    }

    /// Resolve an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }
}

/// Turn a response into a redirect or a completed body.
async fn action_outcome(response: Response) -> Result<ActionOutcome, ClientError> {
    if let Some(target) = redirect_target(&response)? {
        return Ok(ActionOutcome::Redirect(target));
    }
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    debug!(bytes = body.len(), "Backend action completed");
    Ok(ActionOutcome::Completed(body))
}

/// The absolute redirect target of a `3xx` response, if it is one.
fn redirect_target(response: &Response) -> Result<Option<Url>, ClientError> {
    if !response.status().is_redirection() {
        return Ok(None);
    }

    let location = response
        .headers()
        .get(LOCATION)
        .ok_or_else(|| ClientError::InvalidRedirect("missing Location header".to_string()))?
        .to_str()
        .map_err(|e| ClientError::InvalidRedirect(e.to_string()))?;

    // Location may be relative to the request URL
    let target = response.url().join(location)?;
    debug!(%target, "Backend redirected");
    Ok(Some(target))
}

/// Fail on non-success statuses, keeping the body as the error message.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn api(base: &str) -> StorefrontApi {
        StorefrontApi::new(&StorefrontConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn test_endpoint_resolution() {
        let api = api("https://shop.example.in/");
        assert_eq!(
            api.endpoint("add_to_wishlist/7").unwrap().as_str(),
            "https://shop.example.in/add_to_wishlist/7"
        );
    }

    #[test]
    fn test_endpoint_under_path_prefix() {
        let api = api("https://example.in/store/");
        assert_eq!(
            api.endpoint("add_to_cart").unwrap().as_str(),
            "https://example.in/store/add_to_cart"
        );
    }
}
