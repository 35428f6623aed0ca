//! GameHub catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP GET with `reqwest`
//! - The catalog is the source of truth for products; nothing is synced locally
//! - In-memory caching via `moka` for API responses (5 minute TTL by default)
//!
//! Every failure is normalized into [`CatalogError`], whose `Display` is a
//! message fit to show a shopper.
//!
//! # Example
//!
//! ```rust,ignore
//! use gamehub_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let products = client.fetch_products().await?;
//! let product = client.fetch_product(products[0].id.as_str()).await?;
//! ```

mod cache;

use std::sync::Arc;

use gamehub_core::Product;
use moka::future::Cache;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

/// Path segment of the product collection under the API base URL.
const COLLECTION: &str = "gamehub";

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP client could not be constructed.
    #[error("Could not start the catalog client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("Network error: Could not reach the API. Try again.")]
    Network(#[source] reqwest::Error),

    /// The response body is not JSON.
    #[error("Server returned invalid JSON.")]
    InvalidJson(#[source] serde_json::Error),

    /// The API answered with a non-success status.
    #[error("{}", .message.as_deref().unwrap_or("API error: Request failed."))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The payload's `data` field has the wrong shape.
    #[error("Unexpected API format: expected {0}.")]
    UnexpectedFormat(&'static str),

    /// No product id was supplied.
    #[error("Missing product id in URL.")]
    MissingId,
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the GameHub catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Client` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(CatalogError::Client)?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// The body is parsed before the status is checked so that error payloads
    /// can supply the message.
    async fn request_json(&self, url: Url) -> Result<Value, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Catalog request failed");
                CatalogError::Network(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(CatalogError::Network)?;

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            warn!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog returned a non-JSON body"
            );
            CatalogError::InvalidJson(e)
        })?;

        if !status.is_success() {
            let message = payload
                .pointer("/errors/0/message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            warn!(status = %status, message = ?message, "Catalog returned non-success status");
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(payload)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch every product in the catalog.
    ///
    /// Entries that are not product records are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or `data` is not an array.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products.as_ref().clone());
        }

        let payload = self.request_json(self.endpoint(&[COLLECTION])).await?;
        let Some(Value::Array(entries)) = payload.get("data") else {
            return Err(CatalogError::UnexpectedFormat("an array"));
        };

        let products: Vec<Product> = entries
            .iter()
            .filter_map(|entry| match Product::deserialize(entry) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed catalog entry");
                    None
                }
            })
            .collect();
        debug!(count = products.len(), "Fetched products");

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(Arc::new(products.clone())))
            .await;

        Ok(products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `MissingId` for a blank id, or an error if the request fails or
    /// `data` is not an object.
    #[instrument(skip(self))]
    pub async fn fetch_product(&self, id: &str) -> Result<Product, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CatalogError::MissingId);
        }

        let cache_key = CacheKey::Product(id.to_string());
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let payload = self.request_json(self.endpoint(&[COLLECTION, id])).await?;
        let data = match payload.get("data") {
            Some(data @ Value::Object(_)) => data,
            _ => return Err(CatalogError::UnexpectedFormat("an object")),
        };
        let product =
            Product::deserialize(data).map_err(|_| CatalogError::UnexpectedFormat("an object"))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: Url::parse(&server.uri()).unwrap(),
            cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn space_war() -> Value {
        json!({
            "id": "g1",
            "title": "Space War",
            "genre": "Action",
            "price": 20,
            "discountedPrice": 15,
            "image": { "url": "https://example.com/g1.jpg", "alt": "" }
        })
    }

    #[test]
    fn test_api_error_message_fallback() {
        let err = CatalogError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "API error: Request failed.");

        let err = CatalogError::Api {
            status: 404,
            message: Some("No product with such ID".to_string()),
        };
        assert_eq!(err.to_string(), "No product with such ID");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = CatalogClient::new(&CatalogConfig {
            base_url: Url::parse("https://api.example.com/v2/").unwrap(),
            cache_ttl: Duration::from_secs(1),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap();

        assert_eq!(
            client.endpoint(&[COLLECTION, "a b/c"]).as_str(),
            "https://api.example.com/v2/gamehub/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_fetch_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [space_war(), 42, { "id": "g2", "title": "Puzzle Box" }],
                "meta": { "isFirstPage": true }
            })))
            .mount(&server)
            .await;

        let products = client_for(&server).fetch_products().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.as_str(), "g1");
        assert_eq!(products[0].effective_price(), Decimal::from(15));
        assert_eq!(products[1].display_title(), "Puzzle Box");
    }

    #[tokio::test]
    async fn test_fetch_products_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [space_war()] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.fetch_products().await.unwrap();
        let products = client.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [space_war()] })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.fetch_products().await.unwrap();
        client.invalidate_all();
        let products = client.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_products_rejects_non_array_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": space_war() })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_products().await.unwrap_err();
        assert_eq!(err.to_string(), "Unexpected API format: expected an array.");
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported_before_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidJson(_)));
        assert_eq!(err.to_string(), "Server returned invalid JSON.");
    }

    #[tokio::test]
    async fn test_fetch_product_uses_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{ "message": "No product with such ID" }],
                "status": "Not Found",
                "statusCode": 404
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_product("missing").await.unwrap_err();
        assert!(matches!(err, CatalogError::Api { status: 404, .. }));
        assert_eq!(err.to_string(), "No product with such ID");
    }

    #[tokio::test]
    async fn test_fetch_product_without_error_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub/g1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_product("g1").await.unwrap_err();
        assert_eq!(err.to_string(), "API error: Request failed.");
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub/g1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": space_war() })))
            .mount(&server)
            .await;

        let product = client_for(&server).fetch_product("g1").await.unwrap();
        assert_eq!(product.display_title(), "Space War");
        assert_eq!(product.genre(), Some("Action"));
    }

    #[tokio::test]
    async fn test_fetch_product_rejects_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamehub/g1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_product("g1").await.unwrap_err();
        assert_eq!(err.to_string(), "Unexpected API format: expected an object.");
    }

    #[tokio::test]
    async fn test_fetch_product_requires_id() {
        let server = MockServer::start().await;
        let err = client_for(&server).fetch_product("  ").await.unwrap_err();
        assert!(matches!(err, CatalogError::MissingId));
        assert_eq!(err.to_string(), "Missing product id in URL.");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = CatalogClient::new(&CatalogConfig {
            base_url: Url::parse(&format!("http://127.0.0.1:{port}")).unwrap(),
            cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let err = client.fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
        assert_eq!(
            err.to_string(),
            "Network error: Could not reach the API. Try again."
        );
    }
}
