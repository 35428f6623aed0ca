//! Integration tests for the GameHub storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gamehub-integration-tests
//! ```
//!
//! No network access or setup is needed: the catalog API is served by a
//! local `wiremock` server and storage lives in a temporary directory.
//!
//! # Test Categories
//!
//! - `shopping_flow` - browse, add, check out, confirm
//! - `catalog_errors` - catalog failures as shown to shoppers

use std::net::TcpListener;

use gamehub_storefront::config::StorefrontConfig;
use gamehub_storefront::state::AppState;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A storefront wired to a mock catalog and a temporary data directory.
pub struct TestContext {
    pub server: MockServer,
    pub state: AppState,
    pub data_dir: TempDir,
}

impl TestContext {
    /// Start a mock catalog with no routes mounted.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or the state cannot be created.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let data_dir = TempDir::new().expect("create temp data dir");
        let state = state_for(&server.uri(), &data_dir);
        Self {
            server,
            state,
            data_dir,
        }
    }

    /// Start a mock catalog serving `products` from the list and detail
    /// endpoints.
    ///
    /// # Panics
    ///
    /// Panics if the context cannot be created.
    pub async fn with_catalog(products: &[Value]) -> Self {
        let ctx = Self::new().await;

        Mock::given(method("GET"))
            .and(path("/gamehub"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": products,
                "meta": { "isFirstPage": true, "isLastPage": true }
            })))
            .mount(&ctx.server)
            .await;

        for product in products {
            if let Some(id) = product.get("id").and_then(Value::as_str) {
                Mock::given(method("GET"))
                    .and(path(format!("/gamehub/{id}")))
                    .respond_with(
                        ResponseTemplate::new(200).set_body_json(json!({ "data": product })),
                    )
                    .mount(&ctx.server)
                    .await;
            }
        }

        ctx
    }

    /// A second storefront over the same data directory, as if the shopper
    /// came back later.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be created.
    #[must_use]
    pub fn reopen(&self) -> AppState {
        state_for(&self.server.uri(), &self.data_dir)
    }

    /// A storefront over the same data directory whose catalog API refuses
    /// connections.
    ///
    /// # Panics
    ///
    /// Panics if no free local port can be found or the state cannot be
    /// created.
    #[must_use]
    pub fn offline(&self) -> AppState {
        let port = TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("find a free local port")
            .port();
        state_for(&format!("http://127.0.0.1:{port}"), &self.data_dir)
    }
}

fn state_for(base_url: &str, data_dir: &TempDir) -> AppState {
    let base_url = base_url.to_string();
    let dir = data_dir.path().display().to_string();
    let config = StorefrontConfig::from_lookup(|key| match key {
        "GAMEHUB_API_BASE_URL" => Some(base_url.clone()),
        "GAMEHUB_DATA_DIR" => Some(dir.clone()),
        _ => None,
    })
    .expect("valid test configuration");
    AppState::new(config).expect("create storefront state")
}

/// A small catalog in the API's wire format.
#[must_use]
pub fn sample_catalog() -> Vec<Value> {
    vec![
        json!({
            "id": "g1",
            "title": "Game One",
            "description": "A space shooter with a long campaign.",
            "genre": "Action",
            "released": "2019",
            "ageRating": "16+",
            "price": 20,
            "discountedPrice": 15,
            "onSale": true,
            "image": { "url": "https://example.com/g1.jpg", "alt": "Game One cover" },
            "tags": ["space"],
            "favorite": false
        }),
        json!({
            "id": "g2",
            "title": "Puzzle Box",
            "genre": "Puzzle",
            "price": "9.99",
            "image": { "url": "https://example.com/g2.jpg", "alt": "" }
        }),
        json!({
            "id": "g3",
            "title": "Night Terror",
            "genre": " Horror ",
            "price": 30
        }),
    ]
}
