//! Integration tests for Marigold.
//!
//! These tests run against a live backend and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Point at a backend (a local one is fine)
//! export MARIGOLD_TEST_API_BASE_URL=http://localhost:4000/api/v1
//! export MARIGOLD_TEST_PRODUCT_ID=p-1
//!
//! cargo test -p marigold-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use marigold_storefront::api::ApiClient;
use marigold_storefront::config::{DEFAULT_MEDIA_ORIGIN, StorefrontConfig};
use marigold_storefront::session::Session;
use secrecy::SecretString;

/// Shared setup for live-backend tests.
pub struct TestContext {
    pub api: ApiClient,
    pub session: Session,
    /// A product id known to exist on the test backend.
    pub product_id: String,
}

impl TestContext {
    /// Build a context from `MARIGOLD_TEST_*` environment variables.
    ///
    /// # Panics
    ///
    /// Panics when the base URL is missing or invalid; the ignored tests
    /// only run when the environment is set up deliberately.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn from_env() -> Self {
        let base_url = std::env::var("MARIGOLD_TEST_API_BASE_URL")
            .expect("MARIGOLD_TEST_API_BASE_URL must be set for integration tests");
        let token = std::env::var("MARIGOLD_TEST_AUTH_TOKEN")
            .ok()
            .map(SecretString::from);
        let product_id =
            std::env::var("MARIGOLD_TEST_PRODUCT_ID").unwrap_or_else(|_| "p-1".to_string());

        let session = token.map_or_else(Session::anonymous, Session::with_token);
        let config = StorefrontConfig::new(base_url, DEFAULT_MEDIA_ORIGIN.to_string(), None)
            .expect("invalid test base URL");
        let api = ApiClient::new(&config, session.clone()).expect("client build failed");

        Self {
            api,
            session,
            product_id,
        }
    }
}
