//! HTTP access layer for the Marigold REST backend.
//!
//! # Architecture
//!
//! - All routes come from the [`endpoints::Endpoint`] registry - one source
//!   of truth for the backend surface
//! - `Authorization: Bearer <token>` is attached when the injected
//!   [`Session`] carries a token; anonymous requests go out without it
//! - Every failure is normalized into [`ApiError`] at this boundary. Raw
//!   `reqwest` errors never reach controller or view state.
//!
//! # Example
//!
//! ```rust,ignore
//! use marigold_storefront::api::{ApiClient, Endpoint};
//!
//! let api = ApiClient::new(&config, session)?;
//! let product: Option<Product> = api.fetch_product(&"p-1".into()).await?;
//! ```

pub mod endpoints;

pub use endpoints::{Endpoint, build_url};

use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::StorefrontConfig;
use crate::session::Session;

/// Fallback shown when neither the server nor the transport explains itself.
const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, no response received.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response received with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided message field, empty when absent.
        message: String,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// Response body did not parse as the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Detail fetch returned an empty or absent data payload.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Human-readable message with fixed priority: server-provided message,
    /// then the transport error, then a generic fallback.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Server { message, .. } if !message.is_empty() => message.clone(),
            Self::Transport(e) => e.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// HTTP status code, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

/// Wrapper for `{ "data": ... }` response envelopes.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Client for the Marigold REST backend.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    media_origin: String,
    session: Session,
}

impl ApiClient {
    /// Create a new backend client for the given session.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig, session: Session) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            media_origin: config.media_origin.clone(),
            session,
        })
    }

    /// The session this client was built with.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Origin serving product images, used to denormalize cart line images.
    #[must_use]
    pub fn media_origin(&self) -> &str {
        &self.media_origin
    }

    /// Build a request for an endpoint, attaching the bearer token when the
    /// session has one.
    fn request(&self, method: Method, endpoint: &Endpoint<'_>) -> RequestBuilder {
        let url = endpoint.url(&self.base_url);
        debug!(method = %method, url = %url, "backend request");

        let builder = self.client.request(method, url);
        match self.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and normalize transport and status failures.
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_server_message(&body);
            warn!(
                status = status.as_u16(),
                body = %body.chars().take(500).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
                body,
            });
        }

        Ok(response)
    }

    /// Read a successful response body as JSON.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        // Read as text first for better diagnostics on shape mismatches
        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "failed to parse backend response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// GET an endpoint and parse the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T> {
        let response = self.send(self.request(Method::GET, &endpoint)).await?;
        Self::read_json(response).await
    }

    /// POST a JSON body to an endpoint and parse the JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        endpoint: Endpoint<'_>,
        body: &B,
    ) -> Result<T> {
        let response = self
            .send(self.request(Method::POST, &endpoint).json(body))
            .await?;
        Self::read_json(response).await
    }

    /// DELETE an endpoint, discarding the acknowledgement body.
    pub(crate) async fn delete(&self, endpoint: Endpoint<'_>) -> Result<()> {
        self.send(self.request(Method::DELETE, &endpoint)).await?;
        Ok(())
    }

    /// PATCH an endpoint with no body, discarding the acknowledgement body.
    pub(crate) async fn patch(&self, endpoint: Endpoint<'_>) -> Result<()> {
        self.send(self.request(Method::PATCH, &endpoint)).await?;
        Ok(())
    }
}

/// Pull the `message` field out of an error response body, if there is one.
fn extract_server_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ServerMessage {
        message: String,
    }

    serde_json::from_str::<ServerMessage>(body)
        .map(|m| m.message)
        .unwrap_or_default()
}
