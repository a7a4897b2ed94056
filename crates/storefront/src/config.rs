//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MARIGOLD_API_BASE_URL` - Backend REST API base URL
//!   (default: `https://api.marigold.shop/api/v1`)
//! - `MARIGOLD_MEDIA_ORIGIN` - Origin serving product images; images hosted
//!   here are denormalized to bare filenames in cart lines
//!   (default: `https://media.marigold.shop`)
//! - `MARIGOLD_AUTH_TOKEN` - Persisted bearer token for the current shopper.
//!   Absent for anonymous browsing; reads stay permitted, the server enforces
//!   authorization.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default backend host used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api.marigold.shop/api/v1";

/// Default origin for product image hosting.
pub const DEFAULT_MEDIA_ORIGIN: &str = "https://media.marigold.shop";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Backend REST API base URL.
    pub api_base_url: String,
    /// Origin serving product images.
    pub media_origin: String,
    /// Persisted bearer token, if the shopper has signed in before.
    pub auth_token: Option<SecretString>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_base_url", &self.api_base_url)
            .field("media_origin", &self.media_origin)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a configured base URL or media origin does
    /// not parse as an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("MARIGOLD_API_BASE_URL", DEFAULT_API_BASE_URL);
        let media_origin = get_env_or_default("MARIGOLD_MEDIA_ORIGIN", DEFAULT_MEDIA_ORIGIN);
        let auth_token = std::env::var("MARIGOLD_AUTH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        Self::new(api_base_url, media_origin, auth_token)
    }

    /// Build a configuration from explicit values, validating URLs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_base_url` or `media_origin` is not an
    /// absolute URL.
    pub fn new(
        api_base_url: String,
        media_origin: String,
        auth_token: Option<SecretString>,
    ) -> Result<Self, ConfigError> {
        validate_absolute_url("MARIGOLD_API_BASE_URL", &api_base_url)?;
        validate_absolute_url("MARIGOLD_MEDIA_ORIGIN", &media_origin)?;

        Ok(Self {
            api_base_url,
            media_origin,
            auth_token,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            media_origin: DEFAULT_MEDIA_ORIGIN.to_string(),
            auth_token: None,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a value parses as an absolute URL.
fn validate_absolute_url(var_name: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    Ok(())
}
