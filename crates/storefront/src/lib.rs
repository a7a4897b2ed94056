//! Marigold storefront client library.
//!
//! This crate contains the interaction layer between a shopper-facing surface
//! (CLI, web frontend, kiosk) and the Marigold REST backend:
//!
//! - [`api`] - Endpoint registry, bearer-token injection, and response/error
//!   normalization over `reqwest`
//! - [`catalog`] - Product detail page controller: variant selection,
//!   quantity, image navigation, add-to-cart gating, delivery estimates
//! - [`cart`] - Denormalized cart line construction and the cart/wishlist
//!   collaborator traits
//! - [`reviews`] - Review listing, submission, and two-step deletion
//! - [`inbox`] - Admin messages and user notifications with optimistic
//!   mark-as-read
//! - [`content`] - Raw JSON content entries (collections, news)
//!
//! # Architecture
//!
//! The backend is the source of truth; nothing is cached across page
//! controllers. Each controller owns its fetched data for its own lifetime
//! and re-fetches after mutations instead of patching local copies. The auth
//! token lives in an explicitly passed [`session::Session`], never in ambient
//! global state.
//!
//! # Example
//!
//! ```rust,ignore
//! use marigold_storefront::api::ApiClient;
//! use marigold_storefront::catalog::ProductPage;
//! use marigold_storefront::config::StorefrontConfig;
//! use marigold_storefront::session::Session;
//!
//! let config = StorefrontConfig::from_env()?;
//! let session = Session::anonymous();
//! let api = ApiClient::new(&config, session)?;
//!
//! let mut page = ProductPage::new("prod-42".into());
//! page.refresh(&api).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod content;
pub mod inbox;
pub mod reviews;
pub mod session;
