//! Marigold Core - Shared types library.
//!
//! This crate provides common types used across all Marigold components:
//! - `storefront` - Client library for the Marigold commerce backend
//! - `cli` - Command-line tools for browsing and account operations
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
