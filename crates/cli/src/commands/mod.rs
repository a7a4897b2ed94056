//! CLI command implementations.

pub mod content;
pub mod inbox;
pub mod product;
pub mod reviews;
