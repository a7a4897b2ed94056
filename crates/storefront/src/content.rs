//! Free-form content entries (collections pages, news).
//!
//! The backend serves these as arbitrary JSON payloads edited in an admin
//! tool; this layer passes them through untyped and lets the renderer pick
//! out what it understands.

use marigold_core::EntryId;

use crate::api::{ApiClient, Endpoint, Result};

/// Backend operations for content entries.
#[allow(async_fn_in_trait)]
pub trait ContentApi {
    /// Fetch one content entry as raw JSON.
    async fn fetch_entry(&self, id: &EntryId) -> Result<serde_json::Value>;
}

impl ContentApi for ApiClient {
    async fn fetch_entry(&self, id: &EntryId) -> Result<serde_json::Value> {
        self.get_json(Endpoint::DataEntry(id)).await
    }
}
