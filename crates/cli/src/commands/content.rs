//! Content commands: raw entry dump.

use marigold_core::EntryId;
use marigold_storefront::api::ApiClient;
use marigold_storefront::content::ContentApi;

/// Fetch a content entry and pretty-print the JSON payload.
pub async fn show(api: &ApiClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let value = api.fetch_entry(&EntryId::new(id)).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
