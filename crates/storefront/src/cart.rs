//! Cart and wishlist collaborator boundary.
//!
//! Cart and wishlist state is owned elsewhere (a server-side cart, a local
//! store, a test double); this module defines the traits the product page
//! talks to and the denormalized line items it hands across.
//!
//! A [`CartLine`] is a snapshot of the product at the moment it was added.
//! Later edits to the product do not retroactively change cart contents.

use marigold_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;

/// Opaque failure reported by a cart or wishlist collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

/// A denormalized cart entry: product fields copied at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    /// Primary image, reduced to a bare filename when hosted on the store's
    /// own media origin.
    pub image: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
}

/// A denormalized wishlist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

/// The external cart collaborator.
#[allow(async_fn_in_trait)]
pub trait Cart {
    /// Add a line to the cart with the chosen quantity and variant.
    async fn add_to_cart(
        &self,
        line: CartLine,
        quantity: u32,
        size: String,
        color: String,
    ) -> Result<(), CollaboratorError>;
}

/// The external wishlist collaborator.
#[allow(async_fn_in_trait)]
pub trait Wishlist {
    /// Whether the product is currently wishlisted.
    async fn is_in_wishlist(&self, id: &ProductId) -> bool;

    /// Add a product snapshot to the wishlist.
    async fn add_to_wishlist(&self, entry: WishlistEntry) -> Result<(), CollaboratorError>;

    /// Remove a product from the wishlist by id.
    async fn remove_from_wishlist(&self, id: &ProductId) -> Result<(), CollaboratorError>;
}

/// Build a cart line from a product and the store's media origin.
#[must_use]
pub fn cart_line(product: &Product, media_origin: &str) -> CartLine {
    let image = product
        .images
        .first()
        .map(|raw| resolve_image(raw, media_origin))
        .unwrap_or_default();

    CartLine {
        product_id: product.id.clone(),
        name: product.name.clone(),
        price: product.price,
        image,
        category: product.category.clone(),
        sub_category: product.sub_category.clone(),
    }
}

/// Build a wishlist entry from a product and the store's media origin.
#[must_use]
pub fn wishlist_entry(product: &Product, media_origin: &str) -> WishlistEntry {
    let image = product
        .images
        .first()
        .map(|raw| resolve_image(raw, media_origin))
        .unwrap_or_default();

    WishlistEntry {
        product_id: product.id.clone(),
        name: product.name.clone(),
        price: product.price,
        image,
    }
}

/// Strip a same-origin absolute image URL down to its bare filename.
///
/// Images hosted elsewhere pass through unchanged; the cart renderer knows
/// how to prefix bare filenames with the media origin.
#[must_use]
pub fn resolve_image(raw: &str, media_origin: &str) -> String {
    let origin = media_origin.trim_end_matches('/');
    if raw.starts_with(origin) {
        raw.rsplit('/').next().unwrap_or(raw).to_string()
    } else {
        raw.to_string()
    }
}

/// In-memory cart, used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct MemoryCart {
    lines: std::sync::Mutex<Vec<StoredLine>>,
}

/// A cart line plus the variant and quantity it was added with.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLine {
    pub line: CartLine,
    pub quantity: u32,
    pub size: String,
    pub color: String,
}

impl MemoryCart {
    /// Snapshot of the stored lines.
    #[must_use]
    pub fn lines(&self) -> Vec<StoredLine> {
        self.lines.lock().expect("cart lock poisoned").clone()
    }
}

impl Cart for MemoryCart {
    async fn add_to_cart(
        &self,
        line: CartLine,
        quantity: u32,
        size: String,
        color: String,
    ) -> Result<(), CollaboratorError> {
        self.lines
            .lock()
            .expect("cart lock poisoned")
            .push(StoredLine {
                line,
                quantity,
                size,
                color,
            });
        Ok(())
    }
}

/// In-memory wishlist, used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct MemoryWishlist {
    entries: std::sync::Mutex<Vec<WishlistEntry>>,
}

impl MemoryWishlist {
    /// Snapshot of the stored entries.
    #[must_use]
    pub fn entries(&self) -> Vec<WishlistEntry> {
        self.entries.lock().expect("wishlist lock poisoned").clone()
    }
}

impl Wishlist for MemoryWishlist {
    async fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.entries
            .lock()
            .expect("wishlist lock poisoned")
            .iter()
            .any(|e| &e.product_id == id)
    }

    async fn add_to_wishlist(&self, entry: WishlistEntry) -> Result<(), CollaboratorError> {
        let mut entries = self.entries.lock().expect("wishlist lock poisoned");
        if !entries.iter().any(|e| e.product_id == entry.product_id) {
            entries.push(entry);
        }
        Ok(())
    }

    async fn remove_from_wishlist(&self, id: &ProductId) -> Result<(), CollaboratorError> {
        self.entries
            .lock()
            .expect("wishlist lock poisoned")
            .retain(|e| &e.product_id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_image_strips_same_origin_prefix() {
        let resolved = resolve_image(
            "https://media.marigold.shop/uploads/kurta-front.jpg",
            "https://media.marigold.shop",
        );
        assert_eq!(resolved, "kurta-front.jpg");
    }

    #[test]
    fn test_resolve_image_keeps_foreign_urls() {
        let raw = "https://cdn.elsewhere.example/pic.jpg";
        assert_eq!(
            resolve_image(raw, "https://media.marigold.shop"),
            raw.to_string()
        );
    }

    #[test]
    fn test_resolve_image_keeps_bare_filenames() {
        assert_eq!(
            resolve_image("kurta-front.jpg", "https://media.marigold.shop"),
            "kurta-front.jpg"
        );
    }

    #[tokio::test]
    async fn test_memory_wishlist_add_is_idempotent() {
        let wishlist = MemoryWishlist::default();
        let entry = WishlistEntry {
            product_id: ProductId::new("p-1"),
            name: "Linen Kurta".to_string(),
            price: Price::new(rust_decimal::Decimal::new(149_900, 2)),
            image: "kurta.jpg".to_string(),
        };

        wishlist.add_to_wishlist(entry.clone()).await.expect("add");
        wishlist.add_to_wishlist(entry).await.expect("add again");
        assert_eq!(wishlist.entries().len(), 1);
        assert!(wishlist.is_in_wishlist(&ProductId::new("p-1")).await);

        wishlist
            .remove_from_wishlist(&ProductId::new("p-1"))
            .await
            .expect("remove");
        assert!(wishlist.entries().is_empty());
    }
}
