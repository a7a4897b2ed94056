//! Backend route registry.
//!
//! Every call site goes through [`Endpoint`] so the backend route surface has
//! exactly one source of truth. Hand-built literal paths elsewhere in the
//! crate are a bug.

use marigold_core::{EntryId, NotificationId, ProductId, ReviewId};

/// A logical backend operation, resolvable to a relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Product detail by id.
    Product(&'a ProductId),
    /// All reviews for a product.
    ProductReviews(&'a ProductId),
    /// Create a review.
    CreateReview,
    /// Delete a review by id.
    Review(&'a ReviewId),
    /// Admin messages for the current user.
    Messages,
    /// Notifications for the current user.
    Notifications,
    /// Mark one notification as read.
    NotificationRead(&'a NotificationId),
    /// Free-form content entry (collections, news).
    DataEntry(&'a EntryId),
}

impl Endpoint<'_> {
    /// The relative path for this operation, without a leading slash.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Product(id) => format!("products/{id}"),
            Self::ProductReviews(id) => format!("reviews/product/{id}"),
            Self::CreateReview => "reviews".to_string(),
            Self::Review(id) => format!("reviews/{id}"),
            Self::Messages => "user/messages".to_string(),
            Self::Notifications => "user/notifications".to_string(),
            Self::NotificationRead(id) => format!("user/notifications/{id}/read"),
            Self::DataEntry(id) => format!("data-entry/{id}"),
        }
    }

    /// The absolute URL for this operation against a base URL.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        build_url(base, &self.path())
    }
}

/// Join a base URL and a path with exactly one separating slash, regardless
/// of whether either side carries its own.
#[must_use]
pub fn build_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_single_slash() {
        let expected = "https://api.example.com/products/1";
        assert_eq!(build_url("https://api.example.com", "products/1"), expected);
        assert_eq!(build_url("https://api.example.com/", "products/1"), expected);
        assert_eq!(build_url("https://api.example.com", "/products/1"), expected);
        assert_eq!(build_url("https://api.example.com/", "/products/1"), expected);
    }

    #[test]
    fn test_endpoint_paths() {
        let product_id = ProductId::new("p-1");
        let review_id = ReviewId::new("r-9");
        let notification_id = NotificationId::new("n-3");
        let entry_id = EntryId::new("news");

        assert_eq!(Endpoint::Product(&product_id).path(), "products/p-1");
        assert_eq!(
            Endpoint::ProductReviews(&product_id).path(),
            "reviews/product/p-1"
        );
        assert_eq!(Endpoint::CreateReview.path(), "reviews");
        assert_eq!(Endpoint::Review(&review_id).path(), "reviews/r-9");
        assert_eq!(Endpoint::Messages.path(), "user/messages");
        assert_eq!(Endpoint::Notifications.path(), "user/notifications");
        assert_eq!(
            Endpoint::NotificationRead(&notification_id).path(),
            "user/notifications/n-3/read"
        );
        assert_eq!(Endpoint::DataEntry(&entry_id).path(), "data-entry/news");
    }

    #[test]
    fn test_endpoint_url_uses_base() {
        let product_id = ProductId::new("p-1");
        assert_eq!(
            Endpoint::Product(&product_id).url("https://api.example.com/api/v1/"),
            "https://api.example.com/api/v1/products/p-1"
        );
    }
}
