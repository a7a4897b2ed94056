//! Product review workflow: list, submit, delete.
//!
//! Mutations favor consistency over speed: after a successful submit or
//! delete the full list is re-fetched instead of patching the local copy.
//! Deletion is two-step (select, then confirm) and the confirmation target
//! always clears, whether or not the backend call succeeded.

use chrono::{DateTime, Utc};
use marigold_core::{ProductId, Rating, ReviewId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::api::{ApiClient, ApiError, Endpoint, Result};
use crate::session::Session;

/// How long the "review submitted" indicator stays up. Presentation only.
pub const SUCCESS_FLASH: std::time::Duration = std::time::Duration::from_secs(2);

/// A product review as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub author: Author,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review author reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: UserId,
    pub name: String,
}

/// Request body for creating a review.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewReview<'a> {
    product_id: &'a ProductId,
    rating: Rating,
    comment: &'a str,
}

/// Client-side validation failures on the review form.
///
/// These are prevented, not sent: an invalid draft produces no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("select a star rating first")]
    MissingRating,
    #[error("write a comment first")]
    EmptyComment,
}

/// Failures of review mutations, surfaced to the interaction layer.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error("{}", .0.message())]
    Api(#[from] ApiError),
}

/// The in-progress review form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: Option<Rating>,
    pub comment: String,
}

impl ReviewDraft {
    /// Validate the draft, yielding the rating and trimmed comment.
    ///
    /// # Errors
    ///
    /// Returns `DraftError` when no rating is chosen or the trimmed comment
    /// is empty.
    pub fn validate(&self) -> std::result::Result<(Rating, String), DraftError> {
        let rating = self.rating.ok_or(DraftError::MissingRating)?;
        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(DraftError::EmptyComment);
        }
        Ok((rating, comment.to_string()))
    }
}

/// Backend operations the review board needs.
#[allow(async_fn_in_trait)]
pub trait ReviewsApi {
    /// All reviews for a product, in server-defined order.
    async fn list_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>>;

    /// Create a review and return the stored entity.
    async fn submit_review(
        &self,
        product_id: &ProductId,
        rating: Rating,
        comment: &str,
    ) -> Result<Review>;

    /// Delete a review by id.
    async fn delete_review(&self, id: &ReviewId) -> Result<()>;
}

impl ReviewsApi for ApiClient {
    async fn list_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>> {
        self.get_json(Endpoint::ProductReviews(product_id)).await
    }

    async fn submit_review(
        &self,
        product_id: &ProductId,
        rating: Rating,
        comment: &str,
    ) -> Result<Review> {
        let body = NewReview {
            product_id,
            rating,
            comment,
        };
        self.post_json(Endpoint::CreateReview, &body).await
    }

    async fn delete_review(&self, id: &ReviewId) -> Result<()> {
        self.delete(Endpoint::Review(id)).await
    }
}

/// Interaction controller for the reviews section of a product page.
#[derive(Debug)]
pub struct ReviewBoard {
    product_id: ProductId,
    reviews: Vec<Review>,
    /// The form being typed into.
    pub draft: ReviewDraft,
    pending_delete: Option<ReviewId>,
    submitted: bool,
    error: Option<String>,
}

impl ReviewBoard {
    /// Create a board for one product.
    #[must_use]
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            reviews: Vec::new(),
            draft: ReviewDraft::default(),
            pending_delete: None,
            submitted: false,
            error: None,
        }
    }

    /// Reviews in server order; never re-sorted client-side.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// The review selected for deletion, awaiting confirmation.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<&ReviewId> {
        self.pending_delete.as_ref()
    }

    /// Whether the transient "submitted" indicator is up.
    #[must_use]
    pub const fn just_submitted(&self) -> bool {
        self.submitted
    }

    /// Clear the transient "submitted" indicator (after [`SUCCESS_FLASH`]).
    pub fn clear_success_flash(&mut self) {
        self.submitted = false;
    }

    /// The banner message from the last failed operation, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Arithmetic mean of all ratings; 0 for an empty list.
    #[must_use]
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating.value())).sum();
        #[allow(clippy::cast_precision_loss)] // review counts stay tiny
        {
            f64::from(sum) / self.reviews.len() as f64
        }
    }

    /// Average rating rounded to one decimal place for display.
    #[must_use]
    pub fn display_average(&self) -> String {
        format!("{:.1}", self.average_rating())
    }

    /// Whether the viewer may delete a review: only its own author can.
    #[must_use]
    pub fn can_delete(&self, review: &Review, viewer: &Session) -> bool {
        viewer.user().is_some_and(|u| u.id == review.author.id)
    }

    /// Re-fetch the full review list.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error; the previous list is kept so the
    /// page still has something to show.
    pub async fn refresh<A: ReviewsApi>(&mut self, api: &A) -> Result<()> {
        match api.list_reviews(&self.product_id).await {
            Ok(reviews) => {
                self.reviews = reviews;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(product_id = %self.product_id, error = %e.message(), "review fetch failed");
                self.error = Some(e.message());
                Err(e)
            }
        }
    }

    /// Submit the draft.
    ///
    /// An invalid draft produces no request at all. On success the form is
    /// cleared, the transient success indicator raised, and the list
    /// re-fetched (no optimistic insert).
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Draft` for a draft that never left the client,
    /// or `ReviewError::Api` when the backend rejected it.
    pub async fn submit<A: ReviewsApi>(&mut self, api: &A) -> std::result::Result<(), ReviewError> {
        let (rating, comment) = self.draft.validate()?;

        match api.submit_review(&self.product_id, rating, &comment).await {
            Ok(_) => {
                self.draft = ReviewDraft::default();
                self.submitted = true;
                // Consistency over speed: read our own write back
                let _ = self.refresh(api).await;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.message());
                Err(ReviewError::Api(e))
            }
        }
    }

    /// Select a review for deletion, opening the confirmation dialog.
    ///
    /// Ignored when the id is not in the current list.
    pub fn request_delete(&mut self, id: ReviewId) {
        if self.reviews.iter().any(|r| r.id == id) {
            self.pending_delete = Some(id);
        }
    }

    /// Dismiss the confirmation dialog without deleting.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the review selected by [`request_delete`](Self::request_delete).
    ///
    /// The confirmation target clears no matter what the backend says, and
    /// the list is re-fetched either way. The outcome is returned rather
    /// than swallowed.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Api` when the delete call failed.
    pub async fn confirm_delete<A: ReviewsApi>(
        &mut self,
        api: &A,
    ) -> std::result::Result<(), ReviewError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(());
        };

        let result = api.delete_review(&id).await;
        if let Err(e) = &result {
            warn!(review_id = %id, error = %e.message(), "review delete failed");
            self.error = Some(e.message());
        }
        let _ = self.refresh(api).await;

        result.map_err(ReviewError::Api)
    }
}
