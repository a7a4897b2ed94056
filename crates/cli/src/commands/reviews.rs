//! Review commands: list, submit, delete.

use marigold_core::{ProductId, Rating, ReviewId};
use marigold_storefront::api::ApiClient;
use marigold_storefront::reviews::{ReviewBoard, ReviewDraft};
use marigold_storefront::session::Session;

/// List all reviews for a product with the aggregate rating.
pub async fn list(
    api: &ApiClient,
    session: &Session,
    product_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = ReviewBoard::new(ProductId::new(product_id));
    board.refresh(api).await?;

    if board.reviews().is_empty() {
        println!("No reviews yet.");
        return Ok(());
    }

    println!(
        "{} review(s), average {}",
        board.reviews().len(),
        board.display_average()
    );
    for review in board.reviews() {
        let own = if board.can_delete(review, session) {
            " (yours)"
        } else {
            ""
        };
        println!(
            "  [{}] {}/5 by {}{own}: {}",
            review.id,
            review.rating,
            review.author.name,
            review.comment
        );
    }
    Ok(())
}

/// Submit a review for a product.
pub async fn add(
    api: &ApiClient,
    product_id: &str,
    rating: u8,
    comment: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = ReviewBoard::new(ProductId::new(product_id));
    board.draft = ReviewDraft {
        rating: Some(Rating::new(rating)?),
        comment: comment.to_string(),
    };

    board.submit(api).await?;
    println!(
        "Review submitted. {} review(s), average {}",
        board.reviews().len(),
        board.display_average()
    );
    Ok(())
}

/// Delete a review after an explicit `--yes` confirmation.
pub async fn delete(
    api: &ApiClient,
    product_id: &str,
    review_id: &str,
    confirmed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = ReviewBoard::new(ProductId::new(product_id));
    board.refresh(api).await?;
    board.request_delete(ReviewId::new(review_id));

    if board.pending_delete().is_none() {
        println!("Review {review_id} is not on product {product_id}.");
        return Ok(());
    }

    if !confirmed {
        board.cancel_delete();
        println!("Re-run with --yes to delete review {review_id}.");
        return Ok(());
    }

    board.confirm_delete(api).await?;
    println!("Review deleted. {} review(s) remain.", board.reviews().len());
    Ok(())
}
