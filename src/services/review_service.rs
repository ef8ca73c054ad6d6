//! Review Service - Reviews attached to a book

use sea_orm::*;

use crate::domain::DomainError;
use crate::models::book::Entity as Book;
use crate::models::review::{self, Entity as Review, ReviewDto, ReviewInput};
use crate::models::user::Entity as User;

const MAX_COMMENT_LEN: usize = 5000;

async fn ensure_book_exists(db: &DatabaseConnection, book_id: i32) -> Result<(), DomainError> {
    Book::find_by_id(book_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(DomainError::NotFound)
}

/// Reviews of a book, oldest first
pub async fn list_reviews(
    db: &DatabaseConnection,
    book_id: i32,
) -> Result<Vec<ReviewDto>, DomainError> {
    ensure_book_exists(db, book_id).await?;

    let reviews = Review::find()
        .filter(review::Column::BookId.eq(book_id))
        .order_by_asc(review::Column::Id)
        .find_also_related(User)
        .all(db)
        .await?;

    Ok(reviews
        .into_iter()
        .map(|(review, user)| ReviewDto::new(review, user.map(|u| u.username)))
        .collect())
}

pub async fn create_review(
    db: &DatabaseConnection,
    reviewer_id: i32,
    reviewer_username: String,
    book_id: i32,
    input: ReviewInput,
) -> Result<ReviewDto, DomainError> {
    let comment = input.comment.trim().to_string();
    if comment.is_empty() {
        return Err(DomainError::MissingField("Comment is required".to_string()));
    }
    if comment.chars().count() > MAX_COMMENT_LEN {
        return Err(DomainError::Validation(format!(
            "Comment must be at most {} characters",
            MAX_COMMENT_LEN
        )));
    }
    ensure_book_exists(db, book_id).await?;

    // Reviews are never edited, so this stays the creation time
    let review = review::ActiveModel {
        reviewer_id: Set(reviewer_id),
        book_id: Set(book_id),
        rating: Set(input.rating),
        comment: Set(comment),
        timestamp: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    let saved = review.insert(db).await?;

    tracing::info!("User {} reviewed book {}", reviewer_id, book_id);
    Ok(ReviewDto::new(saved, Some(reviewer_username)))
}
