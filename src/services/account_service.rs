//! Account Service - Profile lookup and account deletion

use sea_orm::*;

use crate::domain::{DomainError, UserRepository};
use crate::infrastructure::MediaStore;
use crate::models::book::{self, Entity as Book};
use crate::models::book_image::{self, Entity as BookImage};
use crate::services::exchange_service::has_pending_exchange;

/// Delete an account and everything it owns.
///
/// Refused while the user is the sender or the receiver of a pending
/// exchange; settled or withdrawn exchanges cascade away with the account.
pub async fn delete_account(
    db: &DatabaseConnection,
    users: &dyn UserRepository,
    media: &MediaStore,
    user_id: i32,
) -> Result<(), DomainError> {
    if has_pending_exchange(db, user_id).await? {
        return Err(DomainError::Conflict(
            "Close your pending exchanges before deleting your account".to_string(),
        ));
    }

    let book_ids: Vec<i32> = Book::find()
        .filter(book::Column::OwnerId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|b| b.id)
        .collect();

    let files: Vec<String> = if book_ids.is_empty() {
        Vec::new()
    } else {
        BookImage::find()
            .filter(book_image::Column::BookId.is_in(book_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|i| i.image)
            .collect()
    };

    users.delete(user_id).await?;
    for file in files {
        media.remove(&file).await;
    }

    tracing::info!("Deleted account {}", user_id);
    Ok(())
}
