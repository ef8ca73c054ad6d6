//! Wishlist Service

use sea_orm::*;

use crate::domain::DomainError;
use crate::models::book::Entity as Book;
use crate::models::wishlist::{self, Entity as Wishlist, WishlistEntry, WishlistInput};

pub async fn list_wishlist(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<Vec<WishlistEntry>, DomainError> {
    let entries = Wishlist::find()
        .filter(wishlist::Column::OwnerId.eq(owner_id))
        .order_by_asc(wishlist::Column::Id)
        .find_also_related(Book)
        .all(db)
        .await?;

    Ok(entries
        .into_iter()
        .map(|(entry, book)| WishlistEntry {
            id: entry.id,
            book: entry.book_id,
            title: book.map(|b| b.title),
        })
        .collect())
}

pub async fn add_to_wishlist(
    db: &DatabaseConnection,
    owner_id: i32,
    input: WishlistInput,
) -> Result<WishlistEntry, DomainError> {
    let book = Book::find_by_id(input.book)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let existing = Wishlist::find()
        .filter(wishlist::Column::OwnerId.eq(owner_id))
        .filter(wishlist::Column::BookId.eq(book.id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(DomainError::Conflict(
            "Book is already on your wishlist".to_string(),
        ));
    }

    let entry = wishlist::ActiveModel {
        owner_id: Set(owner_id),
        book_id: Set(Some(book.id)),
        ..Default::default()
    };
    let saved = entry.insert(db).await?;

    Ok(WishlistEntry {
        id: saved.id,
        book: saved.book_id,
        title: Some(book.title),
    })
}

pub async fn remove_from_wishlist(
    db: &DatabaseConnection,
    owner_id: i32,
    entry_id: i32,
) -> Result<(), DomainError> {
    let entry = Wishlist::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    if entry.owner_id != owner_id {
        return Err(DomainError::Forbidden(
            "You can only edit your own wishlist".to_string(),
        ));
    }

    Wishlist::delete_by_id(entry.id).exec(db).await?;
    Ok(())
}
