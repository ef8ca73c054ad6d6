//! Book Service - Listing management with ownership checks
//!
//! Reads that need no ownership go straight to the repository from the
//! handlers; everything here mutates a listing on behalf of a user.

use crate::domain::validation::validate_book_input;
use crate::domain::{BookRepository, DomainError};
use crate::infrastructure::MediaStore;
use crate::models::book::{Book, BookInput};
use crate::models::book_image::BookImageDto;

/// Load a book and make sure `user_id` owns it.
async fn owned_book(
    books: &dyn BookRepository,
    user_id: i32,
    book_id: i32,
) -> Result<Book, DomainError> {
    let book = books
        .find_by_id(book_id)
        .await?
        .ok_or(DomainError::NotFound)?;

    if book.owner != user_id {
        return Err(DomainError::Forbidden(
            "You can only modify your own books".to_string(),
        ));
    }
    Ok(book)
}

pub async fn create_book(
    books: &dyn BookRepository,
    owner_id: i32,
    input: BookInput,
) -> Result<Book, DomainError> {
    let input = validate_book_input(input)?;
    let book = books.create(owner_id, input).await?;
    tracing::info!("User {} listed book {}", owner_id, book.id);
    Ok(book)
}

pub async fn update_book(
    books: &dyn BookRepository,
    user_id: i32,
    book_id: i32,
    input: BookInput,
) -> Result<Book, DomainError> {
    owned_book(books, user_id, book_id).await?;
    let input = validate_book_input(input)?;
    books.update(book_id, input).await
}

/// Delete a listing together with its stored pictures.
pub async fn delete_book(
    books: &dyn BookRepository,
    media: &MediaStore,
    user_id: i32,
    book_id: i32,
) -> Result<(), DomainError> {
    owned_book(books, user_id, book_id).await?;

    let images = books.list_images(book_id).await?;
    books.delete(book_id).await?;
    for image in images {
        media.remove(&image.file_name).await;
    }

    tracing::info!("User {} deleted book {}", user_id, book_id);
    Ok(())
}

pub async fn add_image(
    books: &dyn BookRepository,
    media: &MediaStore,
    user_id: i32,
    book_id: i32,
    bytes: &[u8],
) -> Result<BookImageDto, DomainError> {
    owned_book(books, user_id, book_id).await?;

    let file_name = media.save_image(bytes).await?;
    match books.add_image(book_id, file_name.clone()).await {
        Ok(image) => Ok(BookImageDto::from(image)),
        Err(e) => {
            media.remove(&file_name).await;
            Err(e)
        }
    }
}
