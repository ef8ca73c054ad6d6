//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::book::{Book, BookInput, BookSummary, CatalogEntry};

/// Number of books shown on the home listing.
pub const HOME_LISTING_SIZE: u64 = 10;

/// Image row as the file-serving layer needs it.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub id: i32,
    pub book_id: i32,
    /// File name relative to the media root
    pub file_name: String,
}

/// Repository trait for Book and BookImages entities
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// First `limit` books ordered by id
    async fn list_summaries(&self, limit: u64) -> Result<Vec<BookSummary>, DomainError>;

    /// All books ordered by id whose title, author or description contains
    /// `search` (case-insensitive). `None` or an empty string matches everything.
    async fn search(&self, search: Option<String>) -> Result<Vec<CatalogEntry>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Create a new listing owned by `owner_id`
    async fn create(&self, owner_id: i32, input: BookInput) -> Result<Book, DomainError>;

    /// Replace every editable field of an existing book
    async fn update(&self, id: i32, input: BookInput) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Find an image row by its ID
    async fn find_image(&self, image_id: i32) -> Result<Option<StoredImage>, DomainError>;

    /// Images attached to a book, ordered by id
    async fn list_images(&self, book_id: i32) -> Result<Vec<StoredImage>, DomainError>;

    /// Attach an already stored file to a book
    async fn add_image(&self, book_id: i32, file_name: String)
    -> Result<StoredImage, DomainError>;
}

/// Account data needed for authentication
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
}

/// Input for creating an account; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Repository trait for User and AuthToken entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<UserAccount>, DomainError>;

    /// Resolve a bearer token to its user
    async fn find_by_token(&self, key: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Create a new active user. Fails with `Conflict` when the username
    /// or email is taken.
    async fn create(&self, user: NewUser) -> Result<UserAccount, DomainError>;

    /// Return the user's token, creating one on first use
    async fn get_or_create_token(&self, user_id: i32) -> Result<String, DomainError>;

    /// Delete a user and everything that cascades from it
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
