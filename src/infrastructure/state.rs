//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{BookRepository, UserRepository};
use crate::infrastructure::{MediaStore, SeaOrmBookRepository, SeaOrmUserRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection for the service layer
    db: DatabaseConnection,
    /// Book and image repository
    pub book_repo: Arc<dyn BookRepository>,
    /// User and token repository
    pub user_repo: Arc<dyn UserRepository>,
    /// Uploaded pictures
    pub media: MediaStore,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, media: MediaStore) -> Self {
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));

        Self {
            db,
            book_repo,
            user_repo,
            media,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
