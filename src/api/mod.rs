pub mod auth;
pub mod books;
pub mod catalog;
pub mod error;
pub mod exchanges;
pub mod extract;
pub mod health;
pub mod images;
pub mod messages;
pub mod reviews;
pub mod wishlist;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Catalog
        .route("/", get(catalog::home))
        .route("/catalog/", get(catalog::catalog))
        .route("/catalog/:search", get(catalog::catalog_search))
        // Books
        .route("/books/", post(books::create_book))
        .route(
            "/book/:book_id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Images
        .route("/image/:image_id", get(images::get_image))
        .route(
            "/book/:book_id/images",
            get(images::list_images)
                .post(images::upload_image)
                .layer(DefaultBodyLimit::max(images::MAX_UPLOAD_BYTES)),
        )
        // Reviews
        .route(
            "/book/:book_id/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        // Auth & account
        .route("/log_in/", post(auth::log_in))
        .route("/register/", post(auth::register))
        .route("/me/", get(auth::get_me).delete(auth::delete_me))
        // Exchanges
        .route(
            "/exchanges/",
            get(exchanges::list_exchanges).post(exchanges::propose_exchange),
        )
        .route(
            "/exchanges/:exchange_id",
            axum::routing::delete(exchanges::delete_exchange),
        )
        .route(
            "/exchanges/:exchange_id/complete",
            post(exchanges::complete_exchange),
        )
        // Wishlist
        .route(
            "/wishlist/",
            get(wishlist::list_wishlist).post(wishlist::add_to_wishlist),
        )
        .route(
            "/wishlist/:entry_id",
            axum::routing::delete(wishlist::remove_from_wishlist),
        )
        // Messages
        .route("/messages/", post(messages::send_message))
        .route("/messages/:user_id", get(messages::conversation))
        .with_state(state)
}
