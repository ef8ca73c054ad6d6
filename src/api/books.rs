//! Book detail and listing management

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::error::{ApiError, not_found};
use super::extract::{Json, Path};
use crate::auth::AuthUser;
use crate::infrastructure::AppState;
use crate::models::book::BookInput;
use crate::services::book_service;

#[utoipa::path(
    get,
    path = "/book/{book_id}",
    params(
        ("book_id" = i32, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Full book record"),
        (status = 404, description = "No such book")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> impl IntoResponse {
    tracing::info!("Book detail id: {}", book_id);
    match state.book_repo.find_by_id(book_id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(book)).into_response(),
        Ok(None) => not_found("Book").into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

pub async fn create_book(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<BookInput>,
) -> Result<impl IntoResponse, ApiError> {
    let book = book_service::create_book(state.book_repo.as_ref(), user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(book_id): Path<i32>,
    Json(payload): Json<BookInput>,
) -> Result<impl IntoResponse, ApiError> {
    let book =
        book_service::update_book(state.book_repo.as_ref(), user.id, book_id, payload).await?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    book_service::delete_book(state.book_repo.as_ref(), &state.media, user.id, book_id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Book deleted successfully" })),
    ))
}
