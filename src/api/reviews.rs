use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use super::error::ApiError;
use super::extract::{Json, Path};
use crate::auth::AuthUser;
use crate::infrastructure::AppState;
use crate::models::review::{ReviewDto, ReviewInput};
use crate::services::review_service;

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    let reviews = review_service::list_reviews(state.db(), book_id).await?;
    Ok(Json(reviews))
}

pub async fn create_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(book_id): Path<i32>,
    Json(payload): Json<ReviewInput>,
) -> Result<impl IntoResponse, ApiError> {
    let review =
        review_service::create_review(state.db(), user.id, user.username, book_id, payload)
            .await?;
    Ok((StatusCode::CREATED, Json(review)))
}
