use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::error::ApiError;
use super::extract::{Json, Path};
use crate::auth::AuthUser;
use crate::infrastructure::AppState;
use crate::models::wishlist::{WishlistEntry, WishlistInput};
use crate::services::wishlist_service;

pub async fn list_wishlist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<WishlistEntry>>, ApiError> {
    let entries = wishlist_service::list_wishlist(state.db(), user.id).await?;
    Ok(Json(entries))
}

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<WishlistInput>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = wishlist_service::add_to_wishlist(state.db(), user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(entry_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    wishlist_service::remove_from_wishlist(state.db(), user.id, entry_id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Removed from wishlist" })),
    ))
}
