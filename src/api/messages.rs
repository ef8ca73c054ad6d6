use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use super::error::ApiError;
use super::extract::{Json, Path};
use crate::auth::AuthUser;
use crate::infrastructure::AppState;
use crate::models::message::{MessageDto, MessageInput};
use crate::services::message_service;

pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<MessageInput>,
) -> Result<impl IntoResponse, ApiError> {
    let message = message_service::send_message(state.db(), user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn conversation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(other_id): Path<i32>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let messages = message_service::conversation(state.db(), user.id, other_id).await?;
    Ok(Json(messages))
}
