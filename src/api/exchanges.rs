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
use crate::models::exchange::{ExchangeDto, ExchangeInput};
use crate::services::exchange_service;

pub async fn list_exchanges(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ExchangeDto>>, ApiError> {
    let exchanges = exchange_service::list_exchanges(state.db(), user.id).await?;
    Ok(Json(exchanges))
}

pub async fn propose_exchange(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ExchangeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let exchange = exchange_service::propose_exchange(state.db(), user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(exchange)))
}

pub async fn complete_exchange(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(exchange_id): Path<i32>,
) -> Result<Json<ExchangeDto>, ApiError> {
    let exchange = exchange_service::complete_exchange(state.db(), user.id, exchange_id).await?;
    Ok(Json(exchange))
}

pub async fn delete_exchange(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(exchange_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    exchange_service::delete_exchange(state.db(), user.id, exchange_id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Exchange removed" })),
    ))
}
