use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use super::error::ApiError;
use crate::auth::AuthUser;
use crate::infrastructure::AppState;
use crate::models::UserProfile;
use crate::services::{account_service, auth_service};

/// Missing fields deserialize as empty strings so they fail the same way
/// blank ones do.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Alias so utoipa's argument inspection does not try to read the
/// `Result`-wrapped `Json` as a request body (utoipa-gen 4.3 panics on it).
type LoginPayload = Result<Json<LoginRequest>, JsonRejection>;

#[utoipa::path(
    post,
    path = "/log_in/",
    responses(
        (status = 200, description = "Token and user profile"),
        (status = 400, description = "Missing field or malformed email"),
        (status = 401, description = "Invalid credentials or disabled account")
    )
)]
pub async fn log_in(
    State(state): State<AppState>,
    payload: LoginPayload,
) -> Result<impl IntoResponse, ApiError> {
    // An unreadable body is treated like an empty one
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let outcome =
        auth_service::login(state.user_repo.as_ref(), &payload.email, &payload.password).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "token": outcome.token,
            "user": outcome.user,
        })),
    ))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let profile = auth_service::register(
        state.user_repo.as_ref(),
        &payload.username,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(UserProfile {
        id: user.id,
        username: user.username,
        email: user.email,
    })
}

pub async fn delete_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    account_service::delete_account(state.db(), state.user_repo.as_ref(), &state.media, user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Account deleted successfully" })),
    ))
}
