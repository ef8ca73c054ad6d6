//! Book pictures: streaming stored files and accepting uploads

use axum::{
    body::Body,
    extract::{Multipart, Request, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use super::error::{ApiError, not_found};
use super::extract::{Json, Path};
use crate::auth::AuthUser;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::book_image::BookImageDto;
use crate::services::book_service;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[utoipa::path(
    get,
    path = "/image/{image_id}",
    params(
        ("image_id" = i32, Path, description = "Image id")
    ),
    responses(
        (status = 200, description = "Raw image bytes"),
        (status = 404, description = "No such image")
    )
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(image_id): Path<i32>,
    request: Request,
) -> Response {
    tracing::info!("Image id: {}", image_id);

    let stored = match state.book_repo.find_image(image_id).await {
        Ok(Some(stored)) => stored,
        Ok(None) => return not_found("Image").into_response(),
        Err(e) => return ApiError(e).into_response(),
    };

    let Some(path) = state.media.path_for(&stored.file_name) else {
        tracing::warn!("Image {} has an unusable file name", stored.id);
        return not_found("Image").into_response();
    };

    // ServeFile streams the file and sets Content-Type from the extension
    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() == StatusCode::NOT_FOUND {
        tracing::warn!("Image {} is missing on disk: {:?}", stored.id, path);
        return not_found("Image").into_response();
    }

    response.map(Body::new).into_response()
}

pub async fn list_images(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> Result<Json<Vec<BookImageDto>>, ApiError> {
    state
        .book_repo
        .find_by_id(book_id)
        .await?
        .ok_or(DomainError::NotFound)?;

    let images = state.book_repo.list_images(book_id).await?;
    Ok(Json(images.into_iter().map(BookImageDto::from).collect()))
}

/// Multipart upload; the picture goes in a field named `image`.
pub async fn upload_image(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(book_id): Path<i32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut multipart = multipart?;
    let mut bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| DomainError::Validation(format!("Failed to read upload: {}", e)))?;
            bytes = Some(data);
            break;
        }
    }

    let bytes =
        bytes.ok_or_else(|| DomainError::MissingField("An image file is required".to_string()))?;

    let image = book_service::add_image(
        state.book_repo.as_ref(),
        &state.media,
        user.id,
        book_id,
        &bytes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(image)))
}
