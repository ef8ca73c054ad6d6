//! Home listing and catalog search

use axum::{
    extract::State,
};
use std::collections::BTreeMap;

use super::error::ApiError;
use super::extract::{Json, Path};
use crate::domain::HOME_LISTING_SIZE;
use crate::infrastructure::AppState;
use crate::models::book::{BookSummary, CatalogEntry};

/// Key rows by their zero-based position: `{"0": {...}, "1": {...}}`.
pub fn index_by_position<T>(rows: Vec<T>) -> BTreeMap<usize, T> {
    rows.into_iter().enumerate().collect()
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "First ten books keyed by position")
    )
)]
pub async fn home(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<usize, BookSummary>>, ApiError> {
    tracing::info!("Home listing");
    let books = state.book_repo.list_summaries(HOME_LISTING_SIZE).await?;
    Ok(Json(index_by_position(books)))
}

#[utoipa::path(
    get,
    path = "/catalog/",
    responses(
        (status = 200, description = "Every book keyed by position")
    )
)]
pub async fn catalog(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<usize, CatalogEntry>>, ApiError> {
    run_catalog(&state, None).await
}

#[utoipa::path(
    get,
    path = "/catalog/{search}",
    params(
        ("search" = String, Path, description = "Case-insensitive text matched against title, author and description")
    ),
    responses(
        (status = 200, description = "Matching books keyed by position")
    )
)]
pub async fn catalog_search(
    State(state): State<AppState>,
    Path(search): Path<String>,
) -> Result<Json<BTreeMap<usize, CatalogEntry>>, ApiError> {
    run_catalog(&state, Some(search)).await
}

async fn run_catalog(
    state: &AppState,
    search: Option<String>,
) -> Result<Json<BTreeMap<usize, CatalogEntry>>, ApiError> {
    tracing::info!("Catalog search: {:?}", search);
    let entries = state.book_repo.search(search).await?;
    Ok(Json(index_by_position(entries)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_by_position_serializes_string_keys() {
        let rows = vec!["a", "b", "c"];
        let value = serde_json::to_value(index_by_position(rows)).unwrap();
        assert_eq!(value, serde_json::json!({"0": "a", "1": "b", "2": "c"}));
    }

    #[test]
    fn test_index_by_position_keeps_numeric_order() {
        let rows: Vec<usize> = (0..12).collect();
        let keys: Vec<usize> = index_by_position(rows).into_keys().collect();
        assert_eq!(keys, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_index_by_position_empty() {
        let value = serde_json::to_value(index_by_position(Vec::<u8>::new())).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
