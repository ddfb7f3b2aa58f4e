use axum::{
    Json,
    extract::State,
};
use std::sync::Arc;

use super::{ApiError, AppState, FilterParams};
use crate::models::{SearchResults, TitleList};

/// `GET /api/search?q=..&limit=..`
///
/// Needles shorter than two characters yield `{"results": []}`.
pub async fn search_titles(
    State(state): State<Arc<AppState>>,
    params: FilterParams,
) -> Result<Json<SearchResults>, ApiError> {
    let results = state
        .analytics()
        .search(params.search_text(), params.limit())
        .await
        .map_err(ApiError::analytics("Failed to search titles"))?;
    Ok(Json(results))
}

/// `GET /api/titles`: one page of filtered titles, newest first.
pub async fn list_titles(
    State(state): State<Arc<AppState>>,
    params: FilterParams,
) -> Result<Json<TitleList>, ApiError> {
    let page = state
        .analytics()
        .titles(&params.filter_spec(), params.limit(), params.offset())
        .await
        .map_err(ApiError::analytics("Failed to fetch titles"))?;
    Ok(Json(page))
}
