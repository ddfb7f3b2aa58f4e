//! Chart endpoints.
//!
//! Handlers only translate the query string into a [`FilterSpec`] and hand it
//! to the [`AnalyticsService`](crate::services::AnalyticsService).
//!
//! [`FilterSpec`]: crate::domain::FilterSpec

use axum::{
    Json,
    extract::State,
};
use std::sync::Arc;

use super::{ApiError, AppState, FilterParams};
use crate::analytics::Insight;
use crate::models::{CatalogSummary, CountryStat, GenreStat, ScatterPoint, TimelinePoint};

/// `GET /api/summary`. Catalog-wide, so no filter is read.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogSummary>, ApiError> {
    let summary = state
        .analytics()
        .summary()
        .await
        .map_err(ApiError::analytics("Failed to fetch summary data"))?;
    Ok(Json(summary))
}

/// `GET /api/timeline`
pub async fn get_timeline(
    State(state): State<Arc<AppState>>,
    params: FilterParams,
) -> Result<Json<Vec<TimelinePoint>>, ApiError> {
    let points = state
        .analytics()
        .timeline(&params.filter_spec())
        .await
        .map_err(ApiError::analytics("Failed to fetch timeline data"))?;
    Ok(Json(points))
}

/// `GET /api/genres`
pub async fn get_genres(
    State(state): State<Arc<AppState>>,
    params: FilterParams,
) -> Result<Json<Vec<GenreStat>>, ApiError> {
    let stats = state
        .analytics()
        .genres(&params.filter_spec())
        .await
        .map_err(ApiError::analytics("Failed to fetch genre data"))?;
    Ok(Json(stats))
}

/// `GET /api/countries`
pub async fn get_countries(
    State(state): State<Arc<AppState>>,
    params: FilterParams,
) -> Result<Json<Vec<CountryStat>>, ApiError> {
    let stats = state
        .analytics()
        .countries(&params.filter_spec())
        .await
        .map_err(ApiError::analytics("Failed to fetch country data"))?;
    Ok(Json(stats))
}

/// `GET /api/scatter`
pub async fn get_scatter(
    State(state): State<Arc<AppState>>,
    params: FilterParams,
) -> Result<Json<Vec<ScatterPoint>>, ApiError> {
    let points = state
        .analytics()
        .scatter(&params.filter_spec(), params.limit())
        .await
        .map_err(ApiError::analytics("Failed to fetch scatter data"))?;
    Ok(Json(points))
}

/// `GET /api/insights`
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    params: FilterParams,
) -> Result<Json<Vec<Insight>>, ApiError> {
    let insights = state
        .analytics()
        .insights(&params.filter_spec())
        .await
        .map_err(ApiError::analytics("Failed to generate insights"))?;
    Ok(Json(insights))
}
