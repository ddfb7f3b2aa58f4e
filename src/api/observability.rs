//! Prometheus scrape endpoint and the per-request dashboard event.
//!
//! Every matched `/api` request produces one `dashboard_request_finished`
//! event carrying the shape of the filter it was asked for.

use crate::api::{AppState, FilterParams};
use crate::domain::{CountryMode, YearRange};
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// The shape of a dashboard selection, without its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Selection {
    genres: usize,
    countries: usize,
    types: usize,
    year_bounded: bool,
    primary_only: bool,
    searching: bool,
}

impl Selection {
    fn of(params: &FilterParams) -> Self {
        let spec = params.filter_spec();
        Self {
            genres: spec.genres.len(),
            countries: spec.countries.len(),
            types: spec.types.len(),
            year_bounded: spec.years != YearRange::default(),
            primary_only: spec.country_mode == CountryMode::Primary,
            searching: !params.search_text().trim().is_empty(),
        }
    }

    /// Names of the dimensions that narrow the catalog.
    fn dimensions(self) -> impl Iterator<Item = &'static str> {
        [
            ("genre", self.genres > 0),
            ("country", self.countries > 0),
            ("type", self.types > 0),
            ("year", self.year_bounded),
            ("search", self.searching),
        ]
        .into_iter()
        .filter_map(|(name, active)| active.then_some(name))
    }
}

const fn outcome(status: u16) -> &'static str {
    match status {
        500.. => "error",
        400.. => "client_error",
        _ => "success",
    }
}

/// Request span, filter-aware completion event and dashboard metrics.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |mp| mp.as_str().to_string());
    let selection = req
        .uri()
        .query()
        .map(|q| Selection::of(&FilterParams::from_query(q)))
        .unwrap_or_default();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        endpoint = %endpoint,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status().as_u16();
        let elapsed = start.elapsed();

        let labels = [
            ("method", method),
            ("endpoint", endpoint),
            ("status", status.to_string()),
        ];
        metrics::counter!("dashboard_requests_total", &labels).increment(1);
        metrics::histogram!("dashboard_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());
        for dimension in selection.dimensions() {
            metrics::counter!("dashboard_filter_dimension_total", "dimension" => dimension)
                .increment(1);
        }

        info!(
            event = "dashboard_request_finished",
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status,
            outcome = outcome(status),
            genres = selection.genres,
            countries = selection.countries,
            types = selection.types,
            year_bounded = selection.year_bounded,
            primary_only = selection.primary_only,
            searching = selection.searching,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_counts_active_dimensions() {
        let params = FilterParams::from_query(
            "genres=Drama,Comedy&countryMode=primary&yearMin=2010&q=%20",
        );
        let selection = Selection::of(&params);

        assert_eq!(selection.genres, 2);
        assert_eq!(selection.countries, 0);
        assert!(selection.primary_only);
        assert!(!selection.searching);
        assert_eq!(selection.dimensions().collect::<Vec<_>>(), vec!["genre", "year"]);
    }

    #[test]
    fn unfiltered_selection_has_no_dimensions() {
        let selection = Selection::of(&FilterParams::default());
        assert_eq!(selection, Selection::default());
        assert_eq!(selection.dimensions().count(), 0);
    }

    #[test]
    fn outcome_buckets_status_codes() {
        assert_eq!(outcome(200), "success");
        assert_eq!(outcome(404), "client_error");
        assert_eq!(outcome(503), "error");
    }
}
