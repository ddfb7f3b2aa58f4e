use axum::{Router, http::HeaderValue, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::AnalyticsService;
use crate::state::SharedState;

mod dashboard;
mod error;
mod observability;
mod query;
mod system;
mod titles;

pub use error::{ApiError, ErrorBody};
pub use query::FilterParams;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn analytics(&self) -> &Arc<dyn AnalyticsService> {
        &self.shared.analytics
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config().server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route("/summary", get(dashboard::get_summary))
        .route("/timeline", get(dashboard::get_timeline))
        .route("/genres", get(dashboard::get_genres))
        .route("/countries", get(dashboard::get_countries))
        .route("/scatter", get(dashboard::get_scatter))
        .route("/insights", get(dashboard::get_insights))
        .route("/search", get(titles::search_titles))
        .route("/titles", get(titles::list_titles))
        .route("/health", get(system::get_health))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(observability::track_metrics))
        .fallback(system::not_found)
        .with_state(state);

    Router::new()
        .nest("/api", api_router)
        .fallback(system::not_found)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
