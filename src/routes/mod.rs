// HTTP routes

mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::stats_repo::StatsRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) stats_repo: Arc<StatsRepo>,
}

pub fn app(stats_repo: Arc<StatsRepo>, config: AppConfig) -> Router {
    let state = AppState { stats_repo };
    Router::new()
        .route("/", get(http::dashboard_handler)) // GET / (dashboard page)
        .route("/update", post(http::update_handler)) // POST /update
        .route("/api/stats", get(http::api_stats_handler)) // GET /api/stats
        .route("/version", get(http::version_handler)) // GET /version
        .nest_service("/static", ServeDir::new(&config.dashboard.static_dir))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
