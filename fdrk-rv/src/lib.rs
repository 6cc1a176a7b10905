//! fdrk-rv library - Ranking View service
//!
//! Read-only: renders `rank.csv` as an HTML table and a JSON listing. It never
//! writes to the root folder.

use axum::Router;
use fdrk_common::RankingReader;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod page;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Reader over the ranked table (re-reads the file per request)
    pub reader: RankingReader,
}

impl AppState {
    pub fn new(reader: RankingReader) -> Self {
        Self { reader }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/api/rankings", get(api::get_rankings))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
