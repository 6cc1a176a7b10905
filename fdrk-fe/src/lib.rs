//! fdrk-fe library - Form Entry service
//!
//! Accepts food ratings over HTTP, reranks every entry and archives the
//! submitted image. The core work is done by `fdrk_common::FoodRanking`.

use axum::Router;
use fdrk_common::FoodRanking;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Table and image locations for the resolved root folder
    pub service: FoodRanking,
    /// Serializes submissions; each one is a read-modify-write of both tables
    pub submit_lock: Arc<Mutex<()>>,
    pub root_folder: PathBuf,
}

impl AppState {
    pub fn new(service: FoodRanking, root_folder: PathBuf) -> Self {
        Self {
            service,
            submit_lock: Arc::new(Mutex::new(())),
            root_folder,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::submission_routes())
        .merge(api::browse_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
