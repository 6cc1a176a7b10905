//! Browse endpoint: lists candidate images so the form can offer a picker

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    /// Directory to list; absent or empty means the root folder
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub dir: String,
    pub images: Vec<String>,
}

/// GET /api/browse?dir=<path>
pub async fn browse_images(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> ApiResult<Json<BrowseResponse>> {
    let dir = query
        .dir
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| state.root_folder.clone());

    let listing_dir = dir.clone();
    let images = tokio::task::spawn_blocking(move || fdrk_common::browse::list_images(&listing_dir))
        .await
        .map_err(|e| ApiError::Internal(format!("Browse task failed: {}", e)))??;

    Ok(Json(BrowseResponse {
        dir: dir.to_string_lossy().into_owned(),
        images: images
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect(),
    }))
}

pub fn browse_routes() -> Router<AppState> {
    Router::new().route("/api/browse", get(browse_images))
}
