//! Ranking listing: HTML page and JSON

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use fdrk_common::{DisplayRow, Error};
use serde_json::json;
use tracing::{debug, error};

use crate::page::{render_empty, render_rankings};
use crate::AppState;

async fn load_rows(state: &AppState) -> Result<Vec<DisplayRow>, RankingError> {
    let reader = state.reader.clone();
    tokio::task::spawn_blocking(move || reader.read())
        .await
        .map_err(|e| RankingError::Internal(e.to_string()))?
        .map_err(RankingError::from)
}

/// GET /
///
/// Renders the ranking table. A missing ranked table is the normal empty
/// state before the first submission, so it still returns 200.
pub async fn serve_index(State(state): State<AppState>) -> Response {
    match load_rows(&state).await {
        Ok(rows) => Html(render_rankings(&rows)).into_response(),
        Err(RankingError::Unavailable(msg)) => {
            debug!("Showing empty ranking page: {}", msg);
            Html(render_empty("Submit a rating to create the ranking.")).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/rankings
pub async fn get_rankings(
    State(state): State<AppState>,
) -> Result<Json<Vec<DisplayRow>>, RankingError> {
    load_rows(&state).await.map(Json)
}

/// Ranking API errors
#[derive(Debug)]
pub enum RankingError {
    Unavailable(String),
    Internal(String),
}

impl From<Error> for RankingError {
    fn from(err: Error) -> Self {
        match err {
            Error::RankingUnavailable { .. } => RankingError::Unavailable(err.to_string()),
            other => RankingError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for RankingError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            RankingError::Unavailable(msg) => (StatusCode::NOT_FOUND, "RANKING_UNAVAILABLE", msg),
            RankingError::Internal(msg) => {
                error!("Failed to read rankings: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
