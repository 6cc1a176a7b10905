//! Submission endpoint
//!
//! POST /api/submissions runs the whole submit flow: validate, append,
//! rerank, archive and propagate the archived name.

use axum::{extract::State, routing::post, Json, Router};
use fdrk_common::{SubmissionForm, SubmissionOutcome};
use serde::Deserialize;
use tracing::info;

use crate::{ApiError, ApiResult, AppState};

/// A rating as sent by a client: form text or a JSON number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScoreInput {
    Number(f64),
    Text(String),
}

impl ScoreInput {
    fn into_text(self) -> String {
        match self {
            ScoreInput::Number(n) => n.to_string(),
            ScoreInput::Text(s) => s,
        }
    }
}

/// Request payload for a new submission
///
/// **Request:** `{"image": "/pics/photo.jpg", "taste": 8, "price": "6", "speed": 7, "remark": "spicy_noodles"}`
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub image: String,
    pub taste: ScoreInput,
    pub price: ScoreInput,
    pub speed: ScoreInput,
    #[serde(default)]
    pub remark: Option<String>,
}

impl From<SubmitRequest> for SubmissionForm {
    fn from(req: SubmitRequest) -> Self {
        SubmissionForm {
            image: req.image,
            taste: req.taste.into_text(),
            price: req.price.into_text(),
            speed: req.speed.into_text(),
            remark: req.remark.unwrap_or_default(),
        }
    }
}

/// POST /api/submissions
///
/// **Errors:**
/// - 400 Bad Request: score out of range or non-numeric, unusable remark
/// - 404 Not Found: image path missing or unreadable
/// - 500/503: table or archive I/O failure
pub async fn create_submission(
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> ApiResult<Json<SubmissionOutcome>> {
    let form = SubmissionForm::from(payload);

    // Guard moves into the blocking task and is released when the write completes
    let guard = state.submit_lock.clone().lock_owned().await;
    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        service.submit(&form)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Submission task failed: {}", e)))??;

    info!(
        "Submission stored as {} (rank {}/{})",
        outcome.image, outcome.rank, outcome.total_entries
    );
    Ok(Json(outcome))
}

pub fn submission_routes() -> Router<AppState> {
    Router::new().route("/api/submissions", post(create_submission))
}
