//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use phishguard_core::{PredictErrorKind, Verdict};
use serde::Deserialize;

use crate::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Missing is treated like an empty URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Transport status for a verdict
pub fn status_for(verdict: &Verdict) -> StatusCode {
    match verdict.error_kind {
        None => StatusCode::OK,
        Some(PredictErrorKind::MissingInput) => StatusCode::BAD_REQUEST,
        Some(PredictErrorKind::ModelUnavailable) | Some(PredictErrorKind::PredictionFailure) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Classify a URL
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Verdict>)> {
    let Json(req) = payload?;
    let url = req.url.unwrap_or_default();

    let verdict = state.service.predict(&url);

    if verdict.error_kind.is_none() {
        tracing::info!(
            "{} -> {:?} (score: {}, confidence: {})",
            url.trim(),
            verdict.prediction,
            verdict.risk_score,
            verdict.confidence
        );
    }

    Ok((status_for(&verdict), Json(verdict)))
}
