//! Public estimator routes
//!
//! Handles: GET /api/questions, POST /api/estimate

use crate::catalog::Catalog;
use crate::models::{AnswerSet, EstimateResult};
use crate::server::error::ApiError;
use crate::server::ServerAppState;
use crate::wizard;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub answers: AnswerSet,
}

/// The question catalog the estimator is scoring against
pub async fn questions_handler(State(state): State<ServerAppState>) -> Json<Catalog> {
    Json(state.estimator.catalog().as_ref().clone())
}

/// Score a completed questionnaire
pub async fn estimate_handler(
    State(state): State<ServerAppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResult>, ApiError> {
    let Json(request) = payload?;

    wizard::validate_required(&request.answers, state.estimator.catalog())?;

    let estimate = state.estimator.estimate(&request.answers);
    log::debug!(
        "Estimate computed: {} tier, fit {}",
        estimate.tier,
        estimate.fit_score
    );
    Ok(Json(estimate))
}
