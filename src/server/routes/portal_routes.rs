//! Client-portal routes (token protected)
//!
//! Handles: POST /api/portal/onboarding/suggest

use crate::models::{OnboardingData, TierSuggestion};
use crate::onboarding;
use crate::server::error::ApiError;
use crate::server::ServerAppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};

pub async fn suggest_tier_handler(
    State(state): State<ServerAppState>,
    payload: Result<Json<OnboardingData>, JsonRejection>,
) -> Result<Json<TierSuggestion>, ApiError> {
    let Json(data) = payload?;
    let suggestion = onboarding::suggest_tier(&data, &state.onboarding_profile);

    log::info!(
        "Onboarding suggestion: {} tier ({:?} confidence)",
        suggestion.tier,
        suggestion.confidence
    );
    Ok(Json(suggestion))
}
