//! Lead intake routes
//!
//! Handles: POST /api/leads/estimate, POST /api/leads/contact
//!
//! Both respond as soon as the lead is accepted; notification mail goes out
//! in the background and a delivery failure never fails the request.

use crate::models::{ContactSubmission, EstimateSubmission};
use crate::notifications::format_price_range;
use crate::server::error::ApiError;
use crate::server::ServerAppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAccepted {
    pub success: bool,
    pub message: String,
    pub lead_id: Uuid,
}

impl LeadAccepted {
    fn new(message: &str, lead_id: Uuid) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            lead_id,
        }
    }
}

pub async fn estimate_lead_handler(
    State(state): State<ServerAppState>,
    payload: Result<Json<EstimateSubmission>, JsonRejection>,
) -> Result<Json<LeadAccepted>, ApiError> {
    let Json(submission) = payload?;
    let lead = submission.validate(chrono::Utc::now())?;

    log::info!(
        "New estimate lead {}: {} tier, {}, client email {}",
        lead.lead_id,
        lead.estimate.tier,
        format_price_range(lead.estimate.price_range),
        lead.client_email.as_deref().unwrap_or("not provided")
    );

    let messages = state.notifier.estimate_messages(&lead)?;
    state.dispatch(messages);

    Ok(Json(LeadAccepted::new(
        "Estimate submitted successfully",
        lead.lead_id,
    )))
}

pub async fn contact_lead_handler(
    State(state): State<ServerAppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<LeadAccepted>, ApiError> {
    let Json(submission) = payload?;
    let lead = submission.validate(chrono::Utc::now())?;

    log::info!(
        "New contact lead {}: {} <{}>, project type {}, has estimate: {}",
        lead.lead_id,
        lead.name,
        lead.email,
        lead.project_type,
        lead.has_estimate()
    );

    let messages = state.notifier.contact_messages(&lead)?;
    state.dispatch(messages);

    Ok(Json(LeadAccepted::new(
        "Contact form submitted successfully",
        lead.lead_id,
    )))
}
