//! API route modules
//!
//! - estimate_routes: catalog and estimate calculation
//! - lead_routes: estimate and contact-form lead intake
//! - portal_routes: client-portal onboarding (behind the portal token)

pub mod estimate_routes;
pub mod lead_routes;
pub mod portal_routes;

use super::ServerAppState;
use axum::{
    routing::{get, post},
    Router,
};

/// All `/api` routes except version
pub fn api_routes() -> Router<ServerAppState> {
    Router::new()
        .route("/api/questions", get(estimate_routes::questions_handler))
        .route("/api/estimate", post(estimate_routes::estimate_handler))
        .route("/api/leads/estimate", post(lead_routes::estimate_lead_handler))
        .route("/api/leads/contact", post(lead_routes::contact_lead_handler))
        .route(
            "/api/portal/onboarding/suggest",
            post(portal_routes::suggest_tier_handler),
        )
}
