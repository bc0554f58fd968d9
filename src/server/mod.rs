//! HTTP server for the estimator site and client portal
//!
//! Serves the question catalog, estimate calculation, lead intake and the
//! portal's onboarding tier suggestion as JSON.

mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use auth::{generate_auth_token, AuthLayer, PORTAL_PREFIX};
pub use error::{ApiError, ErrorBody};
pub use state::ServerAppState;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue,
    },
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// How long shutdown waits for queued lead mail
const DELIVERY_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Version information for the server
#[derive(serde::Serialize)]
struct VersionInfo {
    version: String,
    name: String,
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    // Explicit headers instead of Any: browsers warn when Authorization meets a wildcard
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    if cors_origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let allowed_origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(allowed_origins)
    }
}

/// Build the full application router.
/// Layer order: cors (outer) -> auth -> handler, so preflight never hits auth.
pub fn build_router(state: ServerAppState, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .route("/health", get(health_handler))
        .route("/api/version", get(version_handler))
        .layer(AuthLayer::new(state.portal_token.clone()))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Run the HTTP server until shutdown is requested
pub async fn run_server(
    port: u16,
    bind: &str,
    state: ServerAppState,
    cors_origins: Vec<String>,
) -> Result<(), String> {
    let app = build_router(state.clone(), &cors_origins);

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let cors_display = if cors_origins.is_empty() {
        "*".to_string()
    } else {
        cors_origins.join(", ")
    };

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  TechAssist Estimator Server                  ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║                                                               ║");
    println!("║  Server URL: http://{}:{:<24}  ║", bind, port);
    println!("║                                                               ║");
    println!("║  Portal Token: {}  ║", state.portal_token);
    println!("║                                                               ║");
    println!("║  CORS Origins: {:<45}║", cors_display);
    println!("║  Mailer: {:<51}║", state.mailer.name());
    println!("║                                                               ║");
    println!("║  Endpoints:                                                   ║");
    println!("║    GET  /api/questions           - Question catalog          ║");
    println!("║    POST /api/estimate            - Calculate estimate        ║");
    println!("║    POST /api/leads/estimate      - Submit estimate lead      ║");
    println!("║    POST /api/leads/contact       - Submit contact form       ║");
    println!("║    POST /api/portal/onboarding/suggest - Tier suggestion     ║");
    println!("║    GET  /health                  - Health check              ║");
    println!("║                                                               ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server listening on http://{}", addr);

    // Create shutdown signal that waits for the shutdown state flag
    let shutdown_state = state.shutdown_state.clone();
    let shutdown_signal = async move {
        loop {
            if shutdown_state.is_shutdown_requested() {
                log::info!("Shutdown signal received, stopping server...");
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    state
        .shutdown_state
        .drain_deliveries(DELIVERY_DRAIN_TIMEOUT)
        .await;
    log::info!("Server stopped");
    Ok(())
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Version endpoint
async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
    })
}
