// Clippy allows for reasonable defaults
#![allow(clippy::new_without_default)] // Default not always appropriate for stateful types
#![allow(clippy::derivable_impls)] // Explicit Default impls can be clearer

// Module declarations
pub mod catalog;
pub mod config;
pub mod estimator;
pub mod models;
pub mod notifications;
pub mod onboarding;
pub mod scoring;
pub mod shutdown;
pub mod wizard;

// Server module (HTTP API)
pub mod server;

pub use estimator::{compute_estimate, Estimator};
pub use models::{AnswerSet, EstimateResult, Tier};
