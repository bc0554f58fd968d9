//! JSON error responses for the API
//!
//! Every failure leaves the server as `{error, message, statusCode}` so the
//! site can show `message` without inspecting the status.

use crate::models::LeadValidationError;
use crate::wizard::WizardError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Lead(#[from] LeadValidationError),

    #[error(transparent)]
    Incomplete(#[from] WizardError),

    #[error("Invalid or missing Bearer token")]
    Unauthorized,

    #[error("{0}")]
    Internal(String),
}

/// Wire shape of an error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    pub status_code: u16,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::Lead(_) | ApiError::Incomplete(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) => "BadRequest",
            ApiError::Lead(_) | ApiError::Incomplete(_) => "ValidationError",
            ApiError::Unauthorized => "UnauthorizedError",
            ApiError::Internal(_) => "InternalServerError",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            error: self.name(),
            message: self.to_string(),
            status_code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        assert_eq!(
            ApiError::Incomplete(WizardError::StepIncomplete { step: 2 }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_wizard_message_passes_through() {
        let err = ApiError::from(WizardError::StepIncomplete { step: 3 });
        assert_eq!(err.to_string(), "Please complete step 3");
        assert_eq!(err.name(), "ValidationError");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::Lead(LeadValidationError::MissingFields(vec!["answers"]))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
