//! Error handling for the Farm Layout Planner
//!
//! Provides consistent JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{LayoutError, SurveyError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Domain errors
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Survey error: {0}")]
    Survey(#[from] SurveyError),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", message.clone())
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::Layout(err) => match err {
                LayoutError::InvalidDimension { .. } => (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        field: Some("dimensions".to_string()),
                        ..ErrorDetail::new("INVALID_DIMENSION", err.to_string())
                    },
                ),
                LayoutError::PathTooShort(_) => (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail {
                        field: Some("cells".to_string()),
                        ..ErrorDetail::new("PATH_TOO_SHORT", err.to_string())
                    },
                ),
                LayoutError::InvalidGrid(_) | LayoutError::InvalidSpacing(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorDetail::new("INVALID_LAYOUT", err.to_string()),
                ),
            },
            AppError::Survey(err) => match err {
                SurveyError::AlreadyFinalized => (
                    StatusCode::CONFLICT,
                    ErrorDetail::new("SURVEY_FINALIZED", err.to_string()),
                ),
                SurveyError::InvalidFix(_) => (
                    StatusCode::BAD_REQUEST,
                    ErrorDetail::new("INVALID_GPS_FIX", err.to_string()),
                ),
                SurveyError::NotEnoughPoints(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorDetail::new("NOT_ENOUGH_POINTS", err.to_string()),
                ),
            },
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            ),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
