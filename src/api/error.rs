use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::model::AnnotationValidationError;

/// Body of every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(message: &str, details: impl Into<String>) -> Self {
        Self {
            error: message.to_string(),
            details: Some(details.into()),
        }
    }
}

/// Every way a request can fail. Storage variants carry no detail; the cause
/// is logged where it happens and never sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request format")]
    InvalidRequest(String),
    #[error("At least one label is required")]
    NoLabels,
    #[error("Failed to load examples")]
    LoadExamples,
    #[error("Failed to save annotation")]
    SaveAnnotation,
    #[error("No annotations found")]
    NoAnnotations,
    #[error("Failed to export annotations")]
    ExportAnnotations,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::NoLabels => StatusCode::BAD_REQUEST,
            ApiError::NoAnnotations => StatusCode::NOT_FOUND,
            ApiError::LoadExamples | ApiError::SaveAnnotation | ApiError::ExportAnnotations => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> ErrorResponse {
        let message = self.to_string();
        match self {
            ApiError::InvalidRequest(details) => ErrorResponse::with_details(&message, details),
            _ => ErrorResponse::new(&message),
        }
    }
}

impl From<AnnotationValidationError> for ApiError {
    fn from(err: AnnotationValidationError) -> Self {
        match err {
            AnnotationValidationError::MissingId => ApiError::InvalidRequest(err.to_string()),
            AnnotationValidationError::NoLabels => ApiError::NoLabels,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
