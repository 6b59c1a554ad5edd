use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned to HTTP callers. Details of upstream failures stay in the log.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Text is required")]
    TextRequired,

    #[error("Invalid request body")]
    MalformedPayload,

    #[error("Failed to generate flashcards")]
    GenerationFailed,
}

/// JSON body of an error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TextRequired | ApiError::MalformedPayload => StatusCode::BAD_REQUEST,
            ApiError::GenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
