// Application error type and its HTTP mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

// Implement conversion from anyhow::Error for easier error propagation
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl From<crate::export::ExportError> for AppError {
    fn from(error: crate::export::ExportError) -> Self {
        AppError::InternalServerError(error.into())
    }
}

impl From<crate::financing::LoanInputError> for AppError {
    fn from(error: crate::financing::LoanInputError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(e) => {
                // Log the detailed error here, don't expose it to the client
                tracing::error!("Internal server error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::NotFound(message) => {
                tracing::debug!("Not found: {}", message);
                (StatusCode::NOT_FOUND, message)
            }
            AppError::BadRequest(message) => {
                tracing::warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}

// Define a custom Result type using our AppError
pub type AppResult<T> = Result<T, AppError>;
