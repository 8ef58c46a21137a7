use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::pipeline::Rejection;

/// Errors surfaced to the webhook caller. Everything else the pipeline
/// recovers from on its own.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, message).into_response()
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::InvalidSignature => ApiError::Forbidden(rejection.to_string()),
            Rejection::MissingFields => ApiError::BadRequest(rejection.to_string()),
        }
    }
}
