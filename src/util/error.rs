use axum::{http::StatusCode, response::{IntoResponse, Response}};
use serde_json::json;

use crate::dto::bid_request_dto::ApiResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    RateLimited,
    BadRequest,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::RateLimited => "RateLimited",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub errors: Option<Vec<String>>,
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let data = self.errors.map(|errors| json!({ "errors": errors }));
        let body = axum::Json(ApiResponse::error(self.message, data));
        (status, body).into_response()
    }
}

#[derive(Debug, Clone)]
pub enum ServiceError {
    NotFound(String),
    Validation(Vec<String>),
    InvalidInput(String),
    RateLimited(String),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::Validation(errors) => write!(f, "Validation Failed: {}", errors.join(", ")),
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::RateLimited(msg) => write!(f, "Rate Limited: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

// Allow conversion from RepositoryError to ServiceError
impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::DatabaseError(msg) => ServiceError::InternalError(msg),
            RepositoryError::ConnectionError(msg) => ServiceError::InternalError(msg),
            RepositoryError::SerializationError(msg) => ServiceError::InternalError(msg),
            RepositoryError::Generic(e) => ServiceError::InternalError(e.to_string()),
        }
    }
}

// Internal error detail stays in the logs; the response body only ever
// carries a generic message.
impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => HandlerError {
                error: HandlerErrorKind::NotFound,
                message: "Bid request not found".to_string(),
                errors: None,
            },
            ServiceError::Validation(errors) => HandlerError {
                error: HandlerErrorKind::Validation,
                message: "Validation failed".to_string(),
                errors: Some(errors),
            },
            ServiceError::InvalidInput(msg) => HandlerError {
                error: HandlerErrorKind::BadRequest,
                message: msg,
                errors: None,
            },
            ServiceError::RateLimited(msg) => HandlerError {
                error: HandlerErrorKind::RateLimited,
                message: msg,
                errors: None,
            },
            ServiceError::InternalError(_) => HandlerError {
                error: HandlerErrorKind::Internal,
                message: "Internal server error".to_string(),
                errors: None,
            },
        }
    }
}
