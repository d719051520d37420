use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use tienda_core::pagination::Pagination;
use tienda_store::RepositoryError;

const SUCCESS: &str = "success";
const ERROR: &str = "error";

/// `{status: "success", data}` envelope.
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataBody<T> {
    pub fn new(data: T) -> Self {
        Self { status: SUCCESS, data }
    }
}

/// `{status: "success", data, pagination}` envelope for listings.
#[derive(Debug, Serialize)]
pub struct PagedBody<T> {
    pub status: &'static str,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PagedBody<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self { status: SUCCESS, data, pagination }
    }
}

/// `{status: "success", message}` envelope for operations without a payload.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub status: &'static str,
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { status: SUCCESS, message: message.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Error surface of the HTTP layer, mapped onto the response envelope.
#[derive(Debug)]
pub enum ApiError {
    /// 422 — request shape or field constraints violated.
    InvalidInput { details: Vec<String> },
    /// 404 — no active entity behind the identifier (or unknown route).
    NotFound { message: String },
    /// 500 — storage failure; the cause is logged, not exposed.
    Internal,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Validation(validation) => {
                Self::InvalidInput { details: validation.violations }
            }
            RepositoryError::NotFound(_) => Self::not_found("product not found"),
            RepositoryError::Io(_) | RepositoryError::Serialize(_) => {
                error!(
                    event_name = "api.storage_failure",
                    error = %error,
                    "storage failure while handling request"
                );
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            Self::InvalidInput { details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    status: ERROR,
                    message: "invalid input data".to_string(),
                    details: Some(details),
                },
            ),
            Self::NotFound { message } => {
                (StatusCode::NOT_FOUND, ErrorBody { status: ERROR, message, details: None })
            }
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    status: ERROR,
                    message: "internal server error".to_string(),
                    details: None,
                },
            ),
        };
        (status_code, Json(body)).into_response()
    }
}
