use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use common::types::ErrorBody;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::stats::StatsError;

/// API-facing error: status code plus the `{success:false, error}` envelope.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            ServiceError::Model(_) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            ServiceError::Storage(_) => Self::internal(e.to_string()),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Unauthorized | AuthError::TokenError(_) => StatusCode::UNAUTHORIZED,
            AuthError::HashError(_) | AuthError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!(code = e.code(), error = %e, "auth failure");
        }
        Self::new(status, e.to_string())
    }
}

impl From<StatsError> for JsonApiError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            StatsError::RateLimited(msg) => Self::new(StatusCode::TOO_MANY_REQUESTS, msg),
            StatsError::Upstream(msg) => Self::new(StatusCode::BAD_GATEWAY, msg),
            StatsError::Parse(msg) => Self::new(StatusCode::BAD_GATEWAY, msg),
        }
    }
}
