use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::auth::AuthError;
use crate::domain::order::OrderError;
use crate::store::StoreError;

// ============================================================================
// API Error Taxonomy
// ============================================================================
//
// Everything a handler can fail with, mapped onto HTTP. Bodies are always
// `{"message": ...}`. Server-side detail is logged, never leaked: a 500
// carries only a generic message.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// User-correctable request problem.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Server misconfiguration")]
    Misconfiguration,

    /// The inner detail is logged server-side only.
    #[error("Something went wrong!")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Misconfiguration | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            tracing::error!(detail = %detail, "Request failed");
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "message": self.to_string() }))
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        // Every order rule violation is client-correctable.
        ApiError::Validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Not found".into()),
            StoreError::Duplicate(what) => ApiError::Duplicate(format!("{what} already exists")),
            StoreError::Persistence(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingFields | AuthError::MissingCredentials => {
                ApiError::Validation(err.to_string())
            }
            AuthError::EmailTaken => ApiError::Duplicate(err.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::MissingSecret => ApiError::Misconfiguration,
            AuthError::Hash(_) | AuthError::Token(_) | AuthError::Store(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
