use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// ApiError
///
/// The domain error surface of the forum API. Every failure a handler or
/// extractor can produce is one of these variants, and each maps to a fixed
/// HTTP status with a structured `{"detail": message}` JSON body.
///
/// `InvalidCredential` and `PermissionDenied` are the two client-facing
/// domain kinds; `NotFound` covers lookups that miss, `Validation` covers
/// out-of-range query parameters, and `Database` is the pass-through for
/// storage failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The bearer credential was missing, malformed, or failed verification.
    #[error("Token not valid: {0}")]
    InvalidCredential(String),

    /// Authenticated, but the requester's groups do not permit the action.
    #[error("User {0} does not have enough permission to perform this action!")]
    PermissionDenied(String),

    /// The addressed entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Request parameters failed validation.
    #[error("{0}")]
    Validation(String),

    /// Underlying storage failure. Logged at the boundary; the client only
    /// sees a generic detail.
    #[error("internal server error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredential(_) | ApiError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(e) = &self {
            tracing::error!("database failure: {e:?}");
        }
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
