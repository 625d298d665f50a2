use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use marque_core::{ProviderError, RegistryError};

// ==============================================================================
// Error Type
// ==============================================================================

pub(crate) enum AppError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub(super) fn map_registry_error(err: RegistryError) -> AppError {
    match err {
        RegistryError::Unauthorized(_) => AppError::Forbidden(err.to_string()),
        RegistryError::AlreadyExists(_) | RegistryError::NonEmptyConflict(_) => {
            AppError::Conflict(err.to_string())
        }
        RegistryError::NotFound(_) => AppError::NotFound(err.to_string()),
        RegistryError::InvalidLength(_)
        | RegistryError::InvalidAccount
        | RegistryError::CapacityExceeded(_) => AppError::BadRequest(err.to_string()),
        RegistryError::Store(_) => AppError::Internal(err.to_string()),
    }
}

pub(super) fn map_provider_error(err: ProviderError) -> AppError {
    match err {
        ProviderError::AssetNotFound(_) => AppError::NotFound(err.to_string()),
        ProviderError::Backend(_) => AppError::BadGateway(err.to_string()),
    }
}
