use axum::http::HeaderMap;

use marque_core::AccountId;

use super::error::AppError;

pub(super) fn check_auth(expected_token: &str, headers: &HeaderMap) -> Result<(), AppError> {
    let token = headers
        .get("x-api-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if token != expected_token {
        return Err(AppError::Unauthorized(
            "invalid or missing X-API-Token".to_string(),
        ));
    }
    Ok(())
}

/// The acting identity for a mutating call, read from `X-Caller-Id`.
/// This is the server's stand-in for a host-supplied sender: the registry
/// itself only sees the resulting `AccountId`.
pub(super) fn caller_identity(headers: &HeaderMap) -> Result<AccountId, AppError> {
    let raw = headers
        .get("x-caller-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("missing X-Caller-Id header".to_string())
        })?;

    raw.parse::<AccountId>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
