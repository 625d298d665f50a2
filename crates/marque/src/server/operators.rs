use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use marque_core::AccountId;

use super::auth::{caller_identity, check_auth};
use super::error::{map_registry_error, AppError};
use super::labels::parse_label_id;
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct GrantOperatorRequest {
    operator: String,
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn grant_operator(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(label): Path<String>,
    req: Result<Json<GrantOperatorRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let caller = caller_identity(&headers)?;
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let label = parse_label_id(&label)?;
    let operator = parse_account(&req.operator)?;

    let mut registry = state.registry.write().await;
    registry
        .grant_operator(&caller, &operator, &label)
        .map_err(map_registry_error)?;

    Ok(Json(serde_json::json!({ "status": "granted" })))
}

pub(super) async fn revoke_operator(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((label, operator)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let caller = caller_identity(&headers)?;
    let label = parse_label_id(&label)?;
    let operator = parse_account(&operator)?;

    let mut registry = state.registry.write().await;
    registry
        .revoke_operator(&caller, &operator, &label)
        .map_err(map_registry_error)?;

    Ok(Json(serde_json::json!({ "status": "revoked" })))
}

pub(super) async fn list_operator_labels(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(operator): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let operator = parse_account(&operator)?;

    let registry = state.registry.read().await;
    let labels = registry
        .list_operator_labels(&operator)
        .map_err(map_registry_error)?;
    Ok(Json(labels.iter().map(ToString::to_string).collect()))
}

// ==============================================================================
// Helpers
// ==============================================================================

pub(super) fn parse_account(raw: &str) -> Result<AccountId, AppError> {
    raw.parse::<AccountId>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
