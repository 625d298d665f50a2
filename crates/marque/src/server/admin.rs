use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use marque_core::AccountId;

use super::auth::{caller_identity, check_auth};
use super::error::{map_registry_error, AppError};
use super::SharedState;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ChangeAdminRequest {
    new_admin: String,
}

pub(super) async fn get_admin(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let registry = state.registry.read().await;
    let admin = registry.admin().map_err(map_registry_error)?;
    Ok(Json(serde_json::json!({ "admin": admin })))
}

pub(super) async fn change_admin(
    State(state): State<SharedState>,
    headers: HeaderMap,
    req: Result<Json<ChangeAdminRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let caller = caller_identity(&headers)?;
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let new_admin = req
        .new_admin
        .parse::<AccountId>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut registry = state.registry.write().await;
    registry
        .change_admin(&caller, new_admin.clone())
        .map_err(map_registry_error)?;

    Ok(Json(serde_json::json!({ "admin": new_admin })))
}
