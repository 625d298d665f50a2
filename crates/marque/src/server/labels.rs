use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use marque_core::{LabelDescriptor, LabelId};

use super::auth::{caller_identity, check_auth};
use super::error::{map_registry_error, AppError};
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct CreateLabelRequest {
    id: String,
    name: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct GetLabelsRequest {
    ids: Vec<String>,
}

#[derive(Serialize)]
pub(super) struct LabelSummary {
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    num_assets: u64,
    num_operators: u64,
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn create_label(
    State(state): State<SharedState>,
    headers: HeaderMap,
    req: Result<Json<CreateLabelRequest>, JsonRejection>,
) -> Result<Json<LabelSummary>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let caller = caller_identity(&headers)?;
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let id = parse_label_id(&req.id)?;

    let mut registry = state.registry.write().await;
    registry
        .create_label(&caller, id.clone(), req.name, req.url)
        .map_err(map_registry_error)?;

    let descriptor = registry.get_label(&id).map_err(map_registry_error)?;
    Ok(Json(label_summary(&id, &descriptor)))
}

pub(super) async fn get_label(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<LabelSummary>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let id = parse_label_id(&id)?;

    let registry = state.registry.read().await;
    let descriptor = registry.get_label(&id).map_err(map_registry_error)?;
    Ok(Json(label_summary(&id, &descriptor)))
}

pub(super) async fn remove_label(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let caller = caller_identity(&headers)?;
    let id = parse_label_id(&id)?;

    let mut registry = state.registry.write().await;
    registry
        .remove_label(&caller, &id)
        .map_err(map_registry_error)?;

    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

pub(super) async fn get_labels_batch(
    State(state): State<SharedState>,
    headers: HeaderMap,
    req: Result<Json<GetLabelsRequest>, JsonRejection>,
) -> Result<Json<Vec<LabelSummary>>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;

    let ids = req
        .ids
        .iter()
        .map(|raw| parse_label_id(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = state.registry.read().await;
    let descriptors = registry.get_labels(&ids).map_err(map_registry_error)?;
    Ok(Json(
        ids.iter()
            .zip(&descriptors)
            .map(|(id, descriptor)| label_summary(id, descriptor))
            .collect(),
    ))
}

// ==============================================================================
// Helpers
// ==============================================================================

pub(super) fn parse_label_id(raw: &str) -> Result<LabelId, AppError> {
    raw.parse::<LabelId>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

pub(super) fn label_summary(id: &LabelId, descriptor: &LabelDescriptor) -> LabelSummary {
    LabelSummary {
        id: id.to_string(),
        name: descriptor.name.clone(),
        url: descriptor.url.clone(),
        num_assets: descriptor.num_assets,
        num_operators: descriptor.num_operators,
    }
}
