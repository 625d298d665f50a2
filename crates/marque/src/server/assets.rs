use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use marque_core::AssetId;

use super::auth::{caller_identity, check_auth};
use super::error::{map_registry_error, AppError};
use super::labels::parse_label_id;
use super::SharedState;

// ==============================================================================
// DTOs
// ==============================================================================

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct AttachAssetRequest {
    asset: u64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct AttachAssetsRequest {
    assets: Vec<u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ListAssetsRequest {
    assets: Vec<u64>,
}

// ==============================================================================
// Handlers
// ==============================================================================

pub(super) async fn attach_label(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(label): Path<String>,
    req: Result<Json<AttachAssetRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let caller = caller_identity(&headers)?;
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let label = parse_label_id(&label)?;

    let mut registry = state.registry.write().await;
    registry
        .attach_label(&caller, &label, AssetId(req.asset))
        .map_err(map_registry_error)?;

    Ok(Json(serde_json::json!({ "status": "attached" })))
}

pub(super) async fn attach_label_batch(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(label): Path<String>,
    req: Result<Json<AttachAssetsRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let caller = caller_identity(&headers)?;
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let label = parse_label_id(&label)?;
    let assets: Vec<AssetId> = req.assets.iter().copied().map(AssetId).collect();

    let mut registry = state.registry.write().await;
    registry
        .attach_label_batch(&caller, &label, &assets)
        .map_err(map_registry_error)?;

    Ok(Json(
        serde_json::json!({ "status": "attached", "count": assets.len() }),
    ))
}

pub(super) async fn detach_label(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((label, asset)): Path<(String, u64)>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let caller = caller_identity(&headers)?;
    let label = parse_label_id(&label)?;

    let mut registry = state.registry.write().await;
    registry
        .detach_label(&caller, &label, AssetId(asset))
        .map_err(map_registry_error)?;

    Ok(Json(serde_json::json!({ "status": "detached" })))
}

pub(super) async fn list_asset_labels(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(asset): Path<u64>,
) -> Result<Json<Vec<String>>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let registry = state.registry.read().await;
    let labels = registry
        .list_asset_labels(AssetId(asset))
        .map_err(map_registry_error)?;
    Ok(Json(labels.iter().map(ToString::to_string).collect()))
}

pub(super) async fn list_assets_labels_batch(
    State(state): State<SharedState>,
    headers: HeaderMap,
    req: Result<Json<ListAssetsRequest>, JsonRejection>,
) -> Result<Json<Vec<Vec<String>>>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let assets: Vec<AssetId> = req.assets.iter().copied().map(AssetId).collect();

    let registry = state.registry.read().await;
    let lists = registry
        .list_assets_labels(&assets)
        .map_err(map_registry_error)?;
    Ok(Json(
        lists
            .into_iter()
            .map(|labels| labels.iter().map(ToString::to_string).collect())
            .collect(),
    ))
}
