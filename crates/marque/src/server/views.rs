use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use marque_core::views::{compose, AssetView, ViewKind};
use marque_core::AssetId;

use super::auth::check_auth;
use super::error::{map_provider_error, map_registry_error, AppError};
use super::SharedState;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ViewAssetsRequest {
    assets: Vec<u64>,
}

pub(super) async fn get_asset_view(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path((asset, kind)): Path<(u64, String)>,
) -> Result<Json<AssetView>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let kind = parse_view_kind(&kind)?;
    let asset = AssetId(asset);

    let info = state
        .provider
        .asset_info(asset)
        .await
        .map_err(map_provider_error)?;
    let labels = if kind.wants_labels() {
        let registry = state.registry.read().await;
        registry
            .list_asset_labels(asset)
            .map_err(map_registry_error)?
    } else {
        Vec::new()
    };

    Ok(Json(compose(kind, &info, labels)))
}

pub(super) async fn get_assets_view_batch(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(kind): Path<String>,
    req: Result<Json<ViewAssetsRequest>, JsonRejection>,
) -> Result<Json<Vec<AssetView>>, AppError> {
    check_auth(&state.api_token, &headers)?;
    let kind = parse_view_kind(&kind)?;
    let Json(req) = req.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let assets: Vec<AssetId> = req.assets.iter().copied().map(AssetId).collect();

    let infos = state
        .provider
        .assets_info(&assets)
        .await
        .map_err(map_provider_error)?;
    let label_lists = if kind.wants_labels() {
        let registry = state.registry.read().await;
        registry
            .list_assets_labels(&assets)
            .map_err(map_registry_error)?
    } else {
        vec![Vec::new(); assets.len()]
    };

    Ok(Json(
        infos
            .iter()
            .zip(label_lists)
            .map(|(info, labels)| compose(kind, info, labels))
            .collect(),
    ))
}

fn parse_view_kind(raw: &str) -> Result<ViewKind, AppError> {
    raw.parse::<ViewKind>().map_err(AppError::BadRequest)
}
