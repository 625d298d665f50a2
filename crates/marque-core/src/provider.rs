//! Asset metadata provider abstraction.
//!
//! The registry never stores asset metadata; view projections pull it from
//! an [`AssetProvider`]. Two implementations ship: [`HttpProvider`] for a
//! remote metadata service (with a small in-process cache, since asset
//! metadata is effectively immutable), and [`StaticProvider`] for tests
//! and offline use, populated via the builder or loaded from a JSON file.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::types::{AccountId, AssetId};

/// Metadata for one asset, as supplied by the surrounding platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub name: String,
    pub unit_name: String,
    pub decimals: u8,
    pub url: String,
    pub total: u64,
    pub creator: Option<AccountId>,
    pub manager: Option<AccountId>,
    pub freeze: Option<AccountId>,
    pub clawback: Option<AccountId>,
    pub reserve: Option<AccountId>,
    pub default_frozen: bool,
    pub reserve_balance: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_hash: Option<Vec<u8>>,
}

/// Source of asset metadata for the view composers.
#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// Fetch metadata for one asset.
    async fn asset_info(&self, asset: AssetId) -> Result<AssetInfo, ProviderError>;

    /// Fetch metadata for many assets, results parallel to the input.
    /// Implementations may batch; the default fetches sequentially.
    async fn assets_info(&self, assets: &[AssetId]) -> Result<Vec<AssetInfo>, ProviderError> {
        let mut results = Vec::with_capacity(assets.len());
        for asset in assets {
            results.push(self.asset_info(*asset).await?);
        }
        Ok(results)
    }
}

// ==============================================================================
// HTTP provider
// ==============================================================================

/// Fetches `AssetInfo` from `GET {base_url}/assets/{id}`.
///
/// Responses are cached per asset id; the platform treats asset metadata
/// as immutable once issued, so entries never expire.
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
    cache: quick_cache::sync::Cache<AssetId, AssetInfo>,
}

impl HttpProvider {
    pub fn new(base_url: &str, cache_capacity: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: quick_cache::sync::Cache::new(cache_capacity),
        }
    }
}

#[async_trait]
impl AssetProvider for HttpProvider {
    async fn asset_info(&self, asset: AssetId) -> Result<AssetInfo, ProviderError> {
        if let Some(info) = self.cache.get(&asset) {
            return Ok(info);
        }

        let url = format!("{}/assets/{asset}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Backend(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::AssetNotFound(asset));
        }
        let response = response
            .error_for_status()
            .map_err(|e| ProviderError::Backend(e.to_string()))?;

        let info: AssetInfo = response
            .json()
            .await
            .map_err(|e| ProviderError::Backend(format!("invalid asset metadata: {e}")))?;

        self.cache.insert(asset, info.clone());
        Ok(info)
    }
}

// ==============================================================================
// Static provider
// ==============================================================================

/// A canned metadata backend: a map populated via the builder pattern, or
/// loaded from a JSON file of `{"<asset id>": AssetInfo, ...}`.
pub struct StaticProvider {
    assets: HashMap<AssetId, AssetInfo>,
}

impl StaticProvider {
    pub fn builder() -> StaticProviderBuilder {
        StaticProviderBuilder {
            assets: HashMap::new(),
        }
    }

    /// An empty provider: every lookup fails `AssetNotFound`.
    pub fn empty() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// Load asset metadata from a JSON file keyed by decimal asset id.
    pub fn from_json_file(path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::Backend(format!("read {}: {e}", path.display())))?;
        let by_id: HashMap<u64, AssetInfo> = serde_json::from_str(&content)
            .map_err(|e| ProviderError::Backend(format!("parse {}: {e}", path.display())))?;
        Ok(Self {
            assets: by_id.into_iter().map(|(id, info)| (AssetId(id), info)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

pub struct StaticProviderBuilder {
    assets: HashMap<AssetId, AssetInfo>,
}

impl StaticProviderBuilder {
    pub fn with_asset(mut self, asset: AssetId, info: AssetInfo) -> Self {
        self.assets.insert(asset, info);
        self
    }

    pub fn build(self) -> StaticProvider {
        StaticProvider {
            assets: self.assets,
        }
    }
}

#[async_trait]
impl AssetProvider for StaticProvider {
    async fn asset_info(&self, asset: AssetId) -> Result<AssetInfo, ProviderError> {
        self.assets
            .get(&asset)
            .cloned()
            .ok_or(ProviderError::AssetNotFound(asset))
    }
}
