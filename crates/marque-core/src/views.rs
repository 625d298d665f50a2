//! Read-only asset view projections.
//!
//! Each shape copies a subset of [`AssetInfo`] fields; the label-bearing
//! shapes append the asset's current label list. Composers are pure — the
//! caller fetches the metadata and the labels, the composer only arranges
//! them — so this module contains no index logic at all.

use std::str::FromStr;

use serde::Serialize;

use crate::provider::AssetInfo;
use crate::types::{AccountId, LabelId};

// ==============================================================================
// View shapes
// ==============================================================================

/// Smallest projection: unit and precision only.
#[derive(Debug, Clone, Serialize)]
pub struct AssetMicro {
    pub unit_name: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetMicroLabels {
    pub unit_name: String,
    pub decimals: u8,
    pub labels: Vec<LabelId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetTiny {
    pub name: String,
    pub unit_name: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetTinyLabels {
    pub name: String,
    pub unit_name: String,
    pub decimals: u8,
    pub labels: Vec<LabelId>,
}

/// Searchable text fields only.
#[derive(Debug, Clone, Serialize)]
pub struct AssetText {
    pub name: String,
    pub unit_name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetTextLabels {
    pub name: String,
    pub unit_name: String,
    pub url: String,
    pub labels: Vec<LabelId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetSmall {
    pub name: String,
    pub unit_name: String,
    pub decimals: u8,
    pub total: u64,
    pub has_freeze: bool,
    pub has_clawback: bool,
    pub labels: Vec<LabelId>,
}

/// Everything the provider knows, plus the label list.
#[derive(Debug, Clone, Serialize)]
pub struct AssetFull {
    pub name: String,
    pub unit_name: String,
    pub url: String,
    pub total: u64,
    pub decimals: u8,
    pub creator: Option<AccountId>,
    pub manager: Option<AccountId>,
    pub freeze: Option<AccountId>,
    pub clawback: Option<AccountId>,
    pub reserve: Option<AccountId>,
    pub default_frozen: bool,
    pub reserve_balance: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_hash: Option<Vec<u8>>,
    pub labels: Vec<LabelId>,
}

/// One value for any of the eight shapes; serializes as the bare shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AssetView {
    Micro(AssetMicro),
    MicroLabels(AssetMicroLabels),
    Tiny(AssetTiny),
    TinyLabels(AssetTinyLabels),
    Text(AssetText),
    TextLabels(AssetTextLabels),
    Small(AssetSmall),
    Full(AssetFull),
}

// ==============================================================================
// View kinds
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Micro,
    MicroLabels,
    Tiny,
    TinyLabels,
    Text,
    TextLabels,
    Small,
    Full,
}

impl ViewKind {
    /// Whether this shape carries the label list. Label-free shapes let a
    /// caller skip the registry read entirely.
    pub fn wants_labels(&self) -> bool {
        !matches!(self, Self::Micro | Self::Tiny | Self::Text)
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "micro" => Ok(Self::Micro),
            "micro-labels" => Ok(Self::MicroLabels),
            "tiny" => Ok(Self::Tiny),
            "tiny-labels" => Ok(Self::TinyLabels),
            "text" => Ok(Self::Text),
            "text-labels" => Ok(Self::TextLabels),
            "small" => Ok(Self::Small),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown view kind {other:?}")),
        }
    }
}

/// Arrange `info` and `labels` into the requested shape.
pub fn compose(kind: ViewKind, info: &AssetInfo, labels: Vec<LabelId>) -> AssetView {
    match kind {
        ViewKind::Micro => AssetView::Micro(AssetMicro {
            unit_name: info.unit_name.clone(),
            decimals: info.decimals,
        }),
        ViewKind::MicroLabels => AssetView::MicroLabels(AssetMicroLabels {
            unit_name: info.unit_name.clone(),
            decimals: info.decimals,
            labels,
        }),
        ViewKind::Tiny => AssetView::Tiny(AssetTiny {
            name: info.name.clone(),
            unit_name: info.unit_name.clone(),
            decimals: info.decimals,
        }),
        ViewKind::TinyLabels => AssetView::TinyLabels(AssetTinyLabels {
            name: info.name.clone(),
            unit_name: info.unit_name.clone(),
            decimals: info.decimals,
            labels,
        }),
        ViewKind::Text => AssetView::Text(AssetText {
            name: info.name.clone(),
            unit_name: info.unit_name.clone(),
            url: info.url.clone(),
        }),
        ViewKind::TextLabels => AssetView::TextLabels(AssetTextLabels {
            name: info.name.clone(),
            unit_name: info.unit_name.clone(),
            url: info.url.clone(),
            labels,
        }),
        ViewKind::Small => AssetView::Small(AssetSmall {
            name: info.name.clone(),
            unit_name: info.unit_name.clone(),
            decimals: info.decimals,
            total: info.total,
            has_freeze: info.freeze.is_some(),
            has_clawback: info.clawback.is_some(),
            labels,
        }),
        ViewKind::Full => AssetView::Full(AssetFull {
            name: info.name.clone(),
            unit_name: info.unit_name.clone(),
            url: info.url.clone(),
            total: info.total,
            decimals: info.decimals,
            creator: info.creator.clone(),
            manager: info.manager.clone(),
            freeze: info.freeze.clone(),
            clawback: info.clawback.clone(),
            reserve: info.reserve.clone(),
            default_frozen: info.default_frozen,
            reserve_balance: info.reserve_balance,
            metadata_hash: info.metadata_hash.clone(),
            labels,
        }),
    }
}
