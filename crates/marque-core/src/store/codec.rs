//! Typed record access over a store transaction.
//!
//! Each helper owns the (table, key, encoding) triple for one record kind,
//! so the registry never touches raw bytes. Records are serde_json-encoded.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::types::{AccountId, AssetId, LabelDescriptor, LabelId};

use super::{StoreTxn, Table};

const ADMIN_KEY: &str = "admin";

fn encode<V: Serialize>(table: Table, value: &V) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(value).map_err(|e| StoreError::Codec {
        table: table.name(),
        message: e.to_string(),
    })
}

fn decode<V: DeserializeOwned>(table: Table, bytes: &[u8]) -> Result<V, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Codec {
        table: table.name(),
        message: e.to_string(),
    })
}

// ==============================================================================
// Label descriptors
// ==============================================================================

pub(crate) fn read_descriptor<T: StoreTxn>(
    txn: &T,
    id: &LabelId,
) -> Result<Option<LabelDescriptor>, StoreError> {
    txn.get(Table::Labels, id.as_str())?
        .map(|bytes| decode(Table::Labels, &bytes))
        .transpose()
}

pub(crate) fn write_descriptor<T: StoreTxn>(
    txn: &mut T,
    id: &LabelId,
    descriptor: &LabelDescriptor,
) -> Result<(), StoreError> {
    let bytes = encode(Table::Labels, descriptor)?;
    txn.put(Table::Labels, id.as_str(), bytes)
}

pub(crate) fn delete_descriptor<T: StoreTxn>(
    txn: &mut T,
    id: &LabelId,
) -> Result<bool, StoreError> {
    txn.delete(Table::Labels, id.as_str())
}

// ==============================================================================
// Operator label lists
// ==============================================================================

pub(crate) fn read_operator_labels<T: StoreTxn>(
    txn: &T,
    operator: &AccountId,
) -> Result<Option<Vec<LabelId>>, StoreError> {
    txn.get(Table::OperatorLabels, operator.as_str())?
        .map(|bytes| decode(Table::OperatorLabels, &bytes))
        .transpose()
}

pub(crate) fn write_operator_labels<T: StoreTxn>(
    txn: &mut T,
    operator: &AccountId,
    labels: &[LabelId],
) -> Result<(), StoreError> {
    let bytes = encode(Table::OperatorLabels, &labels)?;
    txn.put(Table::OperatorLabels, operator.as_str(), bytes)
}

pub(crate) fn delete_operator_labels<T: StoreTxn>(
    txn: &mut T,
    operator: &AccountId,
) -> Result<bool, StoreError> {
    txn.delete(Table::OperatorLabels, operator.as_str())
}

// ==============================================================================
// Asset label lists
// ==============================================================================

pub(crate) fn read_asset_labels<T: StoreTxn>(
    txn: &T,
    asset: AssetId,
) -> Result<Option<Vec<LabelId>>, StoreError> {
    txn.get(Table::AssetLabels, &asset.to_string())?
        .map(|bytes| decode(Table::AssetLabels, &bytes))
        .transpose()
}

pub(crate) fn write_asset_labels<T: StoreTxn>(
    txn: &mut T,
    asset: AssetId,
    labels: &[LabelId],
) -> Result<(), StoreError> {
    let bytes = encode(Table::AssetLabels, &labels)?;
    txn.put(Table::AssetLabels, &asset.to_string(), bytes)
}

pub(crate) fn delete_asset_labels<T: StoreTxn>(
    txn: &mut T,
    asset: AssetId,
) -> Result<bool, StoreError> {
    txn.delete(Table::AssetLabels, &asset.to_string())
}

// ==============================================================================
// Admin scalar
// ==============================================================================

pub(crate) fn read_admin<T: StoreTxn>(txn: &T) -> Result<Option<AccountId>, StoreError> {
    txn.get(Table::Meta, ADMIN_KEY)?
        .map(|bytes| decode(Table::Meta, &bytes))
        .transpose()
}

pub(crate) fn write_admin<T: StoreTxn>(
    txn: &mut T,
    admin: &AccountId,
) -> Result<(), StoreError> {
    let bytes = encode(Table::Meta, admin)?;
    txn.put(Table::Meta, ADMIN_KEY, bytes)
}
