//! Asset binding index: which labels each asset currently carries.
//!
//! Binding authority is strictly delegated: only an operator of a label
//! may attach or detach it, and the admin does not bypass the check. Batch
//! attach shares one transaction across all elements, so a failure on any
//! element discards the whole batch.

use crate::error::RegistryError;
use crate::lookup::{self, Lookup};
use crate::store::{codec, StoreEngine, StoreTxn};
use crate::types::{AccountId, AssetId, LabelId, RegistryLimits};

use super::{auth, labels, Registry};

impl<E: StoreEngine> Registry<E> {
    /// Attach `label` to `asset`. Operator-of-label only.
    pub fn attach_label(
        &mut self,
        caller: &AccountId,
        label: &LabelId,
        asset: AssetId,
    ) -> Result<(), RegistryError> {
        let mut txn = self.engine.begin()?;
        auth::ensure_operator(&txn, caller, label)?;
        attach_in_txn(&mut txn, &self.limits, label, asset)?;
        txn.commit()?;
        tracing::debug!(%label, %asset, "label attached");
        Ok(())
    }

    /// Attach `label` to every asset in `assets` as one unit: if any
    /// element would fail, no asset is mutated.
    pub fn attach_label_batch(
        &mut self,
        caller: &AccountId,
        label: &LabelId,
        assets: &[AssetId],
    ) -> Result<(), RegistryError> {
        let mut txn = self.engine.begin()?;
        auth::ensure_operator(&txn, caller, label)?;
        for asset in assets {
            attach_in_txn(&mut txn, &self.limits, label, *asset)?;
        }
        txn.commit()?;
        tracing::debug!(%label, count = assets.len(), "label batch attached");
        Ok(())
    }

    /// Detach `label` from `asset`. Operator-of-label only.
    pub fn detach_label(
        &mut self,
        caller: &AccountId,
        label: &LabelId,
        asset: AssetId,
    ) -> Result<(), RegistryError> {
        let mut txn = self.engine.begin()?;
        labels::require_descriptor(&txn, label)?;
        auth::ensure_operator(&txn, caller, label)?;

        let attached = codec::read_asset_labels(&txn, asset)?;
        let attached = match lookup::find(attached.as_deref(), label) {
            Lookup::ContainerMissing => {
                return Err(RegistryError::NotFound(format!(
                    "asset {asset} carries no labels"
                )));
            }
            Lookup::ValueMissing => {
                return Err(RegistryError::NotFound(format!(
                    "asset {asset} does not carry label {label}"
                )));
            }
            Lookup::FoundAt(_) => attached.unwrap_or_default(),
        };

        let remaining = lookup::remove_preserving_order(&attached, label)
            .ok_or_else(|| RegistryError::NotFound(format!("label {label}")))?;
        if remaining.is_empty() {
            codec::delete_asset_labels(&mut txn, asset)?;
        } else {
            codec::write_asset_labels(&mut txn, asset, &remaining)?;
        }

        labels::decrement_assets(&mut txn, label)?;
        txn.commit()?;
        tracing::debug!(%label, %asset, "label detached");
        Ok(())
    }

    /// The labels attached to `asset`, in attach order. Empty when the
    /// asset has no record; absence is not an error.
    pub fn list_asset_labels(&self, asset: AssetId) -> Result<Vec<LabelId>, RegistryError> {
        let txn = self.engine.begin()?;
        Ok(codec::read_asset_labels(&txn, asset)?.unwrap_or_default())
    }

    /// Per-asset label lists from one snapshot, parallel to the input
    /// order. Each element is independently empty or populated.
    pub fn list_assets_labels(
        &self,
        assets: &[AssetId],
    ) -> Result<Vec<Vec<LabelId>>, RegistryError> {
        let txn = self.engine.begin()?;
        assets
            .iter()
            .map(|asset| Ok(codec::read_asset_labels(&txn, *asset)?.unwrap_or_default()))
            .collect()
    }

    /// Whether `asset` currently carries `label`. Public read.
    pub fn has_asset_label(
        &self,
        asset: AssetId,
        label: &LabelId,
    ) -> Result<bool, RegistryError> {
        let txn = self.engine.begin()?;
        let attached = codec::read_asset_labels(&txn, asset)?;
        Ok(lookup::find(attached.as_deref(), label).found())
    }
}

/// One attach against an open transaction: existence, duplicate, and
/// capacity checks, then the list append and counter bump together.
fn attach_in_txn<T: StoreTxn>(
    txn: &mut T,
    limits: &RegistryLimits,
    label: &LabelId,
    asset: AssetId,
) -> Result<(), RegistryError> {
    labels::require_descriptor(txn, label)?;

    let attached = codec::read_asset_labels(txn, asset)?;
    if lookup::find(attached.as_deref(), label).found() {
        return Err(RegistryError::AlreadyExists(format!(
            "asset {asset} already carries label {label}"
        )));
    }

    let mut attached = attached.unwrap_or_default();
    if attached.len() >= limits.max_labels_per_asset {
        return Err(RegistryError::CapacityExceeded(format!(
            "asset {asset} carries {} labels",
            attached.len()
        )));
    }
    attached.push(label.clone());
    codec::write_asset_labels(txn, asset, &attached)?;

    labels::increment_assets(txn, label)?;
    Ok(())
}
