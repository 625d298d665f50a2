//! Label lifecycle: creation, removal, descriptor reads, and the internal
//! reference-counter mutators.
//!
//! The counters on a descriptor are never a public mutation surface; they
//! move only inside the compound grant/revoke/attach/detach operations,
//! which keeps them equal to the actual membership of the operator and
//! asset lists.

use crate::error::RegistryError;
use crate::store::{codec, StoreEngine, StoreTxn};
use crate::types::{AccountId, LabelDescriptor, LabelId};

use super::{auth, Registry};

impl<E: StoreEngine> Registry<E> {
    /// Register a new label. Admin only. The descriptor starts with both
    /// counters at zero. (`LabelId` construction already enforced the
    /// 2-character rule.)
    pub fn create_label(
        &mut self,
        caller: &AccountId,
        id: LabelId,
        name: String,
        url: Option<String>,
    ) -> Result<(), RegistryError> {
        let mut txn = self.engine.begin()?;
        auth::ensure_admin(&txn, caller)?;
        if codec::read_descriptor(&txn, &id)?.is_some() {
            return Err(RegistryError::AlreadyExists(format!("label {id}")));
        }
        codec::write_descriptor(&mut txn, &id, &LabelDescriptor::new(name, url))?;
        txn.commit()?;
        tracing::info!(label = %id, "label created");
        Ok(())
    }

    /// Delete a label. Admin only. Blocked while any operator or asset
    /// still references it: dangling references would orphan list entries.
    pub fn remove_label(&mut self, caller: &AccountId, id: &LabelId) -> Result<(), RegistryError> {
        let mut txn = self.engine.begin()?;
        auth::ensure_admin(&txn, caller)?;
        let descriptor = codec::read_descriptor(&txn, id)?
            .ok_or_else(|| RegistryError::NotFound(format!("label {id}")))?;
        if descriptor.num_operators != 0 || descriptor.num_assets != 0 {
            return Err(RegistryError::NonEmptyConflict(format!(
                "label {id} has {} operators and {} assets",
                descriptor.num_operators, descriptor.num_assets
            )));
        }
        codec::delete_descriptor(&mut txn, id)?;
        txn.commit()?;
        tracing::info!(label = %id, "label removed");
        Ok(())
    }

    /// Fetch one descriptor. Public read.
    pub fn get_label(&self, id: &LabelId) -> Result<LabelDescriptor, RegistryError> {
        let txn = self.engine.begin()?;
        codec::read_descriptor(&txn, id)?
            .ok_or_else(|| RegistryError::NotFound(format!("label {id}")))
    }

    /// Fetch several descriptors from one snapshot, in input order.
    /// Fails `NotFound` on the first unregistered id.
    pub fn get_labels(&self, ids: &[LabelId]) -> Result<Vec<LabelDescriptor>, RegistryError> {
        let txn = self.engine.begin()?;
        ids.iter()
            .map(|id| {
                codec::read_descriptor(&txn, id)?
                    .ok_or_else(|| RegistryError::NotFound(format!("label {id}")))
            })
            .collect()
    }

    /// Whether a label is registered. Public read, never a domain error.
    pub fn has_label(&self, id: &LabelId) -> Result<bool, RegistryError> {
        let txn = self.engine.begin()?;
        Ok(codec::read_descriptor(&txn, id)?.is_some())
    }
}

// ==============================================================================
// Counter mutators (compound-operation internals)
// ==============================================================================

pub(super) fn increment_operators<T: StoreTxn>(
    txn: &mut T,
    id: &LabelId,
) -> Result<(), RegistryError> {
    let mut descriptor = require_descriptor(txn, id)?;
    descriptor.num_operators += 1;
    codec::write_descriptor(txn, id, &descriptor)?;
    Ok(())
}

pub(super) fn decrement_operators<T: StoreTxn>(
    txn: &mut T,
    id: &LabelId,
) -> Result<(), RegistryError> {
    let mut descriptor = require_descriptor(txn, id)?;
    descriptor.num_operators -= 1;
    codec::write_descriptor(txn, id, &descriptor)?;
    Ok(())
}

pub(super) fn increment_assets<T: StoreTxn>(
    txn: &mut T,
    id: &LabelId,
) -> Result<(), RegistryError> {
    let mut descriptor = require_descriptor(txn, id)?;
    descriptor.num_assets += 1;
    codec::write_descriptor(txn, id, &descriptor)?;
    Ok(())
}

pub(super) fn decrement_assets<T: StoreTxn>(
    txn: &mut T,
    id: &LabelId,
) -> Result<(), RegistryError> {
    let mut descriptor = require_descriptor(txn, id)?;
    descriptor.num_assets -= 1;
    codec::write_descriptor(txn, id, &descriptor)?;
    Ok(())
}

pub(super) fn require_descriptor<T: StoreTxn>(
    txn: &T,
    id: &LabelId,
) -> Result<LabelDescriptor, RegistryError> {
    codec::read_descriptor(txn, id)?
        .ok_or_else(|| RegistryError::NotFound(format!("label {id}")))
}
