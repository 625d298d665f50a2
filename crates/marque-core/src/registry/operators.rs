//! Operator index: which accounts may manage bindings for which labels.
//!
//! Grants append to the operator's ordered label list and bump the label's
//! `num_operators`; revokes do the reverse. An operator record with an
//! empty list is deleted rather than stored (absence and emptiness are the
//! same state).

use crate::error::RegistryError;
use crate::lookup::{self, Lookup};
use crate::store::{codec, StoreEngine};
use crate::types::{AccountId, LabelId};

use super::{auth, labels, Registry};

impl<E: StoreEngine> Registry<E> {
    /// Grant `operator` the given label. Admin or an existing operator of
    /// the label may call; the first grant for a fresh label can only come
    /// from the admin, since no operator exists yet.
    pub fn grant_operator(
        &mut self,
        caller: &AccountId,
        operator: &AccountId,
        label: &LabelId,
    ) -> Result<(), RegistryError> {
        let mut txn = self.engine.begin()?;
        auth::ensure_admin_or_operator(&txn, caller, label)?;
        labels::require_descriptor(&txn, label)?;

        let granted = codec::read_operator_labels(&txn, operator)?;
        if lookup::find(granted.as_deref(), label).found() {
            return Err(RegistryError::AlreadyExists(format!(
                "operator {operator} already holds label {label}"
            )));
        }

        let mut granted = granted.unwrap_or_default();
        if granted.len() >= self.limits.max_labels_per_operator {
            return Err(RegistryError::CapacityExceeded(format!(
                "operator {operator} holds {} labels",
                granted.len()
            )));
        }
        granted.push(label.clone());
        codec::write_operator_labels(&mut txn, operator, &granted)?;

        labels::increment_operators(&mut txn, label)?;
        txn.commit()?;
        tracing::debug!(%operator, %label, "operator granted");
        Ok(())
    }

    /// Revoke the label from `operator`. Admin or an operator of the label
    /// may call. A label that still carries assets must keep at least one
    /// operator, so revoking the last one is blocked until the label is
    /// asset-free.
    pub fn revoke_operator(
        &mut self,
        caller: &AccountId,
        operator: &AccountId,
        label: &LabelId,
    ) -> Result<(), RegistryError> {
        let mut txn = self.engine.begin()?;
        auth::ensure_admin_or_operator(&txn, caller, label)?;
        let descriptor = labels::require_descriptor(&txn, label)?;

        let granted = codec::read_operator_labels(&txn, operator)?;
        match lookup::find(granted.as_deref(), label) {
            Lookup::ContainerMissing => {
                return Err(RegistryError::NotFound(format!(
                    "operator {operator} holds no labels"
                )));
            }
            Lookup::ValueMissing => {
                return Err(RegistryError::NotFound(format!(
                    "operator {operator} does not hold label {label}"
                )));
            }
            Lookup::FoundAt(_) => {}
        }

        if descriptor.num_operators <= 1 && descriptor.num_assets != 0 {
            return Err(RegistryError::NonEmptyConflict(format!(
                "label {label} still has {} assets and no other operator",
                descriptor.num_assets
            )));
        }

        labels::decrement_operators(&mut txn, label)?;

        let granted = granted.unwrap_or_default();
        let remaining = lookup::remove_preserving_order(&granted, label)
            .ok_or_else(|| RegistryError::NotFound(format!("label {label}")))?;
        if remaining.is_empty() {
            codec::delete_operator_labels(&mut txn, operator)?;
        } else {
            codec::write_operator_labels(&mut txn, operator, &remaining)?;
        }

        txn.commit()?;
        tracing::debug!(%operator, %label, "operator revoked");
        Ok(())
    }

    /// The labels granted to `operator`, in grant order. Empty when the
    /// operator holds nothing; absence is not an error.
    pub fn list_operator_labels(
        &self,
        operator: &AccountId,
    ) -> Result<Vec<LabelId>, RegistryError> {
        let txn = self.engine.begin()?;
        Ok(codec::read_operator_labels(&txn, operator)?.unwrap_or_default())
    }

    /// Whether `operator` holds `label`. Public read.
    pub fn has_operator_label(
        &self,
        operator: &AccountId,
        label: &LabelId,
    ) -> Result<bool, RegistryError> {
        let txn = self.engine.begin()?;
        auth::is_operator(&txn, operator, label)
    }
}
