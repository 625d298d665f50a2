//! Authorization guard: pure decision functions over an open transaction.
//!
//! Three access classes gate the registry surface:
//! - admin-only (label lifecycle, admin reassignment),
//! - admin-or-operator (operator grants/revokes; admin alone can bootstrap
//!   the first operator of a label),
//! - operator-only (asset bindings; the admin does not bypass this —
//!   binding authority is strictly delegated).

use crate::error::RegistryError;
use crate::lookup;
use crate::store::{codec, StoreTxn};
use crate::types::{AccountId, LabelId};

/// The admin recorded in the store. Absence means the registry was never
/// initialized, which `Registry::create`/`open` rule out for all callers.
pub(super) fn current_admin<T: StoreTxn>(txn: &T) -> Result<AccountId, RegistryError> {
    codec::read_admin(txn)?
        .ok_or_else(|| RegistryError::NotFound("registry is not initialized".to_string()))
}

pub(super) fn ensure_admin<T: StoreTxn>(
    txn: &T,
    caller: &AccountId,
) -> Result<(), RegistryError> {
    if current_admin(txn)? == *caller {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized(format!(
            "{caller} is not the admin"
        )))
    }
}

/// `true` iff `caller`'s granted-label list contains `label`.
pub(super) fn is_operator<T: StoreTxn>(
    txn: &T,
    caller: &AccountId,
    label: &LabelId,
) -> Result<bool, RegistryError> {
    let granted = codec::read_operator_labels(txn, caller)?;
    Ok(lookup::find(granted.as_deref(), label).found())
}

pub(super) fn ensure_operator<T: StoreTxn>(
    txn: &T,
    caller: &AccountId,
    label: &LabelId,
) -> Result<(), RegistryError> {
    if is_operator(txn, caller, label)? {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized(format!(
            "{caller} is not an operator of label {label}"
        )))
    }
}

pub(super) fn ensure_admin_or_operator<T: StoreTxn>(
    txn: &T,
    caller: &AccountId,
    label: &LabelId,
) -> Result<(), RegistryError> {
    if current_admin(txn)? == *caller {
        return Ok(());
    }
    ensure_operator(txn, caller, label)
}
