//! `Registry` — the permissioned label registry.
//!
//! Owns the three keyed relations and the admin scalar:
//! - **labels** — 2-character code → descriptor with two reference counters,
//! - **operator_labels** — account → ordered list of granted labels,
//! - **asset_labels** — asset id → ordered list of attached labels.
//!
//! Every public mutation checks authorization first, then performs all of
//! its reads and writes inside a single store transaction committed at the
//! end, so a failed precondition can never leave a counter and its list out
//! of step. Mutations take `&mut self`: callers are serialized by
//! construction, matching the one-call-at-a-time execution model the
//! registry assumes.
//!
//! The operation groups live in sibling modules: label lifecycle in
//! `labels`, operator grants in `operators`, asset bindings in `assets`,
//! authorization checks in `auth`.

mod assets;
mod auth;
mod labels;
mod operators;

use crate::error::RegistryError;
use crate::store::{codec, MemoryEngine, StoreEngine};
use crate::types::{AccountId, RegistryLimits};

pub struct Registry<E: StoreEngine = MemoryEngine> {
    engine: E,
    limits: RegistryLimits,
}

impl<E: StoreEngine> Registry<E> {
    /// Initialize a fresh registry: `creator` becomes the admin.
    /// Fails `AlreadyExists` if the store already holds a registry.
    pub fn create(
        engine: E,
        creator: AccountId,
        limits: RegistryLimits,
    ) -> Result<Self, RegistryError> {
        let mut txn = engine.begin()?;
        if codec::read_admin(&txn)?.is_some() {
            return Err(RegistryError::AlreadyExists(
                "registry is already initialized".to_string(),
            ));
        }
        codec::write_admin(&mut txn, &creator)?;
        txn.commit()?;
        tracing::info!(admin = %creator, "registry created");
        Ok(Self { engine, limits })
    }

    /// Open an existing registry. Fails `NotFound` when the store holds no
    /// admin record.
    pub fn open(engine: E, limits: RegistryLimits) -> Result<Self, RegistryError> {
        let txn = engine.begin()?;
        if codec::read_admin(&txn)?.is_none() {
            return Err(RegistryError::NotFound(
                "registry is not initialized".to_string(),
            ));
        }
        Ok(Self { engine, limits })
    }

    /// Open the registry if the store already holds one, otherwise create
    /// it with `creator` as admin. The entry point for persistent stores.
    pub fn create_or_open(
        engine: E,
        creator: AccountId,
        limits: RegistryLimits,
    ) -> Result<Self, RegistryError> {
        let already_initialized = {
            let txn = engine.begin()?;
            codec::read_admin(&txn)?.is_some()
        };
        if already_initialized {
            Self::open(engine, limits)
        } else {
            Self::create(engine, creator, limits)
        }
    }

    pub fn limits(&self) -> &RegistryLimits {
        &self.limits
    }

    /// The current admin identity.
    pub fn admin(&self) -> Result<AccountId, RegistryError> {
        let txn = self.engine.begin()?;
        auth::current_admin(&txn)
    }

    /// Reassign the admin scalar. Admin only; takes effect atomically.
    pub fn change_admin(
        &mut self,
        caller: &AccountId,
        new_admin: AccountId,
    ) -> Result<(), RegistryError> {
        let mut txn = self.engine.begin()?;
        auth::ensure_admin(&txn, caller)?;
        codec::write_admin(&mut txn, &new_admin)?;
        txn.commit()?;
        tracing::info!(previous = %caller, admin = %new_admin, "admin reassigned");
        Ok(())
    }
}
