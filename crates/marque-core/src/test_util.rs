//! Shared test helpers for `marque-core` unit tests.
//!
//! Consolidates registry construction and id builders so that tests across
//! modules share a single source of truth for dummy data.

use crate::provider::AssetInfo;
use crate::registry::Registry;
use crate::store::MemoryEngine;
use crate::types::{AccountId, LabelId, RegistryLimits};

/// The admin identity every test registry starts with.
pub const ADMIN: &str = "admin";

pub fn acct(id: &str) -> AccountId {
    AccountId::new(id).expect("test account id must be valid")
}

pub fn label(code: &str) -> LabelId {
    LabelId::new(code).expect("test label code must be valid")
}

/// A fresh in-memory registry with [`ADMIN`] as admin and default limits.
pub fn test_registry() -> Registry<MemoryEngine> {
    Registry::create(MemoryEngine::new(), acct(ADMIN), RegistryLimits::default())
        .expect("test registry must initialize")
}

/// A registry pre-seeded with the given label codes (name = code).
pub fn registry_with_labels(codes: &[&str]) -> Registry<MemoryEngine> {
    let mut registry = test_registry();
    for code in codes {
        registry
            .create_label(&acct(ADMIN), label(code), (*code).to_string(), None)
            .expect("seed label");
    }
    registry
}

/// A seeded registry plus one operator granted every seeded label.
pub fn registry_with_operator(codes: &[&str]) -> (Registry<MemoryEngine>, AccountId) {
    let mut registry = registry_with_labels(codes);
    let operator = acct("operator");
    for code in codes {
        registry
            .grant_operator(&acct(ADMIN), &operator, &label(code))
            .expect("seed grant");
    }
    (registry, operator)
}

/// A fully populated `AssetInfo` for view-projection tests.
pub fn sample_asset_info(name: &str) -> AssetInfo {
    AssetInfo {
        name: name.to_string(),
        unit_name: "UNIT".to_string(),
        decimals: 6,
        url: format!("https://assets.example/{name}"),
        total: 1_000_000,
        creator: Some(acct("creator")),
        manager: Some(acct("manager")),
        freeze: Some(acct("freezer")),
        clawback: None,
        reserve: Some(acct("reserve")),
        default_frozen: false,
        reserve_balance: 250_000,
        metadata_hash: None,
    }
}
