//! Domain types for the Marque label registry.
//!
//! Contains the validated identifier newtypes (`LabelId`, `AccountId`,
//! `AssetId`), the stored label descriptor, and the registry capacity
//! limits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

// ==============================================================================
// Label Id
// ==============================================================================

/// A label code: exactly two characters, opaque beyond that.
///
/// Construction is the only place the length rule is enforced, so any
/// `LabelId` held by the registry is already valid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelId(String);

impl LabelId {
    pub fn new(value: impl Into<String>) -> Result<Self, RegistryError> {
        let value = value.into();
        // Two characters that are also two bytes: multi-byte codes would
        // break the fixed-width key layout of the store.
        if value.chars().count() != 2 || value.len() != 2 {
            return Err(RegistryError::InvalidLength(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LabelId {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LabelId> for String {
    fn from(id: LabelId) -> Self {
        id.0
    }
}

impl FromStr for LabelId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// Account Id
// ==============================================================================

/// An identity: the admin, an operator, or any caller. Opaque non-empty
/// string supplied by the surrounding host (the server layer reads it from
/// a request header).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Result<Self, RegistryError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(RegistryError::InvalidAccount);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl FromStr for AccountId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// Asset Id
// ==============================================================================

/// An opaque asset identifier, wrapped for type safety.
///
/// `#[serde(transparent)]` preserves the JSON representation as a bare
/// integer, so this newtype is wire-compatible with plain `u64`.
/// `Deref<Target = u64>` minimises call-site churn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u64);

impl From<u64> for AssetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<AssetId> for u64 {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

impl std::ops::Deref for AssetId {
    type Target = u64;
    fn deref(&self) -> &u64 {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ==============================================================================
// Label Descriptor
// ==============================================================================

/// The stored record for one label: display metadata plus the two
/// reference counters.
///
/// The counters are maintained exclusively by the operator and asset
/// binding operations; nothing outside the registry writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Number of assets currently carrying this label.
    pub num_assets: u64,
    /// Number of operators currently granted this label.
    pub num_operators: u64,
}

impl LabelDescriptor {
    /// A fresh descriptor with both counters at zero.
    pub fn new(name: String, url: Option<String>) -> Self {
        Self {
            name,
            url,
            num_assets: 0,
            num_operators: 0,
        }
    }
}

// ==============================================================================
// Registry Limits
// ==============================================================================

/// Capacity ceilings for the per-key label lists.
///
/// Each keyed record is rewritten wholesale on mutation, so lists must stay
/// bounded; growth past a ceiling fails with `CapacityExceeded` instead of
/// accepting an unbounded record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryLimits {
    pub max_labels_per_operator: usize,
    pub max_labels_per_asset: usize,
}

impl Default for RegistryLimits {
    fn default() -> Self {
        Self {
            max_labels_per_operator: 64,
            max_labels_per_asset: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_id_accepts_two_ascii_characters() {
        let id = LabelId::new("US").expect("two-character id must parse");
        assert_eq!(id.as_str(), "US");
        assert_eq!(id.to_string(), "US");
    }

    #[test]
    fn label_id_rejects_wrong_lengths() {
        for bad in ["", "A", "ABC", "ABCD"] {
            assert!(
                matches!(LabelId::new(bad), Err(RegistryError::InvalidLength(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn label_id_rejects_multibyte_two_char_codes() {
        // Two characters but three bytes: not a fixed-width 2-byte key.
        assert!(matches!(
            LabelId::new("é!"),
            Err(RegistryError::InvalidLength(_))
        ));
    }

    #[test]
    fn label_id_round_trips_through_serde() {
        let id = LabelId::new("de").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"de\"");
        let back: LabelId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn label_id_serde_rejects_invalid_input() {
        let result: Result<LabelId, _> = serde_json::from_str("\"toolong\"");
        assert!(result.is_err());
    }

    #[test]
    fn account_id_rejects_blank_input() {
        assert!(matches!(
            AccountId::new("   "),
            Err(RegistryError::InvalidAccount)
        ));
    }

    #[test]
    fn asset_id_is_wire_transparent() {
        let id = AssetId(12345);
        assert_eq!(
            serde_json::to_string(&id).expect("serialize"),
            "12345"
        );
    }

    #[test]
    fn descriptor_starts_with_zero_counters() {
        let descriptor = LabelDescriptor::new("United States".into(), None);
        assert_eq!(descriptor.num_assets, 0);
        assert_eq!(descriptor.num_operators, 0);
    }
}
