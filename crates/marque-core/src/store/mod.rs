//! Keyed record store underlying the registry.
//!
//! Defines the [`StoreEngine`] / [`StoreTxn`] traits and provides the
//! in-memory backend ([`MemoryEngine`]) with optional JSONL persistence.
//! Records are opaque bounded byte strings addressed by (table, key); no
//! cross-key scanning is exposed. Every registry operation runs inside a
//! single transaction: commit publishes all writes at once, dropping an
//! uncommitted transaction discards them.

mod memory;

pub(crate) mod codec;

pub use memory::{MemoryEngine, MemoryTxn};

use crate::error::StoreError;

/// The fixed set of tables the registry persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Table {
    /// 2-character label code → label descriptor.
    Labels,
    /// Operator account → ordered label list.
    OperatorLabels,
    /// Asset id → ordered label list.
    AssetLabels,
    /// Registry scalars (currently only the admin identity).
    Meta,
}

impl Table {
    pub(crate) const ALL: [Table; 4] = [
        Table::Labels,
        Table::OperatorLabels,
        Table::AssetLabels,
        Table::Meta,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Labels => "labels",
            Self::OperatorLabels => "operator_labels",
            Self::AssetLabels => "asset_labels",
            Self::Meta => "meta",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|table| table.name() == name)
    }

    fn index(&self) -> usize {
        match self {
            Self::Labels => 0,
            Self::OperatorLabels => 1,
            Self::AssetLabels => 2,
            Self::Meta => 3,
        }
    }
}

/// A storage engine that hands out unit-of-work transactions.
pub trait StoreEngine: Send + Sync {
    /// The transaction type for this engine.
    type Txn<'a>: StoreTxn
    where
        Self: 'a;

    /// Begin a transaction over the current committed state.
    fn begin(&self) -> Result<Self::Txn<'_>, StoreError>;
}

/// A transaction over the keyed store.
///
/// Reads observe the transaction's own uncommitted writes. Dropping the
/// transaction without [`StoreTxn::commit`] discards every write.
pub trait StoreTxn {
    /// Get a record by key.
    fn get(&self, table: Table, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Insert or overwrite a record wholesale.
    fn put(&mut self, table: Table, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Delete a record. Returns whether the key existed.
    fn delete(&mut self, table: Table, key: &str) -> Result<bool, StoreError>;

    /// Publish all writes atomically.
    fn commit(self) -> Result<(), StoreError>;
}
