//! In-memory store backend with optional JSONL persistence.
//!
//! Transactions clone the committed tables on begin and swap them back on
//! commit, so a dropped transaction leaves the committed state untouched.
//! With persistence enabled, every commit rewrites the state file wholesale
//! in sorted order, keeping the on-disk form deterministic.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

use super::{StoreEngine, StoreTxn, Table};

type TableMap = BTreeMap<String, Vec<u8>>;

struct Inner {
    tables: [TableMap; 4],
    state_file: Option<PathBuf>,
}

/// The in-memory [`StoreEngine`].
///
/// A single writer at a time is assumed (the registry takes `&mut self`
/// for mutations and the server serializes callers); the internal mutex
/// only guards the begin/commit swap itself.
pub struct MemoryEngine {
    inner: Mutex<Inner>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tables: Default::default(),
                state_file: None,
            }),
        }
    }

    /// An engine persisted to `path`, loading any existing state first.
    /// The file is rewritten on every commit.
    pub fn with_persistence(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tables = if path.exists() {
            load_state_file(&path)?
        } else {
            Default::default()
        };
        Ok(Self {
            inner: Mutex::new(Inner {
                tables,
                state_file: Some(path),
            }),
        })
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreEngine for MemoryEngine {
    type Txn<'a>
        = MemoryTxn<'a>
    where
        Self: 'a;

    fn begin(&self) -> Result<MemoryTxn<'_>, StoreError> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(MemoryTxn {
            engine: &self.inner,
            tables: inner.tables.clone(),
        })
    }
}

/// A transaction over [`MemoryEngine`]: a private copy of the tables,
/// swapped into place on commit.
pub struct MemoryTxn<'a> {
    engine: &'a Mutex<Inner>,
    tables: [TableMap; 4],
}

impl StoreTxn for MemoryTxn<'_> {
    fn get(&self, table: Table, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.tables[table.index()].get(key).cloned())
    }

    fn put(&mut self, table: Table, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.tables[table.index()].insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, table: Table, key: &str) -> Result<bool, StoreError> {
        Ok(self.tables[table.index()].remove(key).is_some())
    }

    fn commit(self) -> Result<(), StoreError> {
        let mut inner = self.engine.lock().map_err(|_| StoreError::Poisoned)?;
        inner.tables = self.tables;
        if let Some(path) = inner.state_file.clone() {
            flush_state_file(&path, &inner.tables)?;
        }
        Ok(())
    }
}

// ==============================================================================
// State file I/O
// ==============================================================================

#[derive(serde::Serialize, serde::Deserialize)]
struct StateLine {
    table: String,
    key: String,
    value: serde_json::Value,
}

fn load_state_file(path: &Path) -> Result<[TableMap; 4], StoreError> {
    let content = std::fs::read_to_string(path)?;
    let mut tables: [TableMap; 4] = Default::default();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: StateLine =
            serde_json::from_str(line).map_err(|e| StoreError::StateParse {
                line: line_num + 1,
                message: e.to_string(),
            })?;
        let Some(table) = Table::from_name(&record.table) else {
            return Err(StoreError::StateParse {
                line: line_num + 1,
                message: format!("unknown table {:?}", record.table),
            });
        };
        let value = serde_json::to_vec(&record.value).map_err(|e| StoreError::Codec {
            table: table.name(),
            message: e.to_string(),
        })?;
        tables[table.index()].insert(record.key, value);
    }

    Ok(tables)
}

/// Rewrite the state file wholesale. Records come out sorted by
/// (table, key) so repeated runs produce identical files.
fn flush_state_file(path: &Path, tables: &[TableMap; 4]) -> Result<(), StoreError> {
    let mut out = String::new();
    for table in Table::ALL {
        for (key, value) in &tables[table.index()] {
            let value: serde_json::Value =
                serde_json::from_slice(value).map_err(|e| StoreError::Codec {
                    table: table.name(),
                    message: e.to_string(),
                })?;
            let line = serde_json::to_string(&StateLine {
                table: table.name().to_string(),
                key: key.clone(),
                value,
            })
            .map_err(|e| StoreError::Codec {
                table: table.name(),
                message: e.to_string(),
            })?;
            out.push_str(&line);
            out.push('\n');
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, out)?;
    Ok(())
}
