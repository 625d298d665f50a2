use crate::types::AssetId;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("caller is not authorized: {0}")]
    Unauthorized(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("label id must be exactly 2 characters, got {0:?}")]
    InvalidLength(String),

    #[error("account id must not be empty")]
    InvalidAccount,

    #[error("list capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("label is still referenced: {0}")]
    NonEmptyConflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record encoding failure in table {table}: {message}")]
    Codec { table: &'static str, message: String },

    #[error("store lock poisoned")]
    Poisoned,

    #[error("state file parse error at line {line}: {message}")]
    StateParse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("asset not found: {0}")]
    AssetNotFound(AssetId),

    #[error("provider backend failure: {0}")]
    Backend(String),
}
