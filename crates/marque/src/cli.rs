use std::path::PathBuf;

use clap::Parser;

/// Marque — permissioned asset label registry with a REST API.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Address to bind the web server to.
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "3180")]
    pub port: u16,

    /// Account that administers the registry. Becomes the admin when the
    /// state file is fresh; ignored if the registry already has one.
    #[arg(long, env = "MARQUE_ADMIN")]
    pub admin: String,

    /// Path to the registry state file for persistence.
    /// If omitted, state is in-memory only.
    #[arg(long, env = "MARQUE_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Base URL of the asset metadata service.
    #[arg(long, env = "MARQUE_ASSET_PROVIDER_URL")]
    pub asset_provider_url: Option<String>,

    /// Path to a JSON file of canned asset metadata, keyed by asset id.
    /// Used when no provider URL is given.
    #[arg(long)]
    pub asset_file: Option<PathBuf>,

    /// Maximum number of labels one operator may hold.
    #[arg(long, default_value = "64")]
    pub max_labels_per_operator: usize,

    /// Maximum number of labels one asset may carry.
    #[arg(long, default_value = "64")]
    pub max_labels_per_asset: usize,

    /// Capacity of the asset metadata cache (HTTP provider only).
    #[arg(long, default_value = "1024")]
    pub provider_cache_capacity: usize,
}
