mod cli;
mod server;

use std::sync::Arc;

use clap::Parser;
use eyre::WrapErr;

use marque_core::provider::{AssetProvider, HttpProvider, StaticProvider};
use marque_core::store::MemoryEngine;
use marque_core::{AccountId, Registry, RegistryLimits};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    // Generate a random API token for this server session.
    let api_token = {
        use rand::Rng;
        let bytes: [u8; 16] = rand::thread_rng().r#gen();
        hex_encode(bytes)
    };

    let admin = AccountId::new(args.admin.clone()).wrap_err("invalid --admin account id")?;
    let limits = RegistryLimits {
        max_labels_per_operator: args.max_labels_per_operator,
        max_labels_per_asset: args.max_labels_per_asset,
    };

    let engine = match &args.state_file {
        Some(path) => {
            let engine = MemoryEngine::with_persistence(path)
                .wrap_err("load registry state file")?;
            tracing::info!(path = %path.display(), "using persistent registry state");
            engine
        }
        None => MemoryEngine::new(),
    };
    let registry = Registry::create_or_open(engine, admin, limits)
        .wrap_err("initialize registry")?;
    tracing::info!(admin = %registry.admin().wrap_err("read admin")?, "registry ready");

    let provider: Arc<dyn AssetProvider> = match (&args.asset_provider_url, &args.asset_file) {
        (Some(url), _) => {
            tracing::info!(%url, "using HTTP asset metadata provider");
            Arc::new(HttpProvider::new(url, args.provider_cache_capacity))
        }
        (None, Some(path)) => {
            let provider =
                StaticProvider::from_json_file(path).wrap_err("load asset metadata file")?;
            tracing::info!(path = %path.display(), assets = provider.len(), "loaded asset metadata file");
            Arc::new(provider)
        }
        (None, None) => {
            tracing::warn!("no asset metadata source configured — view endpoints will return 404");
            Arc::new(StaticProvider::empty())
        }
    };

    let state = server::AppState {
        registry: Arc::new(tokio::sync::RwLock::new(registry)),
        provider,
        api_token: api_token.clone(),
    };

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let origin = format!("http://{}:{}", args.bind, args.port);
    let router = server::build_router(state, &origin);

    if args.bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0 — it is accessible from the network");
    }

    println!();
    println!("  Marque is running:");
    println!("    URL:       http://{bind_addr}");
    println!("    API token: {api_token}");
    println!();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .wrap_err("bind TCP listener")?;

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .await
        .wrap_err("run HTTP server")?;

    Ok(())
}

/// Tiny hex-encoding helper to avoid adding a `hex` crate dependency.
fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
}
