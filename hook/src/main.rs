//! QuickBarcode webhook receiver
//!
//! Accepts inventory lifecycle notifications over HTTP and keeps the
//! barcode registry linked to part IPNs and stock item serials.
//!
//! Usage:
//!   quickbarcode-hook --config settings.json --port 8484
//!
//! The receiver is stateless: every event is reconciled against the live
//! registry.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use anyhow::{Context, Result};
use clap::Parser;
use quickbarcode_hook::build_router;
use quickbarcode_sync::{EventAdapter, SyncSettings};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quickbarcode-hook")]
#[command(about = "Links part IPNs and stock serials as barcodes in the inventory registry")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8484")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Path to a JSON settings document (plugin setting keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inventory site URL, overrides API_URL
    #[arg(long, env = "QUICKBARCODE_API_URL")]
    api_url: Option<String>,

    /// API token, overrides API_KEY
    #[arg(long, env = "QUICKBARCODE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_settings(args: &Args) -> Result<SyncSettings> {
    let mut settings = match &args.config {
        Some(path) => SyncSettings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => SyncSettings::default(),
    };
    if let Some(url) = &args.api_url {
        settings.api_url = Some(url.clone());
    }
    if let Some(key) = &args.api_key {
        settings.api_key = Some(key.clone());
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args)?;

    let level = if args.verbose {
        "debug"
    } else {
        settings.log_level.as_filter()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("QuickBarcode hook starting...");
    let adapter = EventAdapter::from_settings(settings);
    if !adapter.is_configured() {
        warn!("Registry credentials missing; events will be reported as failed");
    }

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening for events on http://{}/api/v1/events", addr);

    axum::serve(listener, build_router(Arc::new(adapter)))
        .await
        .context("HTTP server failed")?;
    Ok(())
}
