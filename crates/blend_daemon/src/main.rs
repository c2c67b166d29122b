mod routes;
mod state;
mod tools;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use blend_content::resolve_catalog;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::routes::make_router_with_cors;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "blend_daemon", about = "Blend and vessel calculator HTTP service")]
struct Cli {
    /// Serve the catalog in this directory (reloadable). Omit for the built-in catalog.
    #[arg(long)]
    content_dir: Option<PathBuf>,
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 3001)]
    port: u16,
    #[arg(long, default_value = "http://localhost:5173")]
    cors_origin: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("blend_daemon=info,tower_http=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let catalog = resolve_catalog(cli.content_dir.as_deref())?;
    tracing::info!(
        content_version = catalog.content_version(),
        containers = catalog.containers().len(),
        "catalog loaded"
    );

    let state = AppState::new(catalog, cli.content_dir);
    let app = make_router_with_cors(state, &cli.cors_origin)?;

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cli.host, cli.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app).await.context("serving http")?;
    Ok(())
}
