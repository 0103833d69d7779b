mod config;
mod errors;
mod export;
mod llm_client;
mod routes;
mod sections;
mod session;
mod state;
mod tailoring;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::export::{LopdfAssembler, PageFormat, PdfExporter, SnapshotRasterizer, SUPERSAMPLE_FACTOR};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::tailoring::LlmSectionTailor;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeAI API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client and the default tailoring backend
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_api_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let tailor = Arc::new(LlmSectionTailor(llm));

    // Initialize PDF export pipeline (A4 portrait, 2x supersampling)
    let exporter = PdfExporter::new(
        Arc::new(SnapshotRasterizer::new(SUPERSAMPLE_FACTOR)),
        Arc::new(LopdfAssembler),
        PageFormat::a4_portrait(),
        config.export_staging_dir.clone(),
    );
    let format = exporter.format();
    info!(
        "Export page format: {}x{}pt, staging in {}",
        format.width_pt,
        format.height_pt,
        config.export_staging_dir.display()
    );

    // Initialize session store and its idle sweep
    let sessions = SessionStore::new();
    let _sweeper = sessions.spawn_idle_sweeper(config.session_idle_ttl);
    info!("Session idle TTL: {}s", config.session_idle_ttl.as_secs());

    // Build app state
    let state = AppState {
        sessions,
        tailor,
        exporter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins to the web client's host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
