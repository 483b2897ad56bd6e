mod adgate;
mod analysis;
mod config;
mod errors;
mod intake;
mod notify;
mod pricing;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::MockAnalyzer;
use crate::config::Config;
use crate::notify::TracingNotifier;
use crate::routes::build_router;
use crate::state::{AppState, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeScan API v{}", env!("CARGO_PKG_VERSION"));

    // Scoring backend: the mocked analyzer. A real provider implements
    // `Analyzer` and is swapped in here.
    let analyzer = Arc::new(MockAnalyzer);
    info!("Analyzer initialized (mock backend)");

    let state = AppState {
        config: config.clone(),
        sessions: SessionStore::new(),
        analyzer,
        notifier: Arc::new(TracingNotifier),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
