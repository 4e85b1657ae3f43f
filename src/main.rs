//! ATP Priority Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! See `README.md` for quickstart.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atp_priority_analyzer::api::{self, AppState};
use atp_priority_analyzer::config::AppConfig;
use atp_priority_analyzer::dataset::DatasetHandle;
use atp_priority_analyzer::metrics::{record_network_features, Metrics};

/// Compact tracing logs; RUST_LOG overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("atp_priority_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    // This enables ATP_CONFIG_PATH / ATP_DATASET_PATH / ATP_BIND from .env.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = AppConfig::load().context("loading app config")?;

    // A missing dataset degrades the scoring route instead of blocking boot;
    // operators can fix the file and hit /admin/reload-dataset.
    let dataset = DatasetHandle::load(&config.dataset_path);

    let metrics = Metrics::init();
    if let Some(snap) = dataset.snapshot() {
        record_network_features(snap.feature_count);
    }

    let bind = config.bind.clone();
    let title = config.title.clone();
    let state = AppState::new(config, dataset);
    let app = api::router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!(%bind, %title, "atp-priority-analyzer listening");

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
