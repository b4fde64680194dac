//! Fixture Insights Service: binary entrypoint.
//! Boots the Axum HTTP server, wiring config, the home-advantage table,
//! metrics, and routes.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fixture_insights::api::{create_router, AppState};
use fixture_insights::config::AppConfig;
use fixture_insights::metrics::Metrics;

/// Structured logs to stdout. `RUST_LOG` picks the filter (default
/// `info`), `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::load_default().context("loading app config")?;
    let metrics = Metrics::init(cfg.max_fixtures)?;
    let state = AppState::from_config(&cfg).with_metrics(metrics);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    info!(
        addr = %cfg.bind_addr,
        max_fixtures = cfg.max_fixtures,
        leagues = ?cfg.leagues,
        "fixture insights listening"
    );

    axum::serve(listener, router).await?;
    Ok(())
}
