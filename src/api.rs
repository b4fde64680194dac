use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::batch::{self, BatchOptions, BatchReport};
use crate::config::AppConfig;
use crate::enrich::{self, EnrichOutcome};
use crate::home_advantage::HomeAdvantageTable;
use crate::metrics::Metrics;
use crate::model::{Fixture, Match};
use crate::source::{MatchSource, SnapshotData, StaticMatchSource};

#[derive(Clone)]
pub struct AppState {
    pub table: Arc<HomeAdvantageTable>,
    pub batch: Arc<BatchOptions>,
    pub metrics: Option<Metrics>,
}

impl AppState {
    pub fn new(table: HomeAdvantageTable, batch: BatchOptions) -> Self {
        Self {
            table: Arc::new(table),
            batch: Arc::new(batch),
            metrics: None,
        }
    }

    /// Load the home-advantage table named by the config (or the seed).
    pub fn from_config(cfg: &AppConfig) -> Self {
        let table = HomeAdvantageTable::load_or_seed(&cfg.home_advantage_path);
        Self::new(table, BatchOptions::from(cfg))
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/enrich", post(enrich_one))
        .route("/batch", post(enrich_many));

    if let Some(m) = &state.metrics {
        router = router.merge(m.router::<AppState>());
    }

    router
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Alias kept for callers that expect `crate::api::router`.
pub fn router(state: AppState) -> Router {
    create_router(state)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichReq {
    fixture: Fixture,
    #[serde(default)]
    home_matches: Vec<Match>,
    #[serde(default)]
    away_matches: Vec<Match>,
    #[serde(default)]
    h2h_matches: Vec<Match>,
}

#[derive(Deserialize)]
struct BatchReq {
    fixtures: Vec<Fixture>,
    #[serde(default)]
    source: SnapshotData,
}

async fn enrich_one(State(state): State<AppState>, Json(body): Json<EnrichReq>) -> Json<EnrichOutcome> {
    let out = enrich::enrich(
        &body.fixture,
        &body.home_matches,
        &body.away_matches,
        &body.h2h_matches,
        &state.table,
    );
    Json(out)
}

async fn enrich_many(State(state): State<AppState>, Json(body): Json<BatchReq>) -> Json<BatchReport> {
    let source: Arc<dyn MatchSource> = Arc::new(StaticMatchSource::new(body.source));
    let report = batch::enrich_batch(
        body.fixtures,
        source,
        Arc::clone(&state.table),
        &state.batch,
    )
    .await;
    Json(report)
}
