use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics::{counter, histogram};
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use crate::config::AppConfig;
use crate::criteria::{CRITERIA, WEIGHT_MAX, WEIGHT_MIN, WEIGHT_STEP};
use crate::dataset::DatasetHandle;
use crate::metrics::record_network_features;
use crate::score::rescore;
use crate::store::WeightStore;
use crate::weights::WeightVector;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<WeightStore>,
    pub dataset: DatasetHandle,
}

impl AppState {
    pub fn new(config: AppConfig, dataset: DatasetHandle) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(WeightStore::new(&CRITERIA)),
            dataset,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let ui_dir = state.config.ui_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/api/criteria", get(criteria_meta))
        .route("/api/weights", get(current_weights).post(revise_weights))
        .route("/api/network.geojson", get(network_geojson))
        .route("/admin/reload-dataset", get(admin_reload_dataset))
        .fallback_service(ServeDir::new(ui_dir))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let dataset = state.dataset.snapshot();
    let weights = state.store.snapshot();
    Json(json!({
        "ok": true,
        "dataset_path": state.dataset.path().display().to_string(),
        "dataset_loaded": dataset.is_some(),
        "feature_count": dataset.as_ref().map(|d| d.feature_count),
        "dataset_fingerprint": dataset.as_ref().map(|d| d.fingerprint.clone()),
        "has_previous_weights": state.store.has_previous(),
        "revised_at_unix": weights.revised_at_unix,
    }))
}

#[derive(serde::Serialize)]
struct CriterionMeta {
    key: &'static str,
    label: &'static str,
    source_field: &'static str,
    default_weight: f64,
    value: f64,
}

#[derive(serde::Serialize)]
struct CriteriaResp {
    title: String,
    weight_min: f64,
    weight_max: f64,
    weight_step: f64,
    criteria: Vec<CriterionMeta>,
}

/// Slider metadata for the UI: the registry plus the live weight per criterion.
async fn criteria_meta(State(state): State<AppState>) -> Json<CriteriaResp> {
    let snap = state.store.snapshot();
    let criteria = CRITERIA
        .iter()
        .map(|c| CriterionMeta {
            key: c.key,
            label: c.label,
            source_field: c.source_field,
            default_weight: c.default_weight,
            value: snap.current.weight_for(c),
        })
        .collect();

    Json(CriteriaResp {
        title: state.config.title.clone(),
        weight_min: WEIGHT_MIN,
        weight_max: WEIGHT_MAX,
        weight_step: WEIGHT_STEP,
        criteria,
    })
}

#[derive(serde::Serialize)]
struct WeightsResp {
    weights: WeightVector,
    prev_weights: WeightVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    revised_at_unix: Option<u64>,
}

async fn current_weights(State(state): State<AppState>) -> Json<WeightsResp> {
    let snap = state.store.snapshot();
    Json(WeightsResp {
        weights: snap.current,
        prev_weights: snap.previous,
        revised_at_unix: snap.revised_at_unix,
    })
}

#[derive(serde::Serialize)]
struct ReviseResp {
    ok: bool,
    weights: WeightVector,
    prev_weights: WeightVector,
}

/// Apply a slider form. Unknown keys are ignored and malformed values keep
/// the prior weight, so this route never rejects a submission.
async fn revise_weights(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<ReviseResp> {
    let snap = state.store.revise(&form);
    counter!("weight_revisions_total").increment(1);
    info!(fields = form.len(), "weights revised");

    Json(ReviseResp {
        ok: true,
        weights: snap.current,
        prev_weights: snap.previous,
    })
}

/// Score the base network under the live weight pair and stream the enriched
/// collection. Always no-store: the payload depends on mutable weights.
async fn network_geojson(State(state): State<AppState>) -> Response {
    let Some(dataset) = state.dataset.snapshot() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "ok": false, "error": "network dataset unavailable" })),
        )
            .into_response();
    };

    let snap = state.store.snapshot();
    let started = Instant::now();
    let scored = rescore(&dataset.collection, &snap.current, &snap.previous, &CRITERIA);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    counter!("score_requests_total").increment(1);
    histogram!("score_pass_ms").record(elapsed_ms);
    info!(
        features = scored.features.len(),
        elapsed_ms, "network rescored"
    );

    (
        [
            (
                header::CACHE_CONTROL,
                "no-store, no-cache, must-revalidate, max-age=0",
            ),
            (header::PRAGMA, "no-cache"),
        ],
        Json(scored),
    )
        .into_response()
}

async fn admin_reload_dataset(State(state): State<AppState>) -> String {
    match state.dataset.reload() {
        Ok(dataset) => {
            record_network_features(dataset.feature_count);
            format!(
                "reloaded: {} features ({})",
                dataset.feature_count, dataset.fingerprint
            )
        }
        Err(err) => format!("failed: {err:#}"),
    }
}
