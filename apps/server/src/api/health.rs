use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tickerboard_market_data::CacheStats;

use crate::main_lib::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    cache_stats: CacheStats,
    queue_length: usize,
}

impl HealthResponse {
    fn ok(now: DateTime<Utc>, cache_stats: CacheStats, queue_length: usize) -> Self {
        Self {
            status: "ok",
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            cache_stats,
            queue_length,
        }
    }
}

/// Liveness plus cache and queue counters. Never touches the upstream.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.market_data.health();
    Json(HealthResponse::ok(
        Utc::now(),
        health.cache_stats,
        health.queue_length,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
