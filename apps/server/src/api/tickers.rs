use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tickerboard_market_data::{
    tickers::{biggest_market_cap, top_performers},
    MarketMover, TickerInfo,
};

use crate::main_lib::AppState;

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_tickers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<TickerInfo>> {
    Json(state.tickers.search(&query.q))
}

async fn get_top_performers() -> Json<Vec<MarketMover>> {
    Json(top_performers())
}

async fn get_biggest_market_cap() -> Json<Vec<MarketMover>> {
    Json(biggest_market_cap())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search-tickers", get(search_tickers))
        .route("/top-performers", get(get_top_performers))
        .route("/biggest-market-cap", get(get_biggest_market_cap))
}
