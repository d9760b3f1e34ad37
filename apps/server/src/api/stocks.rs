use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tickerboard_market_data::{CompanyOverview, DailyBar, PriceRange};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const DEFAULT_SYMBOL: &str = "AAPL";

#[derive(Debug, Default, Deserialize)]
struct StockQuery {
    symbol: Option<String>,
    range: Option<String>,
}

impl StockQuery {
    fn symbol(&self) -> &str {
        self.symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SYMBOL)
    }

    fn range(&self) -> PriceRange {
        PriceRange::from_token(self.range.as_deref())
    }
}

/// Daily bars for a symbol over the requested range, oldest first.
async fn get_stocks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StockQuery>,
) -> ApiResult<Json<Arc<Vec<DailyBar>>>> {
    let bars = state
        .market_data
        .get_price_series(query.symbol(), query.range())
        .await
        .map_err(ApiError::stock_data)?;
    Ok(Json(bars))
}

/// Company overview, passed through as the provider returned it.
async fn get_stock_info(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StockQuery>,
) -> ApiResult<Json<Arc<CompanyOverview>>> {
    let overview = state
        .market_data
        .get_company_overview(query.symbol())
        .await
        .map_err(ApiError::stock_info)?;
    Ok(Json(overview))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks", get(get_stocks))
        .route("/stock-info", get(get_stock_info))
}
