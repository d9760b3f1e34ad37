//! HTTP client for the dashboard gateway.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tickerboard_market_data::{
    CacheStats, CompanyOverview, DailyBar, MarketMover, PriceRange, TickerInfo,
};

use crate::errors::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Substring that marks a throttling error body.
const RATE_LIMIT_MARKER: &str = "frequency";

/// Body of `/api/health`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub cache_stats: CacheStats,
    pub queue_length: usize,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

/// Typed access to the gateway endpoints.
#[derive(Clone, Debug)]
pub struct DashboardClient {
    http: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_stock_data(
        &self,
        symbol: &str,
        range: PriceRange,
    ) -> Result<Vec<DailyBar>, ClientError> {
        self.get_json("/api/stocks", &[("symbol", symbol), ("range", range.as_token())])
            .await
    }

    pub async fn fetch_stock_info(&self, symbol: &str) -> Result<CompanyOverview, ClientError> {
        self.get_json("/api/stock-info", &[("symbol", symbol)]).await
    }

    pub async fn search_tickers(&self, query: &str) -> Result<Vec<TickerInfo>, ClientError> {
        self.get_json("/api/search-tickers", &[("q", query)]).await
    }

    pub async fn top_performers(&self) -> Result<Vec<MarketMover>, ClientError> {
        self.get_json("/api/top-performers", &[]).await
    }

    pub async fn biggest_market_cap(&self) -> Result<Vec<MarketMover>, ClientError> {
        self.get_json("/api/biggest-market-cap", &[]).await
    }

    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        self.get_json("/api/health", &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(classify_failure(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl Default for DashboardClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Map a non-success response onto a client error.
fn classify_failure(status: StatusCode, text: &str) -> ClientError {
    let body = serde_json::from_str::<ErrorBody>(text).ok();

    if status == StatusCode::TOO_MANY_REQUESTS || text.contains(RATE_LIMIT_MARKER) {
        let message = body
            .map(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| text.to_string());
        return ClientError::RateLimited { message };
    }

    match body {
        Some(ErrorBody { error, message }) => ClientError::Http {
            status: status.as_u16(),
            error,
            message,
        },
        None => ClientError::Http {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: text.to_string(),
        },
    }
}
