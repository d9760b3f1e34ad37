//! Alpha Vantage market data provider implementation.
//!
//! This module provides market data from Alpha Vantage API:
//! - Daily price series via TIME_SERIES_DAILY endpoint
//! - Company fundamentals via OVERVIEW endpoint
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.

mod classify;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::{Client, StatusCode};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{CompanyOverview, DailyBar, DateWindow};
use crate::provider::MarketDataProvider;

use classify::{classify, DataSection};

pub const BASE_URL: &str = "https://www.alphavantage.co/query";
pub const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Default timeout for a single upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Alpha Vantage market data provider.
///
/// Every call sends the API key as a query parameter; it is masked in logs.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

/// TIME_SERIES_DAILY response for equities
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: HashMap<String, DailyQuote>,
}

#[derive(Debug, Deserialize)]
struct DailyQuote {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Create a provider that talks to a different endpoint, e.g. a local mock.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::with_timeout(api_key, base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: String, base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Make a request to the Alpha Vantage API and return status and raw body.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<(StatusCode, String), MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        let url = reqwest::Url::parse_with_params(&self.base_url, &all_params).map_err(|e| {
            MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        debug!("Alpha Vantage request: {}", self.redact(url.as_str()));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketDataError::transport(PROVIDER_ID, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::transport(PROVIDER_ID, &e))?;

        Ok((status, body))
    }

    fn redact(&self, url: &str) -> String {
        if self.api_key.is_empty() {
            url.to_string()
        } else {
            url.replace(&self.api_key, "***")
        }
    }

    /// Parse a date string in YYYY-MM-DD format.
    fn parse_date(date_str: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
    }

    /// Parse a decimal value from a string.
    fn parse_decimal(s: &str) -> Option<Decimal> {
        Decimal::from_str(s.trim()).ok()
    }

    /// Parse a share count, tolerating a fractional part.
    fn parse_volume(s: &str) -> Option<u64> {
        let s = s.trim();
        s.parse::<u64>().ok().or_else(|| {
            Decimal::from_str(s)
                .ok()
                .filter(|d| d.is_sign_positive())
                .and_then(|d| d.trunc().to_u64())
        })
    }

    /// Convert the provider's date-keyed map into bars within `window`,
    /// oldest first.
    fn normalize_series(time_series: HashMap<String, DailyQuote>, window: DateWindow) -> Vec<DailyBar> {
        let mut bars: Vec<DailyBar> = time_series
            .into_iter()
            .filter_map(|(date_str, daily)| {
                let timestamp = Self::parse_date(&date_str)?;
                let open = Self::parse_decimal(&daily.open)?;
                let high = Self::parse_decimal(&daily.high)?;
                let low = Self::parse_decimal(&daily.low)?;
                let close = Self::parse_decimal(&daily.close)?;
                let volume = Self::parse_volume(&daily.volume)?;

                Some(DailyBar::new(timestamp, open, high, low, close, volume))
            })
            .filter(|bar| window.contains(bar.starts_at()))
            .collect();

        bars.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        bars
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_daily_series(
        &self,
        symbol: &str,
        window: DateWindow,
    ) -> Result<Vec<DailyBar>, MarketDataError> {
        let params = [
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("outputsize", "full"),
        ];

        let (status, text) = self.fetch(&params).await?;
        let body = classify(status, &text, DataSection::DailySeries).into_result(symbol)?;

        let response: TimeSeriesResponse =
            serde_json::from_value(body).map_err(|e| MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        let bars = Self::normalize_series(response.time_series, window);

        debug!(
            "Alpha Vantage: fetched {} daily bars for {}",
            bars.len(),
            symbol
        );

        Ok(bars)
    }

    async fn fetch_company_overview(
        &self,
        symbol: &str,
    ) -> Result<CompanyOverview, MarketDataError> {
        let params = [("function", "OVERVIEW"), ("symbol", symbol)];

        let (status, text) = self.fetch(&params).await?;
        let body = classify(status, &text, DataSection::Overview).into_result(symbol)?;

        let overview: CompanyOverview =
            serde_json::from_value(body).map_err(|e| MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse company overview response: {}", e),
            })?;

        debug!("Alpha Vantage: fetched company overview for {}", symbol);

        Ok(overview)
    }
}
