#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tickerboard_market_data::{
    CompanyOverview, DailyBar, DateWindow, MarketDataError, MarketDataProvider,
};
use tickerboard_server::{api::app_router, build_state_with_provider, config::Config, AppState};
use tower::ServiceExt;

/// Provider double that counts calls and replays scripted outcomes.
#[derive(Default)]
pub struct StubProvider {
    series_calls: AtomicUsize,
    overview_calls: AtomicUsize,
    series: Mutex<VecDeque<Result<Vec<DailyBar>, MarketDataError>>>,
    overviews: Mutex<VecDeque<Result<CompanyOverview, MarketDataError>>>,
}

impl StubProvider {
    pub fn push_series(&self, outcome: Result<Vec<DailyBar>, MarketDataError>) {
        self.series.lock().unwrap().push_back(outcome);
    }

    pub fn push_overview(&self, outcome: Result<CompanyOverview, MarketDataError>) {
        self.overviews.lock().unwrap().push_back(outcome);
    }

    pub fn series_calls(&self) -> usize {
        self.series_calls.load(Ordering::SeqCst)
    }

    pub fn overview_calls(&self) -> usize {
        self.overview_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn fetch_daily_series(
        &self,
        _symbol: &str,
        _window: DateWindow,
    ) -> Result<Vec<DailyBar>, MarketDataError> {
        self.series_calls.fetch_add(1, Ordering::SeqCst);
        self.series
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_bars()))
    }

    async fn fetch_company_overview(
        &self,
        symbol: &str,
    ) -> Result<CompanyOverview, MarketDataError> {
        self.overview_calls.fetch_add(1, Ordering::SeqCst);
        self.overviews.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(serde_json::from_value(serde_json::json!({
                "Symbol": symbol,
                "Name": "Apple Inc",
                "PERatio": "29.5"
            }))
            .unwrap())
        })
    }
}

pub fn sample_bars() -> Vec<DailyBar> {
    vec![
        DailyBar::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            dec!(169.58),
            dec!(172.71),
            dec!(169.11),
            dec!(169.30),
            50_383_100,
        ),
        DailyBar::new(
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            dec!(172.51),
            dec!(173.42),
            dec!(170.89),
            dec!(173.03),
            94_214_900,
        ),
    ]
}

pub fn test_config(tickers_dir: &Path) -> Config {
    Config {
        tickers_dir: tickers_dir.to_path_buf(),
        queue_spacing: Duration::from_millis(10),
        ..Config::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<StubProvider>,
    pub state: Arc<AppState>,
    _tickers_dir: tempfile::TempDir,
}

pub fn spawn_app(provider: StubProvider) -> TestApp {
    spawn_app_with(provider, |_| {})
}

/// Like [`spawn_app`], with a hook to adjust the configuration first.
pub fn spawn_app_with(provider: StubProvider, configure: impl FnOnce(&mut Config)) -> TestApp {
    let tickers_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        tickers_dir.path().join("nasdaq_full_tickers.json"),
        r#"[
            {"symbol": "AAPL", "name": "Apple Inc. Common Stock"},
            {"symbol": "AMZN", "name": "Amazon.com, Inc. Common Stock"},
            {"symbol": "MSFT", "name": "Microsoft Corporation Common Stock"}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        tickers_dir.path().join("nyse_full_tickers.json"),
        r#"[
            {"symbol": "IBM", "name": "International Business Machines Corporation Common Stock"},
            {"symbol": "APLE", "name": "Apple Hospitality REIT, Inc. Common Shares"}
        ]"#,
    )
    .unwrap();

    let mut config = test_config(tickers_dir.path());
    configure(&mut config);
    let provider = Arc::new(provider);
    let state = build_state_with_provider(&config, provider.clone());
    let router = app_router(state.clone(), &config);

    TestApp {
        router,
        provider,
        state,
        _tickers_dir: tickers_dir,
    }
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}
