//! Tests for the gateway service's cache and queue contract.
//!
//! # Contract Points
//!
//! 1. A fresh cache entry is served without touching the provider
//! 2. An expired entry triggers exactly one new upstream call
//! 3. Failures are returned as-is and never cached
//! 4. Health reports cached keys per category and the queue backlog
//! 5. A dispatched call is cached even if its caller stopped waiting

#[cfg(test)]
mod tests {
    use crate::cache::{CacheTtl, COMPANY_OVERVIEW_TTL, PRICE_SERIES_TTL};
    use crate::errors::MarketDataError;
    use crate::models::{CompanyOverview, DailyBar, DateWindow, PriceRange};
    use crate::provider::MarketDataProvider;
    use crate::service::MarketDataService;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const SPACING: Duration = Duration::from_millis(100);

    // =========================================================================
    // Mock provider
    // =========================================================================

    #[derive(Default)]
    struct MockProvider {
        series_calls: AtomicUsize,
        overview_calls: AtomicUsize,
        series_responses: Mutex<VecDeque<Result<Vec<DailyBar>, MarketDataError>>>,
        overview_responses: Mutex<VecDeque<Result<CompanyOverview, MarketDataError>>>,
        last_window: Mutex<Option<DateWindow>>,
        last_symbol: Mutex<Option<String>>,
    }

    impl MockProvider {
        fn push_series(&self, response: Result<Vec<DailyBar>, MarketDataError>) {
            self.series_responses.lock().unwrap().push_back(response);
        }

        fn push_overview(&self, response: Result<CompanyOverview, MarketDataError>) {
            self.overview_responses.lock().unwrap().push_back(response);
        }

        fn series_calls(&self) -> usize {
            self.series_calls.load(Ordering::SeqCst)
        }

        fn overview_calls(&self) -> usize {
            self.overview_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn fetch_daily_series(
            &self,
            symbol: &str,
            window: DateWindow,
        ) -> Result<Vec<DailyBar>, MarketDataError> {
            self.series_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_window.lock().unwrap() = Some(window);
            *self.last_symbol.lock().unwrap() = Some(symbol.to_string());
            self.series_responses
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
            *self.last_symbol.lock().unwrap() = Some(symbol.to_string());
            self.overview_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(sample_overview(symbol)))
        }
    }

    fn sample_bars() -> Vec<DailyBar> {
        vec![
            DailyBar::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                dec!(185.00),
                dec!(187.00),
                dec!(184.00),
                dec!(186.00),
                1_000_000,
            ),
            DailyBar::new(
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                dec!(186.00),
                dec!(188.50),
                dec!(185.10),
                dec!(188.20),
                1_200_000,
            ),
        ]
    }

    fn sample_overview(symbol: &str) -> CompanyOverview {
        serde_json::from_value(serde_json::json!({
            "Symbol": symbol,
            "Name": "Sample Corp",
            "PERatio": "28.4"
        }))
        .unwrap()
    }

    fn service(provider: Arc<MockProvider>) -> MarketDataService {
        MarketDataService::new(provider, SPACING, CacheTtl::default())
    }

    // =========================================================================
    // Price series
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_second_request_within_ttl_is_served_from_cache() {
        let provider = Arc::new(MockProvider::default());
        let service = service(provider.clone());

        let first = service.get_price_series("AAPL", PriceRange::OneMonth).await.unwrap();
        let second = service.get_price_series("aapl", PriceRange::OneMonth).await.unwrap();

        assert_eq!(provider.series_calls(), 1);
        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_triggers_exactly_one_refetch() {
        let provider = Arc::new(MockProvider::default());
        let service = service(provider.clone());

        service.get_price_series("AAPL", PriceRange::OneMonth).await.unwrap();
        tokio::time::advance(PRICE_SERIES_TTL + Duration::from_secs(1)).await;

        service.get_price_series("AAPL", PriceRange::OneMonth).await.unwrap();
        service.get_price_series("AAPL", PriceRange::OneMonth).await.unwrap();

        assert_eq!(provider.series_calls(), 2);
        assert_eq!(service.cache_stats().stocks, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_range_is_cached_separately() {
        let provider = Arc::new(MockProvider::default());
        let service = service(provider.clone());

        service.get_price_series("AAPL", PriceRange::OneMonth).await.unwrap();
        service.get_price_series("AAPL", PriceRange::OneYear).await.unwrap();

        assert_eq!(provider.series_calls(), 2);
        assert_eq!(service.cache_stats().stocks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_receives_normalized_symbol_and_range_window() {
        let provider = Arc::new(MockProvider::default());
        let service = service(provider.clone());

        service.get_price_series(" msft ", PriceRange::SixMonths).await.unwrap();

        assert_eq!(provider.last_symbol.lock().unwrap().as_deref(), Some("MSFT"));
        let window = provider.last_window.lock().unwrap().unwrap();
        let span = window.end - window.start;
        assert!(span.num_days() >= 181 && span.num_days() <= 184);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_returned_and_not_cached() {
        let provider = Arc::new(MockProvider::default());
        provider.push_series(Err(MarketDataError::RateLimited {
            provider: "MOCK".to_string(),
            message: "API call frequency exceeded".to_string(),
        }));
        let service = service(provider.clone());

        let err = service
            .get_price_series("AAPL", PriceRange::OneMonth)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
        assert!(!service.has_cached_price_series("AAPL", PriceRange::OneMonth));

        // The next request goes upstream again and succeeds.
        let bars = service.get_price_series("AAPL", PriceRange::OneMonth).await.unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(provider.series_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_are_serialized_through_queue() {
        let provider = Arc::new(MockProvider::default());
        let service = Arc::new(service(provider.clone()));
        let started = tokio::time::Instant::now();

        let symbols = ["AAPL", "MSFT", "GOOGL"];
        let requests = symbols.iter().map(|symbol| {
            let service = service.clone();
            async move { service.get_price_series(symbol, PriceRange::OneMonth).await }
        });
        let results = futures::future::join_all(requests).await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(provider.series_calls(), 3);
        // Three dispatches need at least two spacing gaps between them.
        assert!(started.elapsed() >= SPACING * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_request_still_populates_cache() {
        let provider = Arc::new(MockProvider::default());
        let service = Arc::new(service(provider.clone()));

        // Occupy the queue so the next miss has to wait behind it.
        let ahead = {
            let service = service.clone();
            tokio::spawn(async move { service.get_price_series("MSFT", PriceRange::OneMonth).await })
        };
        tokio::task::yield_now().await;

        let waited = tokio::time::timeout(
            SPACING / 2,
            service.get_price_series("AAPL", PriceRange::OneMonth),
        )
        .await;
        assert!(waited.is_err());
        assert!(!service.has_cached_price_series("AAPL", PriceRange::OneMonth));

        ahead.await.unwrap().unwrap();
        tokio::time::sleep(SPACING * 3).await;

        assert_eq!(provider.series_calls(), 2);
        assert!(service.has_cached_price_series("AAPL", PriceRange::OneMonth));

        service.get_price_series("AAPL", PriceRange::OneMonth).await.unwrap();
        assert_eq!(provider.series_calls(), 2);
    }

    // =========================================================================
    // Company overview
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_overview_cached_for_a_day() {
        let provider = Arc::new(MockProvider::default());
        let service = service(provider.clone());

        let overview = service.get_company_overview("IBM").await.unwrap();
        assert_eq!(overview.symbol(), Some("IBM"));

        tokio::time::advance(COMPANY_OVERVIEW_TTL - Duration::from_secs(60)).await;
        service.get_company_overview("IBM").await.unwrap();
        assert_eq!(provider.overview_calls(), 1);

        tokio::time::advance(Duration::from_secs(120)).await;
        service.get_company_overview("IBM").await.unwrap();
        assert_eq!(provider.overview_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overview_no_data_leaves_cache_empty() {
        let provider = Arc::new(MockProvider::default());
        provider.push_overview(Err(MarketDataError::NoData {
            symbol: "UNKNOWN".to_string(),
        }));
        let service = service(provider.clone());

        let err = service.get_company_overview("UNKNOWN").await.unwrap_err();

        assert_eq!(
            err,
            MarketDataError::NoData {
                symbol: "UNKNOWN".to_string()
            }
        );
        assert!(!service.has_cached_overview("UNKNOWN"));
        assert_eq!(service.cache_stats().stock_info, 0);
    }

    // =========================================================================
    // Health
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_health_reports_cache_counts() {
        let provider = Arc::new(MockProvider::default());
        let service = service(provider.clone());

        service.get_price_series("AAPL", PriceRange::OneMonth).await.unwrap();
        service.get_price_series("AAPL", PriceRange::ThreeMonths).await.unwrap();
        service.get_company_overview("AAPL").await.unwrap();

        let health = service.health();
        assert_eq!(health.cache_stats.stocks, 2);
        assert_eq!(health.cache_stats.stock_info, 1);
        assert_eq!(health.queue_length, 0);

        let json = serde_json::to_value(health).unwrap();
        assert_eq!(json["cacheStats"]["stockInfo"], 1);
        assert_eq!(json["queueLength"], 0);
    }
}
