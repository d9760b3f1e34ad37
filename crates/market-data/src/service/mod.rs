//! Gateway service.
//!
//! [`MarketDataService`] owns the response caches, the request queue and the
//! upstream provider. Every lookup follows the same path:
//!
//! 1. Build the cache key from the normalized request.
//! 2. Serve a fresh cached payload if there is one.
//! 3. Otherwise submit one upstream call to the queue and wait for it.
//! 4. Store the payload on success; return errors without caching them.
//!
//! The store happens inside the queued action, so a successful dispatch
//! lands in the cache even when its caller has stopped waiting.

#[cfg(test)]
mod service_tests;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use serde::Serialize;

use crate::cache::{CacheKey, CacheStats, CacheStore, CacheTtl};
use crate::errors::MarketDataError;
use crate::models::{CompanyOverview, DailyBar, PriceRange};
use crate::provider::MarketDataProvider;
use crate::registry::RequestQueue;

/// Snapshot reported by the health endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayHealth {
    pub cache_stats: CacheStats,
    /// Upstream calls waiting in the queue, the in-flight call excluded.
    pub queue_length: usize,
}

/// Cache-fronted, queue-serialized access to the upstream provider.
///
/// Construct once per process (it spawns the queue worker) and share it
/// behind an `Arc`.
pub struct MarketDataService {
    provider: Arc<dyn MarketDataProvider>,
    queue: RequestQueue,
    price_series: Arc<CacheStore<Arc<Vec<DailyBar>>>>,
    overviews: Arc<CacheStore<Arc<CompanyOverview>>>,
}

impl MarketDataService {
    /// Must be called from within a tokio runtime.
    pub fn new(provider: Arc<dyn MarketDataProvider>, spacing: Duration, ttl: CacheTtl) -> Self {
        debug!(
            "Market data service using provider {} (spacing {:?})",
            provider.id(),
            spacing
        );
        Self {
            provider,
            queue: RequestQueue::new(spacing),
            price_series: Arc::new(CacheStore::new(ttl)),
            overviews: Arc::new(CacheStore::new(ttl)),
        }
    }

    /// Daily bars for `symbol` over `range`, oldest first.
    pub async fn get_price_series(
        &self,
        symbol: &str,
        range: PriceRange,
    ) -> Result<Arc<Vec<DailyBar>>, MarketDataError> {
        let key = CacheKey::price_series(symbol, range);

        if let Some(entry) = self.price_series.lookup(&key) {
            info!("Serving cached price series for {}", key);
            return Ok(entry.payload);
        }

        info!("Fetching price series from upstream for {}", key);
        let window = range.window(Utc::now());
        let provider = self.provider.clone();
        let cache = self.price_series.clone();
        let cache_key = key.clone();

        self.queue
            .submit(move || async move {
                let bars = provider.fetch_daily_series(&cache_key.symbol, window).await?;
                let bars = Arc::new(bars);
                cache.store(cache_key, bars.clone());
                Ok::<_, MarketDataError>(bars)
            })
            .await
            .inspect_err(|e| warn!("Price series fetch failed for {}: {}", key, e))
    }

    /// Company overview for `symbol`.
    pub async fn get_company_overview(
        &self,
        symbol: &str,
    ) -> Result<Arc<CompanyOverview>, MarketDataError> {
        let key = CacheKey::company_overview(symbol);

        if let Some(entry) = self.overviews.lookup(&key) {
            info!("Serving cached company overview for {}", key);
            return Ok(entry.payload);
        }

        info!("Fetching company overview from upstream for {}", key);
        let provider = self.provider.clone();
        let cache = self.overviews.clone();
        let cache_key = key.clone();

        self.queue
            .submit(move || async move {
                let overview = provider.fetch_company_overview(&cache_key.symbol).await?;
                let overview = Arc::new(overview);
                cache.store(cache_key, overview.clone());
                Ok::<_, MarketDataError>(overview)
            })
            .await
            .inspect_err(|e| warn!("Company overview fetch failed for {}: {}", key, e))
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            stocks: self.price_series.len(),
            stock_info: self.overviews.len(),
        }
    }

    pub fn queue_length(&self) -> usize {
        self.queue.pending()
    }

    pub fn health(&self) -> GatewayHealth {
        GatewayHealth {
            cache_stats: self.cache_stats(),
            queue_length: self.queue_length(),
        }
    }

    /// Whether a price series for this request has ever been cached.
    pub fn has_cached_price_series(&self, symbol: &str, range: PriceRange) -> bool {
        self.price_series
            .contains(&CacheKey::price_series(symbol, range))
    }

    /// Whether an overview for this symbol has ever been cached.
    pub fn has_cached_overview(&self, symbol: &str) -> bool {
        self.overviews.contains(&CacheKey::company_overview(symbol))
    }
}
