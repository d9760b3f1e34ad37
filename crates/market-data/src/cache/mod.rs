//! In-memory response cache with category-specific TTL.
//!
//! Entries are keyed by request identity and carry the instant they were
//! fetched. A stale entry is never served; it stays in the map until a
//! successful refetch for the same key replaces it. There is no eviction and
//! no size bound, entries live for the life of the process.

use std::fmt;
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::models::PriceRange;

/// Default freshness for price series (5 minutes).
pub const PRICE_SERIES_TTL: Duration = Duration::from_secs(5 * 60);

/// Default freshness for company overviews (24 hours).
pub const COMPANY_OVERVIEW_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Data category of a cached response. Each category has its own TTL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    PriceSeries,
    CompanyOverview,
}

/// Per-category freshness durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheTtl {
    pub price_series: Duration,
    pub company_overview: Duration,
}

impl CacheTtl {
    pub fn for_category(&self, category: CacheCategory) -> Duration {
        match category {
            CacheCategory::PriceSeries => self.price_series,
            CacheCategory::CompanyOverview => self.company_overview,
        }
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            price_series: PRICE_SERIES_TTL,
            company_overview: COMPANY_OVERVIEW_TTL,
        }
    }
}

/// Identity of a cached request: category plus normalized parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub category: CacheCategory,
    pub symbol: String,
    pub range: Option<PriceRange>,
}

impl CacheKey {
    pub fn price_series(symbol: &str, range: PriceRange) -> Self {
        Self {
            category: CacheCategory::PriceSeries,
            symbol: normalize_symbol(symbol),
            range: Some(range),
        }
    }

    pub fn company_overview(symbol: &str) -> Self {
        Self {
            category: CacheCategory::CompanyOverview,
            symbol: normalize_symbol(symbol),
            range: None,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some(range) => write!(f, "{}_{}", self.symbol, range),
            None => f.write_str(&self.symbol),
        }
    }
}

/// Symbols are case-insensitive upstream; keep one key per ticker.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// A cached response and the moment it was fetched.
#[derive(Clone, Debug)]
pub struct CacheEntry<V> {
    pub key: CacheKey,
    pub payload: V,
    pub fetched_at: Instant,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Fresh iff `now - fetched_at < ttl`.
    pub fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < self.ttl
    }
}

/// Number of cached keys per category, as reported by the health endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub stocks: usize,
    pub stock_info: usize,
}

/// Concurrent map of cached responses.
pub struct CacheStore<V> {
    entries: DashMap<CacheKey, CacheEntry<V>>,
    ttl: CacheTtl,
}

impl<V: Clone> CacheStore<V> {
    pub fn new(ttl: CacheTtl) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Return the entry for `key` if it is still fresh. Never performs I/O.
    pub fn lookup(&self, key: &CacheKey) -> Option<CacheEntry<V>> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value().clone())
    }

    /// Create or replace the entry for `key`, stamped with the current instant.
    pub fn store(&self, key: CacheKey, payload: V) {
        let entry = CacheEntry {
            key: key.clone(),
            payload,
            fetched_at: Instant::now(),
            ttl: self.ttl.for_category(key.category),
        };
        self.entries.insert(key, entry);
    }

    /// Whether any entry (fresh or stale) exists for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys held, stale entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new(CacheTtl::default())
    }
}
