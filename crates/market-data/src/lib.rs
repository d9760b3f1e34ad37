//! Tickerboard Market Data Crate
//!
//! This crate is the gateway between the dashboard and the rate-limited
//! Alpha Vantage API.
//!
//! # Overview
//!
//! - A TTL cache keyed by request identity, with per-category freshness
//! - A request queue that serializes every upstream call with fixed spacing
//! - An upstream client that classifies provider responses into typed outcomes
//! - A service object tying the three together for the HTTP layer
//! - Local ticker search and the static market lists
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  HTTP handler    |
//! +------------------+
//!          |
//!          v
//! +------------------+  hit   +------------------+
//! | MarketDataService| -----> |   CacheStore     |
//! +------------------+        +------------------+
//!          | miss
//!          v
//! +------------------+
//! |   RequestQueue   |  (one call in flight, fixed spacing)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (Alpha Vantage, classification)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`DailyBar`] - One normalized OHLCV record
//! - [`CompanyOverview`] - Company fundamentals as returned upstream
//! - [`PriceRange`] - Requested look-back window (`1M`, `3M`, ...)
//! - [`MarketDataError`] - The closed outcome taxonomy for failed fetches

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod service;
pub mod tickers;

pub use cache::{CacheCategory, CacheEntry, CacheKey, CacheStats, CacheStore, CacheTtl};
pub use errors::{MarketDataError, RetryClass};
pub use models::{CompanyOverview, DailyBar, DateWindow, PriceRange};
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::MarketDataProvider;
pub use registry::{RequestQueue, DEFAULT_DISPATCH_SPACING};
pub use service::{GatewayHealth, MarketDataService};
pub use tickers::{MarketMover, TickerDirectory, TickerInfo};
