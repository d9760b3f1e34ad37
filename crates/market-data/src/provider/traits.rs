//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that the upstream
//! client implements and that tests replace with stubs.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{CompanyOverview, DailyBar, DateWindow};

/// Trait for market data providers.
///
/// Each method performs exactly one upstream call and classifies the response
/// before returning. Implementations never cache; that is the caller's job.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tickerboard_market_data::provider::MarketDataProvider;
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     // ... implement fetch methods
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "ALPHA_VANTAGE".
    /// Used in logs and error payloads.
    fn id(&self) -> &'static str;

    /// Fetch daily bars for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The ticker symbol, already normalized
    /// * `window` - Inclusive date window the bars are restricted to
    ///
    /// # Returns
    ///
    /// Bars within the window in strictly ascending date order, or the
    /// classified failure.
    async fn fetch_daily_series(
        &self,
        symbol: &str,
        window: DateWindow,
    ) -> Result<Vec<DailyBar>, MarketDataError>;

    /// Fetch the company overview for a symbol.
    ///
    /// Returns `NoData` when the provider answers with an empty overview.
    async fn fetch_company_overview(&self, symbol: &str)
        -> Result<CompanyOverview, MarketDataError>;
}
