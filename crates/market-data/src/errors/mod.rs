//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The closed set of ways an upstream fetch can fail
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// None of these outcomes is ever written to the cache. Each variant is
/// classified into a [`RetryClass`] via the [`retry_class`](Self::retry_class)
/// method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// The upstream explicitly rejected the request (e.g. "Error Message" in
    /// the body, or a non-success HTTP status other than 429).
    #[error("Upstream error: {provider} - {message}")]
    UpstreamError {
        /// The provider that rejected the request
        provider: String,
        /// The rejection reason reported by the provider
        message: String,
    },

    /// The upstream throttled the request, either with HTTP 429 or with an
    /// API call frequency note inside a 200 response.
    #[error("Rate limited: {provider} - {message}")]
    RateLimited {
        /// The provider that throttled the request
        provider: String,
        /// The throttling note reported by the provider
        message: String,
    },

    /// The request was valid but the provider returned no data section
    /// for the symbol.
    #[error("No data returned for symbol: {symbol}")]
    NoData {
        /// The symbol that had no data
        symbol: String,
    },

    /// The provider could not be reached, timed out, or answered with a body
    /// that could not be decoded.
    #[error("Transport failure: {provider} - {message}")]
    Transport {
        /// The provider being contacted
        provider: String,
        /// Description of the failure
        message: String,
    },

    /// The request queue worker has stopped; nothing can be dispatched.
    #[error("Request queue is closed")]
    QueueClosed,
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tickerboard_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited {
    ///     provider: "ALPHA_VANTAGE".to_string(),
    ///     message: "API call frequency exceeded".to_string(),
    /// };
    /// assert_eq!(error.retry_class(), RetryClass::AfterDelay);
    ///
    /// let error = MarketDataError::NoData { symbol: "INVALID".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. } => RetryClass::AfterDelay,
            Self::UpstreamError { .. }
            | Self::NoData { .. }
            | Self::Transport { .. }
            | Self::QueueClosed => RetryClass::Never,
        }
    }

    /// Build a transport failure from a reqwest error.
    pub(crate) fn transport(provider: &str, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        Self::Transport {
            provider: provider.to_string(),
            message,
        }
    }
}
