//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait the gateway dispatches through
//! - The Alpha Vantage implementation and its response classification
//!
//! Upstream response shapes are known only inside `alpha_vantage`; everything
//! outside sees normalized models or a [`MarketDataError`](crate::MarketDataError).

mod traits;

pub mod alpha_vantage;

pub use traits::MarketDataProvider;
