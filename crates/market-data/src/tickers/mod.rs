//! Local ticker search and the curated landing-page lists.
//!
//! Nothing here talks to the upstream provider.

mod directory;
mod movers;

pub use directory::{TickerDirectory, TickerInfo, MAX_SEARCH_RESULTS, TICKER_FILES};
pub use movers::{biggest_market_cap, top_performers, MarketMover};
