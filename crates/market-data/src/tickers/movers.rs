use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A curated market list entry shown on the dashboard landing page.
///
/// `market_cap` is in billions of USD.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMover {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub price_change: Decimal,
    pub market_cap: u64,
}

/// (symbol, name, price in cents, market cap)
const MEGA_CAPS: [(&str, &str, i64, u64); 5] = [
    ("AAPL", "Apple Inc.", 17545, 2000),
    ("MSFT", "Microsoft Corp.", 42010, 1800),
    ("GOOGL", "Alphabet Inc.", 15570, 1500),
    ("AMZN", "Amazon.com Inc.", 18530, 1400),
    ("TSLA", "Tesla Inc.", 18020, 1000),
];

/// Percent change, in tenths, for the top performers list.
const TOP_PERFORMER_CHANGES: [i64; 5] = [100, 80, 70, 60, 50];

/// Percent change, in tenths, for the market cap list.
const MARKET_CAP_CHANGES: [i64; 5] = [12, 8, 7, 6, 5];

fn mega_caps_with_changes(changes: [i64; 5]) -> Vec<MarketMover> {
    MEGA_CAPS
        .iter()
        .zip(changes)
        .map(|(&(symbol, name, cents, market_cap), change)| MarketMover {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            price_change: Decimal::new(change, 1).normalize(),
            market_cap,
        })
        .collect()
}

pub fn top_performers() -> Vec<MarketMover> {
    mega_caps_with_changes(TOP_PERFORMER_CHANGES)
}

pub fn biggest_market_cap() -> Vec<MarketMover> {
    mega_caps_with_changes(MARKET_CAP_CHANGES)
}
