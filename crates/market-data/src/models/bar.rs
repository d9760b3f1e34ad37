use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day of price data, normalized from the provider's payload.
///
/// Prices serialize as JSON numbers and the timestamp as `YYYY-MM-DD`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Trading day
    pub timestamp: NaiveDate,

    /// Opening price
    pub open: Decimal,

    /// Session high
    pub high: Decimal,

    /// Session low
    pub low: Decimal,

    /// Closing price
    pub close: Decimal,

    /// Shares traded
    pub volume: u64,
}

impl DailyBar {
    /// Create a full OHLCV bar
    pub fn new(
        timestamp: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// The bar's trading day at 00:00 UTC, used when comparing against a
    /// request window.
    pub fn starts_at(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.timestamp.and_time(NaiveTime::default()))
    }
}
