use std::fmt;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Look-back window requested for a price series.
///
/// Tokens are `1M`, `3M`, `6M`, `1Y`, `5Y`. Anything else, including a
/// missing token, falls back to one month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
}

/// Inclusive `[start, end]` interval a price series is restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

impl PriceRange {
    pub const ALL: [PriceRange; 5] = [
        PriceRange::OneMonth,
        PriceRange::ThreeMonths,
        PriceRange::SixMonths,
        PriceRange::OneYear,
        PriceRange::FiveYears,
    ];

    /// Parse a range token, defaulting to one month.
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some("3M") => PriceRange::ThreeMonths,
            Some("6M") => PriceRange::SixMonths,
            Some("1Y") => PriceRange::OneYear,
            Some("5Y") => PriceRange::FiveYears,
            _ => PriceRange::OneMonth,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            PriceRange::OneMonth => "1M",
            PriceRange::ThreeMonths => "3M",
            PriceRange::SixMonths => "6M",
            PriceRange::OneYear => "1Y",
            PriceRange::FiveYears => "5Y",
        }
    }

    fn months_back(&self) -> u32 {
        match self {
            PriceRange::OneMonth => 1,
            PriceRange::ThreeMonths => 3,
            PriceRange::SixMonths => 6,
            PriceRange::OneYear => 12,
            PriceRange::FiveYears => 60,
        }
    }

    /// Window ending at `now` and starting the range's length earlier.
    ///
    /// Calendar arithmetic clamps to the end of shorter months
    /// (31 March minus one month is 29 February in a leap year).
    pub fn window(&self, now: DateTime<Utc>) -> DateWindow {
        let start = now
            .checked_sub_months(Months::new(self.months_back()))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        DateWindow { start, end: now }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
