use rust_decimal::Decimal;
use tickerboard_market_data::DailyBar;

/// Header figures derived from a price series, newest bar last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceSummary {
    /// Close of the latest bar
    pub current_price: Decimal,
    /// Close of the bar before it, or the current price for a single bar
    pub previous_close: Decimal,
    pub change: Decimal,
    /// Percent change against the previous close; zero when that is zero
    pub percent_change: Decimal,
    pub day_high: Decimal,
    pub day_low: Decimal,
    pub volume: u64,
    /// Volume abbreviated for display, e.g. `51.2M`
    pub formatted_volume: String,
}

impl PriceSummary {
    /// Summarize an ascending series. Returns `None` for an empty one.
    pub fn from_bars(bars: &[DailyBar]) -> Option<Self> {
        let latest = bars.last()?;
        let current_price = latest.close;
        let previous_close = bars
            .len()
            .checked_sub(2)
            .map(|i| bars[i].close)
            .unwrap_or(current_price);

        let change = current_price - previous_close;
        let percent_change = if previous_close.is_zero() {
            Decimal::ZERO
        } else {
            change / previous_close * Decimal::ONE_HUNDRED
        };

        Some(Self {
            current_price,
            previous_close,
            change,
            percent_change,
            day_high: latest.high,
            day_low: latest.low,
            volume: latest.volume,
            formatted_volume: format_volume(latest.volume),
        })
    }

    /// `+1.23 (+0.45%)` style change label.
    pub fn change_label(&self) -> String {
        let sign = if self.change.is_sign_negative() { "" } else { "+" };
        format!(
            "{}{:.2} ({}{:.2}%)",
            sign,
            self.change.round_dp(2),
            sign,
            self.percent_change.round_dp(2)
        )
    }
}

/// Abbreviate a share count: one decimal with `M` from a million, `K` from a
/// thousand, the plain number below that.
pub fn format_volume(volume: u64) -> String {
    if volume >= 1_000_000 {
        format!("{:.1}M", volume as f64 / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{:.1}K", volume as f64 / 1_000.0)
    } else {
        volume.to_string()
    }
}
