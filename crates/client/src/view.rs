use log::warn;
use tickerboard_market_data::{CompanyOverview, DailyBar, PriceRange};

use crate::client::DashboardClient;
use crate::errors::ClientError;
use crate::retry::{retry_rate_limited, RetryPolicy};
use crate::summary::PriceSummary;

/// Everything the company page shows for one symbol and range.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanyView {
    pub symbol: String,
    pub range: PriceRange,
    pub bars: Vec<DailyBar>,
    pub summary: Option<PriceSummary>,
    /// `None` when the overview could not be loaded; the price data is still shown.
    pub overview: Option<CompanyOverview>,
}

/// Load the price series, retrying while rate limited, then the overview once.
///
/// The two requests are sequential so they never compete for the upstream
/// budget. Only the price series decides whether the view loads at all.
pub async fn load_company_view(
    client: &DashboardClient,
    policy: &RetryPolicy,
    symbol: &str,
    range: PriceRange,
) -> Result<CompanyView, ClientError> {
    let bars = retry_rate_limited(policy, move || client.fetch_stock_data(symbol, range)).await?;

    let overview = match client.fetch_stock_info(symbol).await {
        Ok(overview) => Some(overview),
        Err(e) => {
            warn!(
                "Could not fetch company info for {}, showing price data only: {}",
                symbol, e
            );
            None
        }
    };

    Ok(CompanyView {
        symbol: symbol.to_string(),
        range,
        summary: PriceSummary::from_bars(&bars),
        bars,
        overview,
    })
}
