use std::sync::Arc;

use crate::config::Config;
use tickerboard_market_data::{
    AlphaVantageProvider, CacheTtl, MarketDataProvider, MarketDataService, TickerDirectory,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub market_data: Arc<MarketDataService>,
    pub tickers: Arc<TickerDirectory>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Wire the live Alpha Vantage provider into the application state.
///
/// Must be called from within the tokio runtime; the request queue worker is
/// spawned here.
pub fn build_state(config: &Config) -> Arc<AppState> {
    let api_key = match &config.api_key {
        Some(key) => key.clone(),
        None => {
            tracing::warn!(
                "ALPHA_VANTAGE_API_KEY is not set; upstream requests will be rejected"
            );
            String::new()
        }
    };
    let provider: Arc<dyn MarketDataProvider> = Arc::new(AlphaVantageProvider::new(api_key));
    build_state_with_provider(config, provider)
}

/// Build the application state around any provider implementation.
pub fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> Arc<AppState> {
    tracing::info!(
        "Upstream provider {} with {:?} between dispatches",
        provider.id(),
        config.queue_spacing
    );
    let market_data = Arc::new(MarketDataService::new(
        provider,
        config.queue_spacing,
        CacheTtl::default(),
    ));

    let tickers = TickerDirectory::load(&config.tickers_dir);
    if tickers.is_empty() {
        tracing::warn!(
            "No tickers loaded from {}; search will return no results",
            config.tickers_dir.display()
        );
    } else {
        tracing::info!("Ticker directory ready with {} entries", tickers.len());
    }

    Arc::new(AppState {
        market_data,
        tickers: Arc::new(tickers),
    })
}
