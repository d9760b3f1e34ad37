use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Listing files read from the tickers directory, in search order.
pub const TICKER_FILES: [&str; 2] = ["nasdaq_full_tickers.json", "nyse_full_tickers.json"];

/// Upper bound on the number of search results returned.
pub const MAX_SEARCH_RESULTS: usize = 100;

/// One listed security.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerInfo {
    pub symbol: String,
    pub name: String,
}

/// In-memory list of exchange tickers used for symbol search.
#[derive(Clone, Debug, Default)]
pub struct TickerDirectory {
    tickers: Vec<TickerInfo>,
}

impl TickerDirectory {
    pub fn new(tickers: Vec<TickerInfo>) -> Self {
        Self { tickers }
    }

    /// Load the NASDAQ then NYSE listings from `dir`.
    ///
    /// A missing or malformed file is logged and skipped; the directory is
    /// still usable with whatever did load.
    pub fn load(dir: &Path) -> Self {
        let mut tickers = Vec::new();

        for file_name in TICKER_FILES {
            let path = dir.join(file_name);
            match read_listing(&path) {
                Ok(mut listing) => {
                    info!("Loaded {} tickers from {}", listing.len(), path.display());
                    tickers.append(&mut listing);
                }
                Err(e) => warn!("Skipping ticker listing {}: {}", path.display(), e),
            }
        }

        Self { tickers }
    }

    /// Case-insensitive substring match over symbol and name, in listing
    /// order, capped at [`MAX_SEARCH_RESULTS`].
    pub fn search(&self, query: &str) -> Vec<TickerInfo> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.tickers
            .iter()
            .filter(|t| {
                t.symbol.to_lowercase().contains(&query) || t.name.to_lowercase().contains(&query)
            })
            .take(MAX_SEARCH_RESULTS)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

/// Why a listing file could not be loaded.
#[derive(Error, Debug)]
enum ListingError {
    #[error("failed to read listing: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listing JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

fn read_listing(path: &Path) -> Result<Vec<TickerInfo>, ListingError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
