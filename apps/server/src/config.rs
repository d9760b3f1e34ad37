use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use tickerboard_market_data::DEFAULT_DISPATCH_SPACING;

const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5001);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_TICKERS_DIR: &str = "data";

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Alpha Vantage credential; requests still go out without one.
    pub api_key: Option<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub tickers_dir: PathBuf,
    pub queue_spacing: Duration,
}

impl Config {
    /// Read the configuration from the process environment. `.env` is loaded
    /// by `main` before this runs.
    pub fn from_env() -> Self {
        let listen_addr = parse_env("TB_LISTEN_ADDR").unwrap_or(DEFAULT_LISTEN_ADDR);
        let api_key = std::env::var("ALPHA_VANTAGE_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let cors_allow = std::env::var("TB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout = parse_env::<u64>("TB_REQUEST_TIMEOUT_MS")
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let tickers_dir =
            std::env::var("TB_TICKERS_DIR").unwrap_or_else(|_| DEFAULT_TICKERS_DIR.into());
        let queue_spacing = parse_env::<u64>("TB_QUEUE_SPACING_MS")
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DISPATCH_SPACING);

        Self {
            listen_addr,
            api_key,
            cors_allow,
            request_timeout,
            tickers_dir: PathBuf::from(tickers_dir),
            queue_spacing,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            api_key: None,
            cors_allow: vec!["*".to_string()],
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            tickers_dir: PathBuf::from(DEFAULT_TICKERS_DIR),
            queue_spacing: DEFAULT_DISPATCH_SPACING,
        }
    }
}

/// Read and parse an env var. `None` when unset, or when the value does not
/// parse (with a warning); callers fall back to their default.
fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {}={:?}, using the default", name, raw);
            None
        }
    }
}
