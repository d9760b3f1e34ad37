use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tickerboard_market_data::MarketDataError;

pub const STOCK_DATA_ERROR: &str = "Error fetching stock data";
pub const STOCK_INFO_ERROR: &str = "Error fetching stock info";

const RATE_LIMITED_ERROR: &str = "Rate limited";
const NO_DATA_ERROR: &str = "No data returned";
const NO_DATA_MESSAGE: &str = "No data available for this stock";
const TIMEOUT_ERROR: &str = "Request timed out";
const TIMEOUT_MESSAGE: &str =
    "The upstream call is still queued; its result will be cached when it completes";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Upstream throttling. The message always mentions "frequency" so
    /// consumers can detect it from the body as well as the status.
    #[error("{message}")]
    RateLimited { message: String },
    #[error("No data returned for {symbol}")]
    NoData { symbol: String },
    /// Any other failed fetch; `error` names the operation that failed.
    #[error("{error}: {message}")]
    Fetch {
        error: &'static str,
        message: String,
    },
    /// The request outlived the router timeout while waiting in the queue.
    #[error("{}", TIMEOUT_ERROR)]
    Timeout,
    #[error("{message}")]
    Internal { message: String },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl ApiError {
    /// Translate a gateway failure, labelling generic failures with `error`.
    pub fn from_market_data(err: MarketDataError, error: &'static str) -> Self {
        match err {
            MarketDataError::RateLimited { message, .. } => ApiError::RateLimited {
                message: rate_limited_message(message),
            },
            MarketDataError::NoData { symbol } => ApiError::NoData { symbol },
            MarketDataError::UpstreamError { message, .. }
            | MarketDataError::Transport { message, .. } => ApiError::Fetch { error, message },
            MarketDataError::QueueClosed => ApiError::Fetch {
                error,
                message: MarketDataError::QueueClosed.to_string(),
            },
        }
    }

    pub fn stock_data(err: MarketDataError) -> Self {
        Self::from_market_data(err, STOCK_DATA_ERROR)
    }

    pub fn stock_info(err: MarketDataError) -> Self {
        Self::from_market_data(err, STOCK_INFO_ERROR)
    }
}

fn rate_limited_message(upstream: String) -> String {
    if upstream.contains("frequency") {
        upstream
    } else {
        format!("API call frequency limit reached: {}", upstream)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::RateLimited { message } => {
                (StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_ERROR, message)
            }
            ApiError::NoData { .. } => (
                StatusCode::NOT_FOUND,
                NO_DATA_ERROR,
                NO_DATA_MESSAGE.to_string(),
            ),
            ApiError::Fetch { error, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error, message)
            }
            ApiError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                TIMEOUT_ERROR,
                TIMEOUT_MESSAGE.to_string(),
            ),
            ApiError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, message)
            }
        };
        let body = Json(ErrorBody {
            error: error.to_string(),
            message,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
