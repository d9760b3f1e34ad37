//! Classification of raw Alpha Vantage responses.
//!
//! Alpha Vantage reports most failures inside HTTP 200 responses, so status
//! and body are inspected together. Checks run in a fixed order and the first
//! match wins:
//!
//! | Check                                                   | Outcome         |
//! |---------------------------------------------------------|-----------------|
//! | HTTP 429                                                | `RateLimited`   |
//! | Any other non-2xx status                                | `UpstreamError` |
//! | Body is not valid JSON                                  | `Transport`     |
//! | `Error Message` field present                           | `UpstreamError` |
//! | `Note` field present                                    | `RateLimited`   |
//! | `Information` mentions "frequency" or "rate limit"      | `RateLimited`   |
//! | Data section missing or empty                           | `NoData`        |
//! | Otherwise                                               | `Success`       |

use log::warn;
use reqwest::StatusCode;
use serde_json::Value;

use crate::errors::MarketDataError;

use super::PROVIDER_ID;

const ERROR_MESSAGE_FIELD: &str = "Error Message";
const NOTE_FIELD: &str = "Note";
const INFORMATION_FIELD: &str = "Information";

pub(crate) const DAILY_SERIES_FIELD: &str = "Time Series (Daily)";

/// Which part of the body has to be present for a response to carry data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DataSection {
    /// A non-empty `Time Series (Daily)` object.
    DailySeries,
    /// A non-empty object with a `Symbol` field.
    Overview,
}

/// Outcome of a single upstream exchange.
#[derive(Debug, PartialEq)]
pub(crate) enum Classification {
    Success(Value),
    UpstreamError(String),
    RateLimited(String),
    NoData,
    Transport(String),
}

impl Classification {
    /// Map the outcome onto the crate's error type, keeping the body on success.
    pub(crate) fn into_result(self, symbol: &str) -> Result<Value, MarketDataError> {
        match self {
            Classification::Success(body) => Ok(body),
            Classification::UpstreamError(message) => Err(MarketDataError::UpstreamError {
                provider: PROVIDER_ID.to_string(),
                message,
            }),
            Classification::RateLimited(message) => Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
                message,
            }),
            Classification::NoData => Err(MarketDataError::NoData {
                symbol: symbol.to_string(),
            }),
            Classification::Transport(message) => Err(MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message,
            }),
        }
    }
}

pub(crate) fn classify(status: StatusCode, body: &str, section: DataSection) -> Classification {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let message = text_field(body, NOTE_FIELD)
            .or_else(|| text_field(body, INFORMATION_FIELD))
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Classification::RateLimited(message);
    }

    if !status.is_success() {
        return Classification::UpstreamError(format!("HTTP {}", status));
    }

    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => return Classification::Transport(format!("Failed to parse response: {}", e)),
    };

    if let Some(message) = field_text(&parsed, ERROR_MESSAGE_FIELD) {
        return Classification::UpstreamError(message);
    }

    if let Some(note) = field_text(&parsed, NOTE_FIELD) {
        return Classification::RateLimited(note);
    }

    if let Some(information) = field_text(&parsed, INFORMATION_FIELD) {
        if is_rate_limit_text(&information) {
            return Classification::RateLimited(information);
        }
        warn!("Alpha Vantage info: {}", information);
    }

    if !has_data(&parsed, section) {
        return Classification::NoData;
    }

    Classification::Success(parsed)
}

fn is_rate_limit_text(text: &str) -> bool {
    text.contains("frequency") || text.contains("rate limit")
}

fn has_data(body: &Value, section: DataSection) -> bool {
    match section {
        DataSection::DailySeries => body
            .get(DAILY_SERIES_FIELD)
            .and_then(Value::as_object)
            .is_some_and(|series| !series.is_empty()),
        DataSection::Overview => body.as_object().is_some_and(|fields| {
            !fields.is_empty()
                && fields
                    .get("Symbol")
                    .and_then(Value::as_str)
                    .is_some_and(|s| !s.trim().is_empty())
        }),
    }
}

fn field_text(body: &Value, field: &str) -> Option<String> {
    body.get(field).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Best-effort field lookup on a body that may not be JSON at all.
fn text_field(body: &str, field: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|parsed| field_text(&parsed, field))
}
