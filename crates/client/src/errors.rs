use thiserror::Error;

/// Message shown once rate-limit retries are used up.
pub const RATE_LIMIT_EXHAUSTED_MESSAGE: &str = "API rate limit reached. Please try again later.";

/// Message shown for any other failed load.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load stock data. Please try again later.";

/// Errors returned by the dashboard client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The gateway answered 429, or its error body mentions "frequency".
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// Every allowed attempt was rate limited. Terminal.
    #[error("{}", RATE_LIMIT_EXHAUSTED_MESSAGE)]
    RetriesExhausted { attempts: u32, last_message: String },

    /// Any other non-success response, with the gateway's `{error, message}`.
    #[error("HTTP {status}: {error}: {message}")]
    Http {
        status: u16,
        error: String,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the retry controller should try again after a delay.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ClientError::RateLimited { .. })
    }

    /// Text suitable for showing to the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::RateLimited { .. } | ClientError::RetriesExhausted { .. } => {
                RATE_LIMIT_EXHAUSTED_MESSAGE
            }
            _ => LOAD_FAILED_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport("request timed out".to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
