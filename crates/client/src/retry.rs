//! Retry controller for rate-limited requests.
//!
//! The gateway never retries on its own. When it reports throttling, the
//! consumer waits a fixed delay and resubmits the identical request, up to a
//! fixed number of total attempts. Exhaustion is terminal.

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::errors::ClientError;

/// Bounded, fixed-delay retry settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Pause before each resubmission.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Run `op`, resubmitting it after `policy.delay` whenever it is rate limited.
///
/// Any other outcome, success or failure, is returned as soon as it happens.
/// After `max_attempts` rate-limited attempts the result is
/// [`ClientError::RetriesExhausted`] and `op` is not called again.
pub async fn retry_rate_limited<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Err(ClientError::RateLimited { message }) => {
                if attempt >= max_attempts {
                    warn!("Rate limited on attempt {}/{}; giving up", attempt, max_attempts);
                    return Err(ClientError::RetriesExhausted {
                        attempts: attempt,
                        last_message: message,
                    });
                }
                warn!(
                    "Rate limit reached. Retrying in {} seconds... (attempt {}/{})",
                    policy.delay.as_secs_f32(),
                    attempt + 1,
                    max_attempts
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
