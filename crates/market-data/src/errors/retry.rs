/// Classification for retry policy.
///
/// The gateway itself never retries. This tells consumers whether resubmitting
/// the identical request later can succeed.
///
/// # Behavior Summary
///
/// | Class | Consumer may resubmit? | Cached? |
/// |-------|------------------------|---------|
/// | `Never` | No | No |
/// | `AfterDelay` | Yes, after a fixed wait | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, upstream rejection, or transport failure.
    /// Resubmitting the same request is not expected to change the outcome.
    Never,

    /// The upstream throttled the request.
    ///
    /// The request itself is valid; resubmitting it after the upstream's
    /// frequency window has passed is expected to succeed.
    AfterDelay,
}
