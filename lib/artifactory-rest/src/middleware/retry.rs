//! Retry policy for idempotent requests.

use std::time::Duration;

use bytes::Bytes;
use tower::retry::Policy;

use crate::{Error, Request, Response};

/// Retries transient failures of idempotent requests.
///
/// Retried outcomes:
/// - connection errors and timeouts
/// - 5xx server errors
/// - 429 Too Many Requests
///
/// `POST` (AQL searches) is never retried. Each retry waits twice as long as
/// the previous one, starting from the configured backoff.
///
/// # Example
///
/// ```ignore
/// use artifactory_rest::middleware::{RetryLayer, RetryPolicy, ServiceBuilder};
///
/// let service = ServiceBuilder::new()
///     .layer(RetryLayer::new(RetryPolicy::new(3)))
///     .service(client);
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    remaining: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Default delay before the first retry.
    pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(100);

    /// Create a policy allowing `max_retries` retries.
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self {
            remaining: max_retries,
            backoff: Self::DEFAULT_BACKOFF,
        }
    }

    /// Set the delay before the first retry.
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn should_retry_response(response: &Response<Bytes>) -> bool {
        let status = response.status();
        status >= 500 || status == 429
    }

    fn should_retry_error(error: &Error) -> bool {
        error.is_connection() || error.is_timeout()
    }
}

impl Policy<Request<Bytes>, Response<Bytes>, Error> for RetryPolicy {
    type Future = tokio::time::Sleep;

    fn retry(
        &mut self,
        req: &mut Request<Bytes>,
        result: &mut Result<Response<Bytes>, Error>,
    ) -> Option<Self::Future> {
        if self.remaining == 0 || !req.method().is_idempotent() {
            return None;
        }

        let should_retry = match result {
            Ok(response) => Self::should_retry_response(response),
            Err(error) => Self::should_retry_error(error),
        };
        if !should_retry {
            return None;
        }

        self.remaining -= 1;
        let delay = self.backoff;
        self.backoff = self.backoff.saturating_mul(2);
        tracing::debug!(
            method = %req.method(),
            url = %req.url(),
            remaining = self.remaining,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "retrying request"
        );
        Some(tokio::time::sleep(delay))
    }

    fn clone_request(&mut self, req: &Request<Bytes>) -> Option<Request<Bytes>> {
        req.method().is_idempotent().then(|| req.clone())
    }
}
