//! Turn error outcomes into failures of the calling operation.

use crate::{ClassifiedResponse, ClientError, Error, Result};

/// Raises [`Error::RequestFailed`] for classified error outcomes.
///
/// Only [`ClassifiedResponse::Error`] outcomes reach it, so a 404 absorbed
/// by a fallback policy passes through untouched. The status and messages
/// are forwarded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorHandler {
    endpoint: &'static str,
}

impl ErrorHandler {
    /// Create a handler reporting failures for `endpoint`.
    #[must_use]
    pub const fn new(endpoint: &'static str) -> Self {
        Self { endpoint }
    }

    /// Pass non-error outcomes through, fail on [`ClassifiedResponse::Error`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestFailed`] carrying the server's status and messages.
    pub fn check(&self, outcome: ClassifiedResponse) -> Result<ClassifiedResponse> {
        match outcome {
            ClassifiedResponse::Error(err) => Err(self.handle(err)),
            other => Ok(other),
        }
    }

    /// Build the failure for `err`.
    #[must_use]
    pub fn handle(&self, err: ClientError) -> Error {
        tracing::warn!(
            endpoint = self.endpoint,
            status = err.status(),
            messages = ?err.messages(),
            "request failed"
        );
        Error::RequestFailed(err)
    }
}
