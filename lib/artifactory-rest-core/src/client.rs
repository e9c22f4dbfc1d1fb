//! The transport seam.
//!
//! Everything above this trait (binding, classification, error handling)
//! is transport-agnostic. The `artifactory-rest` crate ships a hyper-based
//! implementation; tests can substitute their own.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Executes a fully built request.
///
/// Implementations return every HTTP answer as `Ok`, whatever its status.
/// Only transport failures (connection, TLS, timeout) are reported as
/// `Err`; status classification is left to
/// [`ResponseClassifier`](crate::ResponseClassifier).
pub trait HttpClient: Send + Sync {
    /// Send `request` and buffer the answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails before a status line is read,
    /// or if the body cannot be collected.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}
