//! Error types for the Artifactory client.

use std::fmt;

use bytes::Bytes;
use derive_more::{Display, Error, From};

// ============================================================================
// Client Error
// ============================================================================

/// A non-success answer from the server.
///
/// Carries the HTTP status and the messages the server reported, in
/// document order. When the body held no usable messages, a single
/// synthetic message derived from the status is recorded instead, so
/// `messages` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ClientError {
    status: u16,
    messages: Vec<String>,
    #[error(not(source))]
    body: Option<Bytes>,
}

impl ClientError {
    /// Create a client error from a status and extracted messages.
    ///
    /// An empty `messages` is replaced by the status summary.
    #[must_use]
    pub fn new(status: u16, messages: Vec<String>) -> Self {
        let messages = if messages.is_empty() {
            vec![status_summary(status)]
        } else {
            messages
        };
        Self {
            status,
            messages,
            body: None,
        }
    }

    /// Attach the raw response body.
    #[must_use]
    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Messages reported by the server.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Raw response body, when one was received.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// `HTTP 502 Bad Gateway`, or `HTTP 599` for statuses without a reason phrase.
pub(crate) fn status_summary(status: u16) -> String {
    let reason = http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason());
    match reason {
        Some(reason) => format!("HTTP {status} {reason}"),
        None => format!("HTTP {status}"),
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP error {}: {}", self.status, self.messages.join("; "))
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for Artifactory client operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A property argument had the wrong shape for the endpoint.
    #[display("invalid input: {_0}")]
    #[from(skip)]
    InvalidInput(#[error(not(source))] String),

    /// A property argument was an empty collection.
    #[display("empty input: {_0}")]
    #[from(skip)]
    EmptyInput(#[error(not(source))] String),

    /// The server answered with a redirect, client or server error.
    #[display("{_0}")]
    #[from]
    RequestFailed(ClientError),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// An endpoint produced an outcome its payload shape cannot express.
    #[display("unexpected fallback outcome for {_0}")]
    #[from(skip)]
    UnexpectedFallback(#[error(not(source))] &'static str),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "files[0].size").
        path: String,
        /// Error message.
        message: String,
    },

    /// Query string serialization error.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput(message.into())
    }

    /// Create a request-failed error from a status and messages.
    #[must_use]
    pub fn request_failed(status: u16, messages: Vec<String>) -> Self {
        Self::RequestFailed(ClientError::new(status, messages))
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the failure happened below the HTTP layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_) | Self::Timeout)
    }

    /// Returns `true` if the caller passed unusable property input.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::EmptyInput(_))
    }

    /// The server-side error, if the request failed with an HTTP status.
    #[must_use]
    pub const fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::RequestFailed(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status code if the request failed with one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.client_error().map(ClientError::status)
    }

    /// Server messages, empty for non-HTTP errors.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        match self {
            Self::RequestFailed(err) => err.messages(),
            _ => &[],
        }
    }

    /// Returns `true` if this is a redirect (3xx).
    #[must_use]
    pub fn is_redirection(&self) -> bool {
        self.status().is_some_and(|s| (300..400).contains(&s))
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn client_error_display_joins_messages() {
        let err = ClientError::new(400, vec!["bad path".to_string(), "bad key".to_string()]);
        assert_eq!(err.to_string(), "HTTP error 400: bad path; bad key");
    }

    #[test]
    fn client_error_never_has_empty_messages() {
        let err = ClientError::new(502, Vec::new());
        check!(err.messages() == ["HTTP 502 Bad Gateway".to_string()]);

        let err = ClientError::new(599, Vec::new());
        check!(err.messages() == ["HTTP 599".to_string()]);

        let err = Error::request_failed(409, Vec::new());
        check!(err.messages() == ["HTTP 409 Conflict".to_string()]);
    }

    #[test]
    fn client_error_drops_empty_body() {
        let err = ClientError::new(500, vec!["boom".to_string()]).with_body(Bytes::new());
        assert!(err.body().is_none());

        let body = Bytes::from_static(br#"{"errors":[]}"#);
        let err = ClientError::new(500, vec!["boom".to_string()]).with_body(body.clone());
        assert_eq!(err.body(), Some(&body));
    }

    #[test]
    fn error_display() {
        let err = Error::request_failed(404, vec!["Item not found".to_string()]);
        assert_eq!(err.to_string(), "HTTP error 404: Item not found");

        assert_eq!(Error::Timeout.to_string(), "request timeout");

        let err = Error::empty_input("properties map cannot be empty");
        assert_eq!(err.to_string(), "empty input: properties map cannot be empty");

        let err = Error::json_deserialization("files[0].size", "invalid type");
        assert_eq!(
            err.to_string(),
            "JSON deserialization error at 'files[0].size': invalid type"
        );
    }

    #[test]
    fn error_status_classes() {
        let err = Error::request_failed(302, vec!["Found".to_string()]);
        check!(err.is_redirection());
        check!(!err.is_client_error());

        let err = Error::request_failed(404, vec!["Not Found".to_string()]);
        check!(err.status() == Some(404));
        check!(err.is_client_error());
        check!(err.is_not_found());
        check!(!err.is_server_error());

        let err = Error::request_failed(503, vec!["down".to_string()]);
        check!(err.is_server_error());
        check!(err.messages() == ["down".to_string()]);

        check!(Error::Timeout.status().is_none());
        check!(Error::Timeout.messages().is_empty());
    }

    #[test]
    fn error_kinds() {
        check!(Error::Timeout.is_transport());
        check!(Error::connection("refused").is_transport());
        check!(Error::tls("bad certificate").is_transport());
        check!(!Error::invalid_input("not a map").is_transport());

        check!(Error::invalid_input("not a map").is_input());
        check!(Error::empty_input("empty").is_input());
        check!(!Error::Timeout.is_input());
    }

    #[test]
    fn client_error_converts_into_error() {
        let err: Error = ClientError::new(409, vec!["conflict".to_string()]).into();
        let_assert!(Some(inner) = err.client_error());
        check!(inner.status() == 409);
    }
}
