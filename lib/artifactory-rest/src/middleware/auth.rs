//! Credential injection.
//!
//! [`AuthenticationLayer`] decorates every outgoing request with the header
//! matching its [`Credentials`], once, before the request reaches the
//! transport.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use base64::Engine;
use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// Header carrying an Artifactory API key.
pub const API_KEY_HEADER: &str = "X-JFrog-Art-Api";

/// How the client authenticates.
///
/// Secrets never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Basic base64(user:password)`.
    Basic {
        /// User name.
        username: String,
        /// Password or identity token.
        password: String,
    },
    /// `X-JFrog-Art-Api: <key>`.
    ApiKey(String),
    /// `Authorization: Bearer <token>`.
    Bearer(String),
}

impl Credentials {
    /// Interpret a single credential string: `user:password` is basic
    /// authentication, anything else an API key.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((username, password)) => Self::basic(username, password),
            None => Self::ApiKey(raw.to_string()),
        }
    }

    /// Basic authentication.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// API key authentication.
    #[must_use]
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    /// Bearer token (access token) authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// The header name and value these credentials produce.
    #[must_use]
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Self::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"));
                ("Authorization", format!("Basic {encoded}"))
            }
            Self::ApiKey(key) => (API_KEY_HEADER, key.clone()),
            Self::Bearer(token) => ("Authorization", format!("Bearer {token}")),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<secret>")
                .finish(),
            Self::ApiKey(_) => f.write_str("ApiKey(<secret>)"),
            Self::Bearer(_) => f.write_str("Bearer(<secret>)"),
        }
    }
}

impl From<&str> for Credentials {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Credentials {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

/// Layer that adds credentials to requests.
///
/// # Example
///
/// ```ignore
/// use artifactory_rest::middleware::{AuthenticationLayer, Credentials};
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(AuthenticationLayer::new(&Credentials::parse("deployer:s3cret")))
///     .service(client);
/// ```
#[derive(Clone)]
pub struct AuthenticationLayer {
    name: &'static str,
    value: Arc<str>,
}

impl AuthenticationLayer {
    /// Create a layer injecting `credentials`.
    #[must_use]
    pub fn new(credentials: &Credentials) -> Self {
        let (name, value) = credentials.header();
        Self {
            name,
            value: Arc::from(value),
        }
    }
}

impl fmt::Debug for AuthenticationLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationLayer")
            .field("header", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for AuthenticationLayer {
    type Service = Authentication<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Authentication {
            inner,
            name: self.name,
            value: Arc::clone(&self.value),
        }
    }
}

/// Service that adds credentials to requests.
#[derive(Clone)]
pub struct Authentication<S> {
    inner: S,
    name: &'static str,
    value: Arc<str>,
}

impl<S> fmt::Debug for Authentication<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authentication")
            .field("header", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request<Bytes>> for Authentication<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        request
            .headers_mut()
            .insert(self.name.to_string(), self.value.to_string());

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}
