//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests with headers, query parameters, and bodies.
//! Requests are immutable; [`Request::to_builder`] starts a modified copy.
//!
//! # Example
//!
//! ```
//! use artifactory_rest_core::{Request, Method};
//! use bytes::Bytes;
//!
//! let url = "https://repo.example.com/artifactory/api/storage/libs".parse().unwrap();
//! let request = Request::<Bytes>::builder(Method::Get, url)
//!     .header("Accept", "application/json")
//!     .query_key("properties")
//!     .build();
//!
//! assert_eq!(request.url().query(), Some("properties"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{ContentType, Method};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to the headers, for middleware that decorates requests.
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

impl<B: Clone> Request<B> {
    /// Start a builder seeded with a copy of this request.
    ///
    /// The request itself is left untouched.
    #[must_use]
    pub fn to_builder(&self) -> RequestBuilder<B> {
        RequestBuilder {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter, form-encoding name and value.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Appends a query parameter without a value (`?list`).
    #[must_use]
    pub fn query_key(mut self, name: &str) -> Self {
        self.url.query_pairs_mut().append_key_only(name);
        self
    }

    /// Appends a query string fragment such as `deep=1&depth=2`.
    #[must_use]
    pub fn query_string(mut self, fragment: &str) -> Self {
        if !fragment.is_empty() {
            self.push_query(fragment);
        }
        self
    }

    /// Appends an already encoded query parameter verbatim.
    ///
    /// Escape sequences such as `%20` reach the server as written.
    #[must_use]
    pub fn encoded_query(mut self, name: &str, value: &str) -> Self {
        self.push_query(&format!("{name}={value}"));
        self
    }

    /// Appends an already encoded matrix parameter (`;name=value`) to the path.
    #[must_use]
    pub fn matrix_param(mut self, name: &str, value: &str) -> Self {
        let path = format!("{};{name}={value}", self.url.path());
        self.url.set_path(&path);
        self
    }

    fn push_query(&mut self, fragment: &str) {
        let query = match self.url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{fragment}"),
            _ => fragment.to_string(),
        };
        self.url.set_query(Some(&query));
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// URL as built so far.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header("Content-Type", ContentType::Json.as_str())
            .body(body))
    }

    /// Set a plain text body.
    #[must_use]
    pub fn text(self, value: impl Into<String>) -> Self {
        self.header("Content-Type", ContentType::PlainText.as_str())
            .body(Bytes::from(value.into()))
    }

    /// Set a binary body.
    #[must_use]
    pub fn octet_stream(self, body: Bytes) -> Self {
        self.header("Content-Type", ContentType::OctetStream.as_str())
            .body(body)
    }
}
