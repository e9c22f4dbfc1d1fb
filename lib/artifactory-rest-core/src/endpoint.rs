//! Data-driven endpoint declarations.
//!
//! Each logical operation of the API is a `static` [`Endpoint`]: verb, path
//! template, fixed query parameters, the fallback applied to a 404 and an
//! optional top-level field to unwrap from the JSON answer. A single
//! dispatch routine consumes these entries.

use bytes::Bytes;
use url::Url;

use crate::{FallbackPolicy, Method, PathTemplate, RequestBuilder, ResponseClassifier, Result};

/// A query parameter every call to an endpoint carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryParam {
    /// `key=value`
    Pair(&'static str, &'static str),
    /// Bare `key`, without `=`.
    Key(&'static str),
}

/// One entry of the endpoint catalogue.
///
/// # Example
///
/// ```
/// use artifactory_rest_core::{Endpoint, FallbackPolicy, Method, QueryParam};
///
/// static SET_PROPERTIES: Endpoint =
///     Endpoint::new("storage:set-item-properties", Method::Put, "/api/storage/{repoKey}/{itemPath}")
///         .with_query(&[QueryParam::Pair("recursive", "1")])
///         .with_fallback(FallbackPolicy::BooleanFalseOnAbsence);
///
/// let base = "https://repo.example.com/artifactory".parse().unwrap();
/// let request = SET_PROPERTIES
///     .request(&base, &[("repoKey", "libs"), ("itemPath", "a/b")])
///     .unwrap()
///     .build();
///
/// assert_eq!(
///     request.url().as_str(),
///     "https://repo.example.com/artifactory/api/storage/libs/a/b?recursive=1"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    name: &'static str,
    method: Method,
    path: PathTemplate,
    query: &'static [QueryParam],
    fallback: Option<FallbackPolicy>,
    selector: Option<&'static str>,
}

impl Endpoint {
    /// Declare an endpoint with no fixed query, fallback or selector.
    #[must_use]
    pub const fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            name,
            method,
            path: PathTemplate::new(path),
            query: &[],
            fallback: None,
            selector: None,
        }
    }

    /// Fixed query parameters.
    #[must_use]
    pub const fn with_query(mut self, query: &'static [QueryParam]) -> Self {
        self.query = query;
        self
    }

    /// Value returned instead of an error on 404.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Top-level JSON field holding the payload.
    #[must_use]
    pub const fn with_selector(mut self, selector: &'static str) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Operation name, e.g. `storage:file-info`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// HTTP verb.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path template.
    #[must_use]
    pub const fn path(&self) -> PathTemplate {
        self.path
    }

    /// Fixed query parameters.
    #[must_use]
    pub const fn query(&self) -> &'static [QueryParam] {
        self.query
    }

    /// Declared fallback policy.
    #[must_use]
    pub const fn fallback(&self) -> Option<FallbackPolicy> {
        self.fallback
    }

    /// Payload selector.
    #[must_use]
    pub const fn selector(&self) -> Option<&'static str> {
        self.selector
    }

    /// Classifier configured with this endpoint's fallback.
    #[must_use]
    pub const fn classifier(&self) -> ResponseClassifier {
        ResponseClassifier::new(self.fallback)
    }

    /// Start a request against `base`, resolving path placeholders from
    /// `params` and adding the fixed query.
    ///
    /// The template path is appended to the base path, so a base of
    /// `https://host/artifactory` yields `https://host/artifactory/api/...`.
    ///
    /// # Errors
    ///
    /// Returns an error when a placeholder has no value.
    pub fn request(&self, base: &Url, params: &[(&str, &str)]) -> Result<RequestBuilder<Bytes>> {
        let mut url = base.clone();
        let path = format!(
            "{}{}",
            base.path().trim_end_matches('/'),
            self.path.expand(params)?
        );
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        let builder = self
            .query
            .iter()
            .fold(RequestBuilder::new(self.method, url), |builder, param| {
                match param {
                    QueryParam::Pair(key, value) => builder.query(key, value),
                    QueryParam::Key(key) => builder.query_key(key),
                }
            });
        Ok(builder)
    }
}
