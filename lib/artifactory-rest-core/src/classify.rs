//! Map raw responses to client-visible outcomes.
//!
//! A [`ResponseClassifier`] is configured with the endpoint's optional
//! [`FallbackPolicy`]. It turns every [`Response`] into exactly one
//! [`ClassifiedResponse`]; the `into_*` conversions then shape that outcome
//! into what the typed operation returns.

use bytes::Bytes;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, Error, PropertyCodec, PropertyMap, Response, Result};

/// What a 404 turns into instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackPolicy {
    /// 404 reads as `false`.
    BooleanFalseOnAbsence,
    /// 404 reads as "no such item".
    NullOnAbsence,
    /// 404 reads as an empty property map.
    EmptyMappingOnAbsence,
}

/// The outcome of one exchange. Exactly one variant applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedResponse {
    /// 2xx, with the raw body.
    Success(Bytes),
    /// 404 under [`FallbackPolicy::BooleanFalseOnAbsence`] or
    /// [`FallbackPolicy::EmptyMappingOnAbsence`]: the policy's empty value.
    EmptyFallback,
    /// 404 under [`FallbackPolicy::NullOnAbsence`].
    TypedAbsence,
    /// Any other status.
    Error(ClientError),
}

impl ClassifiedResponse {
    /// `true` on success, `false` on the empty fallback.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`] for an error outcome,
    /// [`Error::UnexpectedFallback`] for a typed absence.
    pub fn into_bool(self, endpoint: &'static str) -> Result<bool> {
        match self {
            Self::Success(_) => Ok(true),
            Self::EmptyFallback => Ok(false),
            Self::TypedAbsence => Err(Error::UnexpectedFallback(endpoint)),
            Self::Error(err) => Err(err.into()),
        }
    }

    /// Decode the success payload, unwrapping `selector` first.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`] for an error outcome,
    /// [`Error::UnexpectedFallback`] for any fallback, or a JSON error.
    pub fn into_json<T: DeserializeOwned>(
        self,
        endpoint: &'static str,
        selector: Option<&str>,
    ) -> Result<T> {
        match self {
            Self::Success(body) => crate::select_json(&body, selector),
            Self::EmptyFallback | Self::TypedAbsence => Err(Error::UnexpectedFallback(endpoint)),
            Self::Error(err) => Err(err.into()),
        }
    }

    /// Like [`into_json`](Self::into_json), with typed absence read as `None`.
    ///
    /// # Errors
    ///
    /// See [`into_json`](Self::into_json).
    pub fn into_optional_json<T: DeserializeOwned>(
        self,
        endpoint: &'static str,
        selector: Option<&str>,
    ) -> Result<Option<T>> {
        match self {
            Self::TypedAbsence => Ok(None),
            other => other.into_json(endpoint, selector).map(Some),
        }
    }

    /// Decode a property document. The empty fallback and an empty 2xx body
    /// both give an empty map.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`] for an error outcome,
    /// [`Error::UnexpectedFallback`] for a typed absence, or a JSON error.
    pub fn into_properties(
        self,
        endpoint: &'static str,
        selector: Option<&str>,
    ) -> Result<PropertyMap> {
        match self {
            Self::Success(body) => PropertyCodec::decode(&body, selector),
            Self::EmptyFallback => Ok(PropertyMap::new()),
            Self::TypedAbsence => Err(Error::UnexpectedFallback(endpoint)),
            Self::Error(err) => Err(err.into()),
        }
    }

    /// The raw success body.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`] for an error outcome,
    /// [`Error::UnexpectedFallback`] for any fallback.
    pub fn into_body(self, endpoint: &'static str) -> Result<Bytes> {
        match self {
            Self::Success(body) => Ok(body),
            Self::EmptyFallback | Self::TypedAbsence => Err(Error::UnexpectedFallback(endpoint)),
            Self::Error(err) => Err(err.into()),
        }
    }

    /// The raw success body, with typed absence read as `None`.
    ///
    /// # Errors
    ///
    /// See [`into_body`](Self::into_body).
    pub fn into_optional_body(self, endpoint: &'static str) -> Result<Option<Bytes>> {
        match self {
            Self::TypedAbsence => Ok(None),
            other => other.into_body(endpoint).map(Some),
        }
    }

    /// Returns `true` for the [`Error`](Self::Error) variant.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Decides the [`ClassifiedResponse`] for a raw response.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use artifactory_rest_core::{ClassifiedResponse, FallbackPolicy, Response, ResponseClassifier};
/// use bytes::Bytes;
///
/// let classifier = ResponseClassifier::new(Some(FallbackPolicy::NullOnAbsence));
/// let response = Response::new(404, HashMap::new(), Bytes::new());
///
/// assert_eq!(classifier.classify(response), ClassifiedResponse::TypedAbsence);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseClassifier {
    fallback: Option<FallbackPolicy>,
}

impl ResponseClassifier {
    /// Create a classifier with an optional 404 fallback.
    #[must_use]
    pub const fn new(fallback: Option<FallbackPolicy>) -> Self {
        Self { fallback }
    }

    /// The configured fallback.
    #[must_use]
    pub const fn fallback(&self) -> Option<FallbackPolicy> {
        self.fallback
    }

    /// Classify `response`.
    ///
    /// 2xx is a success. A 404 is absorbed by the configured fallback, if
    /// any. Everything else (3xx, 4xx, 5xx, and stray codes such as 1xx)
    /// is an error carrying the extracted messages and the raw body.
    #[must_use]
    pub fn classify(&self, response: Response<Bytes>) -> ClassifiedResponse {
        let (status, _, body) = response.into_parts();

        if (200..300).contains(&status) {
            return ClassifiedResponse::Success(body);
        }

        match (status, self.fallback) {
            (
                404,
                Some(FallbackPolicy::BooleanFalseOnAbsence | FallbackPolicy::EmptyMappingOnAbsence),
            ) => ClassifiedResponse::EmptyFallback,
            (404, Some(FallbackPolicy::NullOnAbsence)) => ClassifiedResponse::TypedAbsence,
            _ => {
                let messages = Self::extract_messages(status, &body);
                ClassifiedResponse::Error(ClientError::new(status, messages).with_body(body))
            }
        }
    }

    /// Collect `errors[].message` from a JSON error body, in order.
    ///
    /// Never fails: when the body is empty, not JSON, or lists no messages,
    /// the result is a single line describing the status.
    #[must_use]
    pub fn extract_messages(status: u16, body: &[u8]) -> Vec<String> {
        let messages: Vec<String> = serde_json::from_slice::<ErrorDocument>(body)
            .map(|document| {
                document
                    .errors
                    .into_iter()
                    .filter_map(|entry| entry.message)
                    .collect()
            })
            .unwrap_or_default();

        if messages.is_empty() {
            vec![crate::error::status_summary(status)]
        } else {
            messages
        }
    }
}

#[derive(Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: Option<String>,
}
