//! Core types for the Artifactory REST client.
//!
//! This crate holds everything that does not depend on a concrete HTTP
//! transport:
//! - [`Method`], [`Request`], [`RequestBuilder`] and [`Response`] - wire types
//! - [`HttpClient`] - the transport seam
//! - [`PropertyMap`], [`PropertyList`] and [`PropertyCodec`] - property encoding
//! - [`Binder`] and its implementations - attach encoded properties to requests
//! - [`ResponseClassifier`] and [`ErrorHandler`] - map raw responses to outcomes
//! - [`Endpoint`] and [`PathTemplate`] - data-driven endpoint declarations
//! - [`Error`], [`ClientError`] and [`Result`] - error handling

mod binder;
mod body;
mod classify;
mod client;
mod endpoint;
mod error;
mod handler;
mod method;
mod path_template;
pub mod prelude;
mod properties;
mod request;
mod response;

pub use binder::{BindListToQuery, BindMapToMatrix, BindMapToQuery, Binder};
pub use body::{ContentType, from_json, select_json, to_json, to_query_string};
pub use classify::{ClassifiedResponse, FallbackPolicy, ResponseClassifier};
pub use client::HttpClient;
pub use endpoint::{Endpoint, QueryParam};
pub use error::{ClientError, Error, Result};
pub use handler::ErrorHandler;
pub use method::Method;
pub use path_template::PathTemplate;
pub use properties::{EncodedParameter, Properties, PropertyCodec, PropertyList, PropertyMap};
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
