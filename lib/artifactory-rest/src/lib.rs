//! Typed async client for the JFrog Artifactory REST API.
//!
//! Every operation is a row of the [`catalogue`]: verb, path template,
//! fixed query, the fallback applied to a 404, and the JSON field holding
//! the payload. One dispatch routine in [`ArtifactoryClient`] sends the
//! request, classifies the answer and raises failures as
//! [`Error::RequestFailed`].
//!
//! # Example
//!
//! ```ignore
//! use artifactory_rest::prelude::*;
//!
//! let client = ArtifactoryClient::builder()
//!     .endpoint("https://repo.example.com/artifactory")
//!     .credentials("deployer:s3cret")
//!     .with_retry(3)
//!     .build()?;
//!
//! let properties = PropertyMap::from_iter([("build.number", ["142"])]);
//! client
//!     .storage()
//!     .set_item_properties("libs-release-local", "org/acme/app/1.0", properties)
//!     .await?;
//!
//! let read = client
//!     .storage()
//!     .get_item_properties("libs-release-local", "org/acme/app/1.0")
//!     .await?;
//! assert_eq!(read.get("build.number"), Some(&["142".to_string()][..]));
//! ```

pub mod api;
mod api_client;
pub mod catalogue;
mod client;
mod config;
mod connector;
pub mod domain;
pub mod middleware;
pub mod prelude;

pub use api_client::{ArtifactoryClient, ArtifactoryClientBuilder, CREDENTIALS_ENV, ENDPOINT_ENV};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENT};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use artifactory_rest_core::{
    BindListToQuery, BindMapToMatrix, BindMapToQuery, Binder, ClassifiedResponse, ClientError,
    ContentType, EncodedParameter, Endpoint, Error, ErrorHandler, FallbackPolicy, HttpClient,
    Method, PathTemplate, Properties, PropertyCodec, PropertyList, PropertyMap, QueryParam,
    Request, RequestBuilder, Response, ResponseClassifier, Result, from_json, to_json,
    to_query_string,
};

// Re-export http types for status codes and headers
pub use artifactory_rest_core::{StatusCode, header};
