//! Tower middleware for the Artifactory transport.
//!
//! Layers wrap the [`HyperClient`](crate::HyperClient) service and see every
//! request before it is sent:
//!
//! - [`AuthenticationLayer`] - injects [`Credentials`] as a header
//! - [`LoggingLayer`] - logs requests/responses using `tracing`
//! - [`RetryPolicy`] - retry policy for [`RetryLayer`], idempotent verbs only
//!
//! # Example
//!
//! ```ignore
//! use artifactory_rest::HyperClient;
//! use artifactory_rest::middleware::Credentials;
//!
//! let client = HyperClient::builder()
//!     .with_credentials(&Credentials::parse("deployer:s3cret"))
//!     .with_retry(3)
//!     .with_logging()
//!     .build();
//! ```

mod auth;
mod logging;
mod retry;

pub use auth::{API_KEY_HEADER, Authentication, AuthenticationLayer, Credentials};
pub use logging::{LogLevel, Logging, LoggingLayer};
pub use retry::RetryPolicy;

pub use tower::retry::RetryLayer;
pub use tower::{Layer, ServiceBuilder};
