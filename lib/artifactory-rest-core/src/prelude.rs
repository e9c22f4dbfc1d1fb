//! Prelude module for convenient imports.
//!
//! ```ignore
//! use artifactory_rest_core::prelude::*;
//! ```

pub use crate::{
    Binder, ClassifiedResponse, ClientError, Endpoint, Error, FallbackPolicy, HttpClient, Method,
    Properties, PropertyCodec, PropertyList, PropertyMap, Request, RequestBuilder, Response,
    ResponseClassifier, Result,
};
