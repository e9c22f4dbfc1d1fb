//! Prelude module for convenient imports.
//!
//! ```ignore
//! use artifactory_rest::prelude::*;
//! ```

pub use crate::domain::{Artifact, FileList, FileListOptions, StorageInfo, Version};
pub use crate::middleware::Credentials;
pub use crate::{
    ArtifactoryClient, ClientConfig, ClientError, Error, FallbackPolicy, HttpClient, HyperClient,
    Properties, PropertyList, PropertyMap, Result,
};
