//! Typed operations, grouped the way the Artifactory REST documentation
//! groups them.

mod artifact;
mod search;
mod storage;
mod system;

pub use artifact::ArtifactApi;
pub use search::SearchApi;
pub use storage::StorageApi;
pub use system::SystemApi;
