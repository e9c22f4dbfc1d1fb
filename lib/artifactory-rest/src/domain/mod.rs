//! Value objects returned by the API.
//!
//! Field names follow the JSON documents Artifactory sends (camelCase);
//! timestamps are kept as the ISO-8601 strings the server emits.

mod artifact;
mod search;
mod storage;
mod system;

pub use artifact::{Artifact, Checksums};
pub use search::{AqlResult, Range};
pub use storage::{
    BinariesSummary, FileList, FileListEntry, FileListOptions, FileStoreSummary, RepositorySummary,
    StorageInfo,
};
pub use system::Version;

/// Artifactory reports some sizes as strings (`"1024"`) and some as numbers.
pub(crate) mod lenient_size {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(u64),
        Text(String),
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Size::deserialize(deserializer)? {
            Size::Number(size) => Ok(size),
            Size::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}
