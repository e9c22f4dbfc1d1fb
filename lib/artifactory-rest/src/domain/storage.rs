use serde::{Deserialize, Serialize};

/// Storage summary of an instance (`GET /api/storageinfo`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    /// Deduplicated binary store usage.
    #[serde(default)]
    pub binaries_summary: BinariesSummary,
    /// Underlying file store.
    #[serde(default)]
    pub file_store_summary: FileStoreSummary,
    /// One entry per repository, plus a `TOTAL` row.
    #[serde(default)]
    pub repositories_summary_list: Vec<RepositorySummary>,
}

/// Binary store counters. Artifactory sends these pre-formatted
/// (`"3.48 GB"`, `"125,726"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BinariesSummary {
    /// Number of distinct binaries.
    pub binaries_count: Option<String>,
    /// Space used by distinct binaries.
    pub binaries_size: Option<String>,
    /// Logical size of all artifacts.
    pub artifacts_size: Option<String>,
    /// Deduplication ratio.
    pub optimization: Option<String>,
    /// Number of items (files and folders).
    pub items_count: Option<String>,
    /// Number of artifacts.
    pub artifacts_count: Option<String>,
}

/// File store usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileStoreSummary {
    /// Store kind, e.g. `filesystem`.
    pub storage_type: Option<String>,
    /// Store location.
    pub storage_directory: Option<String>,
    /// Total capacity.
    pub total_space: Option<String>,
    /// Used capacity.
    pub used_space: Option<String>,
    /// Free capacity.
    pub free_space: Option<String>,
}

/// Per-repository usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositorySummary {
    /// Repository key.
    pub repo_key: String,
    /// `LOCAL`, `REMOTE`, `VIRTUAL`, `CACHE` or `NA` for the total row.
    pub repo_type: Option<String>,
    /// Number of folders.
    pub folders_count: u64,
    /// Number of files.
    pub files_count: u64,
    /// Space used.
    pub used_space: Option<String>,
    /// Number of items.
    pub items_count: u64,
    /// Package type, e.g. `Maven`.
    pub package_type: Option<String>,
    /// Share of the total.
    pub percentage: Option<String>,
}

/// Recursive listing of a folder (`GET /api/storage/{repo}/{path}?list`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    /// Storage API URL of the listed folder.
    pub uri: String,
    /// Time of the listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Entries, relative to the listed folder.
    #[serde(default)]
    pub files: Vec<FileListEntry>,
}

/// One entry of a [`FileList`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListEntry {
    /// Path relative to the listed folder, starting with `/`.
    pub uri: String,
    /// Size in bytes, `-1` for folders.
    #[serde(default)]
    pub size: i64,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    /// Whether the entry is a folder.
    #[serde(default)]
    pub folder: bool,
    /// SHA-1 of files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    /// SHA-256 of files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha2: Option<String>,
}

/// Options of a file listing. Unset options are not sent.
///
/// Artifactory reads each option as `0`/`1` (or a depth).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListOptions {
    /// `1` to descend into sub-folders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep: Option<u32>,
    /// How many levels to descend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// `1` to include folders in the listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_folders: Option<u32>,
    /// `1` to include the listed folder itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_root_path: Option<u32>,
}

impl FileListOptions {
    /// Descend into sub-folders, at most `depth` levels.
    #[must_use]
    pub const fn deep(depth: u32) -> Self {
        Self {
            deep: Some(1),
            depth: Some(depth),
            list_folders: None,
            include_root_path: None,
        }
    }

    /// Include folders in the listing.
    #[must_use]
    pub const fn with_folders(mut self) -> Self {
        self.list_folders = Some(1);
        self
    }

    /// Include the listed folder itself.
    #[must_use]
    pub const fn with_root_path(mut self) -> Self {
        self.include_root_path = Some(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use artifactory_rest_core::{from_json, to_query_string};

    use super::*;

    #[test]
    fn file_list_options_query() {
        assert_eq!(to_query_string(&FileListOptions::default()).expect("serialize"), "");

        let options = FileListOptions::deep(2).with_folders();
        assert_eq!(
            to_query_string(&options).expect("serialize"),
            "deep=1&depth=2&listFolders=1"
        );

        let options = FileListOptions::default().with_root_path();
        assert_eq!(to_query_string(&options).expect("serialize"), "includeRootPath=1");
    }

    #[test]
    fn deserialize_file_list() {
        let body = br#"{
            "uri": "http://localhost:8081/artifactory/api/storage/libs-release-local",
            "created": "2024-03-11T10:15:30.000Z",
            "files": [
                {"uri": "/org", "size": -1, "lastModified": "2024-03-11T10:15:30.000Z", "folder": true},
                {"uri": "/org/acme/app.jar", "size": 253207, "lastModified": "2024-03-11T10:15:30.000Z", "folder": false, "sha1": "962c287c", "sha2": "a4bd3fd2", "mdTimestamps": {}}
            ]
        }"#;

        let list: FileList = from_json(body).expect("deserialize");
        assert_eq!(list.files.len(), 2);
        assert!(list.files.first().is_some_and(|entry| entry.folder));
        assert_eq!(list.files.get(1).map(|entry| entry.size), Some(253_207));
    }

    #[test]
    fn deserialize_storage_info() {
        let body = br#"{
            "binariesSummary": {"binariesCount": "125,726", "binariesSize": "3.48 GB", "artifactsSize": "59.77 GB", "optimization": "5.82%", "itemsCount": "2,176,580", "artifactsCount": "1,131,791"},
            "fileStoreSummary": {"storageType": "filesystem", "storageDirectory": "/var/opt/jfrog/artifactory/data/filestore", "totalSpace": "204.28 GB", "usedSpace": "32.22 GB (15.77%)", "freeSpace": "172.06 GB (84.23%)"},
            "repositoriesSummaryList": [
                {"repoKey": "libs-release-local", "repoType": "LOCAL", "foldersCount": 12, "filesCount": 40, "usedSpace": "1.2 GB", "itemsCount": 52, "packageType": "Maven", "percentage": "3.7%"},
                {"repoKey": "TOTAL", "repoType": "NA", "foldersCount": 12, "filesCount": 40, "usedSpace": "1.2 GB", "itemsCount": 52}
            ]
        }"#;

        let info: StorageInfo = from_json(body).expect("deserialize");
        assert_eq!(info.binaries_summary.binaries_count.as_deref(), Some("125,726"));
        assert_eq!(info.file_store_summary.storage_type.as_deref(), Some("filesystem"));
        assert_eq!(info.repositories_summary_list.len(), 2);
        assert_eq!(
            info.repositories_summary_list.last().map(|repo| repo.repo_key.as_str()),
            Some("TOTAL")
        );
    }
}
