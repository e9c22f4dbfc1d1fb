use artifactory_rest_core::{BindListToQuery, BindMapToQuery, Binder, HttpClient, Properties, PropertyMap, Result};

use crate::ArtifactoryClient;
use crate::catalogue;
use crate::domain::{Artifact, FileList, FileListOptions, StorageInfo};

/// Storage API: item properties, listings and the storage summary.
///
/// Obtained from [`ArtifactoryClient::storage`].
#[derive(Debug)]
pub struct StorageApi<'a, C> {
    client: &'a ArtifactoryClient<C>,
}

impl<'a, C: HttpClient> StorageApi<'a, C> {
    pub(crate) const fn new(client: &'a ArtifactoryClient<C>) -> Self {
        Self { client }
    }

    /// Set properties on an item and, recursively, its children.
    ///
    /// Returns `false` when the item does not exist.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) if `properties`
    /// is not a map, [`Error::EmptyInput`](crate::Error::EmptyInput) if it
    /// is empty (both before anything is sent), or
    /// [`Error::RequestFailed`](crate::Error::RequestFailed).
    pub async fn set_item_properties(
        &self,
        repo_key: &str,
        item_path: &str,
        properties: impl Into<Properties>,
    ) -> Result<bool> {
        let endpoint = &catalogue::SET_ITEM_PROPERTIES;
        let request = self
            .client
            .request(endpoint, &[("repoKey", repo_key), ("itemPath", item_path)])?
            .build();
        let request = BindMapToQuery.bind(&request, &properties.into())?;

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_bool(endpoint.name())
    }

    /// Read the properties of an item. A missing item has no properties.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`](crate::Error::RequestFailed) or a JSON error.
    pub async fn get_item_properties(&self, repo_key: &str, item_path: &str) -> Result<PropertyMap> {
        let endpoint = &catalogue::GET_ITEM_PROPERTIES;
        let request = self
            .client
            .request(endpoint, &[("repoKey", repo_key), ("itemPath", item_path)])?
            .build();

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_properties(endpoint.name(), endpoint.selector())
    }

    /// Remove the named properties from an item and, recursively, its
    /// children.
    ///
    /// Returns `false` when the item does not exist.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) if `properties`
    /// is not a list, [`Error::EmptyInput`](crate::Error::EmptyInput) if it
    /// is empty, or [`Error::RequestFailed`](crate::Error::RequestFailed).
    pub async fn delete_item_properties(
        &self,
        repo_key: &str,
        item_path: &str,
        properties: impl Into<Properties>,
    ) -> Result<bool> {
        let endpoint = &catalogue::DELETE_ITEM_PROPERTIES;
        let request = self
            .client
            .request(endpoint, &[("repoKey", repo_key), ("itemPath", item_path)])?
            .build();
        let request = BindListToQuery.bind(&request, &properties.into())?;

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_bool(endpoint.name())
    }

    /// Storage summary of the instance.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`](crate::Error::RequestFailed) or a JSON error.
    pub async fn storage_info(&self) -> Result<StorageInfo> {
        let endpoint = &catalogue::STORAGE_INFO;
        let request = self.client.request(endpoint, &[])?.build();

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_json(endpoint.name(), endpoint.selector())
    }

    /// List the files under a folder.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`](crate::Error::RequestFailed) (404 included)
    /// or a JSON error.
    pub async fn file_list(
        &self,
        repo_key: &str,
        item_path: &str,
        options: &FileListOptions,
    ) -> Result<FileList> {
        let endpoint = &catalogue::FILE_LIST;
        let request = self
            .client
            .request(endpoint, &[("repoKey", repo_key), ("itemPath", item_path)])?
            .query_string(&artifactory_rest_core::to_query_string(options)?)
            .build();

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_json(endpoint.name(), endpoint.selector())
    }

    /// Metadata of a file, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`](crate::Error::RequestFailed) or a JSON error.
    pub async fn file_info(&self, repo_key: &str, item_path: &str) -> Result<Option<Artifact>> {
        let endpoint = &catalogue::FILE_INFO;
        let request = self
            .client
            .request(endpoint, &[("repoKey", repo_key), ("itemPath", item_path)])?
            .build();

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_optional_json(endpoint.name(), endpoint.selector())
    }
}
