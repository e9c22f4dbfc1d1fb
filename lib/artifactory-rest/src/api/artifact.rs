use artifactory_rest_core::{BindMapToMatrix, Binder, HttpClient, Properties, PropertyMap, Request, Result};
use bytes::Bytes;

use crate::ArtifactoryClient;
use crate::catalogue;
use crate::domain::Artifact;

/// Artifact API: deploy, download and delete files.
///
/// Obtained from [`ArtifactoryClient::artifacts`]. Properties passed here
/// travel as matrix parameters on the item path
/// (`/repo/path/file.jar;key=value`).
#[derive(Debug)]
pub struct ArtifactApi<'a, C> {
    client: &'a ArtifactoryClient<C>,
}

impl<'a, C: HttpClient> ArtifactApi<'a, C> {
    pub(crate) const fn new(client: &'a ArtifactoryClient<C>) -> Self {
        Self { client }
    }

    /// Upload `content` to `item_path`, attaching `properties` if given.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`](crate::Error::EmptyInput) for an empty
    /// property map, [`Error::RequestFailed`](crate::Error::RequestFailed)
    /// or a JSON error.
    pub async fn deploy_artifact(
        &self,
        repo_key: &str,
        item_path: &str,
        content: Bytes,
        properties: Option<&PropertyMap>,
    ) -> Result<Artifact> {
        let endpoint = &catalogue::DEPLOY_ARTIFACT;
        let request = self
            .client
            .request(endpoint, &[("repoKey", repo_key), ("itemPath", item_path)])?
            .octet_stream(content)
            .build();
        let request = bind_matrix(&request, properties)?;

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_json(endpoint.name(), endpoint.selector())
    }

    /// Download a file.
    ///
    /// Returns `None` when the file does not exist, and also when
    /// `properties` are given and the file does not carry them.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`](crate::Error::EmptyInput) for an empty
    /// property map or [`Error::RequestFailed`](crate::Error::RequestFailed).
    pub async fn retrieve_artifact(
        &self,
        repo_key: &str,
        item_path: &str,
        properties: Option<&PropertyMap>,
    ) -> Result<Option<Bytes>> {
        let endpoint = &catalogue::RETRIEVE_ARTIFACT;
        let request = self
            .client
            .request(endpoint, &[("repoKey", repo_key), ("itemPath", item_path)])?
            .header("Accept", "*/*")
            .build();
        let request = bind_matrix(&request, properties)?;

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_optional_body(endpoint.name())
    }

    /// Delete a file or a whole folder. Returns `false` if nothing was there.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`](crate::Error::RequestFailed).
    pub async fn delete_artifact(&self, repo_key: &str, item_path: &str) -> Result<bool> {
        let endpoint = &catalogue::DELETE_ARTIFACT;
        let request = self
            .client
            .request(endpoint, &[("repoKey", repo_key), ("itemPath", item_path)])?
            .build();

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_bool(endpoint.name())
    }
}

fn bind_matrix(request: &Request<Bytes>, properties: Option<&PropertyMap>) -> Result<Request<Bytes>> {
    match properties {
        Some(map) => BindMapToMatrix.bind(request, &Properties::Map(map.clone())),
        None => Ok(request.clone()),
    }
}
