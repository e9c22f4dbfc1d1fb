use artifactory_rest_core::{HttpClient, Result};

use crate::ArtifactoryClient;
use crate::catalogue;
use crate::domain::Version;

/// System API.
#[derive(Debug)]
pub struct SystemApi<'a, C> {
    client: &'a ArtifactoryClient<C>,
}

impl<'a, C: HttpClient> SystemApi<'a, C> {
    pub(crate) const fn new(client: &'a ArtifactoryClient<C>) -> Self {
        Self { client }
    }

    /// Server version and enabled add-ons.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`](crate::Error::RequestFailed) or a JSON error.
    pub async fn version(&self) -> Result<Version> {
        let endpoint = &catalogue::SYSTEM_VERSION;
        let request = self.client.request(endpoint, &[])?.build();

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_json(endpoint.name(), endpoint.selector())
    }
}
