use artifactory_rest_core::{HttpClient, Result};

use crate::ArtifactoryClient;
use crate::catalogue;
use crate::domain::AqlResult;

/// Search API.
#[derive(Debug)]
pub struct SearchApi<'a, C> {
    client: &'a ArtifactoryClient<C>,
}

impl<'a, C: HttpClient> SearchApi<'a, C> {
    pub(crate) const fn new(client: &'a ArtifactoryClient<C>) -> Self {
        Self { client }
    }

    /// Run an AQL query such as
    /// `items.find({"repo":"libs-release-local"}).include("name","repo")`.
    ///
    /// Searches are never retried.
    ///
    /// # Errors
    ///
    /// [`Error::RequestFailed`](crate::Error::RequestFailed) (a malformed
    /// query is a 400) or a JSON error.
    pub async fn aql(&self, query: &str) -> Result<AqlResult<serde_json::Value>> {
        let endpoint = &catalogue::AQL_SEARCH;
        let request = self.client.request(endpoint, &[])?.text(query).build();

        self.client
            .dispatch(endpoint, request)
            .await?
            .into_json(endpoint.name(), endpoint.selector())
    }
}
