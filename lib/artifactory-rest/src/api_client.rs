//! The client: one base URL, one transport, and the dispatch routine every
//! typed operation goes through.

use std::time::Duration;

use bytes::Bytes;
use tracing::Instrument;
use url::Url;

use crate::api::{ArtifactApi, SearchApi, StorageApi, SystemApi};
use crate::middleware::{Credentials, LoggingLayer};
use crate::{
    BoxedService, ClassifiedResponse, ClientConfig, Endpoint, Error, ErrorHandler, HttpClient,
    HyperClient, HyperClientBuilder, Request, RequestBuilder, Result,
};

/// Environment variable holding the instance URL.
pub const ENDPOINT_ENV: &str = "ARTIFACTORY_REST_ENDPOINT";
/// Environment variable holding `user:password` or an API key.
pub const CREDENTIALS_ENV: &str = "ARTIFACTORY_REST_CREDENTIALS";

/// Typed client for one Artifactory instance.
///
/// Generic over the transport so tests and embedders can supply their own
/// [`HttpClient`]; [`HyperClient`] is the default.
///
/// # Example
///
/// ```ignore
/// use artifactory_rest::{ArtifactoryClient, PropertyMap};
///
/// let client = ArtifactoryClient::builder()
///     .endpoint("https://repo.example.com/artifactory")
///     .credentials("deployer:s3cret")
///     .build()?;
///
/// let properties = PropertyMap::from_iter([("qa", ["passed"])]);
/// client
///     .storage()
///     .set_item_properties("libs-release-local", "org/acme/app/1.0", properties)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactoryClient<C = HyperClient> {
    http: C,
    base_url: Url,
}

impl ArtifactoryClient<HyperClient> {
    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> ArtifactoryClientBuilder {
        ArtifactoryClientBuilder::default()
    }
}

impl<C> ArtifactoryClient<C> {
    /// Wrap an existing transport.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute `http(s)` URL.
    pub fn with_http(http: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url.as_ref())?,
        })
    }

    /// Instance URL every catalogue path is resolved under.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The transport.
    #[must_use]
    pub fn http(&self) -> &C {
        &self.http
    }
}

impl<C: HttpClient> ArtifactoryClient<C> {
    /// Item properties, storage summary and listings.
    #[must_use]
    pub fn storage(&self) -> StorageApi<'_, C> {
        StorageApi::new(self)
    }

    /// Deploy, download and delete artifacts.
    #[must_use]
    pub fn artifacts(&self) -> ArtifactApi<'_, C> {
        ArtifactApi::new(self)
    }

    /// AQL searches.
    #[must_use]
    pub fn search(&self) -> SearchApi<'_, C> {
        SearchApi::new(self)
    }

    /// Server metadata.
    #[must_use]
    pub fn system(&self) -> SystemApi<'_, C> {
        SystemApi::new(self)
    }

    /// Start a request for `endpoint` with its path placeholders filled in.
    pub(crate) fn request(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
    ) -> Result<RequestBuilder<Bytes>> {
        Ok(endpoint
            .request(&self.base_url, params)?
            .header("Accept", "application/json"))
    }

    /// Send `request` and classify the answer under `endpoint`'s policy.
    ///
    /// Error outcomes are raised here; what comes back is a success or a
    /// declared fallback.
    pub(crate) async fn dispatch(
        &self,
        endpoint: &'static Endpoint,
        request: Request<Bytes>,
    ) -> Result<ClassifiedResponse> {
        let span = tracing::info_span!(
            "artifactory",
            endpoint = endpoint.name(),
            method = %endpoint.method(),
        );

        async move {
            let response = self.http.execute(request).await?;
            let status = response.status();
            let outcome = endpoint.classifier().classify(response);
            tracing::debug!(status, error = outcome.is_error(), "response classified");
            ErrorHandler::new(endpoint.name()).check(outcome)
        }
        .instrument(span)
        .await
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::invalid_request(format!(
            "endpoint must be an http(s) URL, got `{raw}`"
        )));
    }
    Ok(url)
}

/// Builder for [`ArtifactoryClient`] over the hyper transport.
#[derive(Debug, Default)]
pub struct ArtifactoryClientBuilder {
    endpoint: Option<String>,
    credentials: Option<Credentials>,
    config: Option<ClientConfig>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    logging: Option<LoggingLayer>,
    transport: HyperClientBuilder,
}

impl ArtifactoryClientBuilder {
    /// Read [`ENDPOINT_ENV`] and, when set, [`CREDENTIALS_ENV`].
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint variable is missing or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = lookup(ENDPOINT_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::invalid_request(format!("{ENDPOINT_ENV} is not set")))?;

        let builder = Self::default().endpoint(endpoint);
        Ok(match lookup(CREDENTIALS_ENV) {
            Some(credentials) if !credentials.is_empty() => builder.credentials(credentials),
            _ => builder,
        })
    }

    /// Instance URL, e.g. `https://repo.example.com/artifactory`.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Credentials; a `&str` is parsed with [`Credentials::parse`].
    #[must_use]
    pub fn credentials(mut self, credentials: impl Into<Credentials>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }

    /// Transport configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Exchange timeout, overriding the one in [`config`](Self::config).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retry transient failures of idempotent requests.
    #[must_use]
    pub const fn with_retry(mut self, max_retries: u32) -> Self {
        self.retries = Some(max_retries);
        self
    }

    /// Log one summary line per exchange.
    #[must_use]
    pub fn with_logging(mut self) -> Self {
        self.logging = Some(LoggingLayer::new());
        self
    }

    /// Log request details at debug level.
    #[must_use]
    pub fn with_debug_logging(mut self) -> Self {
        self.logging = Some(LoggingLayer::debug());
        self
    }

    /// Add a tower layer around the transport. It runs after the built-in
    /// retry, so it sees every attempt.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: tower::Layer<BoxedService> + Send + Sync + 'static,
        L::Service: tower_service::Service<Request<Bytes>, Response = crate::Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as tower_service::Service<Request<Bytes>>>::Future: Send,
    {
        self.transport = self.transport.layer(layer);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint was given or it is not an absolute
    /// `http(s)` URL.
    pub fn build(self) -> Result<ArtifactoryClient> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::invalid_request("no Artifactory endpoint configured"))?;
        let base_url = parse_base_url(&endpoint)?;

        let mut transport = self.transport;
        if let Some(config) = self.config {
            transport = transport.config(config);
        }
        if let Some(timeout) = self.timeout {
            transport = transport.timeout(timeout);
        }
        if let Some(credentials) = &self.credentials {
            transport = transport.with_credentials(credentials);
        }
        if let Some(retries) = self.retries {
            transport = transport.with_retry(retries);
        }
        if let Some(logging) = self.logging {
            transport = transport.layer(logging);
        }

        Ok(ArtifactoryClient {
            http: transport.build(),
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn build_requires_endpoint() {
        let_assert!(Err(Error::InvalidRequest(_)) = ArtifactoryClient::builder().build());
    }

    #[test]
    fn build_rejects_bad_urls() {
        let_assert!(Err(Error::InvalidUrl(_)) = ArtifactoryClient::builder().endpoint("not a url").build());
        let_assert!(
            Err(Error::InvalidRequest(_)) = ArtifactoryClient::builder().endpoint("ftp://repo.example.com").build()
        );
    }

    #[test]
    fn build_keeps_base_path() {
        let_assert!(
            Ok(client) = ArtifactoryClient::builder()
                .endpoint("https://repo.example.com/artifactory")
                .credentials("deployer:s3cret")
                .timeout(Duration::from_secs(5))
                .with_retry(2)
                .with_logging()
                .build()
        );

        check!(client.base_url().path() == "/artifactory");
        check!(client.http().config().timeout == Duration::from_secs(5));
    }

    #[test]
    fn request_resolves_under_base_path() {
        let_assert!(Ok(client) = ArtifactoryClient::with_http(HyperClient::new(), "http://localhost:8081/artifactory/"));
        let_assert!(
            Ok(builder) = client.request(
                &crate::catalogue::FILE_INFO,
                &[("repoKey", "libs-release-local"), ("itemPath", "org/acme/app.jar")]
            )
        );
        let request = builder.build();

        check!(request.url().as_str() == "http://localhost:8081/artifactory/api/storage/libs-release-local/org/acme/app.jar");
        check!(request.header("Accept") == Some("application/json"));
    }

    #[test]
    fn from_lookup_reads_endpoint_and_credentials() {
        let builder = ArtifactoryClientBuilder::from_lookup(|name| match name {
            ENDPOINT_ENV => Some("https://repo.example.com/artifactory".to_string()),
            CREDENTIALS_ENV => Some("AKCp5key".to_string()),
            _ => None,
        });

        let_assert!(Ok(builder) = builder);
        check!(builder.endpoint.as_deref() == Some("https://repo.example.com/artifactory"));
        check!(builder.credentials == Some(Credentials::api_key("AKCp5key")));
    }

    #[test]
    fn from_lookup_requires_endpoint() {
        let_assert!(Err(Error::InvalidRequest(msg)) = ArtifactoryClientBuilder::from_lookup(|_| None));
        check!(msg.contains(ENDPOINT_ENV));

        let_assert!(
            Err(Error::InvalidRequest(_)) = ArtifactoryClientBuilder::from_lookup(|name| {
                (name == ENDPOINT_ENV).then(|| "  ".to_string())
            })
        );
    }

    #[test]
    fn from_lookup_without_credentials() {
        let_assert!(
            Ok(builder) = ArtifactoryClientBuilder::from_lookup(|name| {
                (name == ENDPOINT_ENV).then(|| "http://localhost:8081/artifactory".to_string())
            })
        );
        check!(builder.credentials.is_none());
    }

    #[test]
    fn debug_does_not_leak_credentials() {
        let builder = ArtifactoryClient::builder()
            .endpoint("https://repo.example.com/artifactory")
            .credentials("deployer:hunter2");
        check!(!format!("{builder:?}").contains("hunter2"));
    }
}
