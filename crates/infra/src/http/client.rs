use std::time::Duration;

use calsift_domain::CalSiftError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Default request timeout applied to every provider call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client with a fixed timeout. Every request is sent exactly once;
/// a failed call surfaces to the caller unchanged.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, CalSiftError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    ///
    /// Non-success statuses are returned as a normal [`Response`]; only
    /// transport failures become errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, CalSiftError> {
        let request = builder.build().map_err(|err| CalSiftError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = redacted_url(request.url());
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// URL without its query string, which may carry page tokens.
fn redacted_url(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: Some(concat!("calsift/", env!("CARGO_PKG_VERSION")).to_string()),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, CalSiftError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            CalSiftError::from(infra)
        })?;

        Ok(HttpClient { client })
    }
}
