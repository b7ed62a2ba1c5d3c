//! Infrastructure implementation of the `Transport` port.
//!
//! `HttpTransport` talks to the controller and router over HTTPS with basic
//! auth. Connection-level failures are retried with exponential backoff;
//! HTTP error statuses are returned as-is for the services to classify.

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::application::ports::{ApiRequest, ApiResponse, Method, Service, Transport};
use crate::domain::config::{ClientConfig, Credentials, Endpoints};

const JSON: &str = "application/json";
const EVENT_STREAM: &str = "text/event-stream";

/// Delay before the first retry; doubled on each further attempt.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Production `Transport` over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    /// Same settings without a total timeout, so followed logs are not cut off.
    stream_client: reqwest::Client,
    endpoints: Endpoints,
    credentials: Option<Credentials>,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpTransport {
    /// Build a transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let tuning = &config.tuning;
        let user_agent = concat!("flynn-cli/", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(tuning.request_timeout)
            .danger_accept_invalid_certs(!tuning.verify_ssl)
            .user_agent(user_agent)
            .build()
            .context("cannot build HTTP client")?;
        let stream_client = reqwest::Client::builder()
            .connect_timeout(tuning.request_timeout)
            .danger_accept_invalid_certs(!tuning.verify_ssl)
            .user_agent(user_agent)
            .build()
            .context("cannot build streaming HTTP client")?;
        Ok(Self {
            client,
            stream_client,
            endpoints: config.endpoints.clone(),
            credentials: config.credentials.clone(),
            max_retries: tuning.max_retries,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Override the initial retry delay.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn url(&self, service: Service, path: &str) -> String {
        let base = match service {
            Service::Controller => &self.endpoints.controller,
            Service::Router => &self.endpoints.router,
        };
        format!("{base}{path}")
    }

    fn build(
        &self,
        client: &reqwest::Client,
        service: Service,
        request: &ApiRequest,
        accept: &str,
    ) -> reqwest::RequestBuilder {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = client
            .request(method, self.url(service, &request.path))
            .header(ACCEPT, accept)
            .header(CONTENT_TYPE, JSON);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(creds) = &self.credentials {
            builder = builder.basic_auth(&creds.username, Some(&creds.password));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }

    async fn execute(
        &self,
        client: &reqwest::Client,
        service: Service,
        request: &ApiRequest,
        accept: &str,
    ) -> Result<reqwest::Response> {
        let mut attempt = 0u32;
        loop {
            match self.build(client, service, request, accept).send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_connect() && attempt < self.max_retries => {
                    let delay = self.retry_delay.saturating_mul(1 << attempt.min(16));
                    attempt += 1;
                    warn!(
                        path = %request.path,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "connection failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("{:?} {} failed", request.method, self.url(service, &request.path))
                    });
                }
            }
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, service: Service, request: ApiRequest) -> Result<ApiResponse> {
        debug!(?service, method = ?request.method, path = %request.path, "request");
        let resp = self.execute(&self.client, service, &request, JSON).await?;
        let status = resp.status().as_u16();
        let body = resp.text().await.context("cannot read response body")?;
        debug!(status, bytes = body.len(), "response");
        Ok(ApiResponse { status, body })
    }

    async fn stream(
        &self,
        service: Service,
        request: ApiRequest,
        sink: &mut (dyn FnMut(&[u8]) -> anyhow::Result<()> + Send),
    ) -> Result<ApiResponse> {
        debug!(?service, path = %request.path, "stream");
        let resp = self
            .execute(&self.stream_client, service, &request, EVENT_STREAM)
            .await?;
        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.text().await.context("cannot read response body")?;
            return Ok(ApiResponse { status, body });
        }
        let mut chunks = resp.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.context("stream interrupted")?;
            sink(&chunk)?;
        }
        Ok(ApiResponse {
            status,
            body: String::new(),
        })
    }
}
