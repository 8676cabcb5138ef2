use std::time::Duration;

use alerts_logging::{alert_debug, alert_trace};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{redirect, Client, Response};

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// Limits applied to every request against the alert API.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Whole request, body included.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Responses without a Content-Type header are always accepted.
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: ["application/json", "text/json", "text/plain"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl FetchSettings {
    fn accepts(&self, content_type: &str) -> bool {
        let essence = content_type
            .split_once(';')
            .map_or(content_type, |(essence, _)| essence)
            .trim();
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    }
}

/// Seam between the API client and the network, replaced in tests.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// HTTP GET over one pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            format!("got {actual} bytes"),
        )
    }

    /// Streams the body, giving up as soon as it crosses `max_bytes`.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        if let Some(declared) = response.content_length() {
            if declared > self.settings.max_bytes {
                return Err(self.too_large(declared));
            }
        }

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(classify)?;
            let len = (body.len() + chunk.len()) as u64;
            if len > self.settings.max_bytes {
                return Err(self.too_large(len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        alert_debug!("GET {}", target);
        let response = self
            .client
            .get(target)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("GET {url}"),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        if let Some(content_type) = content_type.as_deref() {
            if !self.settings.accepts(content_type) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: content_type.to_owned(),
                    },
                    format!("GET {url}"),
                ));
            }
        }

        let final_url = response.url().to_string();
        let bytes = self.read_body(response).await?;
        let metadata = FetchMetadata {
            requested_url: url.to_owned(),
            final_url,
            status: status.as_u16(),
            content_type,
            byte_len: bytes.len() as u64,
        };
        alert_trace!("{} answered {} bytes", metadata.final_url, metadata.byte_len);

        Ok(FetchOutput { bytes, metadata })
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
