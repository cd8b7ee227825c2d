use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Whole-request timeout. `None` lets a hung request delay its cycle indefinitely.
    pub request_timeout: Option<Duration>,
    /// Redirect hops followed before the request fails.
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            redirect_limit: 5,
            max_bytes: 2 * 1024 * 1024,
            allowed_content_types: ["application/json", "text/json", "text/plain"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Transport for the arrivals endpoint. The engine only needs the raw body.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// One client per request so the hop counter belongs to that request alone.
    fn client_counting_hops(&self, hops: Arc<AtomicUsize>) -> Result<reqwest::Client, FetchError> {
        let limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            // `previous` holds every URL requested so far, so its length is the hop being attempted.
            let hop = attempt.previous().len();
            if hop > limit {
                return attempt.error(format!("more than {limit} redirects"));
            }
            hops.store(hop, Ordering::Relaxed);
            attempt.follow()
        });

        let builder = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .redirect(policy);
        let builder = match self.settings.request_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }

    fn check_content_type(&self, headers: &HeaderMap) -> Result<Option<String>, FetchError> {
        let Some(raw) = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok()) else {
            return Ok(None);
        };
        let essence = raw.split(';').next().unwrap_or(raw).trim();
        let allowed = self
            .settings
            .allowed_content_types
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(essence));
        if !allowed {
            return Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: raw.to_string(),
                },
                "unsupported content type",
            ));
        }
        Ok(Some(raw.to_string()))
    }

    async fn read_capped(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        if let Some(declared) = response.content_length() {
            if declared > self.settings.max_bytes {
                return Err(self.too_large(declared));
            }
        }
        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
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
        let hops = Arc::new(AtomicUsize::new(0));
        let client = self.client_counting_hops(Arc::clone(&hops))?;

        let response = client
            .get(target)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = self.check_content_type(response.headers())?;
        let bytes = self.read_capped(response).await?;

        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                redirect_count: hops.load(Ordering::Relaxed),
                content_type,
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
