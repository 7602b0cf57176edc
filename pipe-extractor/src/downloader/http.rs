//! reqwest-backed downloader

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{Downloader, Headers, Method, Request, Response};
use crate::config::DownloaderConfig;
use crate::error::{ExtractionError, Result};

/// [`Downloader`] over a pooled reqwest client.
///
/// Non-2xx responses are returned as-is so services can read error bodies;
/// only HTTP 429 is turned into [`ExtractionError::ReCaptcha`].
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
    max_response_size: usize,
}

impl HttpDownloader {
    pub fn new(config: &DownloaderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            max_response_size: config.max_response_size,
        })
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_response_size as u64 {
            return Err(ExtractionError::ResponseTooLarge {
                size,
                max: self.max_response_size,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn execute(&self, request: Request) -> Result<Response> {
        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url());
        for (name, values) in request.headers() {
            for value in values {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        tracing::debug!(method = request.method().as_str(), url = request.url(), "executing request");
        let response = builder.send().await?;

        let status = response.status();
        let latest_url = response.url().to_string();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ExtractionError::ReCaptcha { url: latest_url });
        }

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }

        if let Some(length) = response.content_length() {
            self.check_size(length)?;
        }
        let bytes = response.bytes().await?;
        self.check_size(bytes.len() as u64)?;

        Ok(Response::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            String::from_utf8_lossy(&bytes).into_owned(),
            latest_url,
        ))
    }
}
