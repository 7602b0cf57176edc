//! Transport seam
//!
//! Extractors never talk HTTP themselves: they build a [`Request`] and hand it
//! to whatever [`Downloader`] the context carries. [`HttpDownloader`] is the
//! reqwest-backed implementation; tests substitute their own.

mod http;

pub use http::HttpDownloader;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::{ExtractionError, Result};
use crate::localization::Localization;

/// Header name to values, in insertion order.
pub type Headers = IndexMap<String, Vec<String>>;

pub const ACCEPT_LANGUAGE: &str = "Accept-Language";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// An outgoing request. Build with [`Request::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
    headers: Headers,
    body: Option<Vec<u8>>,
    localization: Option<Localization>,
}

impl Request {
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    #[must_use]
    pub const fn localization(&self) -> Option<&Localization> {
        self.localization.as_ref()
    }
}

/// Builder for [`Request`].
///
/// Unless disabled, `build` adds an `Accept-Language` header derived from the
/// localization. A header the caller set explicitly is never overridden.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Option<String>,
    headers: Headers,
    body: Option<Vec<u8>>,
    localization: Option<Localization>,
    automatic_localization_header: bool,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            method: Method::Get,
            url: None,
            headers: Headers::new(),
            body: None,
            localization: None,
            automatic_localization_header: true,
        }
    }
}

impl RequestBuilder {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    #[must_use]
    pub fn get(self, url: &str) -> Self {
        self.method(Method::Get).url(url)
    }

    #[must_use]
    pub fn head(self, url: &str) -> Self {
        self.method(Method::Head).url(url)
    }

    #[must_use]
    pub fn post(self, url: &str, body: Vec<u8>) -> Self {
        self.method(Method::Post).url(url).body(body)
    }

    /// Append a value to a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Replace all values of a header.
    #[must_use]
    pub fn set_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), vec![value.to_string()]);
        self
    }

    /// Replace every header.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn localization(mut self, localization: Option<Localization>) -> Self {
        self.localization = localization;
        self
    }

    #[must_use]
    pub const fn automatic_localization_header(mut self, enabled: bool) -> Self {
        self.automatic_localization_header = enabled;
        self
    }

    pub fn build(mut self) -> Result<Request> {
        let url = self
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ExtractionError::InvalidArgument("request url is empty".to_string()))?;

        if self.automatic_localization_header && find_header(&self.headers, ACCEPT_LANGUAGE).is_none() {
            if let Some(localization) = &self.localization {
                self.headers.insert(
                    ACCEPT_LANGUAGE.to_string(),
                    vec![accept_language_value(localization)],
                );
            }
        }

        Ok(Request {
            method: self.method,
            url,
            headers: self.headers,
            body: self.body,
            localization: self.localization,
        })
    }
}

/// `lang` or `lang-CC, lang;q=0.9`
#[must_use]
pub fn accept_language_value(localization: &Localization) -> String {
    let language = localization.language_code();
    match localization.country_code() {
        Some(country) => format!("{language}-{country}, {language};q=0.9"),
        None => language.to_string(),
    }
}

/// What came back for a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    code: u16,
    message: String,
    headers: Headers,
    body: String,
    latest_url: String,
}

impl Response {
    pub fn new(
        code: u16,
        message: impl Into<String>,
        headers: Headers,
        body: impl Into<String>,
        latest_url: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            headers,
            body: body.into(),
            latest_url: latest_url.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// URL after redirects.
    #[must_use]
    pub fn latest_url(&self) -> &str {
        &self.latest_url
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }
}

fn find_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

/// Executes requests on behalf of extractors.
///
/// Only `execute` is required; the rest are conveniences over it.
/// Cancellation and timeouts are the implementation's business; a cancelled
/// request should surface as [`ExtractionError::Network`].
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response>;

    async fn get(&self, url: &str, localization: Option<&Localization>) -> Result<Response> {
        let request = Request::builder()
            .get(url)
            .localization(localization.cloned())
            .build()?;
        self.execute(request).await
    }

    async fn get_with_headers(
        &self,
        url: &str,
        headers: Headers,
        localization: Option<&Localization>,
    ) -> Result<Response> {
        let request = Request::builder()
            .get(url)
            .headers(headers)
            .localization(localization.cloned())
            .build()?;
        self.execute(request).await
    }

    async fn head(&self, url: &str, headers: Headers) -> Result<Response> {
        let request = Request::builder().head(url).headers(headers).build()?;
        self.execute(request).await
    }

    async fn post(
        &self,
        url: &str,
        headers: Headers,
        body: Vec<u8>,
        localization: Option<&Localization>,
    ) -> Result<Response> {
        let request = Request::builder()
            .post(url, body)
            .headers(headers)
            .localization(localization.cloned())
            .build()?;
        self.execute(request).await
    }
}
