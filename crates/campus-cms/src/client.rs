//! Remote content client wrapping reqwest.
//!
//! The one place the content layer talks to the CMS. Transport, status,
//! content-type and parse failures all come back as a [`FetchError`] and are
//! logged here. No retries, no backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

use crate::types::{CmsError, CmsResult, FetchError};

/// Request options for a single CMS call.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Extra headers, applied on top of `Content-Type: application/json`.
    pub headers: Vec<(String, String)>,
}

impl FetchOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post_json(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Source of raw CMS JSON.
///
/// [`RemoteClient`] is the production implementation; tests substitute
/// their own.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch `path` (relative to the base URL, query string included).
    async fn fetch(&self, path: &str, options: FetchOptions) -> Result<Value, FetchError>;
}

/// HTTP client for the CMS REST API.
#[derive(Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Create a client for `base_url`. `timeout` of `None` keeps reqwest's
    /// default behaviour.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> CmsResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| CmsError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_headers(extra: &[(String, String)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("Skipping invalid request header {name:?}"),
            }
        }

        headers
    }
}

#[async_trait]
impl ContentSource for RemoteClient {
    async fn fetch(&self, path: &str, options: FetchOptions) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(options.method.clone(), &url)
            .headers(Self::request_headers(&options.headers));
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("CMS fetch error for {path}: {e}");
                return Err(FetchError::Unreachable(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("CMS API error: {} for {path}", status.as_u16());
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let is_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            tracing::warn!("CMS API returned non-JSON response for {path}");
            return Err(FetchError::NotJson(content_type));
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!("CMS response body read failed for {path}: {e}");
            FetchError::Unreachable(e.to_string())
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("CMS response for {path} is not valid JSON: {e}");
            FetchError::BadBody(e.to_string())
        })
    }
}
