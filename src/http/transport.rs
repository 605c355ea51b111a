//! Transport abstraction
//!
//! The paginator never touches the network itself. Every request goes
//! through a [`Transport`], which can be the bundled reqwest implementation,
//! a closure wrapped with [`transport_fn`], or anything else that can answer
//! a GET.

use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

/// A fully buffered HTTP response
#[derive(Debug, Clone)]
pub struct TransportResponse {
    status: u16,
    status_text: String,
    headers: HeaderMap,
    body: Bytes,
}

impl TransportResponse {
    /// Create a response with the canonical status text for `status`
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();

        Self {
            status,
            status_text,
            headers,
            body: body.into(),
        }
    }

    /// Create a 200 response with a JSON body
    pub fn json_ok(body: &serde_json::Value) -> Self {
        Self::new(200, HeaderMap::new(), body.to_string())
    }

    /// Override the status text
    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Numeric status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Status reason phrase
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Look up a header by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// All response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::malformed(format!("response body is not valid JSON: {e}")))
    }
}

/// Issues GET requests on behalf of the paginator
///
/// Implementations own timeout and connection policy. A returned error is
/// handed to the consumer unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a GET request to `url` with exactly `headers`
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<TransportResponse> {
        (**self).get(url, headers).await
    }
}

/// Transport backed by an async closure
pub struct FnTransport<F> {
    f: F,
}

/// Wrap an async closure as a [`Transport`]
///
/// ```rust,ignore
/// let transport = transport_fn(|url, headers| async move {
///     my_client.fetch(&url, headers).await
/// });
/// ```
pub fn transport_fn<F, Fut>(f: F) -> FnTransport<F>
where
    F: Fn(String, HeaderMap) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TransportResponse>> + Send,
{
    FnTransport { f }
}

#[async_trait]
impl<F, Fut> Transport for FnTransport<F>
where
    F: Fn(String, HeaderMap) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TransportResponse>> + Send,
{
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<TransportResponse> {
        (self.f)(url.to_string(), headers.clone()).await
    }
}

impl<F> std::fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}
