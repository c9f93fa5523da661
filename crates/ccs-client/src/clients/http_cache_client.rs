//! REST transport for the remote cache.
//!
//! Entries live at `<base>/<cache>/<key>`:
//!
//! | operation | request | success | absent |
//! |-----------|---------|---------|--------|
//! | get       | `GET`   | 200 + value | 404 |
//! | put       | `PUT` + value | 200 + old value, or 204 | - |
//! | replace   | `POST` + value, `X-Method: replace` | 200 + old value | 404 |
//! | remove    | `DELETE` | 200 + old value, or 204 | 404 |
//!
//! `X-Return: old-value` asks put/remove to send the displaced value back.

use crate::session::validate_cache_name;
use crate::{CacheBackend, Return, Session};
use async_trait::async_trait;
use ccs_core::{CcsError, CcsResult};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Header selecting a non-default operation on `POST`.
pub const METHOD_HEADER: &str = "X-Method";

/// Header asking for the displaced value to be returned.
pub const RETURN_HEADER: &str = "X-Return";

const OLD_VALUE: &str = "old-value";
const OCTET_STREAM: &str = "application/octet-stream";

/// Session over the cache's REST API.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    base_url: Url,
}

impl HttpSession {
    /// Creates a REST session rooted at `base_url`.
    pub fn new(base_url: Url, request_timeout: Duration) -> CcsResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| CcsError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates a REST session with a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }
}

impl Session for HttpSession {
    fn endpoint(&self) -> &str {
        self.base_url.as_str()
    }

    fn backend(&self, name: &str) -> CcsResult<Arc<dyn CacheBackend>> {
        validate_cache_name(name)?;
        Ok(Arc::new(HttpCacheBackend {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            name: name.to_string(),
        }))
    }
}

/// One named cache reached over REST.
#[derive(Debug, Clone)]
pub struct HttpCacheBackend {
    client: Client,
    base_url: Url,
    name: String,
}

impl HttpCacheBackend {
    fn url(&self, key: &str) -> CcsResult<Url> {
        if !is_addressable(key) {
            return Err(CcsError::invalid_argument(format!(
                "Key '{}' cannot be addressed over REST",
                key
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CcsError::Configuration(format!("Cache URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(&self.name)
            .push(key);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> CcsResult<Response> {
        request
            .send()
            .await
            .map_err(|e| CcsError::Cache(format!("HTTP error: {}", e)))
    }

    async fn body(&self, response: Response) -> CcsResult<Vec<u8>> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| CcsError::Cache(format!("Failed to read response body: {}", e)))
    }

    /// Reads an optional displaced value: empty bodies mean "none".
    async fn old_value(&self, response: Response) -> CcsResult<Option<Vec<u8>>> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.error(response).await);
        }
        let body = self.body(response).await?;
        Ok((!body.is_empty()).then_some(body))
    }

    async fn error(&self, response: Response) -> CcsError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        map_http_error(&self.name, status, &body)
    }
}

/// Keys that would not survive as a single path segment: `.` and `..` are
/// dropped by URL normalization and an empty segment addresses the cache itself.
fn is_addressable(key: &str) -> bool {
    !matches!(key, "" | "." | "..")
}

fn with_return(request: RequestBuilder, ret: Return) -> RequestBuilder {
    if ret.wants_old_value() {
        request.header(RETURN_HEADER, OLD_VALUE)
    } else {
        request
    }
}

#[async_trait]
impl CacheBackend for HttpCacheBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> CcsResult<Option<Vec<u8>>> {
        debug!("HTTP Get: {}/{}", self.name, key);

        if !is_addressable(key) {
            // Never stored, so absent.
            return Ok(None);
        }

        let response = self.send(self.client.get(self.url(key)?)).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(self.body(response).await?)),
            _ => Err(self.error(response).await),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>, ret: Return) -> CcsResult<Option<Vec<u8>>> {
        debug!("HTTP Put: {}/{}", self.name, key);

        let request = self
            .client
            .put(self.url(key)?)
            .header(CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM))
            .body(value);
        let response = self.send(with_return(request, ret)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(self.error(response).await);
        }
        let old = self.old_value(response).await?;
        Ok(if ret.wants_old_value() { old } else { None })
    }

    async fn replace(&self, key: &str, value: Vec<u8>) -> CcsResult<Option<Vec<u8>>> {
        debug!("HTTP Replace: {}/{}", self.name, key);

        if !is_addressable(key) {
            // Never stored, so absent.
            return Ok(None);
        }

        let request = self
            .client
            .post(self.url(key)?)
            .header(METHOD_HEADER, "replace")
            .header(RETURN_HEADER, OLD_VALUE)
            .header(CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM))
            .body(value);
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(self.body(response).await?)),
            _ => Err(self.error(response).await),
        }
    }

    async fn remove(&self, key: &str, ret: Return) -> CcsResult<Option<Vec<u8>>> {
        debug!("HTTP Remove: {}/{}", self.name, key);

        if !is_addressable(key) {
            // Never stored, so absent.
            return Ok(None);
        }

        let request = with_return(self.client.delete(self.url(key)?), ret);
        let response = self.send(request).await?;
        let old = self.old_value(response).await?;
        Ok(if ret.wants_old_value() { old } else { None })
    }
}

fn map_http_error(cache: &str, status: StatusCode, body: &str) -> CcsError {
    CcsError::Cache(format!("HTTP {} from cache '{}': {}", status, cache, body))
}
