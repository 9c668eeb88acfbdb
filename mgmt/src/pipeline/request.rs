use crate::error::{ManagementError, ManagementResult};
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Where a request goes: a path under the configured endpoint, or an
/// absolute URL handed out by the service (`nextLink`, polling URLs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    Path(String),
    Url(String),
}

/// One management call, ready for [`HttpPipeline::send`](super::HttpPipeline::send).
#[derive(Debug, Clone)]
pub struct ManagementRequest {
    pub(crate) operation: String,
    pub(crate) method: Method,
    pub(crate) target: RequestTarget,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) expected: Vec<u16>,
}

impl ManagementRequest {
    /// `operation` names the call in logs and errors, e.g. `"queues.get"`.
    pub fn new(operation: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            method,
            target: RequestTarget::Path(path.into()),
            query: Vec::new(),
            body: None,
            expected: vec![200],
        }
    }

    pub fn get(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, path)
    }

    /// GET of an absolute URL, used for paging and polling.
    pub fn get_url(operation: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            target: RequestTarget::Url(url.into()),
            ..Self::get(operation, String::new())
        }
    }

    pub fn put(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::PUT, path)
    }

    pub fn patch(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::PATCH, path)
    }

    pub fn post(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::POST, path)
    }

    pub fn delete(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(operation, Method::DELETE, path).expect_status(&[200, 204])
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Adds the pair only when `value` is set.
    pub fn query_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ManagementResult<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| {
            ManagementError::InvalidParameter(format!(
                "Failed to serialize request body for {}: {e}",
                self.operation
            ))
        })?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Statuses treated as success. Anything else becomes an error.
    pub fn expect_status(mut self, statuses: &[u16]) -> Self {
        self.expected = statuses.to_vec();
        self
    }

    /// A GET of the same resource, used when a write is accepted without a body.
    pub fn read_back(&self) -> Self {
        Self {
            operation: self.operation.clone(),
            method: Method::GET,
            target: self.target.clone(),
            query: Vec::new(),
            body: None,
            expected: vec![200],
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn target(&self) -> &RequestTarget {
        &self.target
    }
}

/// A buffered response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Absolute URL the request was sent to, api-version included
    pub url: String,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn request_id(&self) -> Option<String> {
        self.header("x-ms-request-id").map(str::to_string)
    }

    pub fn retry_after(&self) -> Option<Duration> {
        super::retry::retry_after(&self.headers)
    }

    /// Deserializes the body; an empty body reads as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self, operation: &str) -> ManagementResult<T> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(body).map_err(|e| ManagementError::deserialization(operation, e))
    }

    /// The body as untyped JSON, `None` when empty or not JSON.
    pub fn json_value(&self) -> Option<serde_json::Value> {
        serde_json::from_slice::<serde_json::Value>(&self.body)
            .ok()
            .filter(|v| !v.is_null())
    }
}
