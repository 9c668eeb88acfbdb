use thiserror::Error;

/// Transport-level failures of the management pipeline.
///
/// These describe what went wrong below HTTP semantics: the client could not
/// be built, the request never produced a response, or the response could not
/// be read. Failures the service itself reports are never an `HttpError`;
/// they become [`ManagementError::AzureApiError`](crate::ManagementError).
///
/// Every variant converts into [`ManagementError`](crate::ManagementError):
///
/// ```no_run
/// use sbmgmt::{HttpError, ManagementError};
///
/// let err: ManagementError = HttpError::Timeout {
///     url: "https://management.azure.com/subscriptions".to_string(),
///     seconds: 30,
/// }
/// .into();
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The `reqwest` client could not be built (TLS setup, invalid options).
    #[error("HTTP client creation failed: {reason}")]
    ClientCreation { reason: String },

    /// The request failed before a response arrived.
    #[error("Request failed: {url} - {reason}")]
    RequestFailed { url: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Request timeout after {seconds}s: {url}")]
    Timeout { url: String, seconds: u64 },

    /// Throttled locally or by the service, and retries are exhausted.
    #[error("Rate limit exceeded: retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    /// The response could not be read or was not in the expected shape.
    #[error("Invalid response: expected {expected}, got {actual}")]
    InvalidResponse { expected: String, actual: String },
}

impl HttpError {
    /// Classifies a `reqwest` failure for `url`.
    pub fn from_reqwest(url: &str, err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            HttpError::Timeout {
                url: url.to_string(),
                seconds: timeout_secs,
            }
        } else if err.is_builder() {
            HttpError::ClientCreation {
                reason: err.to_string(),
            }
        } else {
            HttpError::RequestFailed {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
