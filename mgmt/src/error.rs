use crate::common::{HttpError, RateLimitError};
use crate::models::{ErrorDetail, ErrorResponse};
use std::fmt;

#[derive(Debug, Clone)]
pub enum ManagementError {
    /// Failure reported by the management endpoint, including terminal
    /// long-running operation failures.
    AzureApiError {
        operation: String,          // Operation that failed (e.g., "queues.get")
        status_code: u16,           // HTTP status code
        code: String,               // ARM error code (e.g., "ResourceNotFound")
        message: String,            // Human-readable error message
        target: Option<String>,     // Offending property, when ARM names one
        details: Vec<ErrorDetail>,  // Nested ARM error details
        request_id: Option<String>, // x-ms-request-id for support tickets
    },

    /// Token acquisition failed
    AuthenticationFailed(String),

    /// Transport level failure, no response was received
    ConnectionFailed(String),

    OperationTimeout(String),
    ConfigurationError(String),

    /// A required argument was empty or malformed; nothing was sent
    InvalidParameter(String),

    /// The response arrived but its body did not match the expected model
    DeserializationFailed { operation: String, reason: String },

    InternalError(String),
}

impl fmt::Display for ManagementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagementError::AzureApiError {
                operation,
                status_code,
                code,
                message,
                target,
                request_id,
                ..
            } => {
                write!(
                    f,
                    "Azure API error during {operation}: {code} (HTTP {status_code}) - {message}"
                )?;
                if let Some(target) = target {
                    write!(f, " (target: {target})")?;
                }
                if let Some(req_id) = request_id {
                    write!(f, " [Request ID: {req_id}]")?;
                }
                Ok(())
            }
            ManagementError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {msg}")
            }
            ManagementError::ConnectionFailed(msg) => write!(f, "Connection failed: {msg}"),
            ManagementError::OperationTimeout(msg) => write!(f, "Operation timeout: {msg}"),
            ManagementError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            ManagementError::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            ManagementError::DeserializationFailed { operation, reason } => {
                write!(f, "Failed to parse response of {operation}: {reason}")
            }
            ManagementError::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ManagementError {}

impl ManagementError {
    /// Create an Azure API error without request id or details
    pub fn azure_api_error(
        operation: impl Into<String>,
        code: impl Into<String>,
        status_code: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::AzureApiError {
            operation: operation.into(),
            status_code,
            code: code.into(),
            message: message.into(),
            target: None,
            details: Vec::new(),
            request_id: None,
        }
    }

    /// Builds the error from a failed response's parts.
    ///
    /// The body is expected in the ARM shape `{"error": {"code", "message", ...}}`.
    /// Anything else falls back to code `HTTP_<status>` with the raw body as
    /// the message.
    pub fn from_response_parts(
        operation: impl Into<String>,
        status_code: u16,
        request_id: Option<String>,
        body: &[u8],
    ) -> Self {
        let operation = operation.into();

        if let Ok(ErrorResponse { error: Some(error) }) =
            serde_json::from_slice::<ErrorResponse>(body)
        {
            return Self::from_error_detail(operation, status_code, request_id, error);
        }

        let text = String::from_utf8_lossy(body).trim().to_string();
        Self::AzureApiError {
            operation,
            status_code,
            code: format!("HTTP_{status_code}"),
            message: if text.is_empty() {
                format!("HTTP {status_code} error")
            } else {
                text
            },
            target: None,
            details: Vec::new(),
            request_id,
        }
    }

    /// Wraps an ARM error payload, e.g. the `error` of a failed async operation.
    pub fn from_error_detail(
        operation: impl Into<String>,
        status_code: u16,
        request_id: Option<String>,
        error: ErrorDetail,
    ) -> Self {
        Self::AzureApiError {
            operation: operation.into(),
            status_code,
            code: error
                .code
                .unwrap_or_else(|| format!("HTTP_{status_code}")),
            message: error
                .message
                .unwrap_or_else(|| format!("HTTP {status_code} error")),
            target: error.target,
            details: error.details,
            request_id,
        }
    }

    pub fn deserialization(operation: impl Into<String>, err: serde_json::Error) -> Self {
        Self::DeserializationFailed {
            operation: operation.into(),
            reason: err.to_string(),
        }
    }

    /// Check if this is an Azure API error
    pub fn is_azure_api_error(&self) -> bool {
        matches!(self, ManagementError::AzureApiError { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ManagementError::AzureApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Get the ARM error code if this is an Azure API error
    pub fn azure_error_code(&self) -> Option<&str> {
        match self {
            ManagementError::AzureApiError { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Get the Azure request ID if available
    pub fn azure_request_id(&self) -> Option<&str> {
        match self {
            ManagementError::AzureApiError { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ManagementError::AzureApiError { status_code, .. } => {
                crate::pipeline::is_retryable_status(*status_code)
            }
            ManagementError::ConnectionFailed(_) | ManagementError::OperationTimeout(_) => true,
            _ => false,
        }
    }
}

impl From<HttpError> for ManagementError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ClientCreation { reason } => ManagementError::ConfigurationError(format!(
                "HTTP client creation failed: {reason}"
            )),
            HttpError::RequestFailed { url, reason } => {
                ManagementError::ConnectionFailed(format!("Request to {url} failed: {reason}"))
            }
            HttpError::Timeout { url, seconds } => ManagementError::OperationTimeout(format!(
                "Request to {url} timed out after {seconds}s"
            )),
            HttpError::RateLimited {
                retry_after_seconds,
            } => ManagementError::OperationTimeout(format!(
                "Rate limited, retry after {retry_after_seconds}s"
            )),
            HttpError::InvalidResponse { expected, actual } => ManagementError::InternalError(
                format!("Invalid response: expected {expected}, got {actual}"),
            ),
        }
    }
}

impl From<RateLimitError> for ManagementError {
    fn from(err: RateLimitError) -> Self {
        ManagementError::ConfigurationError(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for ManagementError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ManagementError::OperationTimeout(err.to_string())
    }
}

// Result type alias for convenience
pub type ManagementResult<T> = Result<T, ManagementError>;
