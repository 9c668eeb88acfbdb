//! Long-running operation polling.
//!
//! ARM acknowledges slow writes (namespace creation, failover, migration)
//! before they finish. The initial response tells the client where to look:
//!
//! - `Azure-AsyncOperation`: a status resource whose body carries
//!   `status` (`InProgress`, `Succeeded`, `Failed`, `Canceled`) and `error`
//! - `Location`: returns 202 while running, then the final result
//!   (PUT/PATCH re-read the resource instead)
//! - neither, on PUT/PATCH: the resource itself, until its
//!   `provisioningState` is terminal
//!
//! [`Poller`] follows whichever applies and then fetches the final result.

use crate::client::ServiceBusManagementClient;
use crate::error::{ManagementError, ManagementResult};
use crate::models::ErrorDetail;
use crate::pipeline::{HttpPipeline, ManagementRequest, RawResponse};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// Progress of a long-running operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    InProgress,
    Succeeded,
    Failed,
    Canceled,
}

impl OperationStatus {
    /// Maps an ARM status or provisioning state. Anything non-terminal
    /// (`Accepted`, `Running`, `Creating`, `Updating`, ...) is in progress.
    pub fn from_wire(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "succeeded" => OperationStatus::Succeeded,
            "failed" => OperationStatus::Failed,
            "canceled" | "cancelled" => OperationStatus::Canceled,
            _ => OperationStatus::InProgress,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != OperationStatus::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PollStrategy {
    AsyncOperation {
        url: String,
        location: Option<String>,
    },
    Location {
        url: String,
    },
    ProvisioningState,
    Done,
}

/// Everything needed to resume polling in another process.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PollerState {
    operation: String,
    method: String,
    resource_url: String,
    strategy: PollStrategy,
    status: OperationStatus,
    last_status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    final_body: Option<serde_json::Value>,
    /// Set once the final GET (PUT/PATCH/POST with Location) has run
    #[serde(default)]
    finalized: bool,
}

#[derive(Deserialize)]
struct AsyncOperationBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<ErrorDetail>,
}

/// Handle to a long-running operation producing a `T`.
///
/// `T` is `()` for operations without a result, such as deletes.
pub struct Poller<T> {
    pipeline: Arc<HttpPipeline>,
    state: PollerState,
    polling_interval: Duration,
    next_delay: Option<Duration>,
    _result: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("operation", &self.state.operation)
            .field("status", &self.state.status)
            .field("strategy", &self.state.strategy)
            .finish()
    }
}

impl<T: DeserializeOwned> Poller<T> {
    pub(crate) fn from_initial_response(
        pipeline: Arc<HttpPipeline>,
        operation: &str,
        method: &Method,
        response: RawResponse,
        polling_interval: Duration,
    ) -> Self {
        let body = response.json_value();
        let is_write = *method == Method::PUT || *method == Method::PATCH;

        let async_url = response.header("azure-asyncoperation").map(str::to_string);
        let location = response.header("location").map(str::to_string);
        let provisioning = body.as_ref().and_then(provisioning_state);

        let (strategy, status) = match (async_url, location) {
            (Some(url), location) => (
                PollStrategy::AsyncOperation { url, location },
                OperationStatus::InProgress,
            ),
            (None, Some(url)) if response.status == 202 => {
                (PollStrategy::Location { url }, OperationStatus::InProgress)
            }
            _ => match provisioning {
                Some(state) if is_write && !state.is_terminal() => {
                    (PollStrategy::ProvisioningState, OperationStatus::InProgress)
                }
                Some(state) if is_write => (PollStrategy::Done, state),
                _ => (PollStrategy::Done, OperationStatus::Succeeded),
            },
        };

        log::debug!("{operation} started, status {status:?}, polling via {strategy:?}");

        Self {
            pipeline,
            polling_interval,
            next_delay: response.retry_after(),
            state: PollerState {
                operation: operation.to_string(),
                method: method.as_str().to_string(),
                resource_url: response.url.clone(),
                finalized: strategy == PollStrategy::Done,
                strategy,
                status,
                last_status_code: response.status,
                request_id: response.request_id(),
                error: None,
                final_body: if *method == Method::DELETE { None } else { body },
            },
            _result: PhantomData,
        }
    }

    /// Resumes an operation from [`continuation_token`](Self::continuation_token).
    pub fn from_continuation_token(
        client: &ServiceBusManagementClient,
        token: &str,
    ) -> ManagementResult<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(token.trim()).map_err(|e| {
            ManagementError::InvalidParameter(format!("Malformed continuation token: {e}"))
        })?;
        let state: PollerState = serde_json::from_slice(&bytes).map_err(|e| {
            ManagementError::InvalidParameter(format!("Malformed continuation token: {e}"))
        })?;

        Ok(Self {
            pipeline: client.pipeline(),
            polling_interval: client.polling_interval(),
            next_delay: None,
            state,
            _result: PhantomData,
        })
    }

    /// Opaque token capturing the polling state.
    pub fn continuation_token(&self) -> ManagementResult<String> {
        let bytes = serde_json::to_vec(&self.state)
            .map_err(|e| ManagementError::InternalError(format!("Failed to encode poller: {e}")))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn status(&self) -> OperationStatus {
        self.state.status
    }

    pub fn is_done(&self) -> bool {
        self.state.status.is_terminal() && self.state.finalized
    }

    pub fn operation(&self) -> &str {
        &self.state.operation
    }

    /// Delay the service asked for before the next poll, or the client's interval.
    pub fn next_poll_delay(&self) -> Duration {
        self.next_delay.unwrap_or(self.polling_interval)
    }

    /// Performs one status request and returns the updated status.
    ///
    /// Once the operation has succeeded this also fetches the final result,
    /// so [`is_done`](Self::is_done) may flip on the same call.
    pub async fn poll(&mut self) -> ManagementResult<OperationStatus> {
        if self.state.status == OperationStatus::InProgress {
            self.poll_status().await?;
        }
        if self.state.status == OperationStatus::Succeeded && !self.state.finalized {
            self.fetch_final_result().await?;
        }
        if self.state.status.is_terminal() {
            self.state.finalized = true;
        }
        Ok(self.state.status)
    }

    /// Polls until the operation reaches a terminal state and returns its result.
    ///
    /// # Errors
    ///
    /// A `Failed` or `Canceled` outcome surfaces as
    /// [`ManagementError::AzureApiError`] carrying the service's error payload.
    pub async fn wait(mut self) -> ManagementResult<T> {
        while !self.is_done() {
            if self.state.status == OperationStatus::InProgress {
                tokio::time::sleep(self.next_poll_delay()).await;
            }
            self.poll().await?;
        }
        self.into_result()
    }

    /// [`wait`](Self::wait), giving up with [`ManagementError::OperationTimeout`]
    /// after `timeout`. The remote operation keeps running.
    pub async fn wait_with_timeout(self, timeout: Duration) -> ManagementResult<T> {
        let operation = self.state.operation.clone();
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| {
                ManagementError::OperationTimeout(format!(
                    "{operation} did not complete within {timeout:?}"
                ))
            })?
    }

    /// The final value of a completed operation.
    pub fn into_result(self) -> ManagementResult<T> {
        let state = self.state;
        match state.status {
            OperationStatus::Succeeded => {
                let value = state.final_body.unwrap_or(serde_json::Value::Null);
                serde_json::from_value(value)
                    .map_err(|e| ManagementError::deserialization(state.operation, e))
            }
            OperationStatus::Failed | OperationStatus::Canceled => {
                Err(terminal_error(&state))
            }
            OperationStatus::InProgress => Err(ManagementError::InvalidParameter(format!(
                "{} has not completed yet",
                state.operation
            ))),
        }
    }

    async fn poll_status(&mut self) -> ManagementResult<()> {
        let operation = format!("{}.poll", self.state.operation);

        let response = match self.state.strategy.clone() {
            PollStrategy::AsyncOperation { url, .. } => {
                let request = ManagementRequest::get_url(&operation, url)
                    .expect_status(&[200, 201, 202]);
                let response = self.pipeline.send(&request).await?;
                let body: AsyncOperationBody = response.json(&operation)?;
                self.state.status = body
                    .status
                    .as_deref()
                    .map(OperationStatus::from_wire)
                    .unwrap_or(OperationStatus::InProgress);
                self.state.error = body.error;
                response
            }
            PollStrategy::Location { url } => {
                let request = ManagementRequest::get_url(&operation, url)
                    .expect_status(&[200, 201, 202, 204]);
                let response = self.pipeline.send(&request).await?;
                if response.status == 202 {
                    if let Some(next) = response.header("location") {
                        self.state.strategy = PollStrategy::Location {
                            url: next.to_string(),
                        };
                    }
                } else {
                    self.state.status = OperationStatus::Succeeded;
                    match self.state.method.as_str() {
                        // re-read from the resource URL by fetch_final_result
                        "PUT" | "PATCH" => {}
                        "DELETE" => self.state.finalized = true,
                        _ => {
                            self.state.final_body = response.json_value();
                            self.state.finalized = true;
                        }
                    }
                }
                response
            }
            PollStrategy::ProvisioningState => {
                let request =
                    ManagementRequest::get_url(&operation, self.state.resource_url.clone())
                        .expect_status(&[200, 201]);
                let response = self.pipeline.send(&request).await?;
                let body = response.json_value();
                self.state.status = body
                    .as_ref()
                    .and_then(provisioning_state)
                    .unwrap_or(OperationStatus::Succeeded);
                self.state.final_body = body;
                if self.state.status == OperationStatus::Succeeded {
                    self.state.finalized = true;
                }
                response
            }
            PollStrategy::Done => return Ok(()),
        };

        self.state.last_status_code = response.status;
        if let Some(request_id) = response.request_id() {
            self.state.request_id = Some(request_id);
        }
        self.next_delay = response.retry_after();

        log::debug!(
            "{} polled, status {:?}",
            self.state.operation,
            self.state.status
        );
        Ok(())
    }

    async fn fetch_final_result(&mut self) -> ManagementResult<()> {
        let operation = format!("{}.result", self.state.operation);
        let final_url = match (self.state.method.as_str(), &self.state.strategy) {
            ("PUT" | "PATCH", _) => Some(self.state.resource_url.clone()),
            ("POST", PollStrategy::AsyncOperation { location, .. }) => location.clone(),
            _ => None,
        };

        match final_url {
            Some(url) => {
                let request =
                    ManagementRequest::get_url(&operation, url).expect_status(&[200, 201, 204]);
                let response = self.pipeline.send(&request).await?;
                self.state.final_body = response.json_value();
            }
            None => self.state.final_body = None,
        }

        self.state.finalized = true;
        Ok(())
    }
}

fn provisioning_state(body: &serde_json::Value) -> Option<OperationStatus> {
    body.get("properties")
        .and_then(|p| p.get("provisioningState"))
        .and_then(|s| s.as_str())
        .map(OperationStatus::from_wire)
}

fn terminal_error(state: &PollerState) -> ManagementError {
    match state.error.clone() {
        Some(detail) => ManagementError::from_error_detail(
            state.operation.clone(),
            state.last_status_code,
            state.request_id.clone(),
            detail,
        ),
        None => {
            let (code, verb) = match state.status {
                OperationStatus::Canceled => ("OperationCanceled", "was canceled"),
                _ => ("OperationFailed", "failed"),
            };
            ManagementError::AzureApiError {
                operation: state.operation.clone(),
                status_code: state.last_status_code,
                code: code.to_string(),
                message: format!("Long-running operation {verb}"),
                target: None,
                details: Vec::new(),
                request_id: state.request_id.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use crate::client::ClientOptions;
    use reqwest::header::{HeaderMap, HeaderValue};

    fn pipeline() -> Arc<HttpPipeline> {
        let credential = Arc::new(StaticTokenProvider::new("t").unwrap());
        Arc::new(HttpPipeline::new(credential, &ClientOptions::default()).unwrap())
    }

    fn response(status: u16, headers: &[(&'static str, &'static str)], body: &str) -> RawResponse {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        RawResponse {
            status,
            headers: map,
            body: body.as_bytes().to_vec(),
            url: "https://management.azure.com/ns?api-version=2021-11-01".into(),
        }
    }

    #[test]
    fn status_mapping() {
        assert_eq!(OperationStatus::from_wire("Succeeded"), OperationStatus::Succeeded);
        assert_eq!(OperationStatus::from_wire("cancelled"), OperationStatus::Canceled);
        assert_eq!(OperationStatus::from_wire("FAILED"), OperationStatus::Failed);
        assert_eq!(OperationStatus::from_wire("Accepted"), OperationStatus::InProgress);
        assert_eq!(OperationStatus::from_wire("Activating"), OperationStatus::InProgress);
    }

    #[test]
    fn synchronous_completion() {
        let poller: Poller<serde_json::Value> = Poller::from_initial_response(
            pipeline(),
            "namespaces.create_or_update",
            &Method::PUT,
            response(200, &[], r#"{"name":"ns","properties":{"provisioningState":"Succeeded"}}"#),
            Duration::from_secs(30),
        );
        assert!(poller.is_done());
        assert_eq!(poller.into_result().unwrap()["name"], "ns");
    }

    #[test]
    fn non_terminal_provisioning_state_keeps_polling() {
        let poller: Poller<serde_json::Value> = Poller::from_initial_response(
            pipeline(),
            "namespaces.create_or_update",
            &Method::PUT,
            response(201, &[], r#"{"properties":{"provisioningState":"Created"}}"#),
            Duration::from_secs(30),
        );
        assert!(!poller.is_done());
        assert_eq!(poller.state.strategy, PollStrategy::ProvisioningState);
    }

    #[test]
    fn async_operation_header_takes_precedence() {
        let poller: Poller<()> = Poller::from_initial_response(
            pipeline(),
            "namespaces.delete",
            &Method::DELETE,
            response(
                202,
                &[
                    ("azure-asyncoperation", "https://management.azure.com/op/1"),
                    ("location", "https://management.azure.com/loc/1"),
                    ("retry-after", "3"),
                ],
                "",
            ),
            Duration::from_secs(30),
        );
        assert_eq!(poller.status(), OperationStatus::InProgress);
        assert_eq!(poller.next_poll_delay(), Duration::from_secs(3));
        assert!(matches!(
            poller.state.strategy,
            PollStrategy::AsyncOperation { .. }
        ));
    }

    #[test]
    fn failed_provisioning_state_is_an_api_error() {
        let poller: Poller<serde_json::Value> = Poller::from_initial_response(
            pipeline(),
            "namespaces.create_or_update",
            &Method::PUT,
            response(200, &[], r#"{"properties":{"provisioningState":"Failed"}}"#),
            Duration::from_secs(30),
        );
        assert!(poller.is_done());
        let err = poller.into_result().unwrap_err();
        assert_eq!(err.azure_error_code(), Some("OperationFailed"));
    }

    #[test]
    fn continuation_token_round_trip() {
        let pipeline = pipeline();
        let poller: Poller<()> = Poller::from_initial_response(
            pipeline.clone(),
            "migration_configs.create_and_start_migration",
            &Method::PUT,
            response(202, &[("location", "https://management.azure.com/loc/7")], ""),
            Duration::from_secs(30),
        );
        let token = poller.continuation_token().unwrap();

        let bytes = URL_SAFE_NO_PAD.decode(&token).unwrap();
        let state: PollerState = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            state.strategy,
            PollStrategy::Location {
                url: "https://management.azure.com/loc/7".into()
            }
        );
        assert_eq!(state.operation, "migration_configs.create_and_start_migration");
    }
}
