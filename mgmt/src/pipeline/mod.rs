//! Request pipeline shared by every operation group.
//!
//! A single [`HttpPipeline::send`] call performs the whole per-request
//! policy chain: throttling, bearer token, standard headers, `api-version`,
//! retry with backoff, one token refresh on 401 and the expected-status check.

mod request;
mod retry;

pub use request::{ManagementRequest, RawResponse, RequestTarget};
pub use retry::{RETRYABLE_STATUS_CODES, RetryOptions, is_retryable_status, retry_after};

use crate::auth::{AuthProvider, TokenCache};
use crate::client::ClientOptions;
use crate::common::{HttpError, RateLimiter};
use crate::error::{ManagementError, ManagementResult};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

const TOKEN_CACHE_KEY: &str = "management";

/// Used when a provider does not report a token lifetime.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

pub struct HttpPipeline {
    http_client: reqwest::Client,
    credential: Arc<dyn AuthProvider>,
    token_cache: TokenCache,
    /// Serializes token acquisition so concurrent requests share one token
    acquire_lock: tokio::sync::Mutex<()>,
    rate_limiter: Option<RateLimiter>,
    retry: RetryOptions,
    endpoint: String,
    api_version: String,
    user_agent: String,
    request_timeout: Duration,
}

impl std::fmt::Debug for HttpPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPipeline")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("retry", &self.retry)
            .field("rate_limiter", &self.rate_limiter)
            .finish_non_exhaustive()
    }
}

impl HttpPipeline {
    pub fn new(
        credential: Arc<dyn AuthProvider>,
        options: &ClientOptions,
    ) -> ManagementResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .build()
            .map_err(|e| HttpError::ClientCreation {
                reason: e.to_string(),
            })?;

        let rate_limiter = options
            .rate_limit
            .as_ref()
            .map(|config| config.build())
            .transpose()?;

        let user_agent = match options.user_agent_suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => {
                format!("{}/{} {suffix}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            }
            _ => format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        };

        Ok(Self {
            http_client,
            credential,
            token_cache: TokenCache::new(),
            acquire_lock: tokio::sync::Mutex::new(()),
            rate_limiter,
            retry: options.retry.clone(),
            endpoint: options.endpoint.trim_end_matches('/').to_string(),
            api_version: options.api_version.clone(),
            user_agent,
            request_timeout: options.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Absolute URL for `target`, with `api-version` and `query` appended.
    pub fn url_for(&self, target: &RequestTarget, query: &[(String, String)]) -> String {
        let mut url = match target {
            RequestTarget::Path(path) => format!("{}{path}", self.endpoint),
            RequestTarget::Url(url) => url.clone(),
        };

        let mut params: Vec<String> = query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        if !has_api_version(&url) && !query.iter().any(|(k, _)| k == "api-version") {
            params.insert(0, format!("api-version={}", self.api_version));
        }

        if !params.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&params.join("&"));
        }
        url
    }

    /// Sends `request` and returns the response if its status is expected.
    ///
    /// # Errors
    ///
    /// - [`ManagementError::AzureApiError`] for any unexpected status, after
    ///   retries are exhausted for retryable ones
    /// - [`ManagementError::ConnectionFailed`] / [`ManagementError::OperationTimeout`]
    ///   when no response arrives
    /// - [`ManagementError::AuthenticationFailed`] when no token can be acquired
    pub async fn send(&self, request: &ManagementRequest) -> ManagementResult<RawResponse> {
        let url = self.url_for(&request.target, &request.query);
        let span = tracing::debug_span!(
            "management_request",
            operation = %request.operation,
            method = %request.method,
        );

        self.send_with_retry(request, &url).instrument(span).await
    }

    async fn send_with_retry(
        &self,
        request: &ManagementRequest,
        url: &str,
    ) -> ManagementResult<RawResponse> {
        let mut attempt = 0u32;
        let mut token_refreshed = false;
        let mut force_refresh = false;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait_until_ready().await;
            }

            let token = self.bearer_token(force_refresh).await?;
            force_refresh = false;
            let client_request_id = uuid::Uuid::new_v4().to_string();

            log::debug!(
                "{} {} {url} (attempt {}, client request id {client_request_id})",
                request.operation,
                request.method,
                attempt + 1
            );

            let mut builder = self
                .http_client
                .request(request.method.clone(), url)
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .header(ACCEPT, "application/json")
                .header(USER_AGENT, &self.user_agent)
                .header("x-ms-client-request-id", &client_request_id);
            if let Some(body) = &request.body {
                builder = builder
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(e) => {
                    let err = HttpError::from_reqwest(url, e, self.request_timeout.as_secs());
                    if attempt < self.retry.max_retries {
                        let delay = self.retry.delay_for(attempt, None);
                        log::warn!(
                            "{} attempt {} failed, retrying in {delay:?}: {err}",
                            request.operation,
                            attempt + 1
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err.into());
                }
            };

            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|e| HttpError::InvalidResponse {
                    expected: "response body".to_string(),
                    actual: e.to_string(),
                })?
                .to_vec();

            let raw = RawResponse {
                status,
                headers,
                body,
                url: url.to_string(),
            };

            if status == 401 && !token_refreshed {
                log::debug!(
                    "{} was rejected with 401, refreshing token once",
                    request.operation
                );
                self.token_cache.invalidate(TOKEN_CACHE_KEY).await;
                token_refreshed = true;
                force_refresh = true;
                continue;
            }

            if is_retryable_status(status) && attempt < self.retry.max_retries {
                let delay = self.retry.delay_for(attempt, Some(&raw.headers));
                log::warn!(
                    "{} returned HTTP {status}, retrying in {delay:?} (attempt {}/{})",
                    request.operation,
                    attempt + 1,
                    self.retry.max_retries
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let accepted = if request.expected.is_empty() {
                (200..300).contains(&status)
            } else {
                request.expected.contains(&status)
            };

            if accepted {
                log::debug!("{} completed with HTTP {status}", request.operation);
                return Ok(raw);
            }

            let err = ManagementError::from_response_parts(
                request.operation.clone(),
                status,
                raw.request_id(),
                &raw.body,
            );
            log::debug!("{} failed: {err}", request.operation);
            return Err(err);
        }
    }

    /// Returns a cached token, or acquires one. `force_refresh` bypasses the
    /// cache and asks the provider to refresh.
    async fn bearer_token(&self, force_refresh: bool) -> ManagementResult<String> {
        if !force_refresh {
            if let Some(token) = self.token_cache.fresh_token(TOKEN_CACHE_KEY).await {
                return Ok(token);
            }
        }

        let _guard = self.acquire_lock.lock().await;
        // another request may have stored a token while this one waited
        if !force_refresh {
            if let Some(token) = self.token_cache.fresh_token(TOKEN_CACHE_KEY).await {
                return Ok(token);
            }
        }

        let token = if force_refresh {
            self.credential.refresh().await?
        } else {
            self.credential.authenticate().await?
        };

        let token = self
            .token_cache
            .store(TOKEN_CACHE_KEY, token, DEFAULT_TOKEN_LIFETIME)
            .await;
        log::debug!(
            "Acquired management token, valid for {:?}",
            self.token_cache.remaining_lifetime(TOKEN_CACHE_KEY).await
        );

        Ok(token)
    }
}

fn has_api_version(url: &str) -> bool {
    url.split_once('?').is_some_and(|(_, query)| {
        query
            .split('&')
            .any(|pair| pair.split('=').next() == Some("api-version"))
    })
}
