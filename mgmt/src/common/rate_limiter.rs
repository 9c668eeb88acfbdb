use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Client-side throttle for management calls.
///
/// ARM enforces per-subscription read and write quotas; pacing requests
/// locally keeps bulk scripts from tripping HTTP 429.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
    quota: Quota,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("burst_size", &self.quota.burst_size())
            .field("replenish_interval", &self.quota.replenish_interval())
            .finish()
    }
}

impl RateLimiter {
    /// Create a new rate limiter with specified requests per second
    pub fn new(requests_per_second: u32) -> Result<Self, RateLimitError> {
        let rps = NonZeroU32::new(requests_per_second).ok_or(RateLimitError::InvalidQuota {
            field: "requests_per_second",
        })?;
        Ok(Self::with_quota(Quota::per_second(rps)))
    }

    pub fn with_quota(quota: Quota) -> Self {
        Self {
            inner: Arc::new(GovernorRateLimiter::direct(quota)),
            quota,
        }
    }

    /// Check if a request can proceed without waiting
    pub fn check(&self) -> Result<(), RateLimitError> {
        self.inner.check().map_err(|not_until| {
            let wait_duration = not_until.wait_time_from(DefaultClock::default().now());
            RateLimitError::TooManyRequests {
                retry_after: wait_duration,
            }
        })
    }

    /// Wait until a request can proceed
    pub async fn wait_until_ready(&self) {
        self.inner.until_ready().await;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Too many requests, retry after {retry_after:?}")]
    TooManyRequests { retry_after: Duration },

    #[error("Invalid rate limit: {field} must be greater than zero")]
    InvalidQuota { field: &'static str },
}

/// Rate limiter configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateLimiterConfig {
    /// Maximum requests per second
    pub requests_per_second: u32,
    /// Maximum burst size (defaults to requests_per_second)
    #[serde(default)]
    pub burst_size: Option<u32>,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: None,
        }
    }
}

impl RateLimiterConfig {
    pub fn build(&self) -> Result<RateLimiter, RateLimitError> {
        let rps = NonZeroU32::new(self.requests_per_second).ok_or(RateLimitError::InvalidQuota {
            field: "requests_per_second",
        })?;
        let burst = NonZeroU32::new(self.burst_size.unwrap_or(self.requests_per_second))
            .ok_or(RateLimitError::InvalidQuota {
                field: "burst_size",
            })?;

        Ok(RateLimiter::with_quota(
            Quota::per_second(rps).allow_burst(burst),
        ))
    }
}
