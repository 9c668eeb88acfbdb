mod common;

use common::*;
use httpmock::prelude::*;
use sbmgmt::auth::StaticTokenProvider;
use sbmgmt::common::{RateLimitError, RateLimiter, RateLimiterConfig};
use sbmgmt::{ClientOptions, RetryOptions, ServiceBusManagementClient};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Helper module for throttling and retry testing
mod rate_limiting_helpers {
    use super::*;

    pub fn client_with_options(options: ClientOptions) -> ServiceBusManagementClient {
        ServiceBusManagementClient::new(
            Arc::new(StaticTokenProvider::new("test-token").unwrap()),
            SUBSCRIPTION,
            options,
        )
        .unwrap()
    }

    pub fn namespace_body() -> serde_json::Value {
        json!({"name": NAMESPACE, "location": "northeurope"})
    }
}

use rate_limiting_helpers::*;

// Client-side pacing through the governor-backed limiter
mod rate_limiter_behavior {
    use super::*;

    #[test]
    fn test_rate_limiter_config_defaults() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.requests_per_second, 10);
        assert_eq!(config.burst_size, None);
    }

    #[test]
    fn test_rate_limiter_config_from_toml_shape() {
        let config: RateLimiterConfig =
            serde_json::from_value(json!({"requests_per_second": 4, "burst_size": 2})).unwrap();
        assert_eq!(config.burst_size, Some(2));

        let limiter = config.build().unwrap();
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(matches!(
            limiter.check(),
            Err(RateLimitError::TooManyRequests { .. })
        ));
    }

    #[test]
    fn test_zero_rate_is_a_configuration_error() {
        let server = MockServer::start();
        let options = test_options(&server).with_rate_limit(RateLimiterConfig {
            requests_per_second: 0,
            burst_size: None,
        });
        let result = ServiceBusManagementClient::new(
            Arc::new(StaticTokenProvider::new("t").unwrap()),
            SUBSCRIPTION,
            options,
        );

        assert!(matches!(
            result,
            Err(sbmgmt::ManagementError::ConfigurationError(_))
        ));
    }

    #[tokio::test]
    async fn test_limiter_paces_requests() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(200).json_body(namespace_body());
        });

        let client = client_with_options(test_options(&server).with_rate_limit(
            RateLimiterConfig {
                requests_per_second: 5,
                burst_size: Some(1),
            },
        ));

        let start = Instant::now();
        for _ in 0..3 {
            client.namespaces().get(RESOURCE_GROUP, NAMESPACE).await.unwrap();
        }
        let elapsed = start.elapsed();

        mock.assert_calls(3);
        // one request per 200ms after the first
        assert!(elapsed >= Duration::from_millis(350), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn test_limiter_shared_by_clones() {
        let limiter = RateLimiter::new(1).unwrap();
        let clone = limiter.clone();
        assert!(limiter.check().is_ok());
        assert!(clone.check().is_err());
    }
}

// Retries of transient failures
mod retry_behavior {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_service_unavailable_then_success() {
        let server = MockServer::start();
        let mut unavailable = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(503);
        });

        let options = test_options(&server).with_retry(RetryOptions {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(500),
        });
        let client = client_with_options(options);
        let request = tokio::spawn(async move {
            client.namespaces().get(RESOURCE_GROUP, NAMESPACE).await
        });

        while unavailable.calls() < 1 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        unavailable.delete();
        let available = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(200).json_body(namespace_body());
        });

        let namespace = request.await.unwrap().unwrap();
        available.assert_calls(1);
        assert_eq!(namespace.location, "northeurope");
    }

    #[tokio::test]
    async fn test_retries_are_exhausted() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(503).json_body(json!({
                "error": {"code": "ServiceUnavailable", "message": "Try again later."}
            }));
        });

        let err = client(&server)
            .namespaces()
            .get(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap_err();

        mock.assert_calls(3);
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_throttling_honours_retry_after_ms() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(429).header("x-ms-retry-after-ms", "20");
        });

        let start = Instant::now();
        let err = client(&server)
            .namespaces()
            .get(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap_err();

        mock.assert_calls(3);
        assert_eq!(err.status_code(), Some(429));
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_bad_request_is_not_retried() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(400).json_body(json!({
                "error": {"code": "InvalidRequest", "message": "bad"}
            }));
        });

        let err = client(&server)
            .namespaces()
            .get(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap_err();

        mock.assert_calls(1);
        assert_eq!(err.azure_error_code(), Some("InvalidRequest"));
    }

    #[tokio::test]
    async fn test_retry_disabled() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(500);
        });

        let client = client_with_options(test_options(&server).with_retry(RetryOptions::none()));
        let err = client
            .namespaces()
            .get(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap_err();

        mock.assert_calls(1);
        assert_eq!(err.azure_error_code(), Some("HTTP_500"));
    }
}

// Headers every request carries
mod request_headers {
    use super::*;

    #[tokio::test]
    async fn test_standard_headers() {
        let server = MockServer::start();
        let user_agent = format!(
            "servicebus-mgmt/{} nightly-cleanup",
            env!("CARGO_PKG_VERSION")
        );
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(namespace_path())
                .query_param("api-version", API_VERSION)
                .header("authorization", "Bearer test-token")
                .header("accept", "application/json")
                .header("user-agent", user_agent.as_str())
                .header_exists("x-ms-client-request-id");
            then.status(200).json_body(namespace_body());
        });

        client_with_options(test_options(&server).with_user_agent_suffix("nightly-cleanup"))
            .namespaces()
            .get(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_api_version_override() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(namespace_path())
                .query_param("api-version", "2022-10-01-preview");
            then.status(200).json_body(namespace_body());
        });

        let mut options = test_options(&server);
        options.api_version = "2022-10-01-preview".to_string();
        client_with_options(options)
            .namespaces()
            .get(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_body_is_sent_as_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path(format!("{}/topics/events", namespace_path()))
                .header("content-type", "application/json");
            then.status(200).json_body(json!({"name": "events"}));
        });

        client(&server)
            .topics()
            .create_or_update(RESOURCE_GROUP, NAMESPACE, "events", &Default::default())
            .await
            .unwrap();

        mock.assert();
    }
}
