#![allow(dead_code)]

use httpmock::MockServer;
use sbmgmt::auth::{AuthProvider, AuthToken, AuthType, StaticTokenProvider};
use sbmgmt::{ClientOptions, ManagementError, RetryOptions, ServiceBusManagementClient};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const SUBSCRIPTION: &str = "5f750a97-50d9-4e36-8081-c9ee4c0210d4";
pub const RESOURCE_GROUP: &str = "rg";
pub const NAMESPACE: &str = "sdk-namespace";
pub const API_VERSION: &str = "2021-11-01";

pub fn fast_retry() -> RetryOptions {
    RetryOptions {
        max_retries: 2,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
    }
}

pub fn test_options(server: &MockServer) -> ClientOptions {
    ClientOptions::default()
        .with_endpoint(server.base_url())
        .with_retry(fast_retry())
        .with_polling_interval(Duration::from_millis(10))
}

pub fn client(server: &MockServer) -> ServiceBusManagementClient {
    client_with(server, Arc::new(StaticTokenProvider::new("test-token").unwrap()))
}

pub fn client_with(
    server: &MockServer,
    credential: Arc<dyn AuthProvider>,
) -> ServiceBusManagementClient {
    ServiceBusManagementClient::new(credential, SUBSCRIPTION, test_options(server)).unwrap()
}

pub fn namespace_path() -> String {
    format!(
        "/subscriptions/{SUBSCRIPTION}/resourceGroups/{RESOURCE_GROUP}/providers/Microsoft.ServiceBus/namespaces/{NAMESPACE}"
    )
}

/// Hands out `token-1`, `token-2`, ... and counts how often it was asked.
pub struct SequenceCredential {
    issued: AtomicUsize,
}

impl SequenceCredential {
    pub fn new() -> Self {
        Self {
            issued: AtomicUsize::new(0),
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AuthProvider for SequenceCredential {
    async fn authenticate(&self) -> Result<AuthToken, ManagementError> {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(AuthToken {
            token: format!("token-{n}"),
            token_type: "Bearer".to_string(),
            expires_in_secs: Some(3600),
        })
    }

    fn auth_type(&self) -> AuthType {
        AuthType::AzureAd
    }
}
