use crate::auth::AuthProvider;
use crate::common::RateLimiterConfig;
use crate::config::ManagementConfig;
use crate::error::{ManagementError, ManagementResult};
use crate::operations::{
    DisasterRecoveryConfigsOperations, MigrationConfigsOperations, NamespacesOperations,
    PrivateEndpointConnectionsOperations, PrivateLinkResourcesOperations,
    ProviderOperationsOperations, QueuesOperations, RulesOperations, SubscriptionsOperations,
    TopicsOperations,
};
use crate::pager::Pager;
use crate::pipeline::{HttpPipeline, ManagementRequest, RetryOptions};
use crate::poller::Poller;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

/// The single api-version this client speaks.
pub const API_VERSION: &str = "2021-11-01";

pub const PROVIDER_NAMESPACE: &str = "Microsoft.ServiceBus";

/// Tunables of a [`ServiceBusManagementClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    pub api_version: String,
    pub retry: RetryOptions,
    /// Delay between long-running operation polls when the service sends no `Retry-After`
    pub polling_interval: Duration,
    pub request_timeout: Duration,
    pub rate_limit: Option<RateLimiterConfig>,
    /// Appended to the `User-Agent` header
    pub user_agent_suffix: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: API_VERSION.to_string(),
            retry: RetryOptions::default(),
            polling_interval: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            rate_limit: None,
            user_agent_suffix: None,
        }
    }
}

impl ClientOptions {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimiterConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn with_user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }
}

/// Entry point for Service Bus management operations in one subscription.
///
/// Cheap to clone; clones share the HTTP client, token cache and rate limiter.
///
/// ```no_run
/// use sbmgmt::{ClientOptions, ServiceBusManagementClient};
/// use sbmgmt::auth::StaticTokenProvider;
/// use std::sync::Arc;
///
/// # async fn run() -> sbmgmt::ManagementResult<()> {
/// let credential = Arc::new(StaticTokenProvider::new("eyJ0eXAi...")?);
/// let client = ServiceBusManagementClient::new(credential, "sub-id", ClientOptions::default())?;
///
/// let queue = client.queues().get("my-rg", "my-namespace", "orders").await?;
/// println!("{:?}", queue.counts());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ServiceBusManagementClient {
    pipeline: Arc<HttpPipeline>,
    subscription_id: String,
    polling_interval: Duration,
}

impl ServiceBusManagementClient {
    pub fn new(
        credential: Arc<dyn AuthProvider>,
        subscription_id: impl Into<String>,
        options: ClientOptions,
    ) -> ManagementResult<Self> {
        let subscription_id = subscription_id.into();
        if subscription_id.trim().is_empty() {
            return Err(ManagementError::InvalidParameter(
                "subscription_id must not be empty".to_string(),
            ));
        }

        Ok(Self {
            pipeline: Arc::new(HttpPipeline::new(credential, &options)?),
            subscription_id,
            polling_interval: options.polling_interval,
        })
    }

    /// Builds the credential and options described by `config`.
    pub fn from_config(config: &ManagementConfig) -> ManagementResult<Self> {
        let credential = config.credential()?;
        Self::new(credential, config.subscription_id()?, config.client_options())
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    pub fn pipeline(&self) -> Arc<HttpPipeline> {
        Arc::clone(&self.pipeline)
    }

    pub fn namespaces(&self) -> NamespacesOperations<'_> {
        NamespacesOperations::new(self)
    }

    pub fn queues(&self) -> QueuesOperations<'_> {
        QueuesOperations::new(self)
    }

    pub fn topics(&self) -> TopicsOperations<'_> {
        TopicsOperations::new(self)
    }

    pub fn subscriptions(&self) -> SubscriptionsOperations<'_> {
        SubscriptionsOperations::new(self)
    }

    pub fn rules(&self) -> RulesOperations<'_> {
        RulesOperations::new(self)
    }

    pub fn disaster_recovery_configs(&self) -> DisasterRecoveryConfigsOperations<'_> {
        DisasterRecoveryConfigsOperations::new(self)
    }

    pub fn migration_configs(&self) -> MigrationConfigsOperations<'_> {
        MigrationConfigsOperations::new(self)
    }

    pub fn private_endpoint_connections(&self) -> PrivateEndpointConnectionsOperations<'_> {
        PrivateEndpointConnectionsOperations::new(self)
    }

    pub fn private_link_resources(&self) -> PrivateLinkResourcesOperations<'_> {
        PrivateLinkResourcesOperations::new(self)
    }

    /// The provider's operation catalogue.
    pub fn operations(&self) -> ProviderOperationsOperations<'_> {
        ProviderOperationsOperations::new(self)
    }

    /// `/subscriptions/{sub}/providers/Microsoft.ServiceBus`
    pub(crate) fn provider_path(&self) -> String {
        format!(
            "/subscriptions/{}/providers/{PROVIDER_NAMESPACE}",
            urlencoding::encode(&self.subscription_id)
        )
    }

    /// `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.ServiceBus/namespaces/{ns}`
    pub(crate) fn namespace_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<String> {
        Ok(format!(
            "{}/providers/{PROVIDER_NAMESPACE}/namespaces/{}",
            self.resource_group_path(resource_group_name)?,
            segment("namespace_name", namespace_name)?
        ))
    }

    pub(crate) fn resource_group_path(&self, resource_group_name: &str) -> ManagementResult<String> {
        Ok(format!(
            "/subscriptions/{}/resourceGroups/{}",
            urlencoding::encode(&self.subscription_id),
            segment("resource_group_name", resource_group_name)?
        ))
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: ManagementRequest,
    ) -> ManagementResult<T> {
        let response = self.pipeline.send(&request).await?;
        response.json(request.operation())
    }

    /// Like [`execute`](Self::execute), but an accepted write without a body
    /// (201/202) is followed by a GET of the same resource.
    pub(crate) async fn execute_or_read_back<T: DeserializeOwned>(
        &self,
        request: ManagementRequest,
    ) -> ManagementResult<T> {
        let response = self.pipeline.send(&request).await?;
        if response.json_value().is_some() {
            return response.json(request.operation());
        }

        log::debug!(
            "{} returned HTTP {} without a body, reading the resource back",
            request.operation(),
            response.status
        );
        self.execute(request.read_back()).await
    }

    /// Sends `request` and discards the body.
    pub(crate) async fn execute_empty(&self, request: ManagementRequest) -> ManagementResult<()> {
        self.pipeline.send(&request).await?;
        Ok(())
    }

    pub(crate) fn pager<T: DeserializeOwned>(&self, request: ManagementRequest) -> Pager<T> {
        Pager::new(self.pipeline(), request)
    }

    pub(crate) async fn begin<T: DeserializeOwned>(
        &self,
        request: ManagementRequest,
    ) -> ManagementResult<Poller<T>> {
        let response = self.pipeline.send(&request).await?;
        Ok(Poller::from_initial_response(
            self.pipeline(),
            request.operation(),
            request.method(),
            response,
            self.polling_interval,
        ))
    }
}

/// Percent-encodes a required path parameter, rejecting blank values.
pub(crate) fn segment<'a>(
    param: &str,
    value: &'a str,
) -> ManagementResult<std::borrow::Cow<'a, str>> {
    if value.trim().is_empty() {
        return Err(ManagementError::InvalidParameter(format!(
            "{param} must not be empty"
        )));
    }
    Ok(urlencoding::encode(value))
}
