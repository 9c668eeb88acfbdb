//! # Operation Groups
//!
//! One group per resource family. Groups borrow the
//! [`ServiceBusManagementClient`](crate::ServiceBusManagementClient) they were
//! obtained from and are cheap to create:
//!
//! ```no_run
//! # async fn run(client: sbmgmt::ServiceBusManagementClient) -> sbmgmt::ManagementResult<()> {
//! let topics = client.topics();
//! let topic = topics.get("rg", "ns", "events").await?;
//! let rules = topics.list_authorization_rules("rg", "ns", "events")?.collect_all().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Required path parameters are checked before anything is sent; a blank
//! value fails with [`ManagementError::InvalidParameter`](crate::ManagementError::InvalidParameter).

pub mod disaster_recovery_configs;
pub mod migration_configs;
pub mod namespaces;
pub mod private_endpoint_connections;
pub mod private_link_resources;
pub mod provider_operations;
pub mod queues;
pub mod rules;
pub mod subscriptions;
pub mod topics;

pub use disaster_recovery_configs::DisasterRecoveryConfigsOperations;
pub use migration_configs::MigrationConfigsOperations;
pub use namespaces::NamespacesOperations;
pub use private_endpoint_connections::PrivateEndpointConnectionsOperations;
pub use private_link_resources::PrivateLinkResourcesOperations;
pub use provider_operations::ProviderOperationsOperations;
pub use queues::QueuesOperations;
pub use rules::RulesOperations;
pub use subscriptions::SubscriptionsOperations;
pub use topics::TopicsOperations;

use crate::client::{ServiceBusManagementClient, segment};
use crate::error::ManagementResult;
use crate::models::{AccessKeys, RegenerateAccessKeyParameters, SbAuthorizationRule};
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;

/// Authorization rules below one parent resource (namespace, queue, topic or
/// pairing alias). `group` prefixes operation names in logs and errors.
pub(crate) struct AuthorizationRules<'a> {
    client: &'a ServiceBusManagementClient,
    group: &'static str,
    parent: String,
}

impl<'a> AuthorizationRules<'a> {
    pub(crate) fn new(
        client: &'a ServiceBusManagementClient,
        group: &'static str,
        parent: String,
    ) -> Self {
        Self {
            client,
            group,
            parent,
        }
    }

    fn rule_path(&self, rule_name: &str) -> ManagementResult<String> {
        Ok(format!(
            "{}/authorizationRules/{}",
            self.parent,
            segment("authorization_rule_name", rule_name)?
        ))
    }

    fn op(&self, name: &str) -> String {
        format!("{}.{name}", self.group)
    }

    pub(crate) fn list(&self) -> Pager<SbAuthorizationRule> {
        self.client.pager(ManagementRequest::get(
            self.op("list_authorization_rules"),
            format!("{}/authorizationRules", self.parent),
        ))
    }

    pub(crate) async fn create_or_update(
        &self,
        rule_name: &str,
        parameters: &SbAuthorizationRule,
    ) -> ManagementResult<SbAuthorizationRule> {
        let request = ManagementRequest::put(
            self.op("create_or_update_authorization_rule"),
            self.rule_path(rule_name)?,
        )
        .json(parameters)?;
        self.client.execute(request).await
    }

    pub(crate) async fn get(&self, rule_name: &str) -> ManagementResult<SbAuthorizationRule> {
        let request =
            ManagementRequest::get(self.op("get_authorization_rule"), self.rule_path(rule_name)?);
        self.client.execute(request).await
    }

    pub(crate) async fn delete(&self, rule_name: &str) -> ManagementResult<()> {
        let request = ManagementRequest::delete(
            self.op("delete_authorization_rule"),
            self.rule_path(rule_name)?,
        );
        self.client.execute_empty(request).await
    }

    pub(crate) async fn list_keys(&self, rule_name: &str) -> ManagementResult<AccessKeys> {
        let request = ManagementRequest::post(
            self.op("list_keys"),
            format!("{}/listKeys", self.rule_path(rule_name)?),
        );
        self.client.execute(request).await
    }

    pub(crate) async fn regenerate_keys(
        &self,
        rule_name: &str,
        parameters: &RegenerateAccessKeyParameters,
    ) -> ManagementResult<AccessKeys> {
        let request = ManagementRequest::post(
            self.op("regenerate_keys"),
            format!("{}/regenerateKeys", self.rule_path(rule_name)?),
        )
        .json(parameters)?;
        self.client.execute(request).await
    }
}
