use super::AuthorizationRules;
use crate::client::ServiceBusManagementClient;
use crate::error::ManagementResult;
use crate::models::{
    AccessKeys, CheckNameAvailability, CheckNameAvailabilityResult, NetworkRuleSet,
    RegenerateAccessKeyParameters, SbAuthorizationRule, SbNamespace, SbNamespaceUpdateParameters,
};
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;
use crate::poller::Poller;

/// Namespaces, their network rule set and namespace-level authorization rules.
pub struct NamespacesOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> NamespacesOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    /// All namespaces in the subscription.
    pub fn list(&self) -> Pager<SbNamespace> {
        self.client.pager(ManagementRequest::get(
            "namespaces.list",
            format!("{}/namespaces", self.client.provider_path()),
        ))
    }

    pub fn list_by_resource_group(
        &self,
        resource_group_name: &str,
    ) -> ManagementResult<Pager<SbNamespace>> {
        let path = format!(
            "{}/providers/{}/namespaces",
            self.client.resource_group_path(resource_group_name)?,
            crate::client::PROVIDER_NAMESPACE
        );
        Ok(self
            .client
            .pager(ManagementRequest::get("namespaces.list_by_resource_group", path)))
    }

    /// Creates or replaces a namespace. Provisioning is asynchronous.
    ///
    /// ```no_run
    /// # use sbmgmt::models::{SbNamespace, SbSku, SkuName};
    /// # async fn run(client: sbmgmt::ServiceBusManagementClient) -> sbmgmt::ManagementResult<()> {
    /// let poller = client
    ///     .namespaces()
    ///     .begin_create_or_update("rg", "ns", &SbNamespace::new("westeurope", SbSku::new(SkuName::Standard)))
    ///     .await?;
    /// let namespace = poller.wait().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn begin_create_or_update(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        parameters: &SbNamespace,
    ) -> ManagementResult<Poller<SbNamespace>> {
        let request = ManagementRequest::put(
            "namespaces.create_or_update",
            self.client.namespace_path(resource_group_name, namespace_name)?,
        )
        .json(parameters)?
        .expect_status(&[200, 201, 202]);
        self.client.begin(request).await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<SbNamespace> {
        let request = ManagementRequest::get(
            "namespaces.get",
            self.client.namespace_path(resource_group_name, namespace_name)?,
        );
        self.client.execute(request).await
    }

    /// Patches a namespace. When the service accepts the change without a
    /// body the namespace is read back.
    pub async fn update(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        parameters: &SbNamespaceUpdateParameters,
    ) -> ManagementResult<SbNamespace> {
        let request = ManagementRequest::patch(
            "namespaces.update",
            self.client.namespace_path(resource_group_name, namespace_name)?,
        )
        .json(parameters)?
        .expect_status(&[200, 201, 202]);
        self.client.execute_or_read_back(request).await
    }

    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<Poller<()>> {
        let request = ManagementRequest::delete(
            "namespaces.delete",
            self.client.namespace_path(resource_group_name, namespace_name)?,
        )
        .expect_status(&[200, 202, 204]);
        self.client.begin(request).await
    }

    /// Checks whether `name` can be used for a new namespace.
    pub async fn check_name_availability(
        &self,
        parameters: &CheckNameAvailability,
    ) -> ManagementResult<CheckNameAvailabilityResult> {
        let request = ManagementRequest::post(
            "namespaces.check_name_availability",
            format!("{}/CheckNameAvailability", self.client.provider_path()),
        )
        .json(parameters)?;
        self.client.execute(request).await
    }

    pub async fn create_or_update_network_rule_set(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        parameters: &NetworkRuleSet,
    ) -> ManagementResult<NetworkRuleSet> {
        let request = ManagementRequest::put(
            "namespaces.create_or_update_network_rule_set",
            self.network_rule_set_path(resource_group_name, namespace_name)?,
        )
        .json(parameters)?;
        self.client.execute(request).await
    }

    pub async fn get_network_rule_set(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<NetworkRuleSet> {
        let request = ManagementRequest::get(
            "namespaces.get_network_rule_set",
            self.network_rule_set_path(resource_group_name, namespace_name)?,
        );
        self.client.execute(request).await
    }

    pub fn list_network_rule_sets(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<Pager<NetworkRuleSet>> {
        let path = format!(
            "{}/networkRuleSets",
            self.client.namespace_path(resource_group_name, namespace_name)?
        );
        Ok(self
            .client
            .pager(ManagementRequest::get("namespaces.list_network_rule_sets", path)))
    }

    pub fn list_authorization_rules(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<Pager<SbAuthorizationRule>> {
        Ok(self.rules(resource_group_name, namespace_name)?.list())
    }

    pub async fn create_or_update_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        authorization_rule_name: &str,
        parameters: &SbAuthorizationRule,
    ) -> ManagementResult<SbAuthorizationRule> {
        self.rules(resource_group_name, namespace_name)?
            .create_or_update(authorization_rule_name, parameters)
            .await
    }

    pub async fn get_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        authorization_rule_name: &str,
    ) -> ManagementResult<SbAuthorizationRule> {
        self.rules(resource_group_name, namespace_name)?
            .get(authorization_rule_name)
            .await
    }

    pub async fn delete_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        authorization_rule_name: &str,
    ) -> ManagementResult<()> {
        self.rules(resource_group_name, namespace_name)?
            .delete(authorization_rule_name)
            .await
    }

    /// Primary and secondary keys and connection strings of a rule.
    pub async fn list_keys(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        authorization_rule_name: &str,
    ) -> ManagementResult<AccessKeys> {
        self.rules(resource_group_name, namespace_name)?
            .list_keys(authorization_rule_name)
            .await
    }

    pub async fn regenerate_keys(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        authorization_rule_name: &str,
        parameters: &RegenerateAccessKeyParameters,
    ) -> ManagementResult<AccessKeys> {
        self.rules(resource_group_name, namespace_name)?
            .regenerate_keys(authorization_rule_name, parameters)
            .await
    }

    fn network_rule_set_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<String> {
        Ok(format!(
            "{}/networkRuleSets/default",
            self.client.namespace_path(resource_group_name, namespace_name)?
        ))
    }

    fn rules(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<AuthorizationRules<'a>> {
        Ok(AuthorizationRules::new(
            self.client,
            "namespaces",
            self.client.namespace_path(resource_group_name, namespace_name)?,
        ))
    }
}
