use super::AuthorizationRules;
use crate::client::{ServiceBusManagementClient, segment};
use crate::error::ManagementResult;
use crate::models::{
    AccessKeys, ArmDisasterRecovery, CheckNameAvailability, CheckNameAvailabilityResult,
    FailoverProperties, SbAuthorizationRule,
};
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;

/// Geo-DR aliases. Calls on `break_pairing` and `fail_over` only initiate the
/// change; read the alias back to observe its `provisioningState`.
pub struct DisasterRecoveryConfigsOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> DisasterRecoveryConfigsOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    /// Checks whether `parameters.name` is free as an alias name.
    pub async fn check_name_availability(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        parameters: &CheckNameAvailability,
    ) -> ManagementResult<CheckNameAvailabilityResult> {
        let path = format!(
            "{}/CheckNameAvailability",
            self.configs_path(resource_group_name, namespace_name)?
        );
        let request =
            ManagementRequest::post("disaster_recovery_configs.check_name_availability", path)
                .json(parameters)?;
        self.client.execute(request).await
    }

    pub fn list(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<Pager<ArmDisasterRecovery>> {
        let path = self.configs_path(resource_group_name, namespace_name)?;
        Ok(self
            .client
            .pager(ManagementRequest::get("disaster_recovery_configs.list", path)))
    }

    pub async fn create_or_update(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        parameters: &ArmDisasterRecovery,
    ) -> ManagementResult<ArmDisasterRecovery> {
        let request = ManagementRequest::put(
            "disaster_recovery_configs.create_or_update",
            self.alias_path(resource_group_name, namespace_name, alias)?,
        )
        .json(parameters)?
        .expect_status(&[200, 201]);
        self.client.execute_or_read_back(request).await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> ManagementResult<ArmDisasterRecovery> {
        let request = ManagementRequest::get(
            "disaster_recovery_configs.get",
            self.alias_path(resource_group_name, namespace_name, alias)?,
        );
        self.client.execute(request).await
    }

    pub async fn delete(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> ManagementResult<()> {
        let request = ManagementRequest::delete(
            "disaster_recovery_configs.delete",
            self.alias_path(resource_group_name, namespace_name, alias)?,
        );
        self.client.execute_empty(request).await
    }

    /// Stops replication. Both namespaces keep their entities.
    pub async fn break_pairing(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> ManagementResult<()> {
        let path = format!(
            "{}/breakPairing",
            self.alias_path(resource_group_name, namespace_name, alias)?
        );
        self.client
            .execute_empty(ManagementRequest::post(
                "disaster_recovery_configs.break_pairing",
                path,
            ))
            .await
    }

    /// Promotes the secondary namespace. Must be called on the secondary.
    pub async fn fail_over(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        parameters: Option<&FailoverProperties>,
    ) -> ManagementResult<()> {
        let path = format!(
            "{}/failover",
            self.alias_path(resource_group_name, namespace_name, alias)?
        );
        let mut request = ManagementRequest::post("disaster_recovery_configs.fail_over", path);
        if let Some(parameters) = parameters {
            request = request.json(parameters)?;
        }
        self.client.execute_empty(request).await
    }

    pub fn list_authorization_rules(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> ManagementResult<Pager<SbAuthorizationRule>> {
        Ok(self.rules(resource_group_name, namespace_name, alias)?.list())
    }

    pub async fn get_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        authorization_rule_name: &str,
    ) -> ManagementResult<SbAuthorizationRule> {
        self.rules(resource_group_name, namespace_name, alias)?
            .get(authorization_rule_name)
            .await
    }

    /// Keys whose connection strings point at the alias rather than a namespace.
    pub async fn list_keys(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        authorization_rule_name: &str,
    ) -> ManagementResult<AccessKeys> {
        self.rules(resource_group_name, namespace_name, alias)?
            .list_keys(authorization_rule_name)
            .await
    }

    fn configs_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<String> {
        Ok(format!(
            "{}/disasterRecoveryConfigs",
            self.client.namespace_path(resource_group_name, namespace_name)?
        ))
    }

    fn alias_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> ManagementResult<String> {
        Ok(format!(
            "{}/{}",
            self.configs_path(resource_group_name, namespace_name)?,
            segment("alias", alias)?
        ))
    }

    fn rules(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> ManagementResult<AuthorizationRules<'a>> {
        Ok(AuthorizationRules::new(
            self.client,
            "disaster_recovery_configs",
            self.alias_path(resource_group_name, namespace_name, alias)?,
        ))
    }
}
