use crate::client::ServiceBusManagementClient;
use crate::error::ManagementResult;
use crate::models::{MigrationConfigProperties, MigrationConfigurationName};
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;
use crate::poller::Poller;

/// Standard to Premium migration. The service drives the migration state
/// machine; these calls only start, complete or revert it.
pub struct MigrationConfigsOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> MigrationConfigsOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    pub fn list(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<Pager<MigrationConfigProperties>> {
        let path = format!(
            "{}/migrationConfigurations",
            self.client.namespace_path(resource_group_name, namespace_name)?
        );
        Ok(self
            .client
            .pager(ManagementRequest::get("migration_configs.list", path)))
    }

    /// Creates the `$default` configuration and starts replicating metadata
    /// into the target namespace.
    pub async fn begin_create_and_start_migration(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        parameters: &MigrationConfigProperties,
    ) -> ManagementResult<Poller<MigrationConfigProperties>> {
        let request = ManagementRequest::put(
            "migration_configs.create_and_start_migration",
            self.config_path(resource_group_name, namespace_name)?,
        )
        .json(parameters)?
        .expect_status(&[200, 201]);
        self.client.begin(request).await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<MigrationConfigProperties> {
        let request = ManagementRequest::get(
            "migration_configs.get",
            self.config_path(resource_group_name, namespace_name)?,
        );
        self.client.execute(request).await
    }

    pub async fn delete(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<()> {
        let request = ManagementRequest::delete(
            "migration_configs.delete",
            self.config_path(resource_group_name, namespace_name)?,
        );
        self.client.execute_empty(request).await
    }

    /// Points the Standard namespace's DNS name at the Premium namespace.
    pub async fn complete_migration(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<()> {
        let path = format!(
            "{}/upgrade",
            self.config_path(resource_group_name, namespace_name)?
        );
        self.client
            .execute_empty(ManagementRequest::post(
                "migration_configs.complete_migration",
                path,
            ))
            .await
    }

    pub async fn revert(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<()> {
        let path = format!(
            "{}/revert",
            self.config_path(resource_group_name, namespace_name)?
        );
        self.client
            .execute_empty(ManagementRequest::post("migration_configs.revert", path))
            .await
    }

    fn config_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<String> {
        // `$default` goes on the wire unescaped
        Ok(format!(
            "{}/migrationConfigurations/{}",
            self.client.namespace_path(resource_group_name, namespace_name)?,
            MigrationConfigurationName::Default
        ))
    }
}
