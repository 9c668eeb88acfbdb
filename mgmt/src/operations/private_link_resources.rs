use crate::client::ServiceBusManagementClient;
use crate::error::ManagementResult;
use crate::models::PrivateLinkResourcesListResult;
use crate::pipeline::ManagementRequest;

pub struct PrivateLinkResourcesOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> PrivateLinkResourcesOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    /// Private link sub-resources (group ids) the namespace exposes.
    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<PrivateLinkResourcesListResult> {
        let path = format!(
            "{}/privateLinkResources",
            self.client.namespace_path(resource_group_name, namespace_name)?
        );
        self.client
            .execute(ManagementRequest::get("private_link_resources.get", path))
            .await
    }
}
