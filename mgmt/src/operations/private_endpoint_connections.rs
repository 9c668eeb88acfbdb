use crate::client::{ServiceBusManagementClient, segment};
use crate::error::ManagementResult;
use crate::models::PrivateEndpointConnection;
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;
use crate::poller::Poller;

pub struct PrivateEndpointConnectionsOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> PrivateEndpointConnectionsOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    pub fn list(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> ManagementResult<Pager<PrivateEndpointConnection>> {
        let path = format!(
            "{}/privateEndpointConnections",
            self.client.namespace_path(resource_group_name, namespace_name)?
        );
        Ok(self
            .client
            .pager(ManagementRequest::get("private_endpoint_connections.list", path)))
    }

    /// Approves or rejects a connection, see [`PrivateEndpointConnection::with_status`].
    pub async fn create_or_update(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        private_endpoint_connection_name: &str,
        parameters: &PrivateEndpointConnection,
    ) -> ManagementResult<PrivateEndpointConnection> {
        let request = ManagementRequest::put(
            "private_endpoint_connections.create_or_update",
            self.connection_path(
                resource_group_name,
                namespace_name,
                private_endpoint_connection_name,
            )?,
        )
        .json(parameters)?
        .expect_status(&[200, 201, 202]);
        self.client.execute_or_read_back(request).await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        private_endpoint_connection_name: &str,
    ) -> ManagementResult<PrivateEndpointConnection> {
        let request = ManagementRequest::get(
            "private_endpoint_connections.get",
            self.connection_path(
                resource_group_name,
                namespace_name,
                private_endpoint_connection_name,
            )?,
        );
        self.client.execute(request).await
    }

    pub async fn begin_delete(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        private_endpoint_connection_name: &str,
    ) -> ManagementResult<Poller<()>> {
        let request = ManagementRequest::delete(
            "private_endpoint_connections.delete",
            self.connection_path(
                resource_group_name,
                namespace_name,
                private_endpoint_connection_name,
            )?,
        )
        .expect_status(&[200, 202, 204]);
        self.client.begin(request).await
    }

    fn connection_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        private_endpoint_connection_name: &str,
    ) -> ManagementResult<String> {
        Ok(format!(
            "{}/privateEndpointConnections/{}",
            self.client.namespace_path(resource_group_name, namespace_name)?,
            segment(
                "private_endpoint_connection_name",
                private_endpoint_connection_name
            )?
        ))
    }
}
