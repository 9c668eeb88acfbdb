use crate::client::{PROVIDER_NAMESPACE, ServiceBusManagementClient};
use crate::models::Operation;
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;

/// The REST operations `Microsoft.ServiceBus` exposes.
pub struct ProviderOperationsOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> ProviderOperationsOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Pager<Operation> {
        self.client.pager(ManagementRequest::get(
            "operations.list",
            format!("/providers/{PROVIDER_NAMESPACE}/operations"),
        ))
    }
}
