use super::TopicsOperations;
use crate::client::{ServiceBusManagementClient, segment};
use crate::error::ManagementResult;
use crate::models::SbSubscription;
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;

/// Topic subscriptions.
pub struct SubscriptionsOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> SubscriptionsOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    pub fn list_by_topic(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        skip: Option<u32>,
        top: Option<u32>,
    ) -> ManagementResult<Pager<SbSubscription>> {
        let path = format!(
            "{}/subscriptions",
            TopicsOperations::new(self.client).topic_path(
                resource_group_name,
                namespace_name,
                topic_name
            )?
        );
        let request = ManagementRequest::get("subscriptions.list_by_topic", path)
            .query_opt("$skip", skip)
            .query_opt("$top", top);
        Ok(self.client.pager(request))
    }

    pub async fn create_or_update(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
        parameters: &SbSubscription,
    ) -> ManagementResult<SbSubscription> {
        let path =
            self.subscription_path(resource_group_name, namespace_name, topic_name, subscription_name)?;
        let request =
            ManagementRequest::put("subscriptions.create_or_update", path).json(parameters)?;
        self.client.execute(request).await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
    ) -> ManagementResult<SbSubscription> {
        let path =
            self.subscription_path(resource_group_name, namespace_name, topic_name, subscription_name)?;
        self.client
            .execute(ManagementRequest::get("subscriptions.get", path))
            .await
    }

    pub async fn delete(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
    ) -> ManagementResult<()> {
        let path =
            self.subscription_path(resource_group_name, namespace_name, topic_name, subscription_name)?;
        self.client
            .execute_empty(ManagementRequest::delete("subscriptions.delete", path))
            .await
    }

    pub(crate) fn subscription_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
    ) -> ManagementResult<String> {
        Ok(format!(
            "{}/subscriptions/{}",
            TopicsOperations::new(self.client).topic_path(
                resource_group_name,
                namespace_name,
                topic_name
            )?,
            segment("subscription_name", subscription_name)?
        ))
    }
}
