use super::SubscriptionsOperations;
use crate::client::{ServiceBusManagementClient, segment};
use crate::error::ManagementResult;
use crate::models::Rule;
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;

/// Filter rules of a topic subscription.
pub struct RulesOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> RulesOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    pub fn list_by_subscriptions(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
        skip: Option<u32>,
        top: Option<u32>,
    ) -> ManagementResult<Pager<Rule>> {
        let path = format!(
            "{}/rules",
            SubscriptionsOperations::new(self.client).subscription_path(
                resource_group_name,
                namespace_name,
                topic_name,
                subscription_name
            )?
        );
        let request = ManagementRequest::get("rules.list_by_subscriptions", path)
            .query_opt("$skip", skip)
            .query_opt("$top", top);
        Ok(self.client.pager(request))
    }

    /// ```no_run
    /// # use sbmgmt::models::Rule;
    /// # async fn run(client: sbmgmt::ServiceBusManagementClient) -> sbmgmt::ManagementResult<()> {
    /// let rule = Rule::sql("priority > 5");
    /// client
    ///     .rules()
    ///     .create_or_update("rg", "ns", "events", "audit", "high-priority", &rule)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_or_update(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
        rule_name: &str,
        parameters: &Rule,
    ) -> ManagementResult<Rule> {
        let path = self.rule_path(
            resource_group_name,
            namespace_name,
            topic_name,
            subscription_name,
            rule_name,
        )?;
        let request = ManagementRequest::put("rules.create_or_update", path).json(parameters)?;
        self.client.execute(request).await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
        rule_name: &str,
    ) -> ManagementResult<Rule> {
        let path = self.rule_path(
            resource_group_name,
            namespace_name,
            topic_name,
            subscription_name,
            rule_name,
        )?;
        self.client
            .execute(ManagementRequest::get("rules.get", path))
            .await
    }

    pub async fn delete(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
        rule_name: &str,
    ) -> ManagementResult<()> {
        let path = self.rule_path(
            resource_group_name,
            namespace_name,
            topic_name,
            subscription_name,
            rule_name,
        )?;
        self.client
            .execute_empty(ManagementRequest::delete("rules.delete", path))
            .await
    }

    fn rule_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        subscription_name: &str,
        rule_name: &str,
    ) -> ManagementResult<String> {
        Ok(format!(
            "{}/rules/{}",
            SubscriptionsOperations::new(self.client).subscription_path(
                resource_group_name,
                namespace_name,
                topic_name,
                subscription_name
            )?,
            segment("rule_name", rule_name)?
        ))
    }
}
