use super::AuthorizationRules;
use crate::client::{ServiceBusManagementClient, segment};
use crate::error::ManagementResult;
use crate::models::{AccessKeys, RegenerateAccessKeyParameters, SbAuthorizationRule, SbTopic};
use crate::pager::Pager;
use crate::pipeline::ManagementRequest;

pub struct TopicsOperations<'a> {
    client: &'a ServiceBusManagementClient,
}

impl<'a> TopicsOperations<'a> {
    pub(crate) fn new(client: &'a ServiceBusManagementClient) -> Self {
        Self { client }
    }

    pub fn list_by_namespace(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        skip: Option<u32>,
        top: Option<u32>,
    ) -> ManagementResult<Pager<SbTopic>> {
        let path = format!(
            "{}/topics",
            self.client.namespace_path(resource_group_name, namespace_name)?
        );
        let request = ManagementRequest::get("topics.list_by_namespace", path)
            .query_opt("$skip", skip)
            .query_opt("$top", top);
        Ok(self.client.pager(request))
    }

    pub async fn create_or_update(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        parameters: &SbTopic,
    ) -> ManagementResult<SbTopic> {
        let request = ManagementRequest::put(
            "topics.create_or_update",
            self.topic_path(resource_group_name, namespace_name, topic_name)?,
        )
        .json(parameters)?;
        self.client.execute(request).await
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
    ) -> ManagementResult<SbTopic> {
        let request = ManagementRequest::get(
            "topics.get",
            self.topic_path(resource_group_name, namespace_name, topic_name)?,
        );
        self.client.execute(request).await
    }

    /// Deletes the topic together with its subscriptions and rules.
    pub async fn delete(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
    ) -> ManagementResult<()> {
        let request = ManagementRequest::delete(
            "topics.delete",
            self.topic_path(resource_group_name, namespace_name, topic_name)?,
        );
        self.client.execute_empty(request).await
    }

    pub fn list_authorization_rules(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
    ) -> ManagementResult<Pager<SbAuthorizationRule>> {
        Ok(self
            .rules(resource_group_name, namespace_name, topic_name)?
            .list())
    }

    pub async fn create_or_update_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        authorization_rule_name: &str,
        parameters: &SbAuthorizationRule,
    ) -> ManagementResult<SbAuthorizationRule> {
        self.rules(resource_group_name, namespace_name, topic_name)?
            .create_or_update(authorization_rule_name, parameters)
            .await
    }

    pub async fn get_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        authorization_rule_name: &str,
    ) -> ManagementResult<SbAuthorizationRule> {
        self.rules(resource_group_name, namespace_name, topic_name)?
            .get(authorization_rule_name)
            .await
    }

    pub async fn delete_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        authorization_rule_name: &str,
    ) -> ManagementResult<()> {
        self.rules(resource_group_name, namespace_name, topic_name)?
            .delete(authorization_rule_name)
            .await
    }

    pub async fn list_keys(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        authorization_rule_name: &str,
    ) -> ManagementResult<AccessKeys> {
        self.rules(resource_group_name, namespace_name, topic_name)?
            .list_keys(authorization_rule_name)
            .await
    }

    pub async fn regenerate_keys(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
        authorization_rule_name: &str,
        parameters: &RegenerateAccessKeyParameters,
    ) -> ManagementResult<AccessKeys> {
        self.rules(resource_group_name, namespace_name, topic_name)?
            .regenerate_keys(authorization_rule_name, parameters)
            .await
    }

    pub(crate) fn topic_path(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
    ) -> ManagementResult<String> {
        Ok(format!(
            "{}/topics/{}",
            self.client.namespace_path(resource_group_name, namespace_name)?,
            segment("topic_name", topic_name)?
        ))
    }

    fn rules(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        topic_name: &str,
    ) -> ManagementResult<AuthorizationRules<'a>> {
        Ok(AuthorizationRules::new(
            self.client,
            "topics",
            self.topic_path(resource_group_name, namespace_name, topic_name)?,
        ))
    }
}
