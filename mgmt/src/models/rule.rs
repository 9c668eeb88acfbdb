use super::common::SystemData;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

extensible_enum! {
    /// Which filter of a rule is active.
    pub enum FilterType {
        SqlFilter => "SqlFilter",
        CorrelationFilter => "CorrelationFilter",
    }
}

/// SQL-like expression applied to messages that match a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_preprocessing: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_preprocessing: Option<bool>,
}

impl SqlFilter {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            sql_expression: Some(expression.into()),
            ..Default::default()
        }
    }
}

/// Matches message system and user properties by equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_preprocessing: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<FilterType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_filter: Option<SqlFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_filter: Option<CorrelationFilter>,
}

/// A subscription filter rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RuleProperties>,
}

impl Rule {
    pub fn sql(expression: impl Into<String>) -> Self {
        Self {
            properties: Some(RuleProperties {
                filter_type: Some(FilterType::SqlFilter),
                sql_filter: Some(SqlFilter::new(expression)),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn correlation(filter: CorrelationFilter) -> Self {
        Self {
            properties: Some(RuleProperties {
                filter_type: Some(FilterType::CorrelationFilter),
                correlation_filter: Some(filter),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}
