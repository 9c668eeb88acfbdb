use super::common::SystemData;
use serde::{Deserialize, Serialize};

extensible_enum! {
    /// Action applied when no rule matches.
    pub enum DefaultAction {
        Allow => "Allow",
        Deny => "Deny",
    }
}

extensible_enum! {
    pub enum NetworkRuleIpAction {
        Allow => "Allow",
    }
}

extensible_enum! {
    /// Public network access flag of a rule set.
    pub enum PublicNetworkAccessFlag {
        Enabled => "Enabled",
        Disabled => "Disabled",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NwRuleSetVirtualNetworkRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<Subnet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_missing_vnet_service_endpoint: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NwRuleSetIpRules {
    /// IPv4 address or CIDR range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<NetworkRuleIpAction>,
}

impl NwRuleSetIpRules {
    pub fn allow(ip_mask: impl Into<String>) -> Self {
        Self {
            ip_mask: Some(ip_mask.into()),
            action: Some(NetworkRuleIpAction::Allow),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRuleSetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_service_access_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<DefaultAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_network_rules: Vec<NwRuleSetVirtualNetworkRules>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_rules: Vec<NwRuleSetIpRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_network_access: Option<PublicNetworkAccessFlag>,
}

/// The namespace's `default` network rule set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRuleSet {
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
    pub properties: Option<NetworkRuleSetProperties>,
}
