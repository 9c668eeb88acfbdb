use super::common::SystemData;
use serde::{Deserialize, Serialize};

extensible_enum! {
    /// Provisioning state of a Geo-DR alias.
    pub enum DisasterRecoveryProvisioningState {
        Accepted => "Accepted",
        Succeeded => "Succeeded",
        Failed => "Failed",
    }
}

extensible_enum! {
    /// Role of the namespace that owns the alias.
    pub enum RoleDisasterRecovery {
        Primary => "Primary",
        PrimaryNotReplicating => "PrimaryNotReplicating",
        Secondary => "Secondary",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmDisasterRecoveryProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<DisasterRecoveryProvisioningState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_replication_operations_count: Option<i64>,
    /// ARM id of the paired (secondary) namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_namespace: Option<String>,
    /// Used when the alias name equals the primary namespace name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleDisasterRecovery>,
}

/// Geo-DR pairing alias between a primary and a secondary namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmDisasterRecovery {
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
    pub properties: Option<ArmDisasterRecoveryProperties>,
}

impl ArmDisasterRecovery {
    /// Body pairing the owning namespace with `partner_namespace_id`.
    pub fn pair_with(partner_namespace_id: impl Into<String>) -> Self {
        Self {
            properties: Some(ArmDisasterRecoveryProperties {
                partner_namespace: Some(partner_namespace_id.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn role(&self) -> Option<&RoleDisasterRecovery> {
        self.properties.as_ref().and_then(|p| p.role.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailoverPropertiesInner {
    /// The wire name is PascalCase, unlike every other property.
    #[serde(rename = "IsSafeFailover", default, skip_serializing_if = "Option::is_none")]
    pub is_safe_failover: Option<bool>,
}

/// Optional body of a failover call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailoverProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FailoverPropertiesInner>,
}

impl FailoverProperties {
    pub fn safe(is_safe_failover: bool) -> Self {
        Self {
            properties: Some(FailoverPropertiesInner {
                is_safe_failover: Some(is_safe_failover),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failover_uses_pascal_case_flag() {
        assert_eq!(
            serde_json::to_value(FailoverProperties::safe(true)).unwrap(),
            serde_json::json!({"properties": {"IsSafeFailover": true}})
        );
    }

    #[test]
    fn parses_alias() {
        let body = r#"{
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ServiceBus/namespaces/primary/disasterRecoveryConfigs/alias",
            "name": "alias",
            "type": "Microsoft.ServiceBus/Namespaces/disasterRecoveryConfigs",
            "properties": {
                "provisioningState": "Succeeded",
                "pendingReplicationOperationsCount": 0,
                "partnerNamespace": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.ServiceBus/namespaces/secondary",
                "role": "Primary"
            }
        }"#;
        let alias: ArmDisasterRecovery = serde_json::from_str(body).unwrap();
        assert_eq!(alias.role(), Some(&RoleDisasterRecovery::Primary));
        assert_eq!(
            alias.properties.as_ref().unwrap().provisioning_state,
            Some(DisasterRecoveryProvisioningState::Succeeded)
        );
    }
}
