use super::common::SystemData;
use serde::{Deserialize, Serialize};

extensible_enum! {
    /// The only configuration name the service accepts.
    pub enum MigrationConfigurationName {
        Default => "$default",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfigPropertiesInner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_replication_operations_count: Option<i64>,
    /// ARM id of the Premium namespace the Standard namespace migrates into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
    /// Name the Standard namespace takes after migration completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_migration_name: Option<String>,
    /// Reported by the service. The client never drives transitions itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_state: Option<String>,
}

/// Standard to Premium namespace migration configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfigProperties {
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
    pub properties: Option<MigrationConfigPropertiesInner>,
}

impl MigrationConfigProperties {
    pub fn new(target_namespace: impl Into<String>, post_migration_name: impl Into<String>) -> Self {
        Self {
            properties: Some(MigrationConfigPropertiesInner {
                target_namespace: Some(target_namespace.into()),
                post_migration_name: Some(post_migration_name.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn migration_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.migration_state.as_deref())
    }
}
