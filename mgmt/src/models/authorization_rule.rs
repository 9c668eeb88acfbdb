use super::common::SystemData;
use crate::auth::SasTokenGenerator;
use crate::error::ManagementError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

extensible_enum! {
    /// A right granted by an authorization rule.
    pub enum AccessRights {
        Manage => "Manage",
        Send => "Send",
        Listen => "Listen",
    }
}

extensible_enum! {
    /// Which of the two keys of a rule to regenerate.
    pub enum KeyType {
        PrimaryKey => "PrimaryKey",
        SecondaryKey => "SecondaryKey",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SbAuthorizationRuleProperties {
    #[serde(default)]
    pub rights: Vec<AccessRights>,
}

/// Named grant of access rights on a namespace, queue, topic or alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbAuthorizationRule {
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
    pub properties: Option<SbAuthorizationRuleProperties>,
}

impl SbAuthorizationRule {
    pub fn with_rights(rights: impl IntoIterator<Item = AccessRights>) -> Self {
        Self {
            properties: Some(SbAuthorizationRuleProperties {
                rights: rights.into_iter().collect(),
            }),
            ..Default::default()
        }
    }

    pub fn rights(&self) -> &[AccessRights] {
        self.properties
            .as_ref()
            .map(|p| p.rights.as_slice())
            .unwrap_or(&[])
    }
}

/// Keys and connection strings of an authorization rule.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_connection_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_connection_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_primary_connection_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_secondary_connection_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
}

// Keys never reach logs through Debug.
impl std::fmt::Debug for AccessKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessKeys")
            .field("key_name", &self.key_name)
            .field("primary_key", &self.primary_key.as_ref().map(|_| "<redacted>"))
            .field(
                "secondary_key",
                &self.secondary_key.as_ref().map(|_| "<redacted>"),
            )
            .finish_non_exhaustive()
    }
}

impl AccessKeys {
    /// Signs a Shared Access Signature for `resource_uri` with the primary key.
    ///
    /// `resource_uri` is the data-plane address, e.g.
    /// `sb://my-namespace.servicebus.windows.net/orders`.
    pub fn generate_sas_token(
        &self,
        resource_uri: &str,
        ttl: Duration,
    ) -> Result<String, ManagementError> {
        let key_name = self.key_name.as_deref().ok_or_else(|| {
            ManagementError::InvalidParameter("access keys carry no key name".to_string())
        })?;
        let key = self.primary_key.as_deref().ok_or_else(|| {
            ManagementError::InvalidParameter("access keys carry no primary key".to_string())
        })?;

        SasTokenGenerator::new(resource_uri).generate_sas_token(key_name, key, ttl)
    }
}

/// Body of a regenerate-keys call. `key` lets the caller supply the new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateAccessKeyParameters {
    pub key_type: KeyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl RegenerateAccessKeyParameters {
    pub fn new(key_type: KeyType) -> Self {
        Self {
            key_type,
            key: None,
        }
    }
}
