use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

extensible_enum! {
    /// Kind of principal that created or last modified a resource.
    pub enum CreatedByType {
        User => "User",
        Application => "Application",
        ManagedIdentity => "ManagedIdentity",
        Key => "Key",
    }
}

extensible_enum! {
    /// Status of a messaging entity (queue, topic or subscription).
    pub enum EntityStatus {
        Active => "Active",
        Disabled => "Disabled",
        Restoring => "Restoring",
        SendDisabled => "SendDisabled",
        ReceiveDisabled => "ReceiveDisabled",
        Creating => "Creating",
        Deleting => "Deleting",
        Renaming => "Renaming",
        Unknown => "Unknown",
    }
}

extensible_enum! {
    /// Why a namespace or alias name is not available.
    pub enum UnavailableReason {
        None => "None",
        InvalidName => "InvalidName",
        SubscriptionIsDisabled => "SubscriptionIsDisabled",
        NameInUse => "NameInUse",
        NameInLockdown => "NameInLockdown",
        TooManyNamespaceInCurrentSubscription => "TooManyNamespaceInCurrentSubscription",
    }
}

/// Creation and last-modification metadata attached by ARM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<CreatedByType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::models::datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<CreatedByType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::models::datetime"
    )]
    pub last_modified_at: Option<DateTime<Utc>>,
}

/// ARM error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Error payload returned by the service, possibly nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_info: Vec<ErrorAdditionalInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorAdditionalInfo {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub info_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<serde_json::Value>,
}

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(
        rename = "nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_link: Option<String>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            next_link: None,
        }
    }
}

/// Request body for name availability checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckNameAvailability {
    pub name: String,
}

impl CheckNameAvailability {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNameAvailabilityResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
}

/// Message counts reported for queues, topics and subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCountDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_message_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_letter_message_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_message_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_message_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_dead_letter_message_count: Option<i64>,
}

impl MessageCountDetails {
    /// Active message count clamped to zero; the service reports `-1` while
    /// counts are unavailable.
    pub fn active(&self) -> u64 {
        clamp_count(self.active_message_count)
    }

    /// Dead-letter message count clamped to zero.
    pub fn dead_letter(&self) -> u64 {
        clamp_count(self.dead_letter_message_count)
    }
}

fn clamp_count(raw: Option<i64>) -> u64 {
    match raw {
        Some(count) if count > 0 => count as u64,
        _ => 0,
    }
}
