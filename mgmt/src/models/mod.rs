//! # Resource Models
//!
//! Plain data records mirroring the `Microsoft.ServiceBus` resource schemas
//! for api-version `2021-11-01`. Every record serializes to and from the ARM
//! wire JSON (camelCase keys). Optional fields are omitted when absent so a
//! value survives a serialize/deserialize round trip unchanged.
//!
//! String enumerations on the wire are *extensible*: the service may add new
//! values without a new api-version, so every enum carries an `Other(String)`
//! variant that preserves unknown values verbatim.
//!
//! ## Modules
//!
//! - [`common`] - Envelopes shared across resources (errors, paging, system data)
//! - [`namespace`] - Namespaces, SKUs, identity and encryption settings
//! - [`queue`], [`topic`], [`subscription`], [`rule`] - Messaging entities
//! - [`authorization_rule`] - Access rights, keys and key regeneration
//! - [`disaster_recovery`] - Geo-DR pairing aliases
//! - [`migration`] - Standard to Premium migration configuration
//! - [`network_rule_set`] - IP and virtual network access rules
//! - [`private_link`] - Private endpoint connections and link resources
//! - [`operation`] - The provider's operation catalogue

/// Declares an extensible string enum.
///
/// Known values map to unit variants; anything else is kept in `Other`.
/// Matching is case-insensitive because ARM treats enum values that way.
macro_rules! extensible_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value this client version does not know about.
            Other(String),
        }

        impl $name {
            /// The wire representation of this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(value) => value.as_str(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $(
                    if value.eq_ignore_ascii_case($wire) {
                        return Self::$variant;
                    }
                )+
                Self::Other(value.to_string())
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(value))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Ok(Self::from(value.as_str()))
            }
        }
    };
}

pub mod authorization_rule;
pub mod common;
pub(crate) mod datetime;
pub mod disaster_recovery;
pub mod migration;
pub mod namespace;
pub mod network_rule_set;
pub mod operation;
pub mod private_link;
pub mod queue;
pub mod rule;
pub mod subscription;
pub mod topic;

pub use authorization_rule::{
    AccessKeys, AccessRights, KeyType, RegenerateAccessKeyParameters, SbAuthorizationRule,
    SbAuthorizationRuleProperties,
};
pub use common::{
    CheckNameAvailability, CheckNameAvailabilityResult, CreatedByType, EntityStatus,
    ErrorAdditionalInfo, ErrorDetail, ErrorResponse, ListResponse, MessageCountDetails,
    SystemData, UnavailableReason,
};
pub use disaster_recovery::{
    ArmDisasterRecovery, ArmDisasterRecoveryProperties, DisasterRecoveryProvisioningState,
    FailoverProperties, FailoverPropertiesInner, RoleDisasterRecovery,
};
pub use migration::{
    MigrationConfigProperties, MigrationConfigPropertiesInner, MigrationConfigurationName,
};
pub use namespace::{
    Encryption, Identity, KeySource, KeyVaultProperties, ManagedServiceIdentityType,
    PublicNetworkAccess, SbNamespace, SbNamespaceProperties, SbNamespaceUpdateParameters, SbSku,
    SkuName, SkuTier, TlsVersion, UserAssignedIdentity, UserAssignedIdentityProperties,
};
pub use network_rule_set::{
    DefaultAction, NetworkRuleIpAction, NetworkRuleSet, NetworkRuleSetProperties,
    NwRuleSetIpRules, NwRuleSetVirtualNetworkRules, PublicNetworkAccessFlag, Subnet,
};
pub use operation::{Operation, OperationDisplay};
pub use private_link::{
    ConnectionState, EndpointProvisioningState, PrivateEndpoint, PrivateEndpointConnection,
    PrivateEndpointConnectionProperties, PrivateLinkConnectionStatus, PrivateLinkResource,
    PrivateLinkResourceProperties, PrivateLinkResourcesListResult,
};
pub use queue::{SbQueue, SbQueueProperties};
pub use rule::{Action, CorrelationFilter, FilterType, Rule, RuleProperties, SqlFilter};
pub use subscription::{SbClientAffineProperties, SbSubscription, SbSubscriptionProperties};
pub use topic::{SbTopic, SbTopicProperties};
