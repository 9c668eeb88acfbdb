use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const DEFAULT_MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";

/// Tokens are re-acquired this long before they expire.
pub const TOKEN_REFRESH_BUFFER: Duration = Duration::from_secs(300);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// Microsoft Entra ID (Azure AD) OAuth2 flows
    AzureAd,
    /// Pre-acquired bearer token
    StaticToken,
}

/// OAuth2 grant used against the Azure AD token endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AzureAdFlowType {
    /// Service principal with a client secret. Non-interactive.
    #[default]
    ClientCredentials,
    /// Interactive sign-in on a second device.
    DeviceCode,
}

/// Azure AD settings, loaded from the `azure_ad` configuration section.
///
/// # Required Fields
///
/// - `tenant_id`, `client_id` for every flow
/// - `client_secret` for [`AzureAdFlowType::ClientCredentials`]
///
/// # Optional Fields
///
/// - `subscription_id`, `resource_group`, `namespace`: default scope of the
///   client, falling back to `AZURE_AD__*` environment variables
/// - `authority_host`: defaults to `https://login.microsoftonline.com`
/// - `scope`: defaults to `https://management.azure.com/.default`
///
/// # Examples
///
/// ```no_run
/// use sbmgmt::auth::{AzureAdAuthConfig, AzureAdFlowType};
///
/// let config = AzureAdAuthConfig {
///     flow: AzureAdFlowType::ClientCredentials,
///     tenant_id: Some("your-tenant-id".to_string()),
///     client_id: Some("your-client-id".to_string()),
///     client_secret: Some("your-client-secret".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AzureAdAuthConfig {
    #[serde(default, alias = "auth_method")]
    pub flow: AzureAdFlowType,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub resource_group: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub authority_host: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl std::fmt::Debug for AzureAdAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureAdAuthConfig")
            .field("flow", &self.flow)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("subscription_id", &self.subscription_id)
            .field("resource_group", &self.resource_group)
            .field("namespace", &self.namespace)
            .field("authority_host", &self.authority_host)
            .field("scope", &self.scope)
            .finish()
    }
}

/// A cached authentication token with expiration tracking.
#[derive(Clone, Debug)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: Instant,
    pub token_type: String,
}

impl CachedToken {
    pub fn new(token: String, expires_in: Duration, token_type: String) -> Self {
        Self {
            token,
            expires_at: Instant::now() + expires_in,
            token_type,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// True within [`TOKEN_REFRESH_BUFFER`] of expiry.
    pub fn needs_refresh(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_BUFFER >= self.expires_at
    }
}

/// What the user must do to finish a device code sign-in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceCodeInfo {
    pub user_code: String,
    pub verification_uri: String,
    /// Human-readable instructions from Azure AD
    pub message: String,
}
