use super::types::AuthType;
use crate::error::ManagementError;
use async_trait::async_trait;

/// Bearer credential returned by an [`AuthProvider`].
#[derive(Clone)]
pub struct AuthToken {
    pub token: String,
    /// Usually "Bearer"
    pub token_type: String,
    /// Lifetime in seconds from issuance, `None` when unknown
    pub expires_in_secs: Option<u64>,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}

/// Source of Azure Resource Manager access tokens.
///
/// The pipeline calls [`authenticate`](AuthProvider::authenticate) when its
/// cache is empty or about to expire, and [`refresh`](AuthProvider::refresh)
/// after the service rejects a token with HTTP 401.
///
/// # Examples
///
/// ```no_run
/// use sbmgmt::auth::{AuthProvider, AuthToken, AuthType};
/// use sbmgmt::ManagementError;
/// use async_trait::async_trait;
///
/// struct ManagedIdentity;
///
/// #[async_trait]
/// impl AuthProvider for ManagedIdentity {
///     async fn authenticate(&self) -> Result<AuthToken, ManagementError> {
///         Ok(AuthToken {
///             token: "eyJ0eXAi...".to_string(),
///             token_type: "Bearer".to_string(),
///             expires_in_secs: Some(3600),
///         })
///     }
///
///     fn auth_type(&self) -> AuthType {
///         AuthType::AzureAd
///     }
/// }
/// ```
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Acquires a fresh access token.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::AuthenticationFailed`] when the identity
    /// endpoint rejects the request, or a configuration error when required
    /// settings are missing.
    async fn authenticate(&self) -> Result<AuthToken, ManagementError>;

    /// Re-acquires a token after the previous one was rejected.
    ///
    /// Defaults to [`authenticate`](AuthProvider::authenticate).
    async fn refresh(&self) -> Result<AuthToken, ManagementError> {
        self.authenticate().await
    }

    fn auth_type(&self) -> AuthType;

    /// Whether tokens from this provider expire and must be re-acquired.
    fn requires_refresh(&self) -> bool {
        true
    }
}
