use super::provider::{AuthProvider, AuthToken};
use super::types::AuthType;
use crate::error::ManagementError;
use async_trait::async_trait;

/// Provider for a bearer token acquired elsewhere, e.g. `az account get-access-token`.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
    expires_in_secs: Option<u64>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Result<Self, ManagementError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ManagementError::ConfigurationError(
                "Static access token cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            token,
            expires_in_secs: None,
        })
    }

    /// Lifetime reported with the token so the cache can drop it in time.
    pub fn with_expiry(mut self, expires_in_secs: u64) -> Self {
        self.expires_in_secs = Some(expires_in_secs);
        self
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn authenticate(&self) -> Result<AuthToken, ManagementError> {
        Ok(AuthToken {
            token: self.token.clone(),
            token_type: "Bearer".to_string(),
            expires_in_secs: self.expires_in_secs,
        })
    }

    fn auth_type(&self) -> AuthType {
        AuthType::StaticToken
    }

    fn requires_refresh(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_token() {
        let provider = StaticTokenProvider::new("abc").unwrap();
        let token = provider.authenticate().await.unwrap();
        assert_eq!(token.token, "abc");
        assert_eq!(token.token_type, "Bearer");
        assert!(!provider.requires_refresh());
        assert_eq!(token.expires_in_secs, None);

        let token = provider.with_expiry(1800).authenticate().await.unwrap();
        assert_eq!(token.expires_in_secs, Some(1800));
    }

    #[test]
    fn rejects_blank_token() {
        assert!(matches!(
            StaticTokenProvider::new("  "),
            Err(ManagementError::ConfigurationError(_))
        ));
    }
}
