use super::provider::AuthToken;
use super::types::CachedToken;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Access tokens keyed by the scope they were issued for.
///
/// Clones share entries, so every handle on a client reuses one token.
#[derive(Clone, Default)]
pub struct TokenCache {
    entries: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token for `scope`, unless it is within the refresh buffer.
    pub async fn fresh_token(&self, scope: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(scope)
            .filter(|cached| !cached.needs_refresh())
            .map(|cached| cached.token.clone())
    }

    /// Caches `token` for `scope` and returns its value.
    ///
    /// Tokens issued without a lifetime are kept for `fallback_lifetime`.
    pub async fn store(
        &self,
        scope: &str,
        token: AuthToken,
        fallback_lifetime: Duration,
    ) -> String {
        let lifetime = token
            .expires_in_secs
            .map(Duration::from_secs)
            .unwrap_or(fallback_lifetime);
        let value = token.token.clone();

        let mut entries = self.entries.write().await;
        entries.insert(
            scope.to_string(),
            CachedToken::new(token.token, lifetime, token.token_type),
        );
        value
    }

    /// Drops the token for `scope`, e.g. after the service rejected it.
    pub async fn invalidate(&self, scope: &str) {
        self.entries.write().await.remove(scope);
    }

    /// Time until the token for `scope` expires, `None` when nothing usable is cached.
    pub async fn remaining_lifetime(&self, scope: &str) -> Option<Duration> {
        let entries = self.entries.read().await;
        entries
            .get(scope)
            .and_then(|cached| cached.expires_at.checked_duration_since(Instant::now()))
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache").finish_non_exhaustive()
    }
}
