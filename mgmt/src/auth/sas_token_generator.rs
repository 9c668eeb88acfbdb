use crate::error::ManagementError;
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// Signs Shared Access Signatures for a Service Bus data-plane resource.
///
/// The management plane hands out the keys (`list_keys`); this turns them
/// into time-limited tokens that can be given to senders and receivers
/// without sharing the key itself.
///
/// # Examples
///
/// ```no_run
/// use sbmgmt::auth::SasTokenGenerator;
/// use std::time::Duration;
///
/// let generator = SasTokenGenerator::for_namespace("my-namespace");
/// let token = generator.generate_sas_token(
///     "RootManageSharedAccessKey",
///     "primary-key-value",
///     Duration::from_secs(24 * 3600),
/// )?;
/// # Ok::<(), sbmgmt::ManagementError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SasTokenGenerator {
    resource_uri: String,
}

impl SasTokenGenerator {
    /// `resource_uri` is the scope the token grants, e.g.
    /// `sb://my-namespace.servicebus.windows.net/orders`.
    pub fn new(resource_uri: impl Into<String>) -> Self {
        Self {
            resource_uri: resource_uri.into(),
        }
    }

    /// Scope covering every entity of the namespace.
    pub fn for_namespace(namespace: &str) -> Self {
        Self::new(format!("sb://{namespace}.servicebus.windows.net/"))
    }

    pub fn resource_uri(&self) -> &str {
        &self.resource_uri
    }

    /// Generates a token valid for `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::InvalidParameter`] when the key name or key
    /// is empty.
    pub fn generate_sas_token(
        &self,
        key_name: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, ManagementError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).map_err(|_| {
            ManagementError::InvalidParameter("SAS token lifetime is too large".to_string())
        })?;
        let expiry = Utc::now().timestamp().saturating_add(ttl_secs);
        self.generate_sas_token_expiring_at(key_name, key, expiry)
    }

    /// Generates a token expiring at `expiry` (seconds since the Unix epoch).
    pub fn generate_sas_token_expiring_at(
        &self,
        key_name: &str,
        key: &str,
        expiry: i64,
    ) -> Result<String, ManagementError> {
        if key_name.is_empty() || key.is_empty() {
            return Err(ManagementError::InvalidParameter(
                "SAS key name and key must not be empty".to_string(),
            ));
        }

        let encoded_uri = urlencoding::encode(&self.resource_uri);
        let string_to_sign = format!("{encoded_uri}\n{expiry}");

        // The key string itself is the HMAC secret, not its base64 decoding.
        let mut mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(|e| {
            ManagementError::InternalError(format!("Failed to create HMAC: {e}"))
        })?;
        mac.update(string_to_sign.as_bytes());
        let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        Ok(format!(
            "SharedAccessSignature sr={}&sig={}&se={}&skn={}",
            encoded_uri,
            urlencoding::encode(&signature),
            expiry,
            key_name
        ))
    }
}
