use super::provider::{AuthProvider, AuthToken};
use super::types::{
    AuthType, AzureAdAuthConfig, AzureAdFlowType, DEFAULT_AUTHORITY_HOST,
    DEFAULT_MANAGEMENT_SCOPE, DeviceCodeInfo,
};
use crate::error::ManagementError;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Called once the device code is issued, to show the user where to sign in.
pub type DeviceCodeCallback = Arc<dyn Fn(&DeviceCodeInfo) + Send + Sync>;

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

/// Device authorization as issued by the `devicecode` endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct DeviceCodeFlowInfo {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    /// Seconds until `device_code` stops being accepted
    pub expires_in: u64,
    /// Seconds between token polls
    #[serde(default = "default_poll_interval")]
    pub interval: u64,
    #[serde(default)]
    pub message: String,
}

fn default_poll_interval() -> u64 {
    5
}

impl DeviceCodeFlowInfo {
    pub fn user_info(&self) -> DeviceCodeInfo {
        DeviceCodeInfo {
            user_code: self.user_code.clone(),
            verification_uri: self.verification_uri.clone(),
            message: self.message.clone(),
        }
    }
}

/// Azure AD token provider for the management endpoint.
#[derive(Clone)]
pub struct AzureAdProvider {
    config: AzureAdAuthConfig,
    http_client: reqwest::Client,
    on_device_code: Option<DeviceCodeCallback>,
}

#[derive(Deserialize)]
struct IssuedToken {
    access_token: String,
    #[serde(default = "bearer")]
    token_type: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

fn bearer() -> String {
    "Bearer".to_string()
}

impl From<IssuedToken> for AuthToken {
    fn from(issued: IssuedToken) -> Self {
        AuthToken {
            token: issued.access_token,
            token_type: issued.token_type,
            expires_in_secs: issued.expires_in,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl OAuthErrorBody {
    fn describe(&self, fallback: &str) -> String {
        format!(
            "{} - {}",
            self.error,
            self.error_description.as_deref().unwrap_or(fallback)
        )
    }
}

/// Why a form post to the authority did not yield the expected payload.
#[derive(Debug)]
enum OAuthRejection {
    Transport(String),
    /// Non-2xx reply; `body` is `None` when it was not an OAuth error document
    Status { status: u16, body: Option<OAuthErrorBody> },
    Malformed(String),
}

impl OAuthRejection {
    fn into_error(self, context: &str) -> ManagementError {
        let message = match self {
            OAuthRejection::Transport(reason) => format!("{context}: {reason}"),
            OAuthRejection::Status { body: Some(body), .. } => body.describe("no description"),
            OAuthRejection::Status { status, body: None } => {
                format!("token endpoint returned HTTP {status}")
            }
            OAuthRejection::Malformed(reason) => format!("Malformed response ({context}): {reason}"),
        };
        ManagementError::AuthenticationFailed(message)
    }
}

/// How the token endpoint answered one device code poll.
enum DevicePoll {
    Issued(AuthToken),
    Pending,
    SlowDown,
}

impl AzureAdProvider {
    /// Validates that the settings required by the configured flow are present.
    pub fn new(config: AzureAdAuthConfig) -> Result<Self, ManagementError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ManagementError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
            })?;
        Self::with_http_client(config, http_client)
    }

    pub fn with_http_client(
        config: AzureAdAuthConfig,
        http_client: reqwest::Client,
    ) -> Result<Self, ManagementError> {
        let provider = Self {
            config,
            http_client,
            on_device_code: None,
        };
        provider.tenant_id()?;
        provider.client_id()?;
        if provider.config.flow == AzureAdFlowType::ClientCredentials {
            provider.client_secret()?;
        }
        Ok(provider)
    }

    pub fn on_device_code(mut self, callback: DeviceCodeCallback) -> Self {
        self.on_device_code = Some(callback);
        self
    }

    pub fn flow_type(&self) -> &AzureAdFlowType {
        &self.config.flow
    }

    fn authority(&self) -> &str {
        self.config
            .authority_host
            .as_deref()
            .unwrap_or(DEFAULT_AUTHORITY_HOST)
            .trim_end_matches('/')
    }

    fn scope(&self) -> &str {
        self.config
            .scope
            .as_deref()
            .unwrap_or(DEFAULT_MANAGEMENT_SCOPE)
    }

    fn tenant_id(&self) -> Result<&str, ManagementError> {
        required(self.config.tenant_id.as_deref(), "Azure AD tenant_id is required")
    }

    fn client_id(&self) -> Result<&str, ManagementError> {
        required(self.config.client_id.as_deref(), "Azure AD client_id is required")
    }

    fn client_secret(&self) -> Result<&str, ManagementError> {
        required(
            self.config.client_secret.as_deref(),
            "Azure AD client_secret is required for client credentials flow",
        )
    }

    fn endpoint(&self, leaf: &str) -> Result<String, ManagementError> {
        Ok(format!(
            "{}/{}/oauth2/v2.0/{leaf}",
            self.authority(),
            self.tenant_id()?
        ))
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<T, OAuthRejection> {
        let response = self
            .http_client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| OAuthRejection::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthRejection::Status {
                status: status.as_u16(),
                body: response.json::<OAuthErrorBody>().await.ok(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| OAuthRejection::Malformed(e.to_string()))
    }

    async fn client_credentials_flow(&self) -> Result<AuthToken, ManagementError> {
        let url = self.endpoint("token")?;
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id()?),
            ("client_secret", self.client_secret()?),
            ("scope", self.scope()),
        ];

        log::debug!("Requesting client credentials token from {url}");
        let issued: IssuedToken = self
            .post_form(&url, &form)
            .await
            .map_err(|rejection| rejection.into_error("token request"))?;

        log::info!("Acquired management token via client credentials");
        Ok(issued.into())
    }

    async fn device_code_flow(&self) -> Result<AuthToken, ManagementError> {
        let device_info = self.start_device_code_flow().await?;

        match &self.on_device_code {
            Some(callback) => callback(&device_info.user_info()),
            None => log::info!("{}", device_info.message),
        }

        self.poll_device_code_token(&device_info).await
    }

    /// Requests a device code; the user then signs in at `verification_uri`.
    pub async fn start_device_code_flow(&self) -> Result<DeviceCodeFlowInfo, ManagementError> {
        let url = self.endpoint("devicecode")?;
        let form = [("client_id", self.client_id()?), ("scope", self.scope())];

        self.post_form::<DeviceCodeFlowInfo>(&url, &form)
            .await
            .map_err(|rejection| match rejection {
                OAuthRejection::Status {
                    body: Some(body), ..
                } => ManagementError::AuthenticationFailed(device_code_hint(&body)),
                other => other.into_error("device code request"),
            })
    }

    /// Polls the token endpoint until the user finishes signing in, declines,
    /// or the device code expires.
    pub async fn poll_device_code_token(
        &self,
        device_info: &DeviceCodeFlowInfo,
    ) -> Result<AuthToken, ManagementError> {
        let url = self.endpoint("token")?;
        let deadline = tokio::time::Instant::now() + Duration::from_secs(device_info.expires_in);
        let mut interval = Duration::from_secs(device_info.interval);

        let mut form = vec![
            ("grant_type", DEVICE_CODE_GRANT),
            ("client_id", self.client_id()?),
            ("device_code", device_info.device_code.as_str()),
        ];
        // confidential clients authenticate the poll too
        if let Some(secret) = non_empty(self.config.client_secret.as_deref()) {
            form.push(("client_secret", secret));
        }

        loop {
            if tokio::time::Instant::now() + interval > deadline {
                return Err(ManagementError::AuthenticationFailed(
                    "The device code has expired before sign-in completed".to_string(),
                ));
            }
            tokio::time::sleep(interval).await;

            match self.poll_once(&url, &form).await? {
                DevicePoll::Issued(token) => {
                    log::info!("Device code sign-in completed");
                    return Ok(token);
                }
                DevicePoll::Pending => log::debug!("Waiting for user to complete sign-in"),
                DevicePoll::SlowDown => {
                    interval += SLOW_DOWN_STEP;
                    log::debug!("Token endpoint asked to slow down, polling every {interval:?}");
                }
            }
        }
    }

    async fn poll_once(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<DevicePoll, ManagementError> {
        let body = match self.post_form::<IssuedToken>(url, form).await {
            Ok(issued) => return Ok(DevicePoll::Issued(issued.into())),
            Err(OAuthRejection::Status {
                body: Some(body), ..
            }) => body,
            Err(other) => return Err(other.into_error("device code poll")),
        };

        match body.error.as_str() {
            "authorization_pending" => Ok(DevicePoll::Pending),
            "slow_down" => Ok(DevicePoll::SlowDown),
            "expired_token" => Err(ManagementError::AuthenticationFailed(
                "The device code has expired. Restart the sign-in.".to_string(),
            )),
            "access_denied" => Err(ManagementError::AuthenticationFailed(
                "The user declined the sign-in request".to_string(),
            )),
            _ => Err(ManagementError::AuthenticationFailed(
                body.describe("unknown error"),
            )),
        }
    }
}

fn device_code_hint(body: &OAuthErrorBody) -> String {
    match body.error.as_str() {
        "invalid_client" => "Device code sign-in was rejected for this app registration; \
             enable 'Allow public client flows' on it."
            .to_string(),
        "unauthorized_client" => "The app registration may not use device code sign-in".to_string(),
        _ => body.describe("device code request rejected"),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, ManagementError> {
    non_empty(value).ok_or_else(|| ManagementError::ConfigurationError(message.to_string()))
}

#[async_trait]
impl AuthProvider for AzureAdProvider {
    async fn authenticate(&self) -> Result<AuthToken, ManagementError> {
        match self.config.flow {
            AzureAdFlowType::ClientCredentials => self.client_credentials_flow().await,
            AzureAdFlowType::DeviceCode => self.device_code_flow().await,
        }
    }

    fn auth_type(&self) -> AuthType {
        AuthType::AzureAd
    }
}
