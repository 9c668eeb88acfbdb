//! Configuration loading.
//!
//! Settings come from an optional `config.toml` and from environment
//! variables using `__` as the section separator, with a `.env` file loaded
//! first. Environment entries override file values.
//!
//! ```toml
//! [azure_ad]
//! flow = "client_credentials"
//! tenant_id = "..."
//! client_id = "..."
//! subscription_id = "..."
//!
//! [client]
//! max_retries = 5
//! polling_interval_secs = 10
//!
//! [client.rate_limit]
//! requests_per_second = 20
//! ```
//!
//! The same keys as environment variables: `AZURE_AD__TENANT_ID`,
//! `AZURE_AD__CLIENT_SECRET`, `CLIENT__MAX_RETRIES`, `CLIENT__ENDPOINT`, ...

use crate::auth::{AuthProvider, AzureAdAuthConfig, AzureAdProvider, StaticTokenProvider};
use crate::client::ClientOptions;
use crate::common::RateLimiterConfig;
use crate::error::{ManagementError, ManagementResult};
use crate::utils::EnvUtils;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManagementConfig {
    #[serde(default)]
    pub azure_ad: AzureAdAuthConfig,
    #[serde(default)]
    pub client: ClientSettings,
    /// Pre-acquired bearer token; bypasses Azure AD when set
    #[serde(default)]
    pub access_token: Option<String>,
}

/// The `[client]` section. Unset values keep the [`ClientOptions`] defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub max_retries: Option<u32>,
    pub retry_initial_delay_ms: Option<u64>,
    pub retry_max_delay_ms: Option<u64>,
    pub polling_interval_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub rate_limit: Option<RateLimiterConfig>,
    pub user_agent_suffix: Option<String>,
}

impl ManagementConfig {
    /// Loads `.env`, then `config.toml` from the working directory if present,
    /// then the environment.
    pub fn load() -> ManagementResult<Self> {
        dotenv::dotenv().ok();
        Self::build(
            Config::builder().add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        )
    }

    /// Like [`load`](Self::load) with an explicit file, which must exist.
    pub fn load_from(path: impl AsRef<Path>) -> ManagementResult<Self> {
        dotenv::dotenv().ok();
        Self::build(Config::builder().add_source(File::from(path.as_ref()).required(true)))
    }

    /// Parses TOML content, still layering the environment on top.
    pub fn from_toml(content: &str) -> ManagementResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(content, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> ManagementResult<Self> {
        let config = builder
            .add_source(Environment::default().separator("__"))
            .build()
            .map_err(|e| {
                ManagementError::ConfigurationError(format!("Configuration loading failed: {e}"))
            })?;

        config.try_deserialize::<Self>().map_err(|e| {
            ManagementError::ConfigurationError(format!("Failed to deserialize config: {e}"))
        })
    }

    /// From config, else `AZURE_AD__SUBSCRIPTION_ID`.
    pub fn subscription_id(&self) -> ManagementResult<String> {
        required(
            self.azure_ad.subscription_id.as_deref(),
            "AZURE_AD__SUBSCRIPTION_ID",
        )
    }

    /// From config, else `AZURE_AD__RESOURCE_GROUP`.
    pub fn resource_group(&self) -> ManagementResult<String> {
        required(
            self.azure_ad.resource_group.as_deref(),
            "AZURE_AD__RESOURCE_GROUP",
        )
    }

    /// From config, else `AZURE_AD__NAMESPACE`.
    pub fn namespace(&self) -> ManagementResult<String> {
        required(self.azure_ad.namespace.as_deref(), "AZURE_AD__NAMESPACE")
    }

    pub fn credential(&self) -> ManagementResult<Arc<dyn AuthProvider>> {
        match self.access_token.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(token) => Ok(Arc::new(StaticTokenProvider::new(token)?)),
            None => Ok(Arc::new(AzureAdProvider::new(self.azure_ad.clone())?)),
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        let settings = &self.client;
        let mut options = ClientOptions::default();

        if let Some(endpoint) = &settings.endpoint {
            options.endpoint = endpoint.clone();
        }
        if let Some(api_version) = &settings.api_version {
            options.api_version = api_version.clone();
        }
        if let Some(max_retries) = settings.max_retries {
            options.retry.max_retries = max_retries;
        }
        if let Some(ms) = settings.retry_initial_delay_ms {
            options.retry.initial_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = settings.retry_max_delay_ms {
            options.retry.max_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = settings.polling_interval_secs {
            options.polling_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = settings.request_timeout_secs {
            options.request_timeout = Duration::from_secs(secs);
        }
        options.rate_limit = settings.rate_limit.clone();
        options.user_agent_suffix = settings.user_agent_suffix.clone();

        options
    }
}

fn required(configured: Option<&str>, env_name: &str) -> ManagementResult<String> {
    EnvUtils::configured_or_var(configured, env_name).map_err(|_| {
        ManagementError::ConfigurationError(format!(
            "{env_name} is required but not found in configuration or environment variables"
        ))
    })
}
