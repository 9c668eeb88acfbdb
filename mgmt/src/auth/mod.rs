pub mod azure_ad;
pub mod provider;
pub mod sas_token_generator;
pub mod static_token;
pub mod token_cache;
pub mod types;

pub use azure_ad::{AzureAdProvider, DeviceCodeCallback, DeviceCodeFlowInfo};
pub use provider::{AuthProvider, AuthToken};
pub use sas_token_generator::SasTokenGenerator;
pub use static_token::StaticTokenProvider;
pub use token_cache::TokenCache;
pub use types::{
    AuthType, AzureAdAuthConfig, AzureAdFlowType, CachedToken, DEFAULT_AUTHORITY_HOST,
    DEFAULT_MANAGEMENT_SCOPE, DeviceCodeInfo, TOKEN_REFRESH_BUFFER,
};
