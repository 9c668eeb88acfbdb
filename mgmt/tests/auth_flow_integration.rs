mod common;

use common::*;
use httpmock::prelude::*;
use sbmgmt::auth::{
    AuthProvider, AuthType, AzureAdAuthConfig, AzureAdFlowType, AzureAdProvider, DeviceCodeInfo,
    SasTokenGenerator,
};
use sbmgmt::{ManagementConfig, ManagementError, ServiceBusManagementClient};
use serde_json::json;
use std::sync::{Arc, Mutex};

const TENANT: &str = "test-tenant";

// Helper module for auth flow testing
mod auth_flow_helpers {
    use super::*;

    pub fn client_credentials_config(server: &MockServer) -> AzureAdAuthConfig {
        AzureAdAuthConfig {
            flow: AzureAdFlowType::ClientCredentials,
            tenant_id: Some(TENANT.to_string()),
            client_id: Some("test-client".to_string()),
            client_secret: Some("test-secret".to_string()),
            authority_host: Some(server.base_url()),
            ..Default::default()
        }
    }

    pub fn device_code_config(server: &MockServer) -> AzureAdAuthConfig {
        AzureAdAuthConfig {
            flow: AzureAdFlowType::DeviceCode,
            tenant_id: Some(TENANT.to_string()),
            client_id: Some("test-public-client".to_string()),
            authority_host: Some(server.base_url()),
            ..Default::default()
        }
    }

    pub fn token_path() -> String {
        format!("/{TENANT}/oauth2/v2.0/token")
    }

    pub fn device_code_path() -> String {
        format!("/{TENANT}/oauth2/v2.0/devicecode")
    }

    /// Device code response that lets the first poll happen immediately.
    pub fn mock_device_code(server: &MockServer) {
        server.mock(|when, then| {
            when.method(POST)
                .path(device_code_path())
                .body_includes("client_id=test-public-client");
            then.status(200).json_body(json!({
                "device_code": "device-123",
                "user_code": "ABCD-EFGH",
                "verification_uri": "https://microsoft.com/devicelogin",
                "expires_in": 900,
                "interval": 0,
                "message": "To sign in, use a web browser to open https://microsoft.com/devicelogin and enter the code ABCD-EFGH."
            }));
        });
    }
}

use auth_flow_helpers::*;

// Provider construction and validation
mod auth_provider_setup {
    use super::*;

    #[test]
    fn test_missing_tenant_is_rejected() {
        let config = AzureAdAuthConfig {
            client_id: Some("client".into()),
            client_secret: Some("secret".into()),
            ..Default::default()
        };
        let result = AzureAdProvider::new(config);
        match result {
            Err(ManagementError::ConfigurationError(message)) => {
                assert!(message.contains("tenant_id"))
            }
            _ => panic!("Expected ConfigurationError"),
        }
    }

    #[test]
    fn test_blank_client_secret_is_rejected() {
        let server = MockServer::start();
        let mut config = client_credentials_config(&server);
        config.client_secret = Some("  ".into());
        assert!(matches!(
            AzureAdProvider::new(config),
            Err(ManagementError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_provider_reports_flow() {
        let server = MockServer::start();
        let provider = AzureAdProvider::new(device_code_config(&server)).unwrap();
        assert_eq!(provider.flow_type(), &AzureAdFlowType::DeviceCode);
        assert_eq!(provider.auth_type(), AuthType::AzureAd);
        assert!(provider.requires_refresh());
    }
}

// Service principal sign-in
mod client_credentials_flow {
    use super::*;

    #[tokio::test]
    async fn test_acquires_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(token_path())
                .body_includes("grant_type=client_credentials")
                .body_includes("client_id=test-client")
                .body_includes("client_secret=test-secret")
                .body_includes("scope=https%3A%2F%2Fmanagement.azure.com%2F.default");
            then.status(200).json_body(json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "arm-token"
            }));
        });

        let provider = AzureAdProvider::new(client_credentials_config(&server)).unwrap();
        let token = provider.authenticate().await.unwrap();

        mock.assert();
        assert_eq!(token.token, "arm-token");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in_secs, Some(3599));
    }

    #[tokio::test]
    async fn test_custom_scope() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(token_path())
                .body_includes("scope=https%3A%2F%2Fmanagement.usgovcloudapi.net%2F.default");
            then.status(200).json_body(json!({"access_token": "gov-token"}));
        });

        let mut config = client_credentials_config(&server);
        config.scope = Some("https://management.usgovcloudapi.net/.default".into());
        let token = AzureAdProvider::new(config)
            .unwrap()
            .authenticate()
            .await
            .unwrap();

        mock.assert();
        assert_eq!(token.token, "gov-token");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in_secs, None);
    }

    #[tokio::test]
    async fn test_invalid_secret() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(token_path());
            then.status(401).json_body(json!({
                "error": "invalid_client",
                "error_description": "AADSTS7000215: Invalid client secret provided."
            }));
        });

        let err = AzureAdProvider::new(client_credentials_config(&server))
            .unwrap()
            .authenticate()
            .await
            .unwrap_err();

        match err {
            ManagementError::AuthenticationFailed(message) => {
                assert!(message.starts_with("invalid_client"));
                assert!(message.contains("AADSTS7000215"));
            }
            other => panic!("Expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(token_path());
            then.status(503).body("maintenance");
        });

        let err = AzureAdProvider::new(client_credentials_config(&server))
            .unwrap()
            .authenticate()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("HTTP 503"));
    }

    #[tokio::test]
    async fn test_token_reaches_management_requests() {
        let server = MockServer::start();
        let token = server.mock(|when, then| {
            when.method(POST).path(token_path());
            then.status(200)
                .json_body(json!({"access_token": "arm-token", "expires_in": 3600}));
        });
        let get = server.mock(|when, then| {
            when.method(GET)
                .path(namespace_path())
                .header("authorization", "Bearer arm-token");
            then.status(200)
                .json_body(json!({"name": NAMESPACE, "location": "uksouth"}));
        });

        let provider = Arc::new(AzureAdProvider::new(client_credentials_config(&server)).unwrap());
        let client = client_with(&server, provider);
        client.namespaces().get(RESOURCE_GROUP, NAMESPACE).await.unwrap();
        client.namespaces().get(RESOURCE_GROUP, NAMESPACE).await.unwrap();

        token.assert_calls(1);
        get.assert_calls(2);
    }
}

// Interactive sign-in
mod device_code_flow {
    use super::*;

    #[tokio::test]
    async fn test_start_device_code_flow() {
        let server = MockServer::start();
        mock_device_code(&server);

        let provider = AzureAdProvider::new(device_code_config(&server)).unwrap();
        let info = provider.start_device_code_flow().await.unwrap();

        assert_eq!(info.device_code, "device-123");
        assert_eq!(info.expires_in, 900);
        let user = info.user_info();
        assert_eq!(user.user_code, "ABCD-EFGH");
        assert_eq!(user.verification_uri, "https://microsoft.com/devicelogin");
    }

    #[tokio::test]
    async fn test_sign_in_completes_and_reports_code() {
        let server = MockServer::start();
        mock_device_code(&server);
        let token = server.mock(|when, then| {
            when.method(POST)
                .path(token_path())
                .body_includes("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Adevice_code")
                .body_includes("device_code=device-123");
            then.status(200).json_body(json!({
                "token_type": "Bearer",
                "expires_in": 4000,
                "access_token": "user-token"
            }));
        });

        let shown: Arc<Mutex<Vec<DeviceCodeInfo>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = shown.clone();
        let provider = AzureAdProvider::new(device_code_config(&server))
            .unwrap()
            .on_device_code(Arc::new(move |info: &DeviceCodeInfo| {
                sink.lock().unwrap().push(info.clone());
            }));

        let issued = provider.authenticate().await.unwrap();

        token.assert();
        assert_eq!(issued.token, "user-token");
        let shown = shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].user_code, "ABCD-EFGH");
    }

    #[tokio::test]
    async fn test_user_declines() {
        let server = MockServer::start();
        mock_device_code(&server);
        server.mock(|when, then| {
            when.method(POST).path(token_path());
            then.status(400).json_body(json!({
                "error": "access_denied",
                "error_description": "AADSTS70000: The user denied the request."
            }));
        });

        let err = AzureAdProvider::new(device_code_config(&server))
            .unwrap()
            .authenticate()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("declined"));
    }

    #[tokio::test]
    async fn test_expired_device_code() {
        let server = MockServer::start();
        mock_device_code(&server);
        server.mock(|when, then| {
            when.method(POST).path(token_path());
            then.status(400).json_body(json!({"error": "expired_token"}));
        });

        let err = AzureAdProvider::new(device_code_config(&server))
            .unwrap()
            .authenticate()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("expired"));
    }

    #[tokio::test]
    async fn test_public_flows_disabled() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(device_code_path());
            then.status(400).json_body(json!({
                "error": "invalid_client",
                "error_description": "AADSTS7000218"
            }));
        });

        let err = AzureAdProvider::new(device_code_config(&server))
            .unwrap()
            .start_device_code_flow()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Allow public client flows"));
    }
}

// Credentials and client built from configuration
mod configured_auth {
    use super::*;

    #[tokio::test]
    async fn test_client_from_config_with_access_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(namespace_path())
                .header("authorization", "Bearer from-config");
            then.status(200)
                .json_body(json!({"name": NAMESPACE, "location": "eastus2"}));
        });

        let toml = format!(
            r#"
            access_token = "from-config"

            [azure_ad]
            subscription_id = "{SUBSCRIPTION}"

            [client]
            endpoint = "{}"
            max_retries = 0
            "#,
            server.base_url()
        );
        let config = ManagementConfig::from_toml(&toml).unwrap();
        assert_eq!(config.credential().unwrap().auth_type(), AuthType::StaticToken);

        let client = ServiceBusManagementClient::from_config(&config).unwrap();
        assert_eq!(client.subscription_id(), SUBSCRIPTION);
        client.namespaces().get(RESOURCE_GROUP, NAMESPACE).await.unwrap();

        mock.assert();
    }

    #[test]
    fn test_config_without_credentials_fails() {
        let config = ManagementConfig::from_toml(
            r#"
            [azure_ad]
            flow = "client_credentials"
            tenant_id = "tenant"
            client_id = "client"
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.credential(),
            Err(ManagementError::ConfigurationError(_))
        ));
    }
}

// Data-plane tokens signed from listed keys
mod sas_tokens {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_namespace_token_shape() {
        let token = SasTokenGenerator::for_namespace("sdk-namespace")
            .generate_sas_token("RootManageSharedAccessKey", "a2V5", Duration::from_secs(3600))
            .unwrap();

        assert!(token.starts_with("SharedAccessSignature "));
        assert!(token.contains("sr=sb%3A%2F%2Fsdk-namespace.servicebus.windows.net"));
        assert!(token.contains("skn=RootManageSharedAccessKey"));
        assert!(token.contains("&se="));
    }
}
