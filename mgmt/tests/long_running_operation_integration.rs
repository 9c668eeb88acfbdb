mod common;

use claims::{assert_err, assert_ok};
use common::*;
use httpmock::prelude::*;
use sbmgmt::models::{SbNamespace, SbSku, SkuName};
use sbmgmt::{ManagementError, OperationStatus, Poller};
use serde_json::json;
use std::time::Duration;

fn standard_namespace() -> SbNamespace {
    SbNamespace::new("westeurope", SbSku::new(SkuName::Standard))
}

fn namespace_json(state: &str) -> serde_json::Value {
    json!({
        "id": namespace_path(),
        "name": NAMESPACE,
        "location": "westeurope",
        "sku": {"name": "Standard", "tier": "Standard"},
        "properties": {
            "provisioningState": state,
            "serviceBusEndpoint": format!("https://{NAMESPACE}.servicebus.windows.net:443/")
        }
    })
}

#[cfg(test)]
mod manual_polling {
    use super::*;

    #[tokio::test]
    async fn test_async_operation_steps() {
        let server = MockServer::start();
        let status_url = server.url("/operations/create-1?api-version=2021-11-01");
        server.mock(|when, then| {
            when.method(PUT).path(namespace_path());
            then.status(201)
                .header("Azure-AsyncOperation", status_url.as_str())
                .json_body(namespace_json("Created"));
        });
        let mut running = server.mock(|when, then| {
            when.method(GET).path("/operations/create-1");
            then.status(200)
                .header("Retry-After", "2")
                .json_body(json!({"status": "InProgress"}));
        });
        let final_get = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(200).json_body(namespace_json("Succeeded"));
        });

        let client = client(&server);
        let mut poller = client
            .namespaces()
            .begin_create_or_update(RESOURCE_GROUP, NAMESPACE, &standard_namespace())
            .await
            .unwrap();
        assert_eq!(poller.status(), OperationStatus::InProgress);
        assert!(!poller.is_done());
        assert_eq!(poller.operation(), "namespaces.create_or_update");

        assert_eq!(poller.poll().await.unwrap(), OperationStatus::InProgress);
        assert_eq!(poller.next_poll_delay(), Duration::from_secs(2));
        running.assert_calls(1);

        running.delete();
        server.mock(|when, then| {
            when.method(GET).path("/operations/create-1");
            then.status(200).json_body(json!({"status": "Succeeded"}));
        });

        assert_eq!(poller.poll().await.unwrap(), OperationStatus::Succeeded);
        assert!(poller.is_done());
        final_get.assert_calls(1);

        let namespace = poller.into_result().unwrap();
        assert_eq!(namespace.provisioning_state(), Some("Succeeded"));
        assert_eq!(
            namespace.service_bus_endpoint(),
            Some("https://sdk-namespace.servicebus.windows.net:443/")
        );
    }

    #[tokio::test]
    async fn test_synchronous_completion_skips_polling() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path(namespace_path());
            then.status(200).json_body(namespace_json("Succeeded"));
        });
        let polls = server.mock(|when, then| {
            when.method(GET);
            then.status(500);
        });

        let poller = client(&server)
            .namespaces()
            .begin_create_or_update(RESOURCE_GROUP, NAMESPACE, &standard_namespace())
            .await
            .unwrap();

        assert!(poller.is_done());
        let namespace = poller.wait().await.unwrap();
        polls.assert_calls(0);
        assert_eq!(namespace.name.as_deref(), Some(NAMESPACE));
    }

    #[tokio::test]
    async fn test_into_result_before_completion() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path(namespace_path());
            then.status(201).json_body(namespace_json("Activating"));
        });

        let poller = client(&server)
            .namespaces()
            .begin_create_or_update(RESOURCE_GROUP, NAMESPACE, &standard_namespace())
            .await
            .unwrap();

        let err = poller.into_result().unwrap_err();
        assert!(matches!(err, ManagementError::InvalidParameter(_)));
    }
}

#[cfg(test)]
mod location_polling {
    use super::*;

    #[tokio::test]
    async fn test_location_chain_until_done() {
        let server = MockServer::start();
        let first = server.url("/operationResults/del-1?api-version=2021-11-01");
        let second = server.url("/operationResults/del-2?api-version=2021-11-01");
        server.mock(|when, then| {
            when.method(DELETE).path(namespace_path());
            then.status(202).header("Location", first.as_str());
        });
        let hop = server.mock(|when, then| {
            when.method(GET).path("/operationResults/del-1");
            then.status(202).header("Location", second.as_str());
        });
        let done = server.mock(|when, then| {
            when.method(GET).path("/operationResults/del-2");
            then.status(200).json_body(json!({"name": NAMESPACE}));
        });

        let poller = client(&server)
            .namespaces()
            .begin_delete(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap();
        assert_ok!(poller.wait().await);

        hop.assert_calls(1);
        done.assert_calls(1);
    }

    #[tokio::test]
    async fn test_put_via_location_rereads_resource() {
        let server = MockServer::start();
        let result_url = server.url("/operationResults/put-1?api-version=2021-11-01");
        server.mock(|when, then| {
            when.method(PUT).path(namespace_path());
            then.status(202).header("Location", result_url.as_str());
        });
        let result = server.mock(|when, then| {
            when.method(GET).path("/operationResults/put-1");
            then.status(200).json_body(json!({"status": "Succeeded"}));
        });
        let final_get = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(200).json_body(namespace_json("Succeeded"));
        });

        let namespace = client(&server)
            .namespaces()
            .begin_create_or_update(RESOURCE_GROUP, NAMESPACE, &standard_namespace())
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        result.assert_calls(1);
        final_get.assert_calls(1);
        assert_eq!(namespace.name.as_deref(), Some(NAMESPACE));
        assert_eq!(namespace.provisioning_state(), Some("Succeeded"));
    }

    #[tokio::test]
    async fn test_delete_without_polling_headers() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path(namespace_path());
            then.status(204);
        });

        let poller = client(&server)
            .namespaces()
            .begin_delete(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap();

        assert!(poller.is_done());
        assert_ok!(poller.into_result());
    }
}

#[cfg(test)]
mod resumed_polling {
    use super::*;

    #[tokio::test]
    async fn test_resume_from_continuation_token() {
        let server = MockServer::start();
        let status_url = server.url("/operations/create-2?api-version=2021-11-01");
        server.mock(|when, then| {
            when.method(PUT).path(namespace_path());
            then.status(201)
                .header("Azure-AsyncOperation", status_url.as_str())
                .json_body(namespace_json("Created"));
        });
        server.mock(|when, then| {
            when.method(GET).path("/operations/create-2");
            then.status(200).json_body(json!({"status": "Succeeded"}));
        });
        let final_get = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(200).json_body(namespace_json("Succeeded"));
        });

        let token = {
            let poller = client(&server)
                .namespaces()
                .begin_create_or_update(RESOURCE_GROUP, NAMESPACE, &standard_namespace())
                .await
                .unwrap();
            poller.continuation_token().unwrap()
        };
        assert!(!token.contains('='));

        // a fresh client, as another process would build
        let resumed: Poller<SbNamespace> =
            Poller::from_continuation_token(&client(&server), &token).unwrap();
        assert_eq!(resumed.status(), OperationStatus::InProgress);
        assert_eq!(resumed.operation(), "namespaces.create_or_update");

        let namespace = resumed.wait().await.unwrap();
        final_get.assert_calls(1);
        assert_eq!(namespace.provisioning_state(), Some("Succeeded"));
    }

    #[tokio::test]
    async fn test_malformed_continuation_tokens() {
        let server = MockServer::start();
        let client = client(&server);

        assert_err!(Poller::<()>::from_continuation_token(&client, "***"));
        // valid base64, not a poller state
        assert_err!(Poller::<()>::from_continuation_token(&client, "eyJhIjoxfQ"));
    }
}

#[cfg(test)]
mod terminal_outcomes {
    use super::*;

    #[tokio::test]
    async fn test_wait_with_timeout_gives_up() {
        let server = MockServer::start();
        let status_url = server.url("/operations/slow?api-version=2021-11-01");
        server.mock(|when, then| {
            when.method(DELETE).path(namespace_path());
            then.status(202)
                .header("Azure-AsyncOperation", status_url.as_str());
        });
        server.mock(|when, then| {
            when.method(GET).path("/operations/slow");
            then.status(200).json_body(json!({"status": "Running"}));
        });

        let poller = client(&server)
            .namespaces()
            .begin_delete(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap();
        let err = poller
            .wait_with_timeout(Duration::from_millis(150))
            .await
            .unwrap_err();

        match err {
            ManagementError::OperationTimeout(message) => {
                assert!(message.contains("namespaces.delete"))
            }
            other => panic!("Expected OperationTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_canceled_operation() {
        let server = MockServer::start();
        let status_url = server.url("/operations/cancel?api-version=2021-11-01");
        server.mock(|when, then| {
            when.method(PUT).path(namespace_path());
            then.status(201)
                .header("Azure-AsyncOperation", status_url.as_str())
                .header("x-ms-request-id", "req-put");
        });
        server.mock(|when, then| {
            when.method(GET).path("/operations/cancel");
            then.status(200)
                .header("x-ms-request-id", "req-poll")
                .json_body(json!({"status": "Canceled"}));
        });

        let err = client(&server)
            .namespaces()
            .begin_create_or_update(RESOURCE_GROUP, NAMESPACE, &standard_namespace())
            .await
            .unwrap()
            .wait()
            .await
            .unwrap_err();

        assert_eq!(err.azure_error_code(), Some("OperationCanceled"));
        assert_eq!(err.azure_request_id(), Some("req-poll"));
    }

    #[tokio::test]
    async fn test_failed_provisioning_state_while_polling() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path(namespace_path());
            then.status(201).json_body(namespace_json("Creating"));
        });
        let get = server.mock(|when, then| {
            when.method(GET).path(namespace_path());
            then.status(200).json_body(namespace_json("Failed"));
        });

        let err = client(&server)
            .namespaces()
            .begin_create_or_update(RESOURCE_GROUP, NAMESPACE, &standard_namespace())
            .await
            .unwrap()
            .wait()
            .await
            .unwrap_err();

        get.assert_calls(1);
        assert_eq!(err.azure_error_code(), Some("OperationFailed"));
        assert_eq!(err.status_code(), Some(200));
    }

    #[tokio::test]
    async fn test_status_poll_error_is_returned() {
        let server = MockServer::start();
        let status_url = server.url("/operations/gone?api-version=2021-11-01");
        server.mock(|when, then| {
            when.method(DELETE).path(namespace_path());
            then.status(202)
                .header("Azure-AsyncOperation", status_url.as_str());
        });
        server.mock(|when, then| {
            when.method(GET).path("/operations/gone");
            then.status(404).json_body(json!({
                "error": {"code": "OperationNotFound", "message": "Unknown operation."}
            }));
        });

        let err = client(&server)
            .namespaces()
            .begin_delete(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap()
            .wait()
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        match err {
            ManagementError::AzureApiError { operation, .. } => {
                assert_eq!(operation, "namespaces.delete.poll")
            }
            other => panic!("Expected AzureApiError, got {other:?}"),
        }
    }
}
