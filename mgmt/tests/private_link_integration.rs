mod common;

use common::*;
use httpmock::prelude::*;
use sbmgmt::models::{PrivateEndpointConnection, PrivateLinkConnectionStatus};
use serde_json::json;

fn connection_path(name: &str) -> String {
    format!("{}/privateEndpointConnections/{name}", namespace_path())
}

#[cfg(test)]
mod private_endpoint_connection_tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_connection() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path(connection_path("pe-1"))
                .json_body(json!({
                    "properties": {
                        "privateLinkServiceConnectionState": {
                            "status": "Approved",
                            "description": "approved by ops"
                        }
                    }
                }));
            then.status(200).json_body(json!({
                "name": "pe-1",
                "properties": {
                    "provisioningState": "Succeeded",
                    "privateEndpoint": {"id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/privateEndpoints/pe-1"},
                    "privateLinkServiceConnectionState": {"status": "Approved", "description": "approved by ops"}
                }
            }));
        });

        let connection = client(&server)
            .private_endpoint_connections()
            .create_or_update(
                RESOURCE_GROUP,
                NAMESPACE,
                "pe-1",
                &PrivateEndpointConnection::with_status(
                    PrivateLinkConnectionStatus::Approved,
                    "approved by ops",
                ),
            )
            .await
            .unwrap();

        mock.assert();
        let state = connection
            .properties
            .unwrap()
            .private_link_service_connection_state
            .unwrap();
        assert_eq!(state.status, Some(PrivateLinkConnectionStatus::Approved));
    }

    async fn accepted_without_body(status: u16) {
        let server = MockServer::start();
        let put = server.mock(|when, then| {
            when.method(PUT).path(connection_path("pe-1"));
            then.status(status);
        });
        let get = server.mock(|when, then| {
            when.method(GET).path(connection_path("pe-1"));
            then.status(200).json_body(json!({
                "name": "pe-1",
                "properties": {"privateLinkServiceConnectionState": {"status": "Approved"}}
            }));
        });

        let connection = client(&server)
            .private_endpoint_connections()
            .create_or_update(
                RESOURCE_GROUP,
                NAMESPACE,
                "pe-1",
                &PrivateEndpointConnection::with_status(
                    PrivateLinkConnectionStatus::Approved,
                    "approved by ops",
                ),
            )
            .await
            .unwrap();

        put.assert();
        get.assert();
        assert_eq!(connection.name.as_deref(), Some("pe-1"));
    }

    #[tokio::test]
    async fn test_accepted_approval_is_read_back() {
        accepted_without_body(202).await;
    }

    #[tokio::test]
    async fn test_created_approval_without_body_is_read_back() {
        accepted_without_body(201).await;
    }

    #[tokio::test]
    async fn test_get_and_list_connections() {
        let server = MockServer::start();
        let get = server.mock(|when, then| {
            when.method(GET).path(connection_path("pe-1"));
            then.status(200).json_body(json!({
                "name": "pe-1",
                "properties": {"privateLinkServiceConnectionState": {"status": "Pending"}}
            }));
        });
        let list = server.mock(|when, then| {
            when.method(GET)
                .path(format!("{}/privateEndpointConnections", namespace_path()));
            then.status(200)
                .json_body(json!({"value": [{"name": "pe-1"}, {"name": "pe-2"}]}));
        });

        let client = client(&server);
        let connection = client
            .private_endpoint_connections()
            .get(RESOURCE_GROUP, NAMESPACE, "pe-1")
            .await
            .unwrap();
        let all = client
            .private_endpoint_connections()
            .list(RESOURCE_GROUP, NAMESPACE)
            .unwrap()
            .collect_all()
            .await
            .unwrap();

        get.assert();
        list.assert();
        assert_eq!(all.len(), 2);
        assert_eq!(
            connection
                .properties
                .and_then(|p| p.private_link_service_connection_state)
                .and_then(|s| s.status),
            Some(PrivateLinkConnectionStatus::Pending)
        );
    }

    #[tokio::test]
    async fn test_delete_connection_follows_location() {
        let server = MockServer::start();
        let location = server.url("/operationResults/pe-delete?api-version=2021-11-01");
        let delete = server.mock(|when, then| {
            when.method(DELETE).path(connection_path("pe-1"));
            then.status(202).header("Location", location.as_str());
        });
        let result = server.mock(|when, then| {
            when.method(GET).path("/operationResults/pe-delete");
            then.status(204);
        });

        let poller = client(&server)
            .private_endpoint_connections()
            .begin_delete(RESOURCE_GROUP, NAMESPACE, "pe-1")
            .await
            .unwrap();
        poller.wait().await.unwrap();

        delete.assert();
        result.assert_calls(1);
    }
}

#[cfg(test)]
mod private_link_resource_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_private_link_resources() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(format!("{}/privateLinkResources", namespace_path()));
            then.status(200).json_body(json!({
                "value": [{
                    "id": format!("{}/privateLinkResources/namespace", namespace_path()),
                    "name": "namespace",
                    "properties": {
                        "groupId": "namespace",
                        "requiredMembers": ["namespace"],
                        "requiredZoneNames": ["privatelink.servicebus.windows.net"]
                    }
                }]
            }));
        });

        let resources = client(&server)
            .private_link_resources()
            .get(RESOURCE_GROUP, NAMESPACE)
            .await
            .unwrap();

        mock.assert();
        let properties = resources.value[0].properties.clone().unwrap();
        assert_eq!(properties.group_id.as_deref(), Some("namespace"));
        assert_eq!(
            properties.required_zone_names,
            vec!["privatelink.servicebus.windows.net".to_string()]
        );
    }
}

#[cfg(test)]
mod provider_operation_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_provider_operations() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/providers/Microsoft.ServiceBus/operations")
                .query_param("api-version", API_VERSION);
            then.status(200).json_body(json!({
                "value": [{
                    "name": "Microsoft.ServiceBus/namespaces/write",
                    "isDataAction": false,
                    "display": {
                        "provider": "Microsoft Azure Service Bus",
                        "resource": "Namespace",
                        "operation": "Create Namespace"
                    }
                }]
            }));
        });

        let operations = client(&server).operations().list().collect_all().await.unwrap();

        mock.assert();
        assert_eq!(
            operations[0].display.as_ref().and_then(|d| d.operation.as_deref()),
            Some("Create Namespace")
        );
    }
}
