// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the SwitchBot client and action handlers using wiremock.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use switchbot_plug::action::{Action, PlugActions};
use switchbot_plug::config::{Credentials, MemoryConfigStore};
use switchbot_plug::error::{Error, ParseError, ProtocolError};
use switchbot_plug::protocol::{ApiConfig, SwitchBotClient};
use switchbot_plug::response::{PlugPowerState, PlugStatus};
use switchbot_plug::types::DeviceId;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const TOKEN: &str = "test-token";
const SECRET: &str = "test-secret";

fn client_for(server: &MockServer) -> SwitchBotClient {
    ApiConfig::new()
        .with_host(server.uri())
        .into_client(Credentials::new(TOKEN, SECRET))
        .unwrap()
}

fn plug() -> DeviceId {
    DeviceId::new("6055f92a1b2c").unwrap()
}

fn status_body() -> serde_json::Value {
    json!({
        "deviceId": "6055F92A1B2C",
        "deviceType": "Plug Mini (US)",
        "hubDeviceId": "6055F92A1B2C",
        "power": "on",
        "voltage": 121.3,
        "weight": 42,
        "electricityOfDay": 95,
        "electricCurrent": 3
    })
}

fn success(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "statusCode": 100,
        "message": "success",
        "body": body
    }))
}

/// Matches requests whose `sign` header is the HMAC of `token || t || nonce`.
struct ValidSignature;

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let value = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let (Some(t), Some(sign)) = (value("t"), value("sign")) else {
            return false;
        };
        let nonce = value("nonce").unwrap_or_default();

        let key = ring::hmac::Key::new(ring::hmac::HMAC_SHA256, SECRET.as_bytes());
        let Ok(digest) = STANDARD.decode(sign) else {
            return false;
        };
        ring::hmac::verify(&key, format!("{TOKEN}{t}{nonce}").as_bytes(), &digest).is_ok()
    }
}

// ============================================================================
// SwitchBotClient Tests
// ============================================================================

mod client {
    use super::*;

    #[tokio::test]
    async fn status_maps_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices/6055F92A1B2C/status"))
            .respond_with(success(status_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let status = client_for(&mock_server).status(&plug()).await.unwrap();
        assert_eq!(
            status,
            PlugStatus {
                device_id: "6055F92A1B2C".to_string(),
                device_type: "Plug Mini (US)".to_string(),
                hub_device_id: "6055F92A1B2C".to_string(),
                power: "on".to_string(),
                voltage: 121.3,
                weight: 42,
                electricity_of_day: 95,
                electric_current: 3,
            }
        );
    }

    #[tokio::test]
    async fn requests_carry_signed_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("Authorization", TOKEN))
            .and(header("Content-Type", "application/json; charset=utf8"))
            .and(header_exists("t"))
            .and(header_exists("sign"))
            .and(header_exists("nonce"))
            .and(ValidSignature)
            .respond_with(success(status_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        client_for(&mock_server).status(&plug()).await.unwrap();
    }

    #[tokio::test]
    async fn every_request_is_signed_afresh() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(ValidSignature)
            .respond_with(success(json!({"items": [{"status": {"power": "off"}}]})))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.turn_off(&plug()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        client.turn_off(&plug()).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let stamps: Vec<_> = requests
            .iter()
            .map(|r| r.headers.get("t").unwrap().to_str().unwrap().to_string())
            .collect();
        assert_ne!(stamps[0], stamps[1]);
    }

    #[tokio::test]
    async fn device_id_case_does_not_change_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices/ABC123/status"))
            .respond_with(success(status_body()))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.status(&DeviceId::new("abc123").unwrap()).await.unwrap();
        client.status(&DeviceId::new("ABC123").unwrap()).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url, requests[1].url);
    }

    #[tokio::test]
    async fn turn_on_posts_command_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.1/devices/6055F92A1B2C/commands"))
            .and(body_json(json!({
                "command": "turnOn",
                "parameter": "default",
                "commandType": "command"
            })))
            .respond_with(success(json!({"items": [{"status": {"power": "on"}}]})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let state = client_for(&mock_server).turn_on(&plug()).await.unwrap();
        assert_eq!(state, PlugPowerState::new("on"));
    }

    #[tokio::test]
    async fn turn_off_posts_command_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(json!({
                "command": "turnOff",
                "parameter": "default",
                "commandType": "command"
            })))
            .respond_with(success(json!({"items": [{"status": {"power": "off"}}]})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let state = client_for(&mock_server).turn_off(&plug()).await.unwrap();
        assert_eq!(state.power(), "off");
    }

    #[tokio::test]
    async fn send_raw_returns_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(json!({
                "command": "toggle",
                "parameter": "default",
                "commandType": "command"
            })))
            .respond_with(success(json!({"items": []})))
            .mount(&mock_server)
            .await;

        let envelope = client_for(&mock_server)
            .send_raw(&plug(), "toggle")
            .await
            .unwrap();
        assert_eq!(envelope.status_code(), 100);
        assert_eq!(envelope.body(), &json!({"items": []}));
    }

    #[tokio::test]
    async fn status_code_error_carries_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "success",
                "statusCode": 190,
                "messageDetail": "device offline"
            })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).status(&plug()).await.unwrap_err();
        let remote = err.as_remote().expect("remote error");
        assert_eq!(remote.status_code, 190);
        assert_eq!(remote.to_string(), "success");
    }

    #[tokio::test]
    async fn command_status_code_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "success",
                "statusCode": 161,
                "body": {}
            })))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).turn_on(&plug()).await.unwrap_err();
        assert!(matches!(err, Error::Remote(ref remote) if remote.status_code == 161));
    }

    #[tokio::test]
    async fn unauthorized_envelope_is_rejection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})),
            )
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).status(&plug()).await.unwrap_err();
        match err {
            Error::RemoteRejection {
                status_code,
                message,
            } => {
                assert_eq!(status_code, None);
                assert_eq!(message, "Unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_without_json_is_authentication_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).status(&plug()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).status(&plug()).await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }

    #[tokio::test]
    async fn incomplete_status_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(success(json!({"deviceId": "6055F92A1B2C", "power": "on"})))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).status(&plug()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn missing_items_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(success(json!({"items": []})))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).turn_on(&plug()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(success(status_body()).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let client = ApiConfig::new()
            .with_host(mock_server.uri())
            .with_timeout(Duration::from_millis(50))
            .into_client(Credentials::new(TOKEN, SECRET))
            .unwrap();

        let err = client.status(&plug()).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(ProtocolError::Timeout(50))));
    }
}

// ============================================================================
// PlugActions Tests
// ============================================================================

mod actions {
    use super::*;

    fn actions_for(
        server: &MockServer,
        store: MemoryConfigStore,
    ) -> PlugActions<MemoryConfigStore> {
        PlugActions::new(store).with_api_config(ApiConfig::new().with_host(server.uri()))
    }

    fn configured_store() -> MemoryConfigStore {
        MemoryConfigStore::new()
            .with("token", TOKEN)
            .with("secret", SECRET)
            .with("device_id", "6055f92a1b2c")
    }

    #[tokio::test]
    async fn status_returns_flat_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices/6055F92A1B2C/status"))
            .and(ValidSignature)
            .respond_with(success(status_body()))
            .mount(&mock_server)
            .await;

        let response = actions_for(&mock_server, configured_store())
            .status()
            .await
            .unwrap();
        assert_eq!(response.status.as_u16(), 200);
        assert_eq!(response.body, status_body());
    }

    #[tokio::test]
    async fn turn_on_and_off() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(json!({
                "command": "turnOn",
                "parameter": "default",
                "commandType": "command"
            })))
            .respond_with(success(json!({"items": [{"status": {"power": "on"}}]})))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "command": "turnOff",
                "parameter": "default",
                "commandType": "command"
            })))
            .respond_with(success(json!({"items": [{"status": {"power": "off"}}]})))
            .mount(&mock_server)
            .await;

        let actions = actions_for(&mock_server, configured_store());

        let on = actions.dispatch(Action::TurnOn).await.unwrap();
        assert_eq!(on.body, json!({"power": "on"}));

        let off = actions.dispatch(Action::TurnOff).await.unwrap();
        assert_eq!(off.body, json!({"power": "off"}));
    }

    #[tokio::test]
    async fn settings_are_read_per_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.1/devices/AAAA/status"))
            .respond_with(success(status_body()))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1.1/devices/BBBB/status"))
            .and(header("Authorization", "rotated"))
            .respond_with(success(status_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let actions = actions_for(&mock_server, configured_store().with("device_id", "aaaa"));
        actions.status().await.unwrap();

        actions.store().set("device_id", "bbbb");
        actions.store().set("token", "rotated");
        actions.status().await.unwrap();
    }

    #[tokio::test]
    async fn remote_failure_becomes_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "device offline",
                "statusCode": 161
            })))
            .mount(&mock_server)
            .await;

        let actions = actions_for(&mock_server, configured_store());

        let err = actions.turn_on().await.unwrap_err();
        assert!(matches!(err, Error::RemoteRejection { .. }));

        let response = actions.handle(Action::TurnOn).await;
        assert_eq!(response.status.as_u16(), 502);
        assert_eq!(
            response.body,
            json!({"error": "request rejected by the SwitchBot API: device offline"})
        );
    }
}
