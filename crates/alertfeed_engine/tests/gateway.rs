use std::time::Duration;

use alertfeed_engine::{
    Gateway, GatewayError, GatewayRequest, GatewaySettings, Method, ReqwestGateway, USER_ID_HEADER,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> ReqwestGateway {
    ReqwestGateway::new(GatewaySettings {
        base_url: server.uri(),
        ..GatewaySettings::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn get_decodes_json_and_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/3/alerts"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 41})))
        .mount(&server)
        .await;

    let request = GatewayRequest::new(Method::Get, "/api/dashboard/3/alerts")
        .query("page", 2)
        .query("per_page", 20);
    let body = gateway(&server).send(request).await.expect("call ok");
    assert_eq!(body, json!({"total": 41}));
}

#[tokio::test]
async fn caller_identity_travels_as_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/3/summary"))
        .and(header(USER_ID_HEADER, "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": null})))
        .expect(1)
        .mount(&server)
        .await;

    let request = GatewayRequest::new(Method::Get, "/api/dashboard/3/summary").caller(3);
    let body = gateway(&server).send(request).await.expect("call ok");
    assert_eq!(body, json!({"user": null}));
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/preferences/3/urls"))
        .and(body_json(json!({"url": "https://ssc.nic.in"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let request = GatewayRequest::new(Method::Post, "/api/preferences/3/urls")
        .body(json!({"url": "https://ssc.nic.in"}));
    let body = gateway(&server).send(request).await.expect("call ok");
    assert_eq!(body["ok"], Value::Bool(true));
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/dashboard/3/alert/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Alert not found"})))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .send(GatewayRequest::new(Method::Delete, "/api/dashboard/3/alert/9"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Http {
            status: 404,
            message: "Alert not found".to_string(),
        }
    );
}

#[tokio::test]
async fn error_without_structured_body_has_empty_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .send(GatewayRequest::new(Method::Get, "/broken"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Http {
            status: 502,
            message: String::new(),
        }
    );
}

#[tokio::test]
async fn empty_success_body_reads_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let body = gateway(&server)
        .send(GatewayRequest::new(Method::Delete, "/empty"))
        .await
        .expect("call ok");
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .send(GatewayRequest::new(Method::Get, "/garbled"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn slow_response_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let gateway = ReqwestGateway::new(GatewaySettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..GatewaySettings::default()
    })
    .expect("client builds");
    let err = gateway
        .send(GatewayRequest::new(Method::Get, "/slow"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_network_failure() {
    let gateway = ReqwestGateway::new(GatewaySettings {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
    })
    .expect("client builds");
    let err = gateway
        .send(GatewayRequest::new(Method::Get, "/api/dashboard/1/summary"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)));
}
