//! End-to-end tests of the client over real HTTP against a mock vendor.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use clubkash_client::{
    ApiErrorKind, CableTv, ClientConfig, ClubkashClient, ElectricCompany, MeterType,
    MobileNetwork, RequestId,
};

const USER_ID: &str = "test_user";
const API_KEY: &str = "test_key";

fn client_for(server: &MockServer, config: ClientConfig) -> ClubkashClient {
    // MockServer::uri() has no trailing slash; the client must add one.
    ClubkashClient::with_config(USER_ID, API_KEY, config.with_base_url(server.uri()))
        .expect("client should build")
}

fn has_query_param(request: &Request, name: &str) -> bool {
    request.url.query_pairs().any(|(key, _)| key == name)
}

async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

#[tokio::test]
async fn wallet_balance_sends_legacy_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIWalletBalanceV1.asp"))
        .and(query_param("UserID", USER_ID))
        .and(query_param("APIKey", API_KEY))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"balance": 500.00, "currency": "NGN"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default());
    let result = client.get_wallet_balance().await.unwrap();

    assert_eq!(result.balance(), Some(500.0));
    let request = single_request(&server).await;
    assert!(request.headers.get("authorization").is_none());
}

#[tokio::test]
async fn airtime_example_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIAirtimeV1.asp"))
        .and(query_param("MobileNetwork", "01"))
        .and(query_param("Amount", "100"))
        .and(query_param("MobileNumber", "08012345678"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ORDER_RECEIVED"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default());
    let result = client
        .purchase_airtime("01", 100.00, "08012345678", None)
        .await
        .unwrap();

    assert_eq!(result.status(), Some("ORDER_RECEIVED"));
    let request = single_request(&server).await;
    let request_id = request
        .url
        .query_pairs()
        .find(|(key, _)| key == "RequestID")
        .map(|(_, value)| value.into_owned())
        .expect("RequestID should be sent");
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn data_cable_and_electricity_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIDatabundleV1.asp"))
        .and(query_param("MobileNetwork", "04"))
        .and(query_param("DataPlan", "1000.0"))
        .and(query_param("MobileNumber", "08012345678"))
        .and(query_param("RequestID", "DATA-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ORDER_RECEIVED"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/APICableTVV1.asp"))
        .and(query_param("CableTV", "gotv"))
        .and(query_param("Package", "gotv_max"))
        .and(query_param("SmartCardNo", "7023456789"))
        .and(query_param("PhoneNo", "08012345678"))
        .and(query_param("RequestID", "TV-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ORDER_RECEIVED"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/APIElectricityV1.asp"))
        .and(query_param("ElectricCompany", "02"))
        .and(query_param("MeterNo", "45067890123"))
        .and(query_param("MeterType", "02"))
        .and(query_param("Amount", "2500.5"))
        .and(query_param("PhoneNo", "08012345678"))
        .and(query_param("RequestID", "PWR-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ORDER_RECEIVED"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default());
    client
        .purchase_data(
            MobileNetwork::Airtel,
            "1000.0",
            "08012345678",
            Some(RequestId::from("DATA-1")),
        )
        .await
        .unwrap();
    client
        .purchase_cable_tv(
            CableTv::Gotv,
            "gotv_max",
            "7023456789",
            "08012345678",
            Some(RequestId::from("TV-1")),
        )
        .await
        .unwrap();
    client
        .purchase_electricity(
            ElectricCompany::Ikeja,
            "45067890123",
            MeterType::Postpaid,
            2500.5,
            "08012345678",
            Some(RequestId::from("PWR-1")),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn authenticate_switches_to_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIToken.asp"))
        .and(query_param("username", USER_ID))
        .and(query_param("apikey", API_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "NEW_ACCESS_TOKEN", "expires_in": 604_800})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/APIWalletBalanceV1.asp"))
        .and(header("Authorization", "Bearer NEW_ACCESS_TOKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balance": "125.00"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default());
    let auth = client.authenticate().await.unwrap();
    assert_eq!(auth.token(), Some("NEW_ACCESS_TOKEN"));

    let balance = client.get_wallet_balance().await.unwrap();
    assert_eq!(balance.balance(), Some(125.0));

    let requests = server.received_requests().await.unwrap();
    assert!(has_query_param(&requests[0], "UserID"));
    assert!(!has_query_param(&requests[1], "UserID"));
    assert!(!has_query_param(&requests[1], "APIKey"));
}

#[tokio::test]
async fn configured_token_omits_legacy_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIWalletBalanceV1.asp"))
        .and(header("Authorization", "Bearer EXISTING_TOKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balance": 500.00})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default().with_token("EXISTING_TOKEN"));
    client.get_wallet_balance().await.unwrap();

    let request = single_request(&server).await;
    assert!(!has_query_param(&request, "UserID"));
    assert!(!has_query_param(&request, "APIKey"));
}

#[tokio::test]
async fn non_json_body_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIWalletBalanceV1.asp"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default());
    let err = client.get_wallet_balance().await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::ResponseFormat);
    assert_eq!(err.body(), Some("<html>maintenance</html>"));
}

#[tokio::test]
async fn http_error_status_fails_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIAirtimeV1.asp"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default());
    let err = client
        .purchase_airtime("01", 100.0, "08012345678", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Transport);
    assert_eq!(err.code(), Some(503));
    assert_eq!(err.body(), Some("Service Unavailable"));
    assert!(err.to_string().starts_with("API request failed:"));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIWalletBalanceV1.asp"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"balance": 1}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default().with_timeout_seconds(1));
    let err = client.get_wallet_balance().await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Transport);
    assert_eq!(err.code(), None);
    assert!(!err.to_string().contains(API_KEY));
}

#[tokio::test]
async fn zero_timeout_waits_for_slow_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/APIWalletBalanceV1.asp"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"balance": 7}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ClientConfig::default().with_timeout_seconds(0));
    let result = client.get_wallet_balance().await.unwrap();

    assert_eq!(result.balance(), Some(7.0));
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    let client = ClubkashClient::with_config(
        USER_ID,
        API_KEY,
        ClientConfig::default().with_base_url("http://127.0.0.1:1"),
    )
    .unwrap();

    let err = client.get_wallet_balance().await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Transport);
    assert!(std::error::Error::source(&err).is_some());

    let rendered = format!("{err} {err:?}");
    assert!(!rendered.contains(API_KEY));
    assert!(!rendered.contains("APIKey="));
}
