//! Integration tests for `IpApiLookup` using wiremock HTTP mocks.

use puntoverde_core::ports::{IpLookupPort, PortError};
use puntoverde_provider_ipapi::IpApiLookup;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_lookup(base_url: &str) -> IpApiLookup {
    IpApiLookup::with_base_url(reqwest::Client::new(), base_url)
}

#[tokio::test]
async fn successful_lookup_returns_coordinate_and_hints() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "success",
        "regionName": "Nuevo León",
        "city": "Monterrey",
        "lat": 25.6866,
        "lon": -100.3161
    });

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("fields", "status,message,regionName,city,lat,lon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let lookup = test_lookup(&server.uri());
    let estimate = lookup.locate().await.expect("should parse lookup result");

    assert!((estimate.coordinate.latitude - 25.6866).abs() < 1e-9);
    assert!((estimate.coordinate.longitude + 100.3161).abs() < 1e-9);
    assert_eq!(estimate.region.as_deref(), Some("Nuevo León"));
    assert_eq!(estimate.city.as_deref(), Some("Monterrey"));
}

#[tokio::test]
async fn failed_status_is_unavailable() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "fail",
        "message": "private range"
    });

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let lookup = test_lookup(&server.uri());
    let result = lookup.locate().await;

    assert!(matches!(result, Err(PortError::Unavailable(message)) if message == "private range"));
}

#[tokio::test]
async fn missing_coordinate_is_unusable() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "success",
        "regionName": "Jalisco"
    });

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let lookup = test_lookup(&server.uri());
    let result = lookup.locate().await;

    assert!(matches!(result, Err(PortError::UnusableResponse(_))));
}

#[tokio::test]
async fn server_error_maps_to_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let lookup = test_lookup(&server.uri());
    let result = lookup.locate().await;

    assert!(matches!(result, Err(PortError::Network(_))));
}
