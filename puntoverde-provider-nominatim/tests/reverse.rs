//! Integration tests for `NominatimGeocoder` using wiremock HTTP mocks.

use puntoverde_core::model::Coordinate;
use puntoverde_core::ports::{PortError, ReverseGeocodePort};
use puntoverde_provider_nominatim::NominatimGeocoder;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_geocoder(base_url: &str) -> NominatimGeocoder {
    NominatimGeocoder::with_base_url(reqwest::Client::new(), base_url)
}

#[tokio::test]
async fn reverse_returns_state_and_city() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "place_id": 298587870,
        "display_name": "Tuxtla Gutiérrez, Chiapas, México",
        "address": {
            "city": "Tuxtla Gutiérrez",
            "state": "Chiapas",
            "country": "México",
            "country_code": "mx"
        }
    });

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "16.7569"))
        .and(query_param("lon", "-93.1292"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let geocoder = test_geocoder(&server.uri());
    let guess = geocoder
        .reverse(Coordinate::new(16.7569, -93.1292))
        .await
        .expect("should parse reverse result");

    assert_eq!(guess.region.as_deref(), Some("Chiapas"));
    assert_eq!(guess.city.as_deref(), Some("Tuxtla Gutiérrez"));
}

#[tokio::test]
async fn town_fills_in_when_city_is_missing() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "address": {
            "town": "Valladolid",
            "state": "Yucatán",
            "country_code": "mx"
        }
    });

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let geocoder = test_geocoder(&server.uri());
    let guess = geocoder
        .reverse(Coordinate::new(20.6896, -88.2011))
        .await
        .expect("should parse reverse result");

    assert_eq!(guess.region.as_deref(), Some("Yucatán"));
    assert_eq!(guess.city.as_deref(), Some("Valladolid"));
}

#[tokio::test]
async fn geocode_error_body_is_unusable() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "error": "Unable to geocode" });

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let geocoder = test_geocoder(&server.uri());
    let result = geocoder.reverse(Coordinate::new(0.0, 0.0)).await;

    assert!(matches!(result, Err(PortError::UnusableResponse(_))));
}

#[tokio::test]
async fn address_without_state_or_locality_is_unusable() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "address": { "country": "México", "country_code": "mx" }
    });

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let geocoder = test_geocoder(&server.uri());
    let result = geocoder.reverse(Coordinate::new(23.0, -102.0)).await;

    assert!(matches!(result, Err(PortError::UnusableResponse(_))));
}

#[tokio::test]
async fn server_error_maps_to_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let geocoder = test_geocoder(&server.uri());
    let result = geocoder.reverse(Coordinate::new(19.43, -99.13)).await;

    assert!(matches!(result, Err(PortError::Network(_))));
}
