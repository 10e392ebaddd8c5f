//! Reverse-geocoding provider backed by the BigDataCloud client API.
//!
//! The `reverse-geocode-client` endpoint needs no API key, which makes it a
//! handy second opinion when Nominatim is rate limited.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use puntoverde_core::{
    model::Coordinate,
    ports::{PlaceGuess, PortError, ReverseGeocodePort},
};

const BASE_URL: &str = "https://api.bigdatacloud.net/data";

/// Response from /reverse-geocode-client
#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(rename = "principalSubdivision", default)]
    principal_subdivision: String,

    #[serde(default)]
    city: String,

    // Populated for smaller places where "city" stays blank.
    #[serde(default)]
    locality: String,
}

/// Reverse geocoder talking to BigDataCloud.
pub struct BigDataCloudGeocoder {
    client: Client,
    base_url: String,
}

impl BigDataCloudGeocoder {
    /// Create a geocoder against the public BigDataCloud endpoint.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a geocoder against a specific base URL, for tests.
    #[must_use]
    pub fn with_base_url<U: Into<String>>(client: Client, base_url: U) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ReverseGeocodePort for BigDataCloudGeocoder {
    fn name(&self) -> &str {
        "bigdatacloud"
    }

    async fn reverse(&self, point: Coordinate) -> Result<PlaceGuess, PortError> {
        let req = self
            .client
            .get(format!("{}/reverse-geocode-client", self.base_url))
            .query(&[
                ("latitude", point.latitude.to_string()),
                ("longitude", point.longitude.to_string()),
                ("localityLanguage", String::from("es")),
            ]);

        let resp = fetch_json::<ReverseGeocodeResponse>(req).await?;

        let guess = PlaceGuess {
            region: non_empty(resp.principal_subdivision),
            city: non_empty(resp.city).or_else(|| non_empty(resp.locality)),
        };

        if guess.is_empty() {
            return Err(PortError::UnusableResponse(String::from(
                "reverse result names neither subdivision nor locality",
            )));
        }

        Ok(guess)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
