//! Reverse-geocoding provider backed by the OpenStreetMap Nominatim API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use puntoverde_core::{
    model::Coordinate,
    ports::{PlaceGuess, PortError, ReverseGeocodePort},
};

const BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Response from /reverse?format=jsonv2
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<AddressDetails>,

    // Nominatim reports "Unable to geocode" here with HTTP 200.
    #[serde(default)]
    error: Option<String>,
}

/// Address block inside the reverse result; many more fields exist, we
/// only need the administrative ones.
#[derive(Debug, Default, Deserialize)]
struct AddressDetails {
    #[serde(default)]
    state: Option<String>,

    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    town: Option<String>,
    #[serde(default)]
    village: Option<String>,
}

/// Reverse geocoder talking to a Nominatim instance.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Create a geocoder against the public Nominatim instance.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a geocoder against a specific instance, for self-hosted
    /// deployments and tests.
    #[must_use]
    pub fn with_base_url<U: Into<String>>(client: Client, base_url: U) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ReverseGeocodePort for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    async fn reverse(&self, point: Coordinate) -> Result<PlaceGuess, PortError> {
        let req = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("lat", point.latitude.to_string()),
                ("lon", point.longitude.to_string()),
                ("format", String::from("jsonv2")),
                ("zoom", String::from("10")),
                ("addressdetails", String::from("1")),
            ]);

        let resp = fetch_json::<ReverseResponse>(req).await?;

        if let Some(error) = resp.error {
            return Err(PortError::UnusableResponse(error));
        }

        let address = resp.address.unwrap_or_default();

        // The locality lands in city, town, or village depending on size.
        let city = address.city.or(address.town).or(address.village);

        let guess = PlaceGuess {
            region: address.state,
            city,
        };

        if guess.is_empty() {
            return Err(PortError::UnusableResponse(String::from(
                "reverse result names neither state nor locality",
            )));
        }

        Ok(guess)
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
