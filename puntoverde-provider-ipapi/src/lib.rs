//! IP geolocation provider backed by ip-api.com.
//!
//! The service infers a coarse position from the caller's network address;
//! no request payload is needed.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use puntoverde_core::{
    model::Coordinate,
    ports::{IpLocation, IpLookupPort, PortError},
};

const BASE_URL: &str = "http://ip-api.com";
const FIELDS: &str = "status,message,regionName,city,lat,lon";

/// Response from /json
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    // "success" or "fail"; failures carry a message instead of data.
    status: String,

    #[serde(default)]
    message: Option<String>,

    #[serde(rename = "regionName", default)]
    region_name: Option<String>,

    #[serde(default)]
    city: Option<String>,

    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// IP geolocation lookup talking to ip-api.com.
pub struct IpApiLookup {
    client: Client,
    base_url: String,
}

impl IpApiLookup {
    /// Create a lookup against the public ip-api.com endpoint.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a lookup against a specific base URL, for tests.
    #[must_use]
    pub fn with_base_url<U: Into<String>>(client: Client, base_url: U) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl IpLookupPort for IpApiLookup {
    fn name(&self) -> &str {
        "ip-api"
    }

    async fn locate(&self) -> Result<IpLocation, PortError> {
        let req = self
            .client
            .get(format!("{}/json", self.base_url))
            .query(&[("fields", FIELDS)]);

        let resp = fetch_json::<IpApiResponse>(req).await?;

        if resp.status != "success" {
            return Err(PortError::Unavailable(
                resp.message
                    .unwrap_or_else(|| String::from("lookup refused")),
            ));
        }

        let (Some(lat), Some(lon)) = (resp.lat, resp.lon) else {
            return Err(PortError::UnusableResponse(String::from(
                "response lacks a coordinate",
            )));
        };

        Ok(IpLocation {
            coordinate: Coordinate::new(lat, lon),
            region: resp.region_name,
            city: resp.city,
        })
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
