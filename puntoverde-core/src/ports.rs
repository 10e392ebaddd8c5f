//! Traits describing external location sources and shared helper types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::Coordinate;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to external location sources.
///
/// Every variant is recoverable by design: the resolver treats each one as a
/// cue to try the next step of its fallback chain.
pub enum PortError {
    /// Network layer failed or timed out.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The capability is not present or permission was denied.
    #[error("Capability unavailable: {0}")]
    Unavailable(String),
    /// The service answered, but the payload carried nothing usable.
    #[error("Unusable response: {0}")]
    UnusableResponse(String),
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Default)]
/// Best-effort place guess returned by a reverse-geocoding service.
///
/// Both fields are free text; a guess carrying neither a region nor a city
/// is useless and providers report it as [`PortError::UnusableResponse`].
pub struct PlaceGuess {
    /// First-level administrative area, as the service spells it.
    pub region: Option<String>,
    /// City or locality, as the service spells it.
    pub city: Option<String>,
}

impl PlaceGuess {
    /// Whether the guess carries neither a region nor a city.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let blank = |field: &Option<String>| {
            field
                .as_deref()
                .map_or(true, |text| text.trim().is_empty())
        };
        blank(&self.region) && blank(&self.city)
    }
}

#[derive(Debug, Clone)]
/// Approximate position inferred from the caller's network address.
pub struct IpLocation {
    /// Estimated coordinate.
    pub coordinate: Coordinate,
    /// Region hint, as the service spells it.
    pub region: Option<String>,
    /// City hint, as the service spells it.
    pub city: Option<String>,
}

#[async_trait]
/// Source of the device's current coordinate (GPS or a stand-in for it).
pub trait PositionPort: Send + Sync {
    /// Acquire the current coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Unavailable`] when the capability is missing or
    /// denied, or another [`PortError`] when acquisition fails.
    async fn current_position(&self) -> Result<Coordinate, PortError>;
}

#[async_trait]
/// A reverse-geocoding service turning a coordinate into a place guess.
pub trait ReverseGeocodePort: Send + Sync {
    /// Short service name used in logs.
    fn name(&self) -> &str;

    /// Look up the place around a coordinate.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the response names
    /// neither a region nor a city.
    async fn reverse(&self, point: Coordinate) -> Result<PlaceGuess, PortError>;
}

#[async_trait]
/// An IP-geolocation service. Consumes no input; the service infers the
/// position from the caller's network address.
pub trait IpLookupPort: Send + Sync {
    /// Short service name used in logs.
    fn name(&self) -> &str;

    /// Estimate the caller's position.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the response lacks
    /// a coordinate.
    async fn locate(&self) -> Result<IpLocation, PortError>;
}

/// Position source reporting a fixed coordinate, for manually supplied
/// positions in clients without a geolocation capability.
pub struct StaticPosition(pub Coordinate);

#[async_trait]
impl PositionPort for StaticPosition {
    async fn current_position(&self) -> Result<Coordinate, PortError> {
        Ok(self.0)
    }
}
