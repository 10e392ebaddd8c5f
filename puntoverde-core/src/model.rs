//! Domain data structures for regions, resolved locations, and recycling centers.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// A latitude/longitude pair in decimal degrees.
pub struct Coordinate {
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
}

impl Coordinate {
    /// Construct a coordinate from decimal degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Straight-line distance to another coordinate in raw degree space.
    ///
    /// Not geodesic distance. Good enough for radius checks and nearest-first
    /// ordering within one country at Mexican latitudes.
    #[must_use]
    pub fn degree_distance(self, other: Self) -> f64 {
        let delta_lat = self.latitude - other.latitude;
        let delta_lon = self.longitude - other.longitude;
        delta_lat.hypot(delta_lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Slug identifier for a region (Mexican state), e.g. `"chiapas"`.
pub struct RegionId(pub String);

impl fmt::Display for RegionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Rectangular latitude/longitude range covering a region.
pub struct BoundingBox {
    /// Southern edge.
    pub min_latitude: f64,
    /// Northern edge.
    pub max_latitude: f64,
    /// Western edge.
    pub min_longitude: f64,
    /// Eastern edge.
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Construct a box from its four edges.
    #[must_use]
    pub const fn new(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Whether the point lies inside the box, edges inclusive.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.latitude >= self.min_latitude
            && point.latitude <= self.max_latitude
            && point.longitude >= self.min_longitude
            && point.longitude <= self.max_longitude
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// First-level administrative area (state) with approximate bounds.
///
/// Boxes are deliberately rough: they may overlap each other and need not
/// cover the whole national territory. Overlaps are resolved by table order.
pub struct Region {
    /// Unique slug identifier.
    pub id: RegionId,
    /// Human-friendly display name.
    pub name: String,
    /// Approximate rectangular bounds.
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Named city used to refine a region match by radius proximity.
///
/// Only consulted after a region box already matched; never standalone.
pub struct SubLocation {
    /// Display name of the city.
    pub name: String,
    /// Region the city belongs to.
    pub region: RegionId,
    /// Approximate city center.
    pub center: Coordinate,
    /// Match radius around the center, in degrees (an approximation, not meters).
    pub radius_degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Confidence marker for a resolved location. Informational, not an error bound.
pub enum Precision {
    /// An external geocoder confirmed the region.
    High,
    /// Derived from a device coordinate via the bounding tables.
    Medium,
    /// IP-based estimate or the hard-coded default.
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Which strategy of the fallback chain produced a resolved location.
pub enum LocationSource {
    /// Coordinate acquired from the device's geolocation capability.
    DeviceGps,
    /// A reverse-geocoding service named the place.
    ReverseGeocoding,
    /// Approximate position inferred from the caller's network address.
    IpGeolocation,
    /// Hard-coded default used when every other source failed.
    ManualDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Immutable outcome of one resolution attempt.
///
/// Consumed by callers to center a map and slice the center directory.
/// Never persisted.
pub struct ResolvedLocation {
    /// Resolved region identifier.
    pub region: RegionId,
    /// Display name of the resolved region.
    pub region_name: String,
    /// Optional city refinement.
    pub sublocation: Option<String>,
    /// Coordinate the resolution is anchored to.
    pub coordinate: Coordinate,
    /// Confidence in the result.
    pub precision: Precision,
    /// Strategy that produced the result.
    pub source: LocationSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Materials a recycling center accepts.
pub enum Material {
    /// Paper of any kind.
    Paper,
    /// Cardboard and carton packaging.
    Cardboard,
    /// PET and other plastics.
    Plastic,
    /// Glass bottles and jars.
    Glass,
    /// Aluminium and other metal scrap.
    Metal,
    /// E-waste: appliances, boards, cables.
    Electronics,
    /// Compostable organic waste.
    Organic,
    /// Batteries and small accumulators.
    Batteries,
    /// Center-specific additional material.
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Which data source populated a directory entry.
pub enum Provenance {
    /// Municipal or state environmental agency listings.
    Official,
    /// Submitted by community members.
    Community,
    /// Carried over from an earlier directory import.
    Imported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Weekly opening hours of a recycling center.
pub struct OpeningHours {
    /// Free-text day span, e.g. `"Lun-Vie"`.
    pub days: String,
    /// Opening time.
    pub opens: NaiveTime,
    /// Closing time.
    pub closes: NaiveTime,
}

impl fmt::Display for OpeningHours {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} {}-{}",
            self.days,
            self.opens.format("%H:%M"),
            self.closes.format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A recycling center as listed in the static directory.
pub struct DirectoryEntry {
    /// Display name of the center.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Region the center is listed under.
    pub region: RegionId,
    /// Location of the center.
    pub coordinate: Coordinate,
    /// Materials the center accepts.
    pub materials: Vec<Material>,
    /// Weekly opening hours.
    pub hours: OpeningHours,
    /// Contact phone number, if published.
    pub phone: Option<String>,
    /// Data source the entry came from.
    pub provenance: Provenance,
}
