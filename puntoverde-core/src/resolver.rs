//! Fallback chain that turns external location hints into a resolved location.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::atlas::{RegionAtlas, RegionMatch};
use crate::model::{Coordinate, LocationSource, Precision, RegionId, ResolvedLocation};
use crate::ports::{IpLookupPort, PlaceGuess, PositionPort, ReverseGeocodePort};

/// Port implementations the resolver draws on, in chain order.
///
/// Any of them may be absent; an absent port simply skips its step. Reverse
/// geocoders are tried in list order, each at most once per resolution.
pub struct ResolverPorts {
    /// Device position source, when the host offers one.
    pub position: Option<Arc<dyn PositionPort>>,
    /// Reverse-geocoding services in priority order.
    pub geocoders: Vec<Arc<dyn ReverseGeocodePort>>,
    /// IP geolocation service.
    pub ip_lookup: Option<Arc<dyn IpLookupPort>>,
}

/// One-shot location resolution over a fixed-priority fallback chain.
///
/// Each call to [`resolve`] walks device position, reverse geocoding, IP
/// lookup, and finally the hard-coded default. There are no retries and no
/// concurrent fan-out: every external call is awaited once and any failure
/// moves the chain along. Nothing is cached between calls.
///
/// [`resolve`]: LocationResolver::resolve
pub struct LocationResolver {
    atlas: RegionAtlas,
    ports: ResolverPorts,
}

impl LocationResolver {
    /// Create a resolver over the given atlas and ports.
    #[must_use]
    pub fn new(atlas: RegionAtlas, ports: ResolverPorts) -> Self {
        Self { atlas, ports }
    }

    /// The atlas backing this resolver.
    #[must_use]
    pub fn atlas(&self) -> &RegionAtlas {
        &self.atlas
    }

    /// Resolve the caller's location.
    ///
    /// Infallible by construction: exhausting the chain yields the manual
    /// default rather than an error.
    pub async fn resolve(&self) -> ResolvedLocation {
        if let Some(position) = &self.ports.position {
            match position.current_position().await {
                Ok(point) => {
                    for geocoder in &self.ports.geocoders {
                        match geocoder.reverse(point).await {
                            Ok(guess) => {
                                if let Some(resolved) = self.from_guess(point, &guess) {
                                    return resolved;
                                }
                                debug!(
                                    service = geocoder.name(),
                                    ?guess,
                                    "guess names no known region or city"
                                );
                            }
                            Err(error) => {
                                debug!(
                                    service = geocoder.name(),
                                    %error,
                                    "reverse geocoding failed"
                                );
                            }
                        }
                    }

                    if let Some(matched) = self.atlas.classify(point) {
                        return resolved_from_match(
                            &matched,
                            point,
                            Precision::Medium,
                            LocationSource::DeviceGps,
                        );
                    }
                    debug!(%point, "device coordinate classifies into no known region");
                }
                Err(error) => {
                    debug!(%error, "device position unavailable");
                }
            }
        }

        if let Some(ip_lookup) = &self.ports.ip_lookup {
            match ip_lookup.locate().await {
                Ok(estimate) => {
                    let guess = PlaceGuess {
                        region: estimate.region,
                        city: estimate.city,
                    };

                    if let Some(mut resolved) = self.from_guess(estimate.coordinate, &guess) {
                        resolved.precision = Precision::Low;
                        resolved.source = LocationSource::IpGeolocation;
                        return resolved;
                    }

                    if let Some(matched) = self.atlas.classify(estimate.coordinate) {
                        return resolved_from_match(
                            &matched,
                            estimate.coordinate,
                            Precision::Low,
                            LocationSource::IpGeolocation,
                        );
                    }
                    debug!(
                        service = ip_lookup.name(),
                        "IP estimate classifies into no known region"
                    );
                }
                Err(error) => {
                    debug!(service = ip_lookup.name(), %error, "IP geolocation failed");
                }
            }
        }

        warn!("location chain exhausted, using the manual default");
        manual_default()
    }

    /// Anchor a free-text place guess to the atlas.
    ///
    /// A recognizable region wins outright; failing that, a known city alone
    /// still pins its region. Anything else is unusable and returns `None`.
    fn from_guess(&self, point: Coordinate, guess: &PlaceGuess) -> Option<ResolvedLocation> {
        if let Some(region) = guess
            .region
            .as_deref()
            .and_then(|name| self.atlas.region_by_name(name))
        {
            // Prefer the canonical spelling when the city matches a known
            // sublocation of the same region; otherwise keep the raw text.
            let sublocation = guess.city.as_deref().map(|city| {
                self.atlas
                    .sublocation_by_name(city)
                    .filter(|known| known.region == region.id)
                    .map_or_else(|| city.to_owned(), |known| known.name.clone())
            });

            return Some(ResolvedLocation {
                region: region.id.clone(),
                region_name: region.name.clone(),
                sublocation,
                coordinate: point,
                precision: Precision::High,
                source: LocationSource::ReverseGeocoding,
            });
        }

        let known_city = guess
            .city
            .as_deref()
            .and_then(|city| self.atlas.sublocation_by_name(city))?;
        let region = self.atlas.region(&known_city.region)?;

        Some(ResolvedLocation {
            region: region.id.clone(),
            region_name: region.name.clone(),
            sublocation: Some(known_city.name.clone()),
            coordinate: point,
            precision: Precision::High,
            source: LocationSource::ReverseGeocoding,
        })
    }
}

/// Terminal fallback when every source fails: downtown Mexico City.
#[must_use]
pub fn manual_default() -> ResolvedLocation {
    ResolvedLocation {
        region: RegionId(String::from("ciudad-de-mexico")),
        region_name: String::from("Ciudad de México"),
        sublocation: None,
        coordinate: Coordinate::new(19.4326, -99.1332),
        precision: Precision::Low,
        source: LocationSource::ManualDefault,
    }
}

fn resolved_from_match(
    matched: &RegionMatch<'_>,
    point: Coordinate,
    precision: Precision,
    source: LocationSource,
) -> ResolvedLocation {
    ResolvedLocation {
        region: matched.region.id.clone(),
        region_name: matched.region.name.clone(),
        sublocation: matched.sublocation.map(|city| city.name.clone()),
        coordinate: point,
        precision,
        source,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::{LocationResolver, ResolverPorts, manual_default};
    use crate::atlas::RegionAtlas;
    use crate::model::{Coordinate, LocationSource, Precision};
    use crate::ports::{
        IpLocation, IpLookupPort, PlaceGuess, PortError, PositionPort, ReverseGeocodePort,
        StaticPosition,
    };

    struct DeniedPosition;

    #[async_trait]
    impl PositionPort for DeniedPosition {
        async fn current_position(&self) -> Result<Coordinate, PortError> {
            Err(PortError::Unavailable(String::from("permission denied")))
        }
    }

    struct FailingGeocoder;

    #[async_trait]
    impl ReverseGeocodePort for FailingGeocoder {
        fn name(&self) -> &str {
            "failing"
        }

        async fn reverse(&self, _point: Coordinate) -> Result<PlaceGuess, PortError> {
            Err(PortError::UnusableResponse(String::from("empty body")))
        }
    }

    struct FixedGeocoder {
        region: Option<&'static str>,
        city: Option<&'static str>,
    }

    #[async_trait]
    impl ReverseGeocodePort for FixedGeocoder {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn reverse(&self, _point: Coordinate) -> Result<PlaceGuess, PortError> {
            Ok(PlaceGuess {
                region: self.region.map(str::to_owned),
                city: self.city.map(str::to_owned),
            })
        }
    }

    struct FailingIp;

    #[async_trait]
    impl IpLookupPort for FailingIp {
        fn name(&self) -> &str {
            "failing-ip"
        }

        async fn locate(&self) -> Result<IpLocation, PortError> {
            Err(PortError::Unavailable(String::from("service down")))
        }
    }

    struct FixedIp {
        coordinate: Coordinate,
        region: Option<&'static str>,
        city: Option<&'static str>,
    }

    #[async_trait]
    impl IpLookupPort for FixedIp {
        fn name(&self) -> &str {
            "fixed-ip"
        }

        async fn locate(&self) -> Result<IpLocation, PortError> {
            Ok(IpLocation {
                coordinate: self.coordinate,
                region: self.region.map(str::to_owned),
                city: self.city.map(str::to_owned),
            })
        }
    }

    fn resolver(ports: ResolverPorts) -> LocationResolver {
        LocationResolver::new(RegionAtlas::mexico(), ports)
    }

    #[tokio::test]
    async fn gps_with_failing_geocoders_falls_back_to_classifier() {
        let tuxtla = Coordinate::new(16.7569, -93.1292);
        let subject = resolver(ResolverPorts {
            position: Some(Arc::new(StaticPosition(tuxtla))),
            geocoders: vec![Arc::new(FailingGeocoder), Arc::new(FailingGeocoder)],
            ip_lookup: None,
        });

        let resolved = subject.resolve().await;

        assert_eq!(resolved.region.0, "chiapas");
        assert_eq!(resolved.sublocation.as_deref(), Some("Tuxtla Gutiérrez"));
        assert_eq!(resolved.precision, Precision::Medium);
        assert_eq!(resolved.source, LocationSource::DeviceGps);
    }

    #[tokio::test]
    async fn later_geocoder_wins_after_earlier_failure() {
        let merida = Coordinate::new(20.97, -89.59);
        let subject = resolver(ResolverPorts {
            position: Some(Arc::new(StaticPosition(merida))),
            geocoders: vec![
                Arc::new(FailingGeocoder),
                Arc::new(FixedGeocoder {
                    region: Some("Yucatán"),
                    city: Some("Mérida"),
                }),
            ],
            ip_lookup: None,
        });

        let resolved = subject.resolve().await;

        assert_eq!(resolved.region.0, "yucatan");
        assert_eq!(resolved.region_name, "Yucatán");
        assert_eq!(resolved.sublocation.as_deref(), Some("Mérida"));
        assert_eq!(resolved.precision, Precision::High);
        assert_eq!(resolved.source, LocationSource::ReverseGeocoding);
    }

    #[tokio::test]
    async fn unavailable_position_skips_straight_to_ip_lookup() {
        // The geocoder would succeed if consulted; the IpGeolocation source
        // tag proves the chain never reached it.
        let subject = resolver(ResolverPorts {
            position: Some(Arc::new(DeniedPosition)),
            geocoders: vec![Arc::new(FixedGeocoder {
                region: Some("Jalisco"),
                city: None,
            })],
            ip_lookup: Some(Arc::new(FixedIp {
                coordinate: Coordinate::new(25.67, -100.31),
                region: Some("Nuevo León"),
                city: Some("Monterrey"),
            })),
        });

        let resolved = subject.resolve().await;

        assert_eq!(resolved.region.0, "nuevo-leon");
        assert_eq!(resolved.sublocation.as_deref(), Some("Monterrey"));
        assert_eq!(resolved.precision, Precision::Low);
        assert_eq!(resolved.source, LocationSource::IpGeolocation);
    }

    #[tokio::test]
    async fn ip_estimate_without_hints_is_classified_by_coordinate() {
        let subject = resolver(ResolverPorts {
            position: None,
            geocoders: Vec::new(),
            ip_lookup: Some(Arc::new(FixedIp {
                coordinate: Coordinate::new(20.66, -103.35),
                region: None,
                city: None,
            })),
        });

        let resolved = subject.resolve().await;

        assert_eq!(resolved.region.0, "jalisco");
        assert_eq!(resolved.sublocation.as_deref(), Some("Guadalajara"));
        assert_eq!(resolved.precision, Precision::Low);
        assert_eq!(resolved.source, LocationSource::IpGeolocation);
    }

    #[tokio::test]
    async fn exhausted_chain_returns_manual_default() {
        let subject = resolver(ResolverPorts {
            position: Some(Arc::new(DeniedPosition)),
            geocoders: vec![Arc::new(FailingGeocoder)],
            ip_lookup: Some(Arc::new(FailingIp)),
        });

        let resolved = subject.resolve().await;

        assert_eq!(resolved, manual_default());
        assert_eq!(resolved.precision, Precision::Low);
        assert_eq!(resolved.source, LocationSource::ManualDefault);
    }

    #[tokio::test]
    async fn unclassifiable_coordinate_continues_down_the_chain() {
        // Mid-Atlantic point: inside zero boxes, so the device step yields
        // nothing and the chain ends at the manual default.
        let subject = resolver(ResolverPorts {
            position: Some(Arc::new(StaticPosition(Coordinate::new(0.0, 0.0)))),
            geocoders: vec![Arc::new(FailingGeocoder)],
            ip_lookup: None,
        });

        let resolved = subject.resolve().await;

        assert_eq!(resolved.region.0, "ciudad-de-mexico");
        assert_eq!(resolved.source, LocationSource::ManualDefault);
    }
}
