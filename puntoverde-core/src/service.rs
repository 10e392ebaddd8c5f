//! High-level service facade combining resolution and the center directory.

use crate::directory::Directory;
use crate::model::{Coordinate, DirectoryEntry, RegionId, ResolvedLocation};
use crate::resolver::LocationResolver;

/// Public entry point for resolving a location and browsing centers near it.
pub struct PuntoVerdeService {
    resolver: LocationResolver,
    directory: Directory,
}

impl PuntoVerdeService {
    /// Create a new service over a resolver and a directory.
    #[must_use]
    pub fn new(resolver: LocationResolver, directory: Directory) -> Self {
        Self {
            resolver,
            directory,
        }
    }

    /// Resolve the caller's location through the fallback chain.
    ///
    /// Always produces a location; total failure yields the manual default.
    pub async fn resolve_location(&self) -> ResolvedLocation {
        self.resolver.resolve().await
    }

    /// All known regions and their display names, in atlas table order.
    #[must_use]
    pub fn regions(&self) -> Vec<(RegionId, String)> {
        self.resolver
            .atlas()
            .regions()
            .iter()
            .map(|region| (region.id.clone(), region.name.clone()))
            .collect()
    }

    /// Centers listed under a region.
    #[must_use]
    pub fn centers_in(&self, region: &RegionId) -> &[DirectoryEntry] {
        self.directory.for_region(region)
    }

    /// A region's centers ordered by distance from a coordinate.
    #[must_use]
    pub fn centers_near(&self, region: &RegionId, from: Coordinate) -> Vec<&DirectoryEntry> {
        self.directory.nearest(region, from)
    }

    /// Every center in the directory, all regions.
    #[must_use]
    pub fn all_centers(&self) -> Vec<&DirectoryEntry> {
        self.directory.all()
    }
}
