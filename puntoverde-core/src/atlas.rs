//! Static geographic tables and the coordinate classifier.

use crate::model::{BoundingBox, Coordinate, Region, RegionId, SubLocation};

/// Classification result: a region, optionally refined to a known city.
#[derive(Debug, Clone, Copy)]
pub struct RegionMatch<'atlas> {
    /// Region whose bounding box contains the point.
    pub region: &'atlas Region,
    /// First sublocation of that region whose radius covers the point.
    pub sublocation: Option<&'atlas SubLocation>,
}

/// Lookup tables mapping coordinates and free-text names to regions.
///
/// Loaded once at startup and never mutated. The built-in [`mexico`]
/// tables keep the rough boxes of the original directory data: several
/// state boxes overlap and parts of the territory fall in no box at all.
/// Overlaps are resolved by table order, gaps classify to nothing.
///
/// [`mexico`]: RegionAtlas::mexico
pub struct RegionAtlas {
    regions: Vec<Region>,
    sublocations: Vec<SubLocation>,
}

impl RegionAtlas {
    /// Build an atlas from explicit tables, preserving their order.
    #[must_use]
    pub fn new(regions: Vec<Region>, sublocations: Vec<SubLocation>) -> Self {
        Self {
            regions,
            sublocations,
        }
    }

    /// Built-in tables for the 32 Mexican federal entities and major cities.
    #[must_use]
    pub fn mexico() -> Self {
        Self::new(mexico_regions(), mexico_sublocations())
    }

    /// All regions in table order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by its identifier.
    #[must_use]
    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|region| &region.id == id)
    }

    /// Classify a coordinate into a region, optionally refined to a city.
    ///
    /// Linear scan in table order; the first containing box wins. Returns
    /// `None` when no box contains the point rather than guessing a nearest
    /// region. Radius checks use raw degree-space distance.
    #[must_use]
    pub fn classify(&self, point: Coordinate) -> Option<RegionMatch<'_>> {
        let region = self
            .regions
            .iter()
            .find(|candidate| candidate.bounds.contains(point))?;

        let sublocation = self
            .sublocations
            .iter()
            .filter(|city| city.region == region.id)
            .find(|city| city.center.degree_distance(point) <= city.radius_degrees);

        Some(RegionMatch {
            region,
            sublocation,
        })
    }

    /// Match a free-text region name against the table.
    ///
    /// Case- and diacritic-insensitive, with a short alias list for the
    /// capital ("CDMX", "Mexico City", "Distrito Federal") and the state of
    /// Mexico, since geocoders disagree on how to spell both.
    #[must_use]
    pub fn region_by_name(&self, name: &str) -> Option<&Region> {
        let normalized = normalize(name);
        let canonical = match normalized.as_str() {
            "cdmx" | "mexico city" | "distrito federal" => "ciudad de mexico",
            "estado de mexico" | "state of mexico" => "mexico",
            other => other,
        };
        self.regions
            .iter()
            .find(|region| normalize(&region.name) == canonical)
    }

    /// Match a free-text city name against the sublocation table.
    #[must_use]
    pub fn sublocation_by_name(&self, name: &str) -> Option<&SubLocation> {
        let normalized = normalize(name);
        self.sublocations
            .iter()
            .find(|city| normalize(&city.name) == normalized)
    }
}

/// Lowercase and strip the Spanish diacritics that show up in place names.
fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|character| match character {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' | 'Ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn seed_region(
    id: &str,
    name: &str,
    min_latitude: f64,
    max_latitude: f64,
    min_longitude: f64,
    max_longitude: f64,
) -> Region {
    Region {
        id: RegionId(id.to_owned()),
        name: name.to_owned(),
        bounds: BoundingBox::new(min_latitude, max_latitude, min_longitude, max_longitude),
    }
}

fn seed_city(
    name: &str,
    region: &str,
    latitude: f64,
    longitude: f64,
    radius_degrees: f64,
) -> SubLocation {
    SubLocation {
        name: name.to_owned(),
        region: RegionId(region.to_owned()),
        center: Coordinate::new(latitude, longitude),
        radius_degrees,
    }
}

/// Approximate bounding boxes for the 32 federal entities.
///
/// Alphabetical, which conveniently puts Ciudad de México ahead of the state
/// of México in the overlap over the Valle de México.
fn mexico_regions() -> Vec<Region> {
    vec![
        seed_region("aguascalientes", "Aguascalientes", 21.6, 22.5, -102.9, -101.8),
        seed_region("baja-california", "Baja California", 28.0, 32.7, -118.4, -112.8),
        seed_region("baja-california-sur", "Baja California Sur", 22.8, 28.0, -115.3, -109.4),
        seed_region("campeche", "Campeche", 17.8, 20.9, -92.5, -89.1),
        seed_region("chiapas", "Chiapas", 14.5, 17.9, -94.1, -90.3),
        seed_region("chihuahua", "Chihuahua", 25.5, 31.8, -109.1, -103.3),
        seed_region("ciudad-de-mexico", "Ciudad de México", 19.0, 19.6, -99.4, -98.9),
        seed_region("coahuila", "Coahuila", 24.5, 29.9, -103.9, -99.8),
        seed_region("colima", "Colima", 18.6, 19.5, -104.8, -103.5),
        seed_region("durango", "Durango", 22.3, 26.8, -107.2, -102.5),
        seed_region("guanajuato", "Guanajuato", 19.9, 21.8, -102.1, -99.7),
        seed_region("guerrero", "Guerrero", 16.3, 18.9, -102.2, -98.0),
        seed_region("hidalgo", "Hidalgo", 19.6, 21.4, -99.9, -97.9),
        seed_region("jalisco", "Jalisco", 18.9, 22.7, -105.7, -101.5),
        seed_region("mexico", "México", 18.3, 20.3, -100.6, -98.6),
        seed_region("michoacan", "Michoacán", 17.9, 20.4, -103.7, -100.0),
        seed_region("morelos", "Morelos", 18.3, 19.1, -99.5, -98.6),
        seed_region("nayarit", "Nayarit", 20.6, 23.1, -105.8, -103.7),
        seed_region("nuevo-leon", "Nuevo León", 23.2, 27.8, -101.2, -98.4),
        seed_region("oaxaca", "Oaxaca", 15.6, 18.7, -98.6, -93.9),
        seed_region("puebla", "Puebla", 17.9, 20.8, -99.1, -96.7),
        seed_region("queretaro", "Querétaro", 20.0, 21.7, -100.6, -99.0),
        seed_region("quintana-roo", "Quintana Roo", 17.9, 21.6, -89.3, -86.7),
        seed_region("san-luis-potosi", "San Luis Potosí", 21.2, 24.5, -102.3, -98.3),
        seed_region("sinaloa", "Sinaloa", 22.5, 27.0, -109.5, -105.4),
        seed_region("sonora", "Sonora", 26.3, 32.5, -115.0, -108.4),
        seed_region("tabasco", "Tabasco", 17.3, 18.7, -94.5, -90.9),
        seed_region("tamaulipas", "Tamaulipas", 22.2, 27.7, -100.2, -97.1),
        seed_region("tlaxcala", "Tlaxcala", 19.1, 19.7, -98.7, -97.6),
        seed_region("veracruz", "Veracruz", 17.1, 22.5, -98.7, -93.6),
        seed_region("yucatan", "Yucatán", 19.5, 21.6, -90.4, -87.5),
        seed_region("zacatecas", "Zacatecas", 21.0, 25.1, -104.4, -100.7),
    ]
}

/// Major cities with rough center points and match radii in degrees.
fn mexico_sublocations() -> Vec<SubLocation> {
    vec![
        seed_city("Aguascalientes", "aguascalientes", 21.8853, -102.2916, 0.20),
        seed_city("Tijuana", "baja-california", 32.5149, -117.0382, 0.20),
        seed_city("Mexicali", "baja-california", 32.6245, -115.4523, 0.20),
        seed_city("La Paz", "baja-california-sur", 24.1426, -110.3128, 0.15),
        seed_city("Tuxtla Gutiérrez", "chiapas", 16.7516, -93.1161, 0.15),
        seed_city("San Cristóbal de las Casas", "chiapas", 16.7370, -92.6376, 0.12),
        seed_city("Chihuahua", "chihuahua", 28.6330, -106.0691, 0.20),
        seed_city("Ciudad Juárez", "chihuahua", 31.6904, -106.4245, 0.20),
        seed_city("Ciudad de México", "ciudad-de-mexico", 19.4326, -99.1332, 0.30),
        seed_city("Saltillo", "coahuila", 25.4383, -100.9737, 0.20),
        seed_city("Torreón", "coahuila", 25.5428, -103.4068, 0.20),
        seed_city("León", "guanajuato", 21.1250, -101.6860, 0.20),
        seed_city("Acapulco", "guerrero", 16.8531, -99.8237, 0.20),
        seed_city("Pachuca", "hidalgo", 20.1011, -98.7591, 0.15),
        seed_city("Guadalajara", "jalisco", 20.6597, -103.3496, 0.25),
        seed_city("Toluca", "mexico", 19.2826, -99.6557, 0.20),
        seed_city("Morelia", "michoacan", 19.7060, -101.1950, 0.20),
        seed_city("Cuernavaca", "morelos", 18.9186, -99.2342, 0.15),
        seed_city("Monterrey", "nuevo-leon", 25.6866, -100.3161, 0.25),
        seed_city("Oaxaca de Juárez", "oaxaca", 17.0732, -96.7266, 0.15),
        seed_city("Puebla", "puebla", 19.0414, -98.2063, 0.20),
        seed_city("Querétaro", "queretaro", 20.5888, -100.3899, 0.20),
        seed_city("Cancún", "quintana-roo", 21.1619, -86.8515, 0.20),
        seed_city("San Luis Potosí", "san-luis-potosi", 22.1565, -100.9855, 0.20),
        seed_city("Culiacán", "sinaloa", 24.8091, -107.3940, 0.20),
        seed_city("Hermosillo", "sonora", 29.0730, -110.9559, 0.20),
        seed_city("Villahermosa", "tabasco", 17.9895, -92.9475, 0.15),
        seed_city("Veracruz", "veracruz", 19.1738, -96.1342, 0.20),
        seed_city("Xalapa", "veracruz", 19.5438, -96.9102, 0.15),
        seed_city("Mérida", "yucatan", 20.9674, -89.5926, 0.20),
        seed_city("Zacatecas", "zacatecas", 22.7709, -102.5833, 0.15),
    ]
}

#[cfg(test)]
mod tests {
    use super::RegionAtlas;
    use crate::model::Coordinate;

    #[test]
    fn tuxtla_coordinate_classifies_to_chiapas_with_city() {
        let atlas = RegionAtlas::mexico();

        let matched = atlas
            .classify(Coordinate::new(16.7569, -93.1292))
            .expect("coordinate lies inside the Chiapas box");

        assert_eq!(matched.region.id.0, "chiapas");
        let city = matched.sublocation.expect("within the Tuxtla radius");
        assert_eq!(city.name, "Tuxtla Gutiérrez");
    }

    #[test]
    fn mid_atlantic_coordinate_matches_no_region() {
        let atlas = RegionAtlas::mexico();
        assert!(atlas.classify(Coordinate::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn point_outside_every_city_radius_keeps_region_only() {
        let atlas = RegionAtlas::mexico();

        let matched = atlas
            .classify(Coordinate::new(15.3, -92.5))
            .expect("rural Chiapas coordinate");

        assert_eq!(matched.region.id.0, "chiapas");
        assert!(matched.sublocation.is_none());
    }

    #[test]
    fn valle_de_mexico_overlap_resolves_by_table_order() {
        let atlas = RegionAtlas::mexico();

        // Inside both the capital's box and the state of Mexico's box; the
        // capital comes first in the table and wins.
        let matched = atlas
            .classify(Coordinate::new(19.3, -99.15))
            .expect("point inside overlapping boxes");

        assert_eq!(matched.region.id.0, "ciudad-de-mexico");
    }

    #[test]
    fn region_names_match_without_diacritics_or_case() {
        let atlas = RegionAtlas::mexico();

        assert_eq!(
            atlas.region_by_name("Yucatán").map(|region| region.id.0.as_str()),
            Some("yucatan")
        );
        assert_eq!(
            atlas.region_by_name("yucatan").map(|region| region.id.0.as_str()),
            Some("yucatan")
        );
        assert_eq!(
            atlas.region_by_name("NUEVO LEON").map(|region| region.id.0.as_str()),
            Some("nuevo-leon")
        );
        assert!(atlas.region_by_name("Texas").is_none());
    }

    #[test]
    fn capital_aliases_resolve_to_ciudad_de_mexico() {
        let atlas = RegionAtlas::mexico();

        for alias in ["CDMX", "Mexico City", "Distrito Federal"] {
            assert_eq!(
                atlas.region_by_name(alias).map(|region| region.id.0.as_str()),
                Some("ciudad-de-mexico"),
                "alias {alias} should resolve to the capital"
            );
        }

        assert_eq!(
            atlas
                .region_by_name("Estado de México")
                .map(|region| region.id.0.as_str()),
            Some("mexico")
        );
    }

    #[test]
    fn city_names_match_without_diacritics() {
        let atlas = RegionAtlas::mexico();

        let city = atlas
            .sublocation_by_name("tuxtla gutierrez")
            .expect("known city");
        assert_eq!(city.region.0, "chiapas");
        assert!(atlas.sublocation_by_name("Springfield").is_none());
    }
}
