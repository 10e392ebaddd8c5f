//! Static directory of recycling centers keyed by region.

use std::collections::HashMap;

use chrono::NaiveTime;

use crate::model::{
    Coordinate, DirectoryEntry, Material, OpeningHours, Provenance, RegionId,
};

/// Read-only directory of recycling centers, one canonical table keyed by
/// region. Built once at startup from seed data and never mutated.
pub struct Directory {
    by_region: HashMap<RegionId, Vec<DirectoryEntry>>,
}

impl Directory {
    /// Group a flat list of entries by region, preserving list order within
    /// each region.
    #[must_use]
    pub fn new(entries: Vec<DirectoryEntry>) -> Self {
        let mut by_region: HashMap<RegionId, Vec<DirectoryEntry>> = HashMap::new();
        for entry in entries {
            by_region.entry(entry.region.clone()).or_default().push(entry);
        }
        Self { by_region }
    }

    /// Built-in seed directory covering the larger Mexican cities.
    #[must_use]
    pub fn mexico() -> Self {
        Self::new(mexico_centers())
    }

    /// Entries listed under a region; empty for regions without centers.
    #[must_use]
    pub fn for_region(&self, region: &RegionId) -> &[DirectoryEntry] {
        self.by_region
            .get(region)
            .map_or(&[], Vec::as_slice)
    }

    /// Every entry across all regions.
    #[must_use]
    pub fn all(&self) -> Vec<&DirectoryEntry> {
        self.by_region.values().flatten().collect()
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_region.values().map(Vec::len).sum()
    }

    /// Whether the directory holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_region.is_empty()
    }

    /// A region's entries ordered by degree-space distance from a point.
    ///
    /// Pure caller-side transform; distance is never stored on an entry.
    #[must_use]
    pub fn nearest(&self, region: &RegionId, from: Coordinate) -> Vec<&DirectoryEntry> {
        let mut entries: Vec<&DirectoryEntry> = self.for_region(region).iter().collect();
        entries.sort_by(|left, right| {
            left.coordinate
                .degree_distance(from)
                .total_cmp(&right.coordinate.degree_distance(from))
        });
        entries
    }
}

fn hours(days: &str, opens: (u32, u32), closes: (u32, u32)) -> OpeningHours {
    OpeningHours {
        days: days.to_owned(),
        opens: NaiveTime::from_hms_opt(opens.0, opens.1, 0).expect("static opening time"),
        closes: NaiveTime::from_hms_opt(closes.0, closes.1, 0).expect("static closing time"),
    }
}

#[expect(clippy::too_many_arguments, reason = "flat seed-row constructor")]
fn seed_center(
    name: &str,
    address: &str,
    region: &str,
    latitude: f64,
    longitude: f64,
    materials: Vec<Material>,
    opening: OpeningHours,
    phone: Option<&str>,
    provenance: Provenance,
) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_owned(),
        address: address.to_owned(),
        region: RegionId(region.to_owned()),
        coordinate: Coordinate::new(latitude, longitude),
        materials,
        hours: opening,
        phone: phone.map(str::to_owned),
        provenance,
    }
}

/// Seed data merged from the municipal listings and the community
/// submissions into one table.
fn mexico_centers() -> Vec<DirectoryEntry> {
    use Material::{
        Batteries, Cardboard, Electronics, Glass, Metal, Organic, Paper, Plastic,
    };

    vec![
        seed_center(
            "Centro de Acopio Coyoacán",
            "Av. Pacífico 181, Coyoacán",
            "ciudad-de-mexico",
            19.3467,
            -99.1617,
            vec![Paper, Cardboard, Plastic, Glass],
            hours("Lun-Sab", (9, 0), (18, 0)),
            Some("55 5554 1210"),
            Provenance::Official,
        ),
        seed_center(
            "Punto Verde Reforma",
            "Paseo de la Reforma 222, Juárez",
            "ciudad-de-mexico",
            19.4284,
            -99.1557,
            vec![Plastic, Glass, Metal, Batteries],
            hours("Lun-Vie", (10, 0), (19, 0)),
            None,
            Provenance::Community,
        ),
        seed_center(
            "Reciclatrón Vallejo",
            "Av. Cien Metros 240, Nueva Vallejo",
            "ciudad-de-mexico",
            19.4839,
            -99.1523,
            vec![Electronics, Batteries],
            hours("Mar-Dom", (9, 0), (17, 0)),
            Some("55 5368 0797"),
            Provenance::Official,
        ),
        seed_center(
            "Centro de Acopio Agua Azul",
            "Calz. Independencia Sur 973, Guadalajara",
            "jalisco",
            20.6580,
            -103.3430,
            vec![Paper, Cardboard, Glass],
            hours("Lun-Vie", (8, 0), (16, 0)),
            Some("33 3619 0328"),
            Provenance::Official,
        ),
        seed_center(
            "Ecopunto Zapopan",
            "Av. Ávila Camacho 2603, Zapopan",
            "jalisco",
            20.7167,
            -103.3918,
            vec![Plastic, Metal, Electronics],
            hours("Lun-Sab", (9, 0), (18, 0)),
            None,
            Provenance::Community,
        ),
        seed_center(
            "Reciclaje San Nicolás",
            "Av. Universidad 1001, San Nicolás de los Garza",
            "nuevo-leon",
            25.7441,
            -100.3028,
            vec![Paper, Cardboard, Plastic, Metal],
            hours("Lun-Vie", (8, 0), (17, 0)),
            Some("81 8352 7740"),
            Provenance::Imported,
        ),
        seed_center(
            "Centro Verde Monterrey",
            "Av. Constitución 411 Pte., Centro",
            "nuevo-leon",
            25.6702,
            -100.3185,
            vec![Glass, Plastic, Organic],
            hours("Lun-Sab", (9, 0), (18, 0)),
            None,
            Provenance::Official,
        ),
        seed_center(
            "Centro de Acopio Tuxtla",
            "Blvd. Belisario Domínguez 1861, Tuxtla Gutiérrez",
            "chiapas",
            16.7528,
            -93.1400,
            vec![Paper, Cardboard, Plastic],
            hours("Lun-Vie", (9, 0), (17, 0)),
            Some("961 612 5511"),
            Provenance::Official,
        ),
        seed_center(
            "Recicla San Cristóbal",
            "Periférico Sur 24, San Cristóbal de las Casas",
            "chiapas",
            16.7290,
            -92.6420,
            vec![Glass, Paper, Organic],
            hours("Mie-Dom", (10, 0), (16, 0)),
            None,
            Provenance::Community,
        ),
        seed_center(
            "Acopio Angelópolis",
            "Blvd. del Niño Poblano 2510, Puebla",
            "puebla",
            19.0330,
            -98.2300,
            vec![Plastic, Glass, Batteries],
            hours("Lun-Vie", (9, 0), (18, 0)),
            None,
            Provenance::Imported,
        ),
        seed_center(
            "Punto Limpio Mérida",
            "Calle 60 491, Centro, Mérida",
            "yucatan",
            20.9710,
            -89.6190,
            vec![Paper, Cardboard, Electronics],
            hours("Lun-Sab", (8, 0), (15, 0)),
            Some("999 924 0040"),
            Provenance::Official,
        ),
        seed_center(
            "Ecocentro Querétaro",
            "Av. 5 de Febrero 1325, Jurica",
            "queretaro",
            20.6020,
            -100.4060,
            vec![Plastic, Metal, Glass],
            hours("Lun-Vie", (9, 0), (17, 0)),
            None,
            Provenance::Official,
        ),
        seed_center(
            "Centro de Acopio León",
            "Blvd. Torres Landa 1701, León",
            "guanajuato",
            21.1030,
            -101.6640,
            vec![Paper, Plastic, Organic],
            hours("Lun-Sab", (8, 0), (16, 0)),
            Some("477 788 0000"),
            Provenance::Imported,
        ),
        seed_center(
            "Recicladora Tijuana",
            "Blvd. Agua Caliente 10611, Tijuana",
            "baja-california",
            32.5065,
            -117.0120,
            vec![Metal, Electronics, Batteries],
            hours("Lun-Vie", (8, 0), (17, 0)),
            None,
            Provenance::Community,
        ),
        seed_center(
            "Acopio Puerto de Veracruz",
            "Av. Miguel Alemán 345, Veracruz",
            "veracruz",
            19.1830,
            -96.1450,
            vec![Glass, Paper, Cardboard],
            hours("Lun-Vie", (9, 0), (17, 0)),
            Some("229 932 2210"),
            Provenance::Official,
        ),
        seed_center(
            "Centro Verde Toluca",
            "Paseo Tollocan 600, Toluca",
            "mexico",
            19.2720,
            -99.6410,
            vec![Paper, Plastic, Glass, Organic],
            hours("Lun-Sab", (9, 0), (18, 0)),
            None,
            Provenance::Official,
        ),
        seed_center(
            "Ecopunto Chihuahua",
            "Av. Tecnológico 4101, Chihuahua",
            "chihuahua",
            28.6560,
            -106.1090,
            vec![Plastic, Metal],
            hours("Lun-Vie", (9, 0), (17, 0)),
            None,
            Provenance::Community,
        ),
        seed_center(
            "Acopio Hermosillo",
            "Blvd. Luis Encinas 280, Hermosillo",
            "sonora",
            29.0850,
            -110.9610,
            vec![Paper, Cardboard, Plastic],
            hours("Lun-Vie", (8, 0), (16, 0)),
            Some("662 289 3000"),
            Provenance::Imported,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::Directory;
    use crate::model::{Coordinate, RegionId};

    #[test]
    fn region_slice_contains_only_that_region() {
        let directory = Directory::mexico();
        let chiapas = RegionId(String::from("chiapas"));

        let entries = directory.for_region(&chiapas);

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.region == chiapas));
    }

    #[test]
    fn unknown_region_yields_empty_slice() {
        let directory = Directory::mexico();
        assert!(
            directory
                .for_region(&RegionId(String::from("atlantida")))
                .is_empty()
        );
    }

    #[test]
    fn all_spans_every_region() {
        let directory = Directory::mexico();
        assert_eq!(directory.all().len(), directory.len());
        assert!(!directory.is_empty());
    }

    #[test]
    fn nearest_orders_by_degree_distance() {
        let directory = Directory::mexico();
        let capital = RegionId(String::from("ciudad-de-mexico"));
        let coyoacan = Coordinate::new(19.3467, -99.1617);

        let ordered = directory.nearest(&capital, coyoacan);

        let names: Vec<&str> = ordered.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Centro de Acopio Coyoacán",
                "Punto Verde Reforma",
                "Reciclatrón Vallejo",
            ]
        );
    }
}
