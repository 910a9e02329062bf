//! The station directory.
//!
//! Read-only lookup from station name to the station's zone
//! membership. The directory is built once at startup (or in tests
//! with a custom layout) and shared immutably; no card ever mutates
//! it.

use std::collections::HashMap;

use crate::domain::{Station, ZoneSet};

/// Name → station lookup for the whole network.
///
/// Names are exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: HashMap<String, Station>,
}

impl StationDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station, replacing any existing entry with the same name.
    pub fn insert(&mut self, station: Station) {
        self.stations.insert(station.name().to_string(), station);
    }

    /// Look up a station by its exact name.
    pub fn lookup(&self, name: &str) -> Option<&Station> {
        self.stations.get(name)
    }

    /// Returns the number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the directory has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Iterate over all stations in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }
}

/// Builder for creating a station directory.
///
/// Provides a fluent API for adding stations by name and zone numbers.
#[derive(Debug, Default)]
pub struct StationDirectoryBuilder {
    inner: StationDirectory,
}

impl StationDirectoryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station. Entries with an invalid zone set (empty, or
    /// containing zone 0) are ignored.
    pub fn station(mut self, name: &str, zones: &[u8]) -> Self {
        if let Ok(zones) = ZoneSet::from_numbers(zones) {
            self.inner.insert(Station::new(name, zones));
        }
        self
    }

    /// Build the directory.
    pub fn build(self) -> StationDirectory {
        self.inner
    }
}

/// Create the default London station directory.
///
/// A representative slice of the network across zones 1–6, including
/// the boundary stations that make cheapest-interpretation fare
/// resolution interesting.
pub fn london_stations() -> StationDirectory {
    StationDirectoryBuilder::new()
        // Zone 1 core
        .station("Holborn", &[1])
        .station("Bank", &[1])
        .station("Oxford Circus", &[1])
        .station("Victoria", &[1])
        // Zone 1/2 boundary
        .station("Earl's Court", &[1, 2])
        .station("Vauxhall", &[1, 2])
        // Zone 2
        .station("Hammersmith", &[2])
        .station("Camden Town", &[2])
        .station("Brixton", &[2])
        // Zone 2/3 boundary
        .station("Stratford", &[2, 3])
        .station("Turnham Green", &[2, 3])
        // Zone 3
        .station("Wimbledon", &[3])
        .station("Acton Town", &[3])
        // Outer zones
        .station("Richmond", &[4])
        .station("Wembley Park", &[4])
        .station("Eastcote", &[5])
        .station("Heathrow Terminals 2 & 3", &[6])
        .station("Uxbridge", &[6])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Zone;

    #[test]
    fn empty_directory() {
        let dir = StationDirectory::new();
        assert!(dir.is_empty());
        assert_eq!(dir.len(), 0);
        assert!(dir.lookup("Holborn").is_none());
    }

    #[test]
    fn insert_and_lookup() {
        let mut dir = StationDirectory::new();
        dir.insert(Station::new(
            "Holborn",
            ZoneSet::from_numbers(&[1]).unwrap(),
        ));

        assert_eq!(dir.len(), 1);
        let station = dir.lookup("Holborn").unwrap();
        assert_eq!(station.name(), "Holborn");
        assert!(station.zones().contains(Zone::new(1).unwrap()));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let dir = StationDirectoryBuilder::new().station("Holborn", &[1]).build();

        assert!(dir.lookup("Holborn").is_some());
        assert!(dir.lookup("holborn").is_none());
        assert!(dir.lookup("HOLBORN").is_none());
    }

    #[test]
    fn insert_replaces_existing() {
        let dir = StationDirectoryBuilder::new()
            .station("Stratford", &[2])
            .station("Stratford", &[2, 3])
            .build();

        assert_eq!(dir.len(), 1);
        assert_eq!(dir.lookup("Stratford").unwrap().zones().len(), 2);
    }

    #[test]
    fn builder_ignores_invalid_zone_sets() {
        let dir = StationDirectoryBuilder::new()
            .station("Nowhere", &[]) // empty zone set
            .station("Zeroville", &[0]) // zone 0
            .station("Holborn", &[1]) // valid
            .build();

        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn london_stations_exist() {
        let dir = london_stations();

        assert!(!dir.is_empty());
        assert!(dir.lookup("Holborn").is_some());
        assert_eq!(dir.lookup("Earl's Court").unwrap().zones().len(), 2);
        assert!(dir.lookup("Wimbledon").is_some());
        assert!(dir.lookup("Unknown").is_none());
    }
}
