//! Station reference data.

use super::ZoneSet;

/// A station on the network and the zones it belongs to.
///
/// Stations are immutable reference data, owned by the station
/// directory and identified by their exact, case-sensitive name.
/// A card never owns a station; taps refer to stations by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    name: String,
    zones: ZoneSet,
}

impl Station {
    /// Create a station with the given name and zone set.
    pub fn new(name: impl Into<String>, zones: ZoneSet) -> Self {
        Station {
            name: name.into(),
            zones,
        }
    }

    /// Returns the station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the zones this station belongs to.
    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }
}
