//! Fare zone types.

use std::fmt;

/// Error returned when constructing an invalid zone or zone set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidZone {
    /// Zone numbers start at 1.
    #[error("zone numbers start at 1")]
    Zero,

    /// A station must belong to at least one zone.
    #[error("a zone set must contain at least one zone")]
    EmptySet,
}

/// A numbered fare-tariff zone.
///
/// Zone 1 is the innermost zone and attracts its own fare tiers.
/// Zone numbers are always at least 1; this type guarantees that any
/// `Zone` value is valid by construction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zone(u8);

impl Zone {
    /// Construct a zone from its number.
    ///
    /// Fails with [`InvalidZone::Zero`] for zone 0.
    pub fn new(number: u8) -> Result<Self, InvalidZone> {
        if number == 0 {
            return Err(InvalidZone::Zero);
        }
        Ok(Zone(number))
    }

    /// Returns the zone number.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Returns true for the innermost zone.
    pub const fn is_zone1(self) -> bool {
        self.0 == 1
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone({})", self.0)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}", self.0)
    }
}

/// The non-empty set of zones a station belongs to.
///
/// Most stations sit inside exactly one zone; a boundary station at
/// the edge of two contiguous zones belongs to both, and a journey
/// touching it may be charged as either interpretation.
///
/// Zones are stored sorted and deduplicated.
#[derive(Clone, PartialEq, Eq)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    /// Construct a zone set from zones.
    ///
    /// Duplicates are removed; fails with [`InvalidZone::EmptySet`] if
    /// no zones are given.
    pub fn new(zones: impl IntoIterator<Item = Zone>) -> Result<Self, InvalidZone> {
        let mut zones: Vec<Zone> = zones.into_iter().collect();
        zones.sort_unstable();
        zones.dedup();
        if zones.is_empty() {
            return Err(InvalidZone::EmptySet);
        }
        Ok(ZoneSet { zones })
    }

    /// Construct a zone set from raw zone numbers.
    pub fn from_numbers(numbers: &[u8]) -> Result<Self, InvalidZone> {
        let zones = numbers
            .iter()
            .map(|&n| Zone::new(n))
            .collect::<Result<Vec<_>, _>>()?;
        ZoneSet::new(zones)
    }

    /// Iterate over the zones in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Zone> + '_ {
        self.zones.iter().copied()
    }

    /// Returns the number of zones in the set (always at least 1).
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns true if the set contains the given zone.
    pub fn contains(&self, zone: Zone) -> bool {
        self.zones.binary_search(&zone).is_ok()
    }
}

impl fmt::Debug for ZoneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ZoneSet")?;
        f.debug_set()
            .entries(self.zones.iter().map(|z| z.number()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(n: u8) -> Zone {
        Zone::new(n).unwrap()
    }

    #[test]
    fn zone_rejects_zero() {
        assert_eq!(Zone::new(0), Err(InvalidZone::Zero));
        assert!(Zone::new(1).is_ok());
        assert!(Zone::new(6).is_ok());
    }

    #[test]
    fn zone_accessors() {
        assert_eq!(zone(3).number(), 3);
        assert!(zone(1).is_zone1());
        assert!(!zone(2).is_zone1());
    }

    #[test]
    fn zone_display() {
        assert_eq!(zone(2).to_string(), "zone 2");
        assert_eq!(format!("{:?}", zone(2)), "Zone(2)");
    }

    #[test]
    fn zone_set_rejects_empty() {
        assert_eq!(ZoneSet::new([]), Err(InvalidZone::EmptySet));
        assert_eq!(ZoneSet::from_numbers(&[]), Err(InvalidZone::EmptySet));
    }

    #[test]
    fn zone_set_rejects_zone_zero() {
        assert_eq!(ZoneSet::from_numbers(&[0, 1]), Err(InvalidZone::Zero));
    }

    #[test]
    fn zone_set_sorts_and_dedups() {
        let set = ZoneSet::from_numbers(&[2, 1, 2]).unwrap();
        let zones: Vec<u8> = set.iter().map(Zone::number).collect();
        assert_eq!(zones, vec![1, 2]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn zone_set_contains() {
        let set = ZoneSet::from_numbers(&[1, 2]).unwrap();
        assert!(set.contains(zone(1)));
        assert!(set.contains(zone(2)));
        assert!(!set.contains(zone(3)));
    }
}
