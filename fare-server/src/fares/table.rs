//! Fare configuration.

use crate::domain::Money;

/// Error returned when constructing an inconsistent fare table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FareTableError {
    /// A tube tier must never exceed the tap-in pre-authorization,
    /// otherwise settling a journey could debit beyond the amount
    /// already held.
    #[error("tube tier {tier} ({fare}) exceeds the pre-authorization {max_auth}")]
    TierAboveMaxAuth {
        tier: &'static str,
        fare: Money,
        max_auth: Money,
    },

    /// Fares are amounts to charge; a negative fare would turn a
    /// debit into a credit.
    #[error("fare {name} ({fare}) is negative")]
    NegativeFare { name: &'static str, fare: Money },
}

/// The immutable fare configuration for the network.
///
/// Tube fares are tiered by the zone span of a journey (how many
/// contiguous zones it crosses) and by whether zone 1 is involved.
/// Bus journeys have a single flat fare. `tube_max_auth` is the
/// provisional amount debited at tube tap-in and reconciled to the
/// true tier at tap-out.
///
/// Construction validates that no fare is negative and that every
/// tube tier is at most `tube_max_auth`, so debits only ever charge
/// and the tap-out credit is always non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareTable {
    bus_fare: Money,
    tube_max_auth: Money,
    zone1_only: Money,
    one_zone_outside_zone1: Money,
    two_zones_including_zone1: Money,
    two_zones_excluding_zone1: Money,
    three_or_more_zones: Money,
}

impl FareTable {
    /// Create a fare table, validating fare signs and the
    /// tier/pre-authorization relationship.
    pub fn new(
        bus_fare: Money,
        tube_max_auth: Money,
        zone1_only: Money,
        one_zone_outside_zone1: Money,
        two_zones_including_zone1: Money,
        two_zones_excluding_zone1: Money,
        three_or_more_zones: Money,
    ) -> Result<Self, FareTableError> {
        let tiers = [
            ("zone1_only", zone1_only),
            ("one_zone_outside_zone1", one_zone_outside_zone1),
            ("two_zones_including_zone1", two_zones_including_zone1),
            ("two_zones_excluding_zone1", two_zones_excluding_zone1),
            ("three_or_more_zones", three_or_more_zones),
        ];

        for (name, fare) in [("bus_fare", bus_fare), ("tube_max_auth", tube_max_auth)]
            .into_iter()
            .chain(tiers)
        {
            if fare.is_negative() {
                return Err(FareTableError::NegativeFare { name, fare });
            }
        }

        for (tier, fare) in tiers {
            if fare > tube_max_auth {
                return Err(FareTableError::TierAboveMaxAuth {
                    tier,
                    fare,
                    max_auth: tube_max_auth,
                });
            }
        }

        Ok(FareTable {
            bus_fare,
            tube_max_auth,
            zone1_only,
            one_zone_outside_zone1,
            two_zones_including_zone1,
            two_zones_excluding_zone1,
            three_or_more_zones,
        })
    }

    /// Returns the flat bus fare.
    pub fn bus_fare(&self) -> Money {
        self.bus_fare
    }

    /// Returns the pre-authorization debited at tube tap-in.
    pub fn tube_max_auth(&self) -> Money {
        self.tube_max_auth
    }

    /// Look up the tube tier for a journey.
    ///
    /// `span` is the number of contiguous zones the journey crosses
    /// for one interpretation of its endpoints (always at least 1);
    /// `involves_zone1` is whether either endpoint is in zone 1.
    pub fn tube_tier(&self, span: u8, involves_zone1: bool) -> Money {
        match (span, involves_zone1) {
            (0 | 1, true) => self.zone1_only,
            (0 | 1, false) => self.one_zone_outside_zone1,
            (2, true) => self.two_zones_including_zone1,
            (2, false) => self.two_zones_excluding_zone1,
            (_, _) => self.three_or_more_zones,
        }
    }
}

impl Default for FareTable {
    /// The standard London-style tariff.
    fn default() -> Self {
        // Valid by inspection: no tier exceeds the 3.20 pre-auth.
        FareTable {
            bus_fare: Money::from_pence(180),
            tube_max_auth: Money::from_pence(320),
            zone1_only: Money::from_pence(250),
            one_zone_outside_zone1: Money::from_pence(200),
            two_zones_including_zone1: Money::from_pence(300),
            two_zones_excluding_zone1: Money::from_pence(225),
            three_or_more_zones: Money::from_pence(320),
        }
    }
}
