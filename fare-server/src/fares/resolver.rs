//! Zone fare resolution.
//!
//! A station may belong to more than one zone, so a completed tube
//! journey can have several legal zone interpretations. The passenger
//! is charged the cheapest of them: this module enumerates every
//! (origin zone, destination zone) pair and takes the minimum tier.

use crate::domain::{Money, Station, Zone};

use super::FareTable;

/// Resolve the tube fare between two stations.
///
/// Enumerates the Cartesian product of the two stations' zone sets;
/// each pair contributes the tier for its span (`|a - b| + 1`) and
/// zone-1 involvement, and the result is the minimum over all pairs.
///
/// Pure and deterministic; the result is always one of the table's
/// five tier values, and never exceeds the table's pre-authorization.
/// Same-station input is legal and yields the minimum same-zone fare.
pub fn resolve_tube_fare(origin: &Station, destination: &Station, table: &FareTable) -> Money {
    // Zone sets are tiny (≤2 zones observed), so plain enumeration
    // beats anything cleverer.
    let mut cheapest: Option<Money> = None;
    for from in origin.zones().iter() {
        for to in destination.zones().iter() {
            let fare = table.tube_tier(span(from, to), from.is_zone1() || to.is_zone1());
            cheapest = Some(match cheapest {
                Some(best) => best.min(fare),
                None => fare,
            });
        }
    }

    // Safe: zone sets are non-empty by construction, so at least one
    // pair was enumerated.
    cheapest.unwrap()
}

/// The number of contiguous zones between two endpoint zones,
/// inclusive of both.
fn span(from: Zone, to: Zone) -> u8 {
    from.number().abs_diff(to.number()) + 1
}
