//! Domain types for the fare card system.
//!
//! This module contains the core value types: money, fare zones,
//! station reference data, and the open-journey record. All types
//! enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod journey;
mod money;
mod station;
mod zone;

pub use journey::{OpenJourney, TransportMode};
pub use money::{InvalidMoney, Money};
pub use station::Station;
pub use zone::{InvalidZone, Zone, ZoneSet};
