//! Contactless transit fare card server.
//!
//! Models cards that accumulate a balance and are debited by
//! tap-in/tap-out events on a network split into fare zones. Tube
//! journeys hold a pre-authorization at tap-in and settle to the
//! cheapest legal zone interpretation at tap-out; bus journeys are
//! flat-fare, single-tap.

pub mod card;
pub mod domain;
pub mod fares;
pub mod registry;
pub mod stations;
pub mod web;
