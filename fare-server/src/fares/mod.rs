//! Fare configuration and zone fare resolution.

mod resolver;
mod table;

pub use resolver::resolve_tube_fare;
pub use table::{FareTable, FareTableError};
