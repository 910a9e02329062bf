//! Transport modes and the open-journey value.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// How a passenger travels on a tap.
///
/// Tube journeys are settled over a tap-in/tap-out pair; bus journeys
/// are flat-fare and fully settled at tap-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Tube,
    Bus,
}

/// A tube journey that has been tapped in but not yet tapped out.
///
/// Created on tube tap-in and cleared on the matching tap-out. A card
/// holds at most one of these at any time; bus taps never create one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenJourney {
    origin: String,
    opened_at: DateTime<Utc>,
}

impl OpenJourney {
    /// Open a journey from the given origin station, timestamped now.
    pub fn start(origin: impl Into<String>) -> Self {
        OpenJourney {
            origin: origin.into(),
            opened_at: Utc::now(),
        }
    }

    /// Returns the origin station name recorded at tap-in.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns when the journey was opened.
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }
}
