//! Data transfer objects for web requests and responses.
//!
//! Monetary fields in responses travel as integer pence, paired with
//! a `*_display` string for human consumption. Request amounts accept
//! either form: integer pence, or a display string such as `"£2.50"`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::card::CardSession;
use crate::domain::{Money, Station, TransportMode};
use crate::registry::CardId;

/// Deserialize an amount from integer pence or a display string.
fn amount<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Input {
        Pence(i64),
        Text(String),
    }

    match Input::deserialize(deserializer)? {
        Input::Pence(p) => Ok(Money::from_pence(p)),
        Input::Text(s) => Money::parse(&s).map_err(serde::de::Error::custom),
    }
}

/// Request to issue a new card.
#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    /// Initial balance, in pence or as "£X.YZ".
    #[serde(deserialize_with = "amount")]
    pub initial_balance: Money,
}

/// Request to load value onto a card.
#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    /// Amount, in pence or as "£X.YZ".
    #[serde(deserialize_with = "amount")]
    pub amount: Money,
}

/// Request to tap in at a station.
#[derive(Debug, Deserialize)]
pub struct TapInRequest {
    /// Exact station name.
    pub station: String,

    /// "tube" or "bus".
    pub mode: TransportMode,
}

/// Request to tap out at a station.
#[derive(Debug, Deserialize)]
pub struct TapOutRequest {
    /// Exact station name.
    pub station: String,
}

/// The pending journey on a card, if any.
#[derive(Debug, Serialize)]
pub struct OpenJourneyView {
    /// Origin station recorded at tap-in.
    pub origin: String,

    /// When the journey was opened (RFC 3339).
    pub opened_at: String,
}

/// A card's current state.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub card_id: CardId,

    /// Balance in pence.
    pub balance: Money,

    /// Balance formatted for display, e.g. "£27.50".
    pub balance_display: String,

    /// The open tube journey, if one is pending.
    pub open_journey: Option<OpenJourneyView>,
}

impl CardResponse {
    /// Build a response from a session snapshot.
    pub fn from_session(card_id: CardId, session: &CardSession) -> Self {
        CardResponse {
            card_id,
            balance: session.balance(),
            balance_display: session.balance().to_string(),
            open_journey: session.open_journey().map(|j| OpenJourneyView {
                origin: j.origin().to_string(),
                opened_at: j.opened_at().to_rfc3339(),
            }),
        }
    }
}

/// Result of settling a tube journey.
#[derive(Debug, Serialize)]
pub struct TapOutResponse {
    pub card_id: CardId,

    /// The fare actually charged, in pence.
    pub fare: Money,

    /// Fare formatted for display.
    pub fare_display: String,

    /// Balance after settlement, in pence.
    pub balance: Money,

    /// Balance formatted for display.
    pub balance_display: String,
}

/// A station in the directory listing.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub name: String,

    /// Zone numbers, ascending.
    pub zones: Vec<u8>,
}

impl StationView {
    pub fn from_station(station: &Station) -> Self {
        StationView {
            name: station.name().to_string(),
            zones: station.zones().iter().map(|z| z.number()).collect(),
        }
    }
}

/// The full station directory.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationView>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
