//! Card operation errors.
//!
//! Every error is a local, synchronous failure surfaced to the caller
//! of the operation that detected it; none is retried internally, and
//! all leave the session's balance and journey state untouched.

use crate::domain::Money;

/// Errors a card operation can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    /// The tapped station name has no entry in the directory.
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The debit would take the balance below zero. The debit is not
    /// applied.
    #[error("insufficient balance: {required} required but only {available} available")]
    InsufficientBalance { required: Money, available: Money },

    /// Tube tap-in while a journey is already open. The first
    /// journey's debit and origin are preserved.
    #[error("a tube journey from {origin} is already open; tap out first")]
    JourneyAlreadyOpen { origin: String },

    /// Tap-out while not in an open tube journey.
    #[error("not currently in an open tube journey")]
    NotInJourney,

    /// `load` called with a negative amount.
    #[error("cannot load a negative amount ({0})")]
    NegativeLoad(Money),

    /// A credit would overflow the balance's numeric range. The
    /// credit is not applied.
    #[error("balance limit exceeded")]
    BalanceOverflow,
}
