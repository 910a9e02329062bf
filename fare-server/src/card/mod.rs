//! The card session: balance, journey state machine, invariants.

mod error;
mod session;

pub use error::CardError;
pub use session::CardSession;
