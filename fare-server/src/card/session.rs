//! The card session state machine.
//!
//! A session is in one of two states: idle, or inside an open tube
//! journey. Tube tap-in debits the pre-authorization and opens the
//! journey; tap-out resolves the true fare, credits back the
//! difference and closes it. Bus taps are flat-fare and never change
//! state.
//!
//! # Invariants
//!
//! - A session holds an open journey iff its most recent tube tap-in
//!   has not been matched by a tap-out.
//! - The balance is mutated only by `load`, the tap-in debit, and the
//!   tap-out credit.
//! - Debits are all-or-nothing: a debit that would take the balance
//!   below zero is rejected and nothing changes.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Money, OpenJourney, Station, TransportMode};
use crate::fares::{FareTable, resolve_tube_fare};
use crate::stations::StationDirectory;

use super::CardError;

/// A single card's balance and journey state.
///
/// The directory and fare table are shared, immutable collaborators;
/// the session owns only its balance and (at most one) open journey.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fare_server::card::CardSession;
/// use fare_server::domain::{Money, TransportMode};
/// use fare_server::fares::FareTable;
/// use fare_server::stations::london_stations;
///
/// let directory = Arc::new(london_stations());
/// let fares = Arc::new(FareTable::default());
/// let mut card = CardSession::new(Money::from_pence(3000), directory, fares);
///
/// card.tap_in("Holborn", TransportMode::Tube).unwrap();
/// let fare = card.tap_out("Earl's Court").unwrap();
///
/// assert_eq!(fare, Money::from_pence(250));
/// assert_eq!(card.balance(), Money::from_pence(2750));
/// ```
#[derive(Debug, Clone)]
pub struct CardSession {
    balance: Money,
    open_journey: Option<OpenJourney>,
    directory: Arc<StationDirectory>,
    fares: Arc<FareTable>,
}

impl CardSession {
    /// Create a session with the given initial balance.
    pub fn new(
        initial_balance: Money,
        directory: Arc<StationDirectory>,
        fares: Arc<FareTable>,
    ) -> Self {
        CardSession {
            balance: initial_balance,
            open_journey: None,
            directory,
            fares,
        }
    }

    /// Returns the current balance. Pure read.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Returns the pending journey, if a tube tap-in is unsettled.
    pub fn open_journey(&self) -> Option<&OpenJourney> {
        self.open_journey.as_ref()
    }

    /// Add value to the card.
    ///
    /// Negative amounts are rejected: a negative `load` would be a
    /// debit that bypasses the balance floor the tap paths enforce.
    /// A load that would overflow the balance is rejected and leaves
    /// it unchanged.
    pub fn load(&mut self, amount: Money) -> Result<(), CardError> {
        if amount.is_negative() {
            return Err(CardError::NegativeLoad(amount));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(CardError::BalanceOverflow)?;
        debug!("loaded {amount}, balance now {}", self.balance);
        Ok(())
    }

    /// Tap in at a station.
    ///
    /// Tube taps debit the pre-authorization and open a journey; a
    /// second tube tap-in while a journey is open is rejected with
    /// [`CardError::JourneyAlreadyOpen`], leaving balance and the
    /// first journey untouched. Bus taps debit the flat bus fare and
    /// never change journey state, regardless of the current state.
    pub fn tap_in(&mut self, station_name: &str, mode: TransportMode) -> Result<(), CardError> {
        let station = self.resolve(station_name)?;
        let station_name = station.name().to_string();

        match mode {
            TransportMode::Tube => match &self.open_journey {
                Some(journey) => Err(CardError::JourneyAlreadyOpen {
                    origin: journey.origin().to_string(),
                }),
                None => {
                    self.debit(self.fares.tube_max_auth())?;
                    debug!(
                        "tube tap-in at {station_name}: held {}, balance now {}",
                        self.fares.tube_max_auth(),
                        self.balance
                    );
                    self.open_journey = Some(OpenJourney::start(station_name));
                    Ok(())
                }
            },
            TransportMode::Bus => {
                // Single-tap, fully settled here; an open tube journey
                // (e.g. a bus ride between two tube legs) is unaffected.
                self.debit(self.fares.bus_fare())?;
                debug!(
                    "bus tap at {station_name}: charged {}, balance now {}",
                    self.fares.bus_fare(),
                    self.balance
                );
                Ok(())
            }
        }
    }

    /// Tap out of the open tube journey, settling its fare.
    ///
    /// Resolves the cheapest fare between the recorded origin and the
    /// destination, credits back the unused part of the
    /// pre-authorization, closes the journey, and returns the fare
    /// actually charged.
    pub fn tap_out(&mut self, station_name: &str) -> Result<Money, CardError> {
        let journey = self.open_journey.as_ref().ok_or(CardError::NotInJourney)?;
        let destination = self.resolve(station_name)?;
        // Safe: the origin was resolved against this same immutable
        // directory at tap-in.
        let origin = self.directory.lookup(journey.origin()).unwrap();

        let fare = resolve_tube_fare(origin, destination, &self.fares);
        // Non-negative: every tier is at most the pre-authorization,
        // enforced at fare-table construction.
        let refund = self.fares.tube_max_auth() - fare;

        self.balance = self
            .balance
            .checked_add(refund)
            .ok_or(CardError::BalanceOverflow)?;
        self.open_journey = None;
        debug!("tap-out at {station_name}: fare {fare}, balance now {}", self.balance);

        Ok(fare)
    }

    fn resolve(&self, station_name: &str) -> Result<&Station, CardError> {
        self.directory
            .lookup(station_name)
            .ok_or_else(|| CardError::UnknownStation(station_name.to_string()))
    }

    /// Debit the balance, all-or-nothing.
    fn debit(&mut self, amount: Money) -> Result<(), CardError> {
        if self.balance < amount {
            return Err(CardError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }
        self.balance = self.balance - amount;
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::stations::StationDirectoryBuilder;
    use proptest::prelude::*;

    /// An arbitrary operation against a session.
    #[derive(Debug, Clone)]
    enum Op {
        Load(i64),
        TapIn(usize, TransportMode),
        TapOut(usize),
    }

    const STATIONS: &[&str] = &["Holborn", "Earl's Court", "Hammersmith", "Wimbledon"];

    fn directory() -> Arc<StationDirectory> {
        Arc::new(
            StationDirectoryBuilder::new()
                .station("Holborn", &[1])
                .station("Earl's Court", &[1, 2])
                .station("Hammersmith", &[2])
                .station("Wimbledon", &[3])
                .build(),
        )
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0i64..2000).prop_map(Op::Load),
            (0..STATIONS.len(), prop_oneof![
                Just(TransportMode::Tube),
                Just(TransportMode::Bus),
            ])
                .prop_map(|(i, mode)| Op::TapIn(i, mode)),
            (0..STATIONS.len()).prop_map(Op::TapOut),
        ]
    }

    proptest! {
        /// No operation sequence ever drives the balance negative, and
        /// the open-journey flag always matches the tap history.
        #[test]
        fn balance_never_negative_and_state_consistent(
            initial in 0i64..1000,
            ops in proptest::collection::vec(arb_op(), 0..40),
        ) {
            let mut card = CardSession::new(
                Money::from_pence(initial),
                directory(),
                Arc::new(FareTable::default()),
            );
            // Model of the state machine: is a tube journey open?
            let mut model_open = false;

            for op in ops {
                match op {
                    Op::Load(p) => {
                        let _ = card.load(Money::from_pence(p));
                    }
                    Op::TapIn(i, mode) => {
                        if card.tap_in(STATIONS[i], mode).is_ok()
                            && mode == TransportMode::Tube
                        {
                            model_open = true;
                        }
                    }
                    Op::TapOut(i) => {
                        if card.tap_out(STATIONS[i]).is_ok() {
                            model_open = false;
                        }
                    }
                }

                prop_assert!(!card.balance().is_negative());
                prop_assert_eq!(card.open_journey().is_some(), model_open);
            }
        }

        /// A failed debit leaves the balance exactly as it was.
        #[test]
        fn failed_debit_changes_nothing(initial in 0i64..320) {
            let mut card = CardSession::new(
                Money::from_pence(initial),
                directory(),
                Arc::new(FareTable::default()),
            );

            let result = card.tap_in("Holborn", TransportMode::Tube);
            let insufficient = matches!(result, Err(CardError::InsufficientBalance { .. }));
            prop_assert!(insufficient);
            prop_assert_eq!(card.balance(), Money::from_pence(initial));
            prop_assert!(card.open_journey().is_none());
        }

        /// A completed tube round trip always debits exactly the
        /// resolved fare.
        #[test]
        fn round_trip_debits_resolved_fare(
            initial in 320i64..5000,
            from in 0..STATIONS.len(),
            to in 0..STATIONS.len(),
        ) {
            let dir = directory();
            let fares = Arc::new(FareTable::default());
            let expected = resolve_tube_fare(
                dir.lookup(STATIONS[from]).unwrap(),
                dir.lookup(STATIONS[to]).unwrap(),
                &fares,
            );

            let mut card = CardSession::new(Money::from_pence(initial), dir, fares);
            card.tap_in(STATIONS[from], TransportMode::Tube).unwrap();
            let fare = card.tap_out(STATIONS[to]).unwrap();

            prop_assert_eq!(fare, expected);
            prop_assert_eq!(card.balance(), Money::from_pence(initial) - expected);
        }
    }
}
