//! Card issuance and per-card serialized access.
//!
//! Each session lives behind its own `tokio::sync::Mutex`, so the
//! debit-then-transition sequence of a tap-in (and the
//! resolve-then-credit-then-transition sequence of a tap-out) can
//! never interleave with another operation on the same card. The
//! directory and fare table are immutable and shared freely.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::card::CardSession;
use crate::domain::Money;
use crate::fares::FareTable;
use crate::stations::StationDirectory;

/// Opaque identifier for an issued card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(u64);

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({})", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thread-safe registry of issued cards.
///
/// Cloning the registry is cheap and yields a handle to the same
/// underlying cards.
#[derive(Clone)]
pub struct CardRegistry {
    cards: Arc<RwLock<HashMap<CardId, Arc<Mutex<CardSession>>>>>,
    next_id: Arc<AtomicU64>,
    directory: Arc<StationDirectory>,
    fares: Arc<FareTable>,
}

impl CardRegistry {
    /// Create an empty registry over the given reference data.
    pub fn new(directory: Arc<StationDirectory>, fares: Arc<FareTable>) -> Self {
        CardRegistry {
            cards: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            directory,
            fares,
        }
    }

    /// Issue a new card with the given initial balance.
    pub async fn issue(&self, initial_balance: Money) -> CardId {
        let id = CardId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = CardSession::new(
            initial_balance,
            self.directory.clone(),
            self.fares.clone(),
        );

        let mut guard = self.cards.write().await;
        guard.insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Look up a card's session by id.
    ///
    /// The returned handle serializes all operations on that card:
    /// hold its lock for the whole of each load/tap operation.
    pub async fn get(&self, id: CardId) -> Option<Arc<Mutex<CardSession>>> {
        let guard = self.cards.read().await;
        guard.get(&id).cloned()
    }

    /// Returns the number of issued cards.
    pub async fn len(&self) -> usize {
        let guard = self.cards.read().await;
        guard.len()
    }

    /// Returns true if no cards have been issued.
    pub async fn is_empty(&self) -> bool {
        let guard = self.cards.read().await;
        guard.is_empty()
    }
}
