//! Application state for the web layer.

use std::sync::Arc;

use crate::fares::FareTable;
use crate::registry::CardRegistry;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// Contains the card registry and the immutable reference data.
#[derive(Clone)]
pub struct AppState {
    /// Issued cards and their sessions.
    pub registry: CardRegistry,

    /// Station directory, for the listing endpoint.
    pub directory: Arc<StationDirectory>,
}

impl AppState {
    /// Create a new app state over the given reference data.
    pub fn new(directory: StationDirectory, fares: FareTable) -> Self {
        let directory = Arc::new(directory);
        let fares = Arc::new(fares);
        AppState {
            registry: CardRegistry::new(directory.clone(), fares),
            directory,
        }
    }
}
