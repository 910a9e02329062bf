//! Web layer: HTTP routes, DTOs, and application state.
//!
//! Presentation only: handlers call the four card operations and
//! translate their results and errors; no fare logic lives here.

pub mod dto;
mod routes;
mod state;

pub use routes::{AppError, create_router};
pub use state::AppState;
