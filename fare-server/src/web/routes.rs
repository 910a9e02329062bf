//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::sync::Mutex;

use crate::card::{CardError, CardSession};
use crate::registry::CardId;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/cards", post(create_card))
        .route("/cards/:id", get(get_card))
        .route("/cards/:id/load", post(load_card))
        .route("/cards/:id/tap-in", post(tap_in))
        .route("/cards/:id/tap-out", post(tap_out))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the station directory.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    let mut stations: Vec<StationView> = state
        .directory
        .iter()
        .map(StationView::from_station)
        .collect();
    stations.sort_by(|a, b| a.name.cmp(&b.name));

    Json(StationListResponse { stations })
}

/// Issue a new card.
async fn create_card(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CardResponse>, AppError> {
    let req: CreateCardRequest = parse_body(&body)?;
    if req.initial_balance.is_negative() {
        return Err(AppError::BadRequest {
            message: format!(
                "initial balance must not be negative (got {})",
                req.initial_balance
            ),
        });
    }

    let id = state.registry.issue(req.initial_balance).await;
    let card = fetch_card(&state, id).await?;
    let session = card.lock().await;

    Ok(Json(CardResponse::from_session(id, &session)))
}

/// Read a card's balance and journey state.
async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
) -> Result<Json<CardResponse>, AppError> {
    let card = fetch_card(&state, id).await?;
    let session = card.lock().await;

    Ok(Json(CardResponse::from_session(id, &session)))
}

/// Load value onto a card.
async fn load_card(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
    body: Bytes,
) -> Result<Json<CardResponse>, AppError> {
    let req: LoadRequest = parse_body(&body)?;
    let card = fetch_card(&state, id).await?;

    let mut session = card.lock().await;
    session.load(req.amount)?;

    Ok(Json(CardResponse::from_session(id, &session)))
}

/// Tap in at a station.
async fn tap_in(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
    body: Bytes,
) -> Result<Json<CardResponse>, AppError> {
    let req: TapInRequest = parse_body(&body)?;
    let card = fetch_card(&state, id).await?;

    let mut session = card.lock().await;
    session.tap_in(&req.station, req.mode)?;

    Ok(Json(CardResponse::from_session(id, &session)))
}

/// Tap out, settling the open tube journey.
async fn tap_out(
    State(state): State<AppState>,
    Path(id): Path<CardId>,
    body: Bytes,
) -> Result<Json<TapOutResponse>, AppError> {
    let req: TapOutRequest = parse_body(&body)?;
    let card = fetch_card(&state, id).await?;

    let mut session = card.lock().await;
    let fare = session.tap_out(&req.station)?;
    let balance = session.balance();

    Ok(Json(TapOutResponse {
        card_id: id,
        fare,
        fare_display: fare.to_string(),
        balance,
        balance_display: balance.to_string(),
    }))
}

/// Parse a JSON body manually so we can log the payload on failure.
fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        eprintln!("[JSON parse error] {e}");
        eprintln!("[Body] {}", String::from_utf8_lossy(body));
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Resolve a card id to its session handle.
async fn fetch_card(state: &AppState, id: CardId) -> Result<Arc<Mutex<CardSession>>, AppError> {
    state
        .registry
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("unknown card: {id}"),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    PaymentRequired { message: String },
    Conflict { message: String },
}

impl From<CardError> for AppError {
    fn from(e: CardError) -> Self {
        let message = e.to_string();
        match e {
            CardError::UnknownStation(_) => AppError::NotFound { message },
            CardError::InsufficientBalance { .. } => AppError::PaymentRequired { message },
            CardError::JourneyAlreadyOpen { .. } | CardError::NotInJourney => {
                AppError::Conflict { message }
            }
            CardError::NegativeLoad(_) | CardError::BalanceOverflow => {
                AppError::BadRequest { message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::PaymentRequired { message } => (StatusCode::PAYMENT_REQUIRED, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
        };

        // Log errors to stderr for debugging
        eprintln!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Money;

    #[test]
    fn card_error_mapping() {
        let err: AppError = CardError::UnknownStation("Narnia".into()).into();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err: AppError = CardError::InsufficientBalance {
            required: Money::from_pence(320),
            available: Money::ZERO,
        }
        .into();
        assert!(matches!(err, AppError::PaymentRequired { .. }));

        let err: AppError = CardError::JourneyAlreadyOpen {
            origin: "Holborn".into(),
        }
        .into();
        assert!(matches!(err, AppError::Conflict { .. }));

        let err: AppError = CardError::NotInJourney.into();
        assert!(matches!(err, AppError::Conflict { .. }));

        let err: AppError = CardError::NegativeLoad(Money::from_pence(-1)).into();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err: AppError = CardError::BalanceOverflow.into();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[test]
    fn parse_body_rejects_malformed_json() {
        let body = Bytes::from_static(b"{not json");
        let result: Result<LoadRequest, AppError> = parse_body(&body);
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn parse_body_accepts_valid_json() {
        let body = Bytes::from_static(br#"{"amount": 500}"#);
        let req: LoadRequest = parse_body(&body).unwrap();
        assert_eq!(req.amount, Money::from_pence(500));
    }
}
