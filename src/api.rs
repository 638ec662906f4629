// Card Registry - REST API with Axum
// Thin HTTP layer over `CardRegistry`: shape validation, Luhn pre-check,
// and translation of registry results into status codes.

use crate::card::Card;
use crate::error::RegistryError;
use crate::luhn;
use crate::registry::CardRegistry;
use crate::validation::{describe, CardRequest};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub registry: Arc<CardRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<CardRegistry>) -> Self {
        AppState { registry }
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message.into()),
        }
    }
}

/// Card as exposed to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    name: String,
    card_number: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    limit: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    balance: Decimal,
    valid: bool,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            name: card.holder_name().to_string(),
            card_number: card.card_number().to_string(),
            limit: card.credit_limit(),
            balance: card.balance(),
            valid: card.is_valid(),
        }
    }
}

/// Failures of `POST /api/cards`, each mapped to a client-visible rejection
#[derive(Debug)]
pub enum AddCardError {
    Invalid(String),
    BadChecksum,
    Registry(RegistryError),
}

impl From<RegistryError> for AddCardError {
    fn from(e: RegistryError) -> Self {
        AddCardError::Registry(e)
    }
}

impl IntoResponse for AddCardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AddCardError::Invalid(message) => (StatusCode::BAD_REQUEST, message),
            AddCardError::BadChecksum => {
                (StatusCode::BAD_REQUEST, "Invalid card number".to_string())
            }
            AddCardError::Registry(e @ RegistryError::DuplicateName { .. }) => {
                (StatusCode::CONFLICT, e.to_string())
            }
        };
        (status, Json(ApiResponse::err(message))).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/cards - All cards in insertion order
async fn list_cards(State(state): State<AppState>) -> impl IntoResponse {
    let response: Vec<CardResponse> = state
        .registry
        .list_cards()
        .into_iter()
        .map(CardResponse::from)
        .collect();

    Json(ApiResponse::ok(response))
}

/// POST /api/cards - Add a card
async fn add_card(
    State(state): State<AppState>,
    Json(request): Json<CardRequest>,
) -> Result<impl IntoResponse, AddCardError> {
    let valid = request
        .validate()
        .map_err(|errors| AddCardError::Invalid(describe(&errors)))?;

    // Cards failing the checksum are rejected before they reach the registry
    if !luhn::check(&valid.card_number) {
        tracing::info!(holder = %valid.name, "rejected card with bad checksum");
        return Err(AddCardError::BadChecksum);
    }

    let card = state
        .registry
        .add_card(&valid.name, &valid.card_number, valid.limit)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CardResponse::from(card))),
    ))
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router with all API routes under `/api`
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/cards", get(list_cards).post(add_card))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
