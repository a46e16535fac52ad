use aerolink_domain::flight::{CabinInventory, CreateFlightRequest, Flight};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", post(create_flight).get(list_flights))
        .route("/v1/flights/{id}/cabin-inventory", get(get_cabin_inventory))
        .route(
            "/v1/flights/backfill-cabin-inventory",
            post(backfill_cabin_inventory),
        )
}

#[derive(Debug, Deserialize)]
struct ListFlightsParams {
    departure_airport_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct BackfillResponse {
    flights_processed: u64,
}

async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let status = req.validate()?;
    let flight = state.flights.create_flight(&req, status).await?;
    info!(
        "Flight {} created, occupancy seeded for aircraft {}",
        flight.flight_number, flight.aircraft_id
    );
    Ok((StatusCode::CREATED, Json(flight)))
}

async fn list_flights(
    State(state): State<AppState>,
    Query(params): Query<ListFlightsParams>,
) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(
        state.flights.list_flights(params.departure_airport_id).await?,
    ))
}

async fn get_cabin_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CabinInventory>>, AppError> {
    Ok(Json(state.flights.cabin_inventory(id).await?))
}

async fn backfill_cabin_inventory(
    State(state): State<AppState>,
) -> Result<Json<BackfillResponse>, AppError> {
    let flights_processed = state.flights.backfill_cabin_inventory().await?;
    info!("Backfill processed {} flights", flights_processed);
    Ok(Json(BackfillResponse { flights_processed }))
}
