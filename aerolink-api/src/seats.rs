use aerolink_domain::catalog::{CreateSeatRequest, Seat};
use aerolink_store::seat_repo::ReconcileSummary;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/seats", post(create_seat).get(list_seats))
        .route("/v1/flights/seats/reconcile", post(reconcile_flight_seats))
}

#[derive(Debug, Deserialize)]
struct ListSeatsParams {
    aircraft_id: Option<Uuid>,
}

async fn create_seat(
    State(state): State<AppState>,
    Json(req): Json<CreateSeatRequest>,
) -> Result<(StatusCode, Json<Seat>), AppError> {
    let class = req.validate()?;
    let seat = state
        .seats
        .create_seat(req.aircraft_id, &req.seat_number, class)
        .await?;
    info!(
        "Seat {} created on aircraft {}, occupancy propagated to existing flights",
        seat.seat_number, seat.aircraft_id
    );
    Ok((StatusCode::CREATED, Json(seat)))
}

async fn list_seats(
    State(state): State<AppState>,
    Query(params): Query<ListSeatsParams>,
) -> Result<Json<Vec<Seat>>, AppError> {
    Ok(Json(state.seats.list_seats(params.aircraft_id).await?))
}

async fn reconcile_flight_seats(
    State(state): State<AppState>,
) -> Result<Json<ReconcileSummary>, AppError> {
    let summary = state.seats.reconcile_flight_seats().await?;
    info!(
        "Reconcile processed {} flights, created {} occupancy rows",
        summary.flights_processed, summary.flight_seats_created
    );
    Ok(Json(summary))
}
