use aerolink_domain::catalog::{Aircraft, Airport, CreateAircraftRequest, CreateAirportRequest};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/airports", post(create_airport).get(list_airports))
        .route("/v1/aircraft", post(create_aircraft).get(list_aircraft))
}

async fn create_airport(
    State(state): State<AppState>,
    Json(req): Json<CreateAirportRequest>,
) -> Result<(StatusCode, Json<Airport>), AppError> {
    req.validate()?;
    let airport = state.catalog.create_airport(&req).await?;
    Ok((StatusCode::CREATED, Json(airport)))
}

async fn list_airports(State(state): State<AppState>) -> Result<Json<Vec<Airport>>, AppError> {
    Ok(Json(state.catalog.list_airports().await?))
}

async fn create_aircraft(
    State(state): State<AppState>,
    Json(req): Json<CreateAircraftRequest>,
) -> Result<(StatusCode, Json<Aircraft>), AppError> {
    req.validate()?;
    let aircraft = state.catalog.create_aircraft(&req).await?;
    Ok((StatusCode::CREATED, Json(aircraft)))
}

async fn list_aircraft(State(state): State<AppState>) -> Result<Json<Vec<Aircraft>>, AppError> {
    Ok(Json(state.catalog.list_aircraft().await?))
}
