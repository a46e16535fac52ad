use aerolink_domain::search::{FlightSearchRequest, FlightSearchResponse};
use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/flights/search", post(search_flights))
}

async fn search_flights(
    State(state): State<AppState>,
    Json(req): Json<FlightSearchRequest>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    // Rejects bad cabin classes and missing round-trip return dates before
    // any query executes.
    let plan = req.validate()?;

    let outbound = state
        .flights
        .search_flights(
            req.from_airport_id,
            req.to_airport_id,
            req.departure_date,
            plan.cabin_class,
        )
        .await?;

    // Round trip: same lookup with the route swapped on the return date.
    let return_leg = match plan.return_date {
        Some(return_date) => Some(
            state
                .flights
                .search_flights(
                    req.to_airport_id,
                    req.from_airport_id,
                    return_date,
                    plan.cabin_class,
                )
                .await?,
        ),
        None => None,
    };

    Ok(Json(FlightSearchResponse {
        outbound,
        return_leg,
    }))
}
