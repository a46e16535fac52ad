use aerolink_domain::booking::{CreateBookingRequest, CreateBookingResponse, Receipt};
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use tracing::{info, warn};

use crate::error::AppError;
use crate::middleware::auth::CallerClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/bookings", post(create_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<CallerClaims>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    // All caller-input errors are reported here, before any write.
    let cabin_class = req.validate()?;

    let (booking_id, booking_reference) = state
        .bookings
        .create_booking(
            claims.sub,
            req.flight_id,
            cabin_class,
            req.total_amount,
            &req.passengers,
        )
        .await?;

    let flight = state.bookings.flight_receipt_info(req.flight_id).await?;
    let receipt = Receipt::issue(
        booking_id,
        booking_reference.clone(),
        flight,
        cabin_class,
        req.total_amount,
        &req.passengers,
    );

    // The booking is already committed; a failed notification only flips
    // the flag, it never becomes an error.
    let email_sent = if claims.email.trim().is_empty() {
        false
    } else {
        match state.notifier.send_receipt(&claims.email, &receipt).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Receipt email for {} not sent: {}", booking_reference, e);
                false
            }
        }
    };

    info!("Booking {} created ({})", booking_id, booking_reference);

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking_id,
            booking_reference,
            receipt,
            email_sent,
        }),
    ))
}
