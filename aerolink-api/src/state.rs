use std::sync::Arc;

use aerolink_domain::notify::ReceiptNotifier;
use aerolink_store::{
    BookingRepository, CatalogRepository, DbClient, FlightRepository, SeatRepository,
};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbClient>,
    pub catalog: Arc<CatalogRepository>,
    pub flights: Arc<FlightRepository>,
    pub seats: Arc<SeatRepository>,
    pub bookings: Arc<BookingRepository>,
    pub notifier: Arc<dyn ReceiptNotifier>,
    pub auth: AuthConfig,
}
