pub mod app_config;
pub mod booking_repo;
pub mod catalog_repo;
pub mod database;
pub mod error;
pub mod flight_repo;
pub mod mailer;
pub mod seat_repo;

pub use booking_repo::BookingRepository;
pub use catalog_repo::CatalogRepository;
pub use database::DbClient;
pub use error::{StoreError, StoreResult};
pub use flight_repo::FlightRepository;
pub use mailer::SmtpMailer;
pub use seat_repo::SeatRepository;
