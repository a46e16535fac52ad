use std::net::SocketAddr;
use std::sync::Arc;

use aerolink_api::{app, state::{AppState, AuthConfig}};
use aerolink_domain::notify::{DisabledNotifier, ReceiptNotifier};
use aerolink_store::{
    BookingRepository, CatalogRepository, DbClient, FlightRepository, SeatRepository, SmtpMailer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aerolink_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = aerolink_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Aerolink API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let notifier: Arc<dyn ReceiptNotifier> = match config.mail.clone() {
        Some(mail) => Arc::new(SmtpMailer::new(mail)),
        None => {
            tracing::info!("Mail not configured; receipt emails disabled");
            Arc::new(DisabledNotifier)
        }
    };

    let pool = db.pool.clone();
    let app_state = AppState {
        db: Arc::new(db),
        catalog: Arc::new(CatalogRepository::new(pool.clone())),
        flights: Arc::new(FlightRepository::new(pool.clone())),
        seats: Arc::new(SeatRepository::new(pool.clone())),
        bookings: Arc::new(BookingRepository::new(pool)),
        notifier,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
