use aerolink_domain::cabin::CabinClass;
use aerolink_domain::flight::{CabinInventory, CreateFlightRequest, Flight, FlightStatus};
use aerolink_domain::search::SearchFlightRow;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::catalog_repo::cabin_from_db;
use crate::error::{StoreError, StoreResult};

/// Flight records plus the seat-inventory seeding and aggregation that hang
/// off them. Cabin availability is always computed live from flight_seats
/// joined with seats; there is no stored counter to drift.
pub struct FlightRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    flight_number: String,
    departure_airport_id: Uuid,
    arrival_airport_id: Uuid,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    aircraft_id: Uuid,
    base_price: f64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            flight_number: row.flight_number,
            departure_airport_id: row.departure_airport_id,
            arrival_airport_id: row.arrival_airport_id,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            aircraft_id: row.aircraft_id,
            base_price: row.base_price,
            // CHECK constraint on flights.status guarantees one of the three
            status: FlightStatus::parse_or_default(Some(&row.status))
                .unwrap_or(FlightStatus::Scheduled),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CabinInventoryRow {
    cabin_class: String,
    total_seats: i64,
    available_seats: i64,
}

#[derive(sqlx::FromRow)]
struct SearchRow {
    id: Uuid,
    flight_number: String,
    departure_airport_code: String,
    arrival_airport_code: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    base_price: f64,
    available_seats: i64,
}

impl FlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the flight and seeds one occupancy row per aircraft seat in a
    /// single transaction. If seeding fails the flight creation rolls back
    /// entirely.
    pub async fn create_flight(
        &self,
        req: &CreateFlightRequest,
        status: FlightStatus,
    ) -> StoreResult<Flight> {
        let mut tx = self.pool.begin().await?;

        let aircraft: Option<Uuid> = sqlx::query_scalar("SELECT id FROM aircraft WHERE id = $1")
            .bind(req.aircraft_id)
            .fetch_optional(&mut *tx)
            .await?;
        if aircraft.is_none() {
            return Err(StoreError::NotFound("aircraft"));
        }

        let now = Utc::now();
        let row: FlightRow = sqlx::query_as(
            r#"
            INSERT INTO flights (id, flight_number, departure_airport_id, arrival_airport_id,
                                 departure_time, arrival_time, aircraft_id, base_price, status,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING id, flight_number, departure_airport_id, arrival_airport_id,
                      departure_time, arrival_time, aircraft_id, base_price, status,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.flight_number.trim())
        .bind(req.departure_airport_id)
        .bind(req.arrival_airport_id)
        .bind(req.departure_time)
        .bind(req.arrival_time)
        .bind(req.aircraft_id)
        .bind(req.base_price)
        .bind(status.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        Self::seed_flight_seats(&mut tx, row.id, req.aircraft_id).await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Inserts one unoccupied flight_seats row per seat of the aircraft.
    /// Conflict-tolerant, so re-running for an already seeded flight is a
    /// no-op.
    async fn seed_flight_seats(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        flight_id: Uuid,
        aircraft_id: Uuid,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO flight_seats (flight_id, seat_id, is_occupied)
            SELECT $1, id, false FROM seats WHERE aircraft_id = $2
            ON CONFLICT (flight_id, seat_id) DO NOTHING
            "#,
        )
        .bind(flight_id)
        .bind(aircraft_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_flights(
        &self,
        departure_airport_id: Option<Uuid>,
    ) -> StoreResult<Vec<Flight>> {
        let rows: Vec<FlightRow> = match departure_airport_id {
            Some(airport_id) => {
                sqlx::query_as(
                    r#"
                    SELECT id, flight_number, departure_airport_id, arrival_airport_id,
                           departure_time, arrival_time, aircraft_id, base_price, status,
                           created_at, updated_at
                    FROM flights
                    WHERE departure_airport_id = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(airport_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, flight_number, departure_airport_id, arrival_airport_id,
                           departure_time, arrival_time, aircraft_id, base_price, status,
                           created_at, updated_at
                    FROM flights
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Live per-cabin aggregate for one flight: total_seats is the count of
    /// occupancy rows per class, available_seats the count of unoccupied
    /// ones. Recomputing from scratch always matches because nothing else is
    /// stored.
    pub async fn cabin_inventory(&self, flight_id: Uuid) -> StoreResult<Vec<CabinInventory>> {
        let rows: Vec<CabinInventoryRow> = sqlx::query_as(
            r#"
            SELECT s.class AS cabin_class,
                   COUNT(*) AS total_seats,
                   COUNT(*) FILTER (WHERE NOT fs.is_occupied) AS available_seats
            FROM flight_seats fs
            JOIN seats s ON s.id = fs.seat_id
            WHERE fs.flight_id = $1
            GROUP BY s.class
            ORDER BY s.class
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CabinInventory {
                flight_id,
                cabin_class: cabin_from_db(&row.cabin_class),
                total_seats: row.total_seats,
                available_seats: row.available_seats,
            })
            .collect())
    }

    /// Scheduled flights on the route/date with live availability > 0 for
    /// the requested cabin, ordered by departure time.
    pub async fn search_flights(
        &self,
        from_airport_id: Uuid,
        to_airport_id: Uuid,
        date: NaiveDate,
        cabin_class: CabinClass,
    ) -> StoreResult<Vec<SearchFlightRow>> {
        let rows: Vec<SearchRow> = sqlx::query_as(
            r#"
            SELECT f.id, f.flight_number,
                   dep.code AS departure_airport_code, arr.code AS arrival_airport_code,
                   f.departure_time, f.arrival_time, f.base_price,
                   inv.available_seats
            FROM flights f
            JOIN airports dep ON dep.id = f.departure_airport_id
            JOIN airports arr ON arr.id = f.arrival_airport_id
            JOIN (
                SELECT fs.flight_id,
                       COUNT(*) FILTER (WHERE NOT fs.is_occupied) AS available_seats
                FROM flight_seats fs
                JOIN seats s ON s.id = fs.seat_id
                WHERE s.class = $4
                GROUP BY fs.flight_id
            ) inv ON inv.flight_id = f.id AND inv.available_seats > 0
            WHERE f.departure_airport_id = $1 AND f.arrival_airport_id = $2
              AND f.status = 'scheduled'
              AND f.departure_time::date = $3
            ORDER BY f.departure_time ASC
            "#,
        )
        .bind(from_airport_id)
        .bind(to_airport_id)
        .bind(date)
        .bind(cabin_class.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SearchFlightRow {
                id: row.id,
                flight_number: row.flight_number,
                departure_airport_code: row.departure_airport_code,
                arrival_airport_code: row.arrival_airport_code,
                departure_time: row.departure_time,
                arrival_time: row.arrival_time,
                base_price: row.base_price,
                available_seats: row.available_seats,
                cabin_class,
            })
            .collect())
    }

    /// Repairs the aggregation source data for every flight after
    /// out-of-band imports by restoring any missing occupancy rows.
    /// Best-effort: a failing flight is skipped and only affects the
    /// processed count. Safe to run repeatedly.
    pub async fn backfill_cabin_inventory(&self) -> StoreResult<u64> {
        let flights: Vec<(Uuid, Uuid)> =
            sqlx::query_as("SELECT id, aircraft_id FROM flights ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;

        let mut flights_processed = 0u64;
        for (flight_id, aircraft_id) in flights {
            let result = sqlx::query(
                r#"
                INSERT INTO flight_seats (flight_id, seat_id, is_occupied)
                SELECT $1, id, false FROM seats WHERE aircraft_id = $2
                ON CONFLICT (flight_id, seat_id) DO NOTHING
                "#,
            )
            .bind(flight_id)
            .bind(aircraft_id)
            .execute(&self.pool)
            .await;

            match result {
                Ok(_) => flights_processed += 1,
                Err(e) => {
                    warn!("Backfill skipped flight {}: {}", flight_id, e);
                }
            }
        }

        Ok(flights_processed)
    }
}
