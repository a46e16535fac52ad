use aerolink_domain::cabin::CabinClass;
use aerolink_domain::catalog::Seat;
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::catalog_repo::SeatRow;
use crate::error::{StoreError, StoreResult};

/// Physical seats plus the occupancy propagation that keeps every existing
/// flight of an aircraft in sync with its seat catalog.
pub struct SeatRepository {
    pool: PgPool,
}

/// Outcome of the bulk occupancy reconcile. A second consecutive run
/// reports the same flights_processed with zero rows created.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReconcileSummary {
    pub flights_processed: u64,
    pub flight_seats_created: u64,
}

impl SeatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the seat and propagates one unoccupied occupancy row to every
    /// flight already scheduled on the aircraft, in one transaction.
    pub async fn create_seat(
        &self,
        aircraft_id: Uuid,
        seat_number: &str,
        class: CabinClass,
    ) -> StoreResult<Seat> {
        let mut tx = self.pool.begin().await?;

        let aircraft: Option<Uuid> = sqlx::query_scalar("SELECT id FROM aircraft WHERE id = $1")
            .bind(aircraft_id)
            .fetch_optional(&mut *tx)
            .await?;
        if aircraft.is_none() {
            return Err(StoreError::NotFound("aircraft"));
        }

        let now = Utc::now();
        let row: SeatRow = sqlx::query_as(
            r#"
            INSERT INTO seats (id, aircraft_id, seat_number, class, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, aircraft_id, seat_number, class, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(aircraft_id)
        .bind(seat_number.trim())
        .bind(class.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::conflict_on_unique(e, "seat"))?;

        sqlx::query(
            r#"
            INSERT INTO flight_seats (flight_id, seat_id, is_occupied)
            SELECT id, $2, false FROM flights WHERE aircraft_id = $1
            ON CONFLICT (flight_id, seat_id) DO NOTHING
            "#,
        )
        .bind(aircraft_id)
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    pub async fn list_seats(&self, aircraft_id: Option<Uuid>) -> StoreResult<Vec<Seat>> {
        let rows: Vec<SeatRow> = match aircraft_id {
            Some(aircraft_id) => {
                sqlx::query_as(
                    r#"
                    SELECT id, aircraft_id, seat_number, class, created_at, updated_at
                    FROM seats
                    WHERE aircraft_id = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(aircraft_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, aircraft_id, seat_number, class, created_at, updated_at
                    FROM seats
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fills in any missing occupancy rows for all flights against their
    /// aircraft's current seat list. Idempotent; best-effort per flight.
    pub async fn reconcile_flight_seats(&self) -> StoreResult<ReconcileSummary> {
        let flights: Vec<(Uuid, Uuid)> =
            sqlx::query_as("SELECT id, aircraft_id FROM flights ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;

        let mut summary = ReconcileSummary {
            flights_processed: 0,
            flight_seats_created: 0,
        };
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
                Ok(done) => {
                    summary.flights_processed += 1;
                    summary.flight_seats_created += done.rows_affected();
                }
                Err(e) => {
                    warn!("Reconcile skipped flight {}: {}", flight_id, e);
                }
            }
        }

        Ok(summary)
    }
}
