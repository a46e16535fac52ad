use aerolink_domain::booking::{BookingStatus, FlightReceiptInfo, PassengerInput};
use aerolink_domain::cabin::CabinClass;
use aerolink_domain::pnr;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Commits a booking header, its flight segment and its passenger manifest
/// as one atomic unit. The PNR uniqueness probe and the insert that claims
/// the reference share the same transaction, so no concurrent booking can
/// take the code between check and insert; a UNIQUE constraint backstops it.
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the new booking id and its reference. The segment is priced
    /// at the flight's current base price read inside the transaction; the
    /// caller-supplied total is stored verbatim on the booking header. The
    /// two are deliberately not reconciled. No occupancy row is touched.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        flight_id: Uuid,
        cabin_class: CabinClass,
        total_amount: f64,
        passengers: &[PassengerInput],
    ) -> StoreResult<(Uuid, String)> {
        let mut tx = self.pool.begin().await?;

        let booking_reference = Self::mint_reference(&mut tx).await?;
        let booking_id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, booking_reference, status, total_amount,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(booking_id)
        .bind(user_id)
        .bind(&booking_reference)
        .bind(BookingStatus::Pending.as_str())
        .bind(total_amount)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::conflict_on_unique(e, "booking reference"))?;

        // Segment price is authoritative server-side: the flight's current
        // base price, not the caller-supplied total.
        let base_price: f64 = sqlx::query_scalar("SELECT base_price FROM flights WHERE id = $1")
            .bind(flight_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound("flight"))?;

        sqlx::query(
            r#"
            INSERT INTO booking_flights (id, booking_id, flight_id, cabin_class, price)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(flight_id)
        .bind(cabin_class.as_str())
        .bind(base_price)
        .execute(&mut *tx)
        .await?;

        for passenger in passengers {
            sqlx::query(
                r#"
                INSERT INTO booking_passengers (id, booking_id, first_name, last_name, email,
                                                phone, date_of_birth, passport_number)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(booking_id)
            .bind(passenger.first_name.trim())
            .bind(passenger.last_name.trim())
            .bind(passenger.email.trim())
            .bind(passenger.phone.trim())
            .bind(passenger.date_of_birth)
            .bind(passenger.passport_number.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok((booking_id, booking_reference))
    }

    /// Draws candidates until one is unused, bounded by
    /// MAX_REFERENCE_ATTEMPTS. The probe runs inside the caller's
    /// transaction.
    async fn mint_reference(tx: &mut Transaction<'_, Postgres>) -> StoreResult<String> {
        for _ in 0..pnr::MAX_REFERENCE_ATTEMPTS {
            let candidate = pnr::draw_reference();
            let taken: Option<i32> =
                sqlx::query_scalar("SELECT 1 FROM bookings WHERE booking_reference = $1")
                    .bind(&candidate)
                    .fetch_optional(&mut **tx)
                    .await?;
            if taken.is_none() {
                return Ok(candidate);
            }
        }
        Err(StoreError::ReferenceSpaceExhausted(
            pnr::MAX_REFERENCE_ATTEMPTS,
        ))
    }

    /// Flight fields needed for the receipt projection.
    pub async fn flight_receipt_info(&self, flight_id: Uuid) -> StoreResult<FlightReceiptInfo> {
        let row: Option<(String, String, String, DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT f.flight_number, dep.code, arr.code, f.departure_time, f.arrival_time
            FROM flights f
            JOIN airports dep ON dep.id = f.departure_airport_id
            JOIN airports arr ON arr.id = f.arrival_airport_id
            WHERE f.id = $1
            "#,
        )
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await?;

        let (flight_number, departure_airport_code, arrival_airport_code, departure_time, arrival_time) =
            row.ok_or(StoreError::NotFound("flight"))?;
        Ok(FlightReceiptInfo {
            flight_number,
            departure_airport_code,
            arrival_airport_code,
            departure_time,
            arrival_time,
        })
    }
}
