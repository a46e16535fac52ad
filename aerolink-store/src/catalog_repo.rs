use aerolink_domain::cabin::CabinClass;
use aerolink_domain::catalog::{
    Aircraft, Airport, CreateAircraftRequest, CreateAirportRequest, Seat,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Airport and aircraft reference data. Plain catalog maintenance; the only
/// invariant is airport code uniqueness.
pub struct CatalogRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct AirportRow {
    id: Uuid,
    code: String,
    name: String,
    city: String,
    country: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AirportRow> for Airport {
    fn from(row: AirportRow) -> Self {
        Airport {
            id: row.id,
            code: row.code,
            name: row.name,
            city: row.city,
            country: row.country,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AircraftRow {
    id: Uuid,
    model: String,
    total_seats: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AircraftRow> for Aircraft {
    fn from(row: AircraftRow) -> Self {
        Aircraft {
            id: row.id,
            model: row.model,
            total_seats: row.total_seats,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct SeatRow {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub seat_number: String,
    pub class: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SeatRow> for Seat {
    fn from(row: SeatRow) -> Self {
        Seat {
            id: row.id,
            aircraft_id: row.aircraft_id,
            seat_number: row.seat_number,
            class: cabin_from_db(&row.class),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// The CHECK constraint on seats.class guarantees one of the three values.
pub(crate) fn cabin_from_db(class: &str) -> CabinClass {
    CabinClass::parse_or_default(Some(class)).unwrap_or(CabinClass::Economy)
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_airport(&self, req: &CreateAirportRequest) -> StoreResult<Airport> {
        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM airports WHERE code = $1")
            .bind(req.code.trim())
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(StoreError::Conflict("airport code already exists".to_string()));
        }

        let now = Utc::now();
        let row: AirportRow = sqlx::query_as(
            r#"
            INSERT INTO airports (id, code, name, city, country, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, code, name, city, country, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.code.trim())
        .bind(&req.name)
        .bind(&req.city)
        .bind(&req.country)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::conflict_on_unique(e, "airport code"))?;

        Ok(row.into())
    }

    pub async fn list_airports(&self) -> StoreResult<Vec<Airport>> {
        let rows: Vec<AirportRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, city, country, created_at, updated_at
            FROM airports
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create_aircraft(&self, req: &CreateAircraftRequest) -> StoreResult<Aircraft> {
        let now = Utc::now();
        let row: AircraftRow = sqlx::query_as(
            r#"
            INSERT INTO aircraft (id, model, total_seats, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, model, total_seats, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.model)
        .bind(req.total_seats)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn list_aircraft(&self) -> StoreResult<Vec<Aircraft>> {
        let rows: Vec<AircraftRow> = sqlx::query_as(
            r#"
            SELECT id, model, total_seats, created_at, updated_at
            FROM aircraft
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
