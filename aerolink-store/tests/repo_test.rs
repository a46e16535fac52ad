//! Repository tests against a live Postgres. `#[sqlx::test]` provisions a
//! throwaway database per test and applies the workspace migrations, so these
//! run wherever DATABASE_URL points at a reachable server.

use aerolink_domain::cabin::CabinClass;
use aerolink_domain::catalog::{CreateAircraftRequest, CreateAirportRequest};
use aerolink_domain::flight::{CreateFlightRequest, FlightStatus};
use aerolink_domain::booking::PassengerInput;
use aerolink_store::{
    BookingRepository, CatalogRepository, FlightRepository, SeatRepository, StoreError,
};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

struct Fixture {
    flight_id: Uuid,
    aircraft_id: Uuid,
}

/// Two airports, one aircraft with 2 economy + 1 business seat, one
/// scheduled flight between them.
async fn seed_flight(pool: &PgPool) -> Fixture {
    let catalog = CatalogRepository::new(pool.clone());
    let seats = SeatRepository::new(pool.clone());
    let flights = FlightRepository::new(pool.clone());

    let dep = catalog
        .create_airport(&CreateAirportRequest {
            code: "AMS".to_string(),
            name: "Schiphol".to_string(),
            city: "Amsterdam".to_string(),
            country: "Netherlands".to_string(),
        })
        .await
        .expect("create departure airport");
    let arr = catalog
        .create_airport(&CreateAirportRequest {
            code: "LIS".to_string(),
            name: "Humberto Delgado".to_string(),
            city: "Lisbon".to_string(),
            country: "Portugal".to_string(),
        })
        .await
        .expect("create arrival airport");
    let aircraft = catalog
        .create_aircraft(&CreateAircraftRequest {
            model: "E195-E2".to_string(),
            total_seats: 3,
        })
        .await
        .expect("create aircraft");

    for (number, class) in [
        ("1A", CabinClass::Business),
        ("10A", CabinClass::Economy),
        ("10B", CabinClass::Economy),
    ] {
        seats
            .create_seat(aircraft.id, number, class)
            .await
            .expect("create seat");
    }

    let departure_time = Utc::now() + Duration::days(7);
    let flight = flights
        .create_flight(
            &CreateFlightRequest {
                flight_number: "AL101".to_string(),
                departure_airport_id: dep.id,
                arrival_airport_id: arr.id,
                departure_time,
                arrival_time: departure_time + Duration::hours(3),
                aircraft_id: aircraft.id,
                base_price: 149.50,
                status: None,
            },
            FlightStatus::Scheduled,
        )
        .await
        .expect("create flight");

    Fixture {
        flight_id: flight.id,
        aircraft_id: aircraft.id,
    }
}

fn passenger(first: &str, last: &str) -> PassengerInput {
    PassengerInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: "+31600000000".to_string(),
        date_of_birth: None,
        passport_number: None,
    }
}

#[sqlx::test(migrations = "../migrations")]
async fn test_create_flight_seeds_one_row_per_seat(pool: PgPool) {
    let fixture = seed_flight(&pool).await;
    let flights = FlightRepository::new(pool.clone());

    let seeded: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flight_seats WHERE flight_id = $1")
        .bind(fixture.flight_id)
        .fetch_one(&pool)
        .await
        .expect("count flight_seats");
    assert_eq!(seeded, 3);

    let inventory = flights
        .cabin_inventory(fixture.flight_id)
        .await
        .expect("cabin inventory");
    assert_eq!(inventory.len(), 2);
    let economy = inventory
        .iter()
        .find(|c| c.cabin_class == CabinClass::Economy)
        .expect("economy cabin");
    assert_eq!(economy.total_seats, 2);
    assert_eq!(economy.available_seats, 2);
    let business = inventory
        .iter()
        .find(|c| c.cabin_class == CabinClass::Business)
        .expect("business cabin");
    assert_eq!(business.total_seats, 1);
    assert_eq!(business.available_seats, 1);
}

#[sqlx::test(migrations = "../migrations")]
async fn test_booking_commits_header_segment_and_passengers(pool: PgPool) {
    let fixture = seed_flight(&pool).await;
    let bookings = BookingRepository::new(pool.clone());
    let flights = FlightRepository::new(pool.clone());

    let before = flights
        .cabin_inventory(fixture.flight_id)
        .await
        .expect("inventory before");

    let passengers = vec![passenger("Ada", "Vega"), passenger("Bram", "Vega")];
    let (booking_id, reference) = bookings
        .create_booking(
            Uuid::new_v4(),
            fixture.flight_id,
            CabinClass::Economy,
            299.00,
            &passengers,
        )
        .await
        .expect("create booking");
    assert_eq!(reference.len(), 6);

    let (status, total_amount): (String, f64) =
        sqlx::query_as("SELECT status, total_amount FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_one(&pool)
            .await
            .expect("booking header");
    assert_eq!(status, "pending");
    assert_eq!(total_amount, 299.00);

    // The segment carries the flight's own base price, not the caller total.
    let segment_price: f64 =
        sqlx::query_scalar("SELECT price FROM booking_flights WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_one(&pool)
            .await
            .expect("segment");
    assert_eq!(segment_price, 149.50);

    let manifest: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM booking_passengers WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_one(&pool)
            .await
            .expect("count passengers");
    assert_eq!(manifest, 2);

    // Committing a booking touches no occupancy rows, so the live aggregate
    // reads the same before and after.
    let after = flights
        .cabin_inventory(fixture.flight_id)
        .await
        .expect("inventory after");
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.cabin_class, a.cabin_class);
        assert_eq!(b.total_seats, a.total_seats);
        assert_eq!(b.available_seats, a.available_seats);
    }
}

#[sqlx::test(migrations = "../migrations")]
async fn test_failed_booking_leaves_no_partial_rows(pool: PgPool) {
    let bookings = BookingRepository::new(pool.clone());

    // The header insert succeeds before the flight lookup fails, so this
    // exercises the rollback of already-written rows.
    let err = bookings
        .create_booking(
            Uuid::new_v4(),
            Uuid::new_v4(),
            CabinClass::Economy,
            100.00,
            &[passenger("Ada", "Vega")],
        )
        .await
        .expect_err("booking against unknown flight");
    assert!(matches!(err, StoreError::NotFound("flight")));

    for table in ["bookings", "booking_flights", "booking_passengers"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 0, "{table} must be empty after rollback");
    }
}

#[sqlx::test(migrations = "../migrations")]
async fn test_reconcile_restores_missing_rows_then_reports_zero(pool: PgPool) {
    let fixture = seed_flight(&pool).await;
    let seats = SeatRepository::new(pool.clone());

    // Simulate an out-of-band import that lost one occupancy row.
    sqlx::query(
        r#"
        DELETE FROM flight_seats
        WHERE flight_id = $1
          AND seat_id = (SELECT id FROM seats WHERE aircraft_id = $2 AND seat_number = '10A')
        "#,
    )
    .bind(fixture.flight_id)
    .bind(fixture.aircraft_id)
    .execute(&pool)
    .await
    .expect("drop occupancy row");

    let first = seats
        .reconcile_flight_seats()
        .await
        .expect("first reconcile");
    assert_eq!(first.flights_processed, 1);
    assert_eq!(first.flight_seats_created, 1);

    let second = seats
        .reconcile_flight_seats()
        .await
        .expect("second reconcile");
    assert_eq!(second.flights_processed, 1);
    assert_eq!(second.flight_seats_created, 0);
}
