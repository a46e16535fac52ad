use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cabin::CabinClass;
use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub booking_reference: String,
    pub status: BookingStatus,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub passport_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub flight_id: Uuid,
    pub cabin_class: Option<String>,
    pub total_amount: f64,
    pub passengers: Vec<PassengerInput>,
}

impl CreateBookingRequest {
    /// Validates the whole request before any write: cabin class, a
    /// non-empty passenger list, the required fields of every passenger,
    /// and a non-negative total.
    pub fn validate(&self) -> Result<CabinClass, DomainError> {
        let cabin = CabinClass::parse_or_default(self.cabin_class.as_deref())?;
        if self.passengers.is_empty() {
            return Err(DomainError::Validation(
                "at least one passenger is required".to_string(),
            ));
        }
        for passenger in &self.passengers {
            if passenger.first_name.trim().is_empty() {
                return Err(DomainError::Validation(
                    "passenger first_name is required".to_string(),
                ));
            }
            if passenger.last_name.trim().is_empty() {
                return Err(DomainError::Validation(
                    "passenger last_name is required".to_string(),
                ));
            }
            if passenger.email.trim().is_empty() {
                return Err(DomainError::Validation(
                    "passenger email is required".to_string(),
                ));
            }
            if passenger.phone.trim().is_empty() {
                return Err(DomainError::Validation(
                    "passenger phone is required".to_string(),
                ));
            }
        }
        if self.total_amount < 0.0 {
            return Err(DomainError::Validation(
                "total_amount must be non-negative".to_string(),
            ));
        }
        Ok(cabin)
    }
}

/// Flight fields needed to issue a receipt, read back after the booking
/// transaction commits.
#[derive(Debug, Clone)]
pub struct FlightReceiptInfo {
    pub flight_number: String,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptPassenger {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Receipt projection handed to the caller and to the notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub booking_id: Uuid,
    pub booking_reference: String,
    pub flight_number: String,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub cabin_class: CabinClass,
    pub total_amount: f64,
    pub passenger_count: usize,
    pub passengers: Vec<ReceiptPassenger>,
    pub issued_at: DateTime<Utc>,
}

impl Receipt {
    pub fn issue(
        booking_id: Uuid,
        booking_reference: String,
        flight: FlightReceiptInfo,
        cabin_class: CabinClass,
        total_amount: f64,
        passengers: &[PassengerInput],
    ) -> Self {
        let passengers: Vec<ReceiptPassenger> = passengers
            .iter()
            .map(|p| ReceiptPassenger {
                first_name: p.first_name.trim().to_string(),
                last_name: p.last_name.trim().to_string(),
                email: p.email.trim().to_string(),
            })
            .collect();
        Receipt {
            booking_id,
            booking_reference,
            flight_number: flight.flight_number,
            departure_airport_code: flight.departure_airport_code,
            arrival_airport_code: flight.arrival_airport_code,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            cabin_class,
            total_amount,
            passenger_count: passengers.len(),
            passengers,
            issued_at: Utc::now(),
        }
    }

    /// "First Last" per passenger, skipping fully blank names.
    pub fn passenger_names(&self) -> Vec<String> {
        self.passengers
            .iter()
            .map(|p| format!("{} {}", p.first_name, p.last_name).trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// "DEP -> ARR" route line used in notification bodies.
    pub fn route(&self) -> String {
        format!(
            "{} -> {}",
            self.departure_airport_code, self.arrival_airport_code
        )
    }
}

#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    pub booking_id: Uuid,
    pub booking_reference: String,
    pub receipt: Receipt,
    pub email_sent: bool,
}
