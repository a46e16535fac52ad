use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cabin::CabinClass;
use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Scheduled,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "scheduled",
            FlightStatus::Delayed => "delayed",
            FlightStatus::Cancelled => "cancelled",
        }
    }

    /// Parses caller input. Blank input falls back to scheduled.
    pub fn parse_or_default(raw: Option<&str>) -> Result<Self, DomainError> {
        let trimmed = raw.unwrap_or("").trim().to_lowercase();
        match trimmed.as_str() {
            "" | "scheduled" => Ok(FlightStatus::Scheduled),
            "delayed" => Ok(FlightStatus::Delayed),
            "cancelled" => Ok(FlightStatus::Cancelled),
            _ => Err(DomainError::Validation(
                "status must be scheduled, delayed, or cancelled".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub flight_number: String,
    pub departure_airport_id: Uuid,
    pub arrival_airport_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub aircraft_id: Uuid,
    pub base_price: f64,
    pub status: FlightStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFlightRequest {
    pub flight_number: String,
    pub departure_airport_id: Uuid,
    pub arrival_airport_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub aircraft_id: Uuid,
    pub base_price: f64,
    pub status: Option<String>,
}

impl CreateFlightRequest {
    /// Validates caller input and resolves the status default. Runs before
    /// any write.
    pub fn validate(&self) -> Result<FlightStatus, DomainError> {
        if self.flight_number.trim().is_empty() {
            return Err(DomainError::Validation(
                "flight_number is required".to_string(),
            ));
        }
        if self.base_price < 0.0 {
            return Err(DomainError::Validation(
                "base_price must be non-negative".to_string(),
            ));
        }
        FlightStatus::parse_or_default(self.status.as_deref())
    }
}

/// Per-flight per-class capacity snapshot, always computed live from the
/// occupancy rows. Never stored independently.
#[derive(Debug, Clone, Serialize)]
pub struct CabinInventory {
    pub flight_id: Uuid,
    pub cabin_class: CabinClass,
    pub total_seats: i64,
    pub available_seats: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: Option<&str>) -> CreateFlightRequest {
        CreateFlightRequest {
            flight_number: "AL101".to_string(),
            departure_airport_id: Uuid::new_v4(),
            arrival_airport_id: Uuid::new_v4(),
            departure_time: Utc::now(),
            arrival_time: Utc::now(),
            aircraft_id: Uuid::new_v4(),
            base_price: 199.0,
            status: status.map(String::from),
        }
    }

    #[test]
    fn test_status_defaults_to_scheduled() {
        assert_eq!(request(None).validate().unwrap(), FlightStatus::Scheduled);
        assert_eq!(request(Some("")).validate().unwrap(), FlightStatus::Scheduled);
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(request(Some("boarding")).validate().is_err());
    }

    #[test]
    fn test_blank_flight_number_rejected() {
        let mut req = request(None);
        req.flight_number = "   ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_base_price_rejected() {
        let mut req = request(None);
        req.base_price = -1.0;
        assert!(req.validate().is_err());
    }
}
