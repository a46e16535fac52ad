use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cabin::CabinClass;
use crate::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: Uuid,
    pub model: String,
    /// Informational only. The true seat count is the count of Seat rows.
    pub total_seats: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub seat_number: String,
    pub class: CabinClass,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAirportRequest {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

impl CreateAirportRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.code.trim().is_empty() {
            return Err(DomainError::Validation("code is required".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("name is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAircraftRequest {
    pub model: String,
    pub total_seats: i32,
}

impl CreateAircraftRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.model.trim().is_empty() {
            return Err(DomainError::Validation("model is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSeatRequest {
    pub aircraft_id: Uuid,
    pub seat_number: String,
    pub class: Option<String>,
}

impl CreateSeatRequest {
    /// Validates caller input and resolves the class default.
    pub fn validate(&self) -> Result<CabinClass, DomainError> {
        if self.seat_number.trim().is_empty() {
            return Err(DomainError::Validation(
                "seat_number is required".to_string(),
            ));
        }
        CabinClass::parse_or_default(self.class.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_class_defaults_to_economy() {
        let req = CreateSeatRequest {
            aircraft_id: Uuid::new_v4(),
            seat_number: "12A".to_string(),
            class: None,
        };
        assert_eq!(req.validate().unwrap(), CabinClass::Economy);
    }

    #[test]
    fn test_seat_unknown_class_rejected() {
        let req = CreateSeatRequest {
            aircraft_id: Uuid::new_v4(),
            seat_number: "1A".to_string(),
            class: Some("suite".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_airport_code_required() {
        let req = CreateAirportRequest {
            code: " ".to_string(),
            name: "Heathrow".to_string(),
            city: "London".to_string(),
            country: "UK".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
