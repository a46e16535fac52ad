use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cabin::CabinClass;
use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    RoundTrip,
}

#[derive(Debug, Deserialize)]
pub struct FlightSearchRequest {
    #[serde(rename = "type")]
    pub trip_type: TripType,
    pub from_airport_id: Uuid,
    pub to_airport_id: Uuid,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub cabin_class: Option<String>,
}

/// Validated search parameters. A round-trip search always carries a return
/// date here.
#[derive(Debug, Clone, Copy)]
pub struct SearchPlan {
    pub cabin_class: CabinClass,
    pub return_date: Option<NaiveDate>,
}

impl FlightSearchRequest {
    /// Validates the request before any query executes: cabin class must be
    /// recognized and a round-trip search must carry a return date.
    pub fn validate(&self) -> Result<SearchPlan, DomainError> {
        let cabin_class = CabinClass::parse_or_default(self.cabin_class.as_deref())?;
        let return_date = match self.trip_type {
            TripType::OneWay => None,
            TripType::RoundTrip => Some(self.return_date.ok_or_else(|| {
                DomainError::Validation(
                    "return_date is required for round-trip searches".to_string(),
                )
            })?),
        };
        Ok(SearchPlan {
            cabin_class,
            return_date,
        })
    }
}

/// One flight row returned by search, with airport codes and the live
/// availability for the requested cabin.
#[derive(Debug, Clone, Serialize)]
pub struct SearchFlightRow {
    pub id: Uuid,
    pub flight_number: String,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub base_price: f64,
    pub available_seats: i64,
    pub cabin_class: CabinClass,
}

#[derive(Debug, Serialize)]
pub struct FlightSearchResponse {
    pub outbound: Vec<SearchFlightRow>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_leg: Option<Vec<SearchFlightRow>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(trip_type: TripType, return_date: Option<NaiveDate>) -> FlightSearchRequest {
        FlightSearchRequest {
            trip_type,
            from_airport_id: Uuid::new_v4(),
            to_airport_id: Uuid::new_v4(),
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            return_date,
            cabin_class: None,
        }
    }

    #[test]
    fn test_one_way_ignores_return_date() {
        let plan = request(TripType::OneWay, None).validate().unwrap();
        assert_eq!(plan.cabin_class, CabinClass::Economy);
        assert!(plan.return_date.is_none());
    }

    #[test]
    fn test_round_trip_requires_return_date() {
        assert!(request(TripType::RoundTrip, None).validate().is_err());

        let date = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        let plan = request(TripType::RoundTrip, Some(date)).validate().unwrap();
        assert_eq!(plan.return_date, Some(date));
    }

    #[test]
    fn test_invalid_cabin_rejected_before_any_query() {
        let mut req = request(TripType::OneWay, None);
        req.cabin_class = Some("premium".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_trip_type_deserialization() {
        let json = r#"
            {
                "type": "round-trip",
                "from_airport_id": "7f1bfcfa-46f1-4b6e-8f35-9b3c53685bbd",
                "to_airport_id": "e3b4bd60-8f35-4a9e-9f35-2b3c53685b11",
                "departure_date": "2025-06-01",
                "return_date": "2025-06-08"
            }
        "#;
        let req: FlightSearchRequest = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(req.trip_type, TripType::RoundTrip);
        assert_eq!(
            req.departure_date,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }
}
