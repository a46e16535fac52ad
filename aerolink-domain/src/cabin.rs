use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Cabin class partitioning seats and pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    Economy,
    Business,
    First,
}

impl CabinClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }

    /// Capitalized form used in receipts and emails.
    pub fn display_name(&self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        }
    }

    /// Parses caller input. Blank input falls back to economy; anything
    /// outside the three recognized classes is rejected.
    pub fn parse_or_default(raw: Option<&str>) -> Result<Self, DomainError> {
        let trimmed = raw.unwrap_or("").trim().to_lowercase();
        match trimmed.as_str() {
            "" | "economy" => Ok(CabinClass::Economy),
            "business" => Ok(CabinClass::Business),
            "first" => Ok(CabinClass::First),
            _ => Err(DomainError::Validation(
                "cabin_class must be economy, business, or first".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for CabinClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_classes() {
        assert_eq!(
            CabinClass::parse_or_default(Some("economy")).unwrap(),
            CabinClass::Economy
        );
        assert_eq!(
            CabinClass::parse_or_default(Some("business")).unwrap(),
            CabinClass::Business
        );
        assert_eq!(
            CabinClass::parse_or_default(Some("first")).unwrap(),
            CabinClass::First
        );
    }

    #[test]
    fn test_blank_defaults_to_economy() {
        assert_eq!(
            CabinClass::parse_or_default(None).unwrap(),
            CabinClass::Economy
        );
        assert_eq!(
            CabinClass::parse_or_default(Some("  ")).unwrap(),
            CabinClass::Economy
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            CabinClass::parse_or_default(Some(" Business ")).unwrap(),
            CabinClass::Business
        );
    }

    #[test]
    fn test_unknown_class_rejected() {
        assert!(CabinClass::parse_or_default(Some("premium")).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&CabinClass::First).unwrap();
        assert_eq!(json, "\"first\"");
        let parsed: CabinClass = serde_json::from_str("\"economy\"").unwrap();
        assert_eq!(parsed, CabinClass::Economy);
    }
}
