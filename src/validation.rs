//! Field rules shared by the import pipeline, the airport search and
//! flight search requests.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

fn get_regex(re: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    re.get_or_init(|| Regex::new(pattern).expect("Invalid regex pattern defined in code"))
}

/// ISO 3166-1 alpha-2: exactly two uppercase ASCII letters.
#[must_use]
pub fn is_country_code(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"^[A-Z]{2}$").is_match(value)
}

/// IATA airport code: exactly three uppercase ASCII letters.
#[must_use]
pub fn is_iata_code(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"^[A-Z]{3}$").is_match(value)
}

/// Basic search queries: 2 to 64 word characters or whitespace.
///
/// Punctuation is rejected, so a pasted name containing e.g. a hyphen will
/// not validate.
#[must_use]
pub fn is_search_query(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"^[\w\s]{2,64}$").is_match(value)
}

#[must_use]
pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

#[must_use]
pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a 3 letter IATA code, got '{value}'")]
    InvalidIataCode { field: &'static str, value: String },

    #[error("Origin and destination airports can't be the same")]
    SameOriginAndDestination,

    #[error("Return date can't precede departure date")]
    ReturnBeforeDeparture,
}

/// A validated flight search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightSearch {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl FlightSearch {
    /// Normalizes airport codes to uppercase and checks the request is coherent.
    pub fn new(
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        return_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let origin = normalize_code(origin);
        if !is_iata_code(&origin) {
            return Err(ValidationError::InvalidIataCode {
                field: "origin",
                value: origin,
            });
        }

        let destination = normalize_code(destination);
        if !is_iata_code(&destination) {
            return Err(ValidationError::InvalidIataCode {
                field: "destination",
                value: destination,
            });
        }

        if origin == destination {
            return Err(ValidationError::SameOriginAndDestination);
        }

        if return_date.is_some_and(|ret| ret < departure_date) {
            return Err(ValidationError::ReturnBeforeDeparture);
        }

        Ok(Self {
            origin,
            destination,
            departure_date,
            return_date,
        })
    }

    #[must_use]
    pub const fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_country_code_rules() {
        assert!(is_country_code("IL"));
        assert!(!is_country_code("il"));
        assert!(!is_country_code("ISR"));
        assert!(!is_country_code("I"));
    }

    #[test]
    fn test_iata_code_rules() {
        assert!(is_iata_code("TLV"));
        assert!(!is_iata_code("TL"));
        assert!(!is_iata_code("tlv"));
        assert!(!is_iata_code("T1V"));
    }

    #[test]
    fn test_search_query_rules() {
        assert!(is_search_query("AA"));
        assert!(is_search_query("Tel Aviv"));
        assert!(is_search_query("Zürich"));
        assert!(!is_search_query("a"));
        assert!(!is_search_query("O'Hare"));
        assert!(!is_search_query(&"x".repeat(65)));
    }

    #[test]
    fn test_min_chars_counts_characters_not_bytes() {
        assert!(has_min_chars("Åa", 2));
        assert!(!has_min_chars("Å", 2));
    }

    #[test]
    fn test_flight_search_normalizes_codes() {
        let search = FlightSearch::new(" tlv ", "jfk", date(2024, 5, 1), None).unwrap();
        assert_eq!(search.origin, "TLV");
        assert_eq!(search.destination, "JFK");
        assert!(!search.is_round_trip());
    }

    #[test]
    fn test_flight_search_rejects_same_airports() {
        let err = FlightSearch::new("TLV", "tlv", date(2024, 5, 1), None).unwrap_err();
        assert_eq!(err, ValidationError::SameOriginAndDestination);
    }

    #[test]
    fn test_flight_search_rejects_return_before_departure() {
        let err = FlightSearch::new("TLV", "JFK", date(2024, 5, 10), Some(date(2024, 5, 1)))
            .unwrap_err();
        assert_eq!(err, ValidationError::ReturnBeforeDeparture);

        let same_day = FlightSearch::new("TLV", "JFK", date(2024, 5, 10), Some(date(2024, 5, 10)));
        assert!(same_day.unwrap().is_round_trip());
    }

    #[test]
    fn test_flight_search_rejects_bad_codes() {
        let err = FlightSearch::new("TLVX", "JFK", date(2024, 5, 1), None).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidIataCode { field: "origin", .. }
        ));
    }
}
