//! Single-field rules.
//!
//! Each validator takes the raw input and returns `None` when the value is
//! acceptable or the message to show next to the field. Input that does not
//! start with an integer fails the same way an out-of-range number does.

use crate::form::models::NEIGHBORHOODS;
use crate::form::parse_int;

pub const MIN_YEAR: i64 = 1800;
pub const MAX_YEAR: i64 = 2025;

pub fn validate_overall_qual(value: &str) -> Option<String> {
    match parse_int(value) {
        Some(n) if (1..=10).contains(&n) => None,
        _ => Some("Overall quality must be between 1 and 10".to_string()),
    }
}

pub fn validate_year(value: &str, label: &str) -> Option<String> {
    match parse_int(value) {
        Some(n) if (MIN_YEAR..=MAX_YEAR).contains(&n) => None,
        _ => Some(format!("{label} must be between {MIN_YEAR} and {MAX_YEAR}")),
    }
}

pub fn validate_positive_number(value: &str, label: &str) -> Option<String> {
    match parse_int(value) {
        Some(n) if n > 0 => None,
        _ => Some(format!("{label} must be greater than 0")),
    }
}

pub fn validate_non_negative_number(value: &str, label: &str) -> Option<String> {
    match parse_int(value) {
        Some(n) if n >= 0 => None,
        _ => Some(format!("{label} must be 0 or greater")),
    }
}

/// Inclusive range check.
pub fn validate_range(value: &str, min: i64, max: i64, label: &str) -> Option<String> {
    match parse_int(value) {
        Some(n) if (min..=max).contains(&n) => None,
        _ => Some(format!("{label} must be between {min} and {max}")),
    }
}

pub fn is_known_neighborhood(code: &str) -> bool {
    NEIGHBORHOODS.iter().any(|(c, _)| *c == code)
}

pub fn validate_neighborhood(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Please select a neighborhood".to_string());
    }
    if !is_known_neighborhood(value) {
        return Some("Invalid neighborhood selected".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_quality_bounds() {
        assert_eq!(validate_overall_qual("1"), None);
        assert_eq!(validate_overall_qual("10"), None);
        assert!(validate_overall_qual("0").is_some());
        assert!(validate_overall_qual("11").is_some());
    }

    #[test]
    fn non_numeric_input_reports_range_message() {
        assert_eq!(
            validate_overall_qual("great").as_deref(),
            Some("Overall quality must be between 1 and 10")
        );
        assert_eq!(
            validate_year("soon", "Year built").as_deref(),
            Some("Year built must be between 1800 and 2025")
        );
        assert_eq!(
            validate_range("", 0, 5, "Garage cars").as_deref(),
            Some("Garage cars must be between 0 and 5")
        );
    }

    #[test]
    fn year_bounds() {
        assert_eq!(validate_year("1800", "Year"), None);
        assert_eq!(validate_year("2025", "Year"), None);
        assert!(validate_year("1799", "Year").is_some());
        assert!(validate_year("2026", "Year").is_some());
    }

    #[test]
    fn positive_and_non_negative() {
        assert_eq!(validate_positive_number("1", "Lot area"), None);
        assert_eq!(
            validate_positive_number("0", "Lot area").as_deref(),
            Some("Lot area must be greater than 0")
        );
        assert_eq!(validate_non_negative_number("0", "Fireplaces"), None);
        assert_eq!(
            validate_non_negative_number("-1", "Fireplaces").as_deref(),
            Some("Fireplaces must be 0 or greater")
        );
        assert!(validate_non_negative_number("x", "Fireplaces").is_some());
    }

    #[test]
    fn generic_range_is_inclusive() {
        assert_eq!(validate_range("0", 0, 5, "Cars"), None);
        assert_eq!(validate_range("5", 0, 5, "Cars"), None);
        assert!(validate_range("6", 0, 5, "Cars").is_some());
        assert!(validate_range("-1", 0, 5, "Cars").is_some());
    }

    #[test]
    fn neighborhood_membership() {
        assert_eq!(validate_neighborhood("NAmes"), None);
        assert_eq!(validate_neighborhood("Veenker"), None);
        assert_eq!(
            validate_neighborhood("").as_deref(),
            Some("Please select a neighborhood")
        );
        assert_eq!(
            validate_neighborhood("names").as_deref(),
            Some("Invalid neighborhood selected")
        );
    }
}
