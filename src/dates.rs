//! Date-string parsing and canonicalization
//!
//! Quote dates are stored as text in the canonical `YYYY.MM.DD` form. The
//! CLI accepts a handful of common input formats and converts them here.

use crate::QuoteError;
use chrono::{Local, NaiveDate};

/// Input formats accepted for quote dates, tried in order
const ACCEPTED_FORMATS: &[&str] = &["%Y%m%d", "%Y/%m/%d", "%Y-%m-%d", "%Y.%m.%d"];

/// Canonical storage/display format
pub const CANONICAL_FORMAT: &str = "%Y.%m.%d";

/// Parses a user-supplied date string and canonicalizes it to `YYYY.MM.DD`
///
/// # Arguments
///
/// * `input` - The date string as typed by the operator
///
/// # Returns
///
/// * `Ok(String)` - The date in canonical form
/// * `Err(QuoteError::Validation)` - No accepted format matched
pub fn canonicalize_date(input: &str) -> Result<String, QuoteError> {
    let input = input.trim();

    for fmt in ACCEPTED_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Ok(date.format(CANONICAL_FORMAT).to_string());
        }
    }

    Err(QuoteError::Validation(format!(
        "Invalid date '{}'; use YYYY/MM/DD, YYYY-MM-DD or YYYY.MM.DD",
        input
    )))
}

/// Returns today's local date in canonical form
///
/// Used as the visit date for quotes discovered while crawling.
pub fn today() -> String {
    Local::now().format(CANONICAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_format() {
        assert_eq!(canonicalize_date("20250702").unwrap(), "2025.07.02");
    }

    #[test]
    fn test_slash_format() {
        assert_eq!(canonicalize_date("2025/07/02").unwrap(), "2025.07.02");
    }

    #[test]
    fn test_dash_format() {
        assert_eq!(canonicalize_date("2025-07-02").unwrap(), "2025.07.02");
    }

    #[test]
    fn test_dot_format() {
        assert_eq!(canonicalize_date("2025.07.02").unwrap(), "2025.07.02");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(canonicalize_date(" 2025-07-02 ").unwrap(), "2025.07.02");
    }

    #[test]
    fn test_rejects_garbage() {
        let result = canonicalize_date("last tuesday");
        assert!(matches!(result, Err(QuoteError::Validation(_))));
    }

    #[test]
    fn test_rejects_impossible_date() {
        let result = canonicalize_date("2025-02-31");
        assert!(result.is_err());
    }

    #[test]
    fn test_today_is_canonical() {
        let today = today();
        assert!(canonicalize_date(&today).is_ok());
    }
}
