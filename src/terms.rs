//! Textbook-term resolution for a calendar date.
//!
//! Textbook searches are keyed on the calendar year and season of the
//! academic term containing a date; this resolves both from a terms
//! response.

use serde_json::Value;
use tracing::warn;

use crate::envelope::{extract_attributes, field_text};
use crate::error::ShapeError;

/// The term fields a textbook search is keyed on. Fields the response
/// lacked stay empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermInfo {
    pub calendar_year: String,
    pub season: String,
}

/// Extracts the calendar year and season from a terms response for `date`.
///
/// A key that is absent or holds an empty value is reported and left empty;
/// only a response with no usable attribute map at all is an error.
pub fn term_for_date(body: &Value, date: &str) -> Result<TermInfo, ShapeError> {
    let attrs = extract_attributes(body)?;

    let calendar_year = attrs
        .get("calendarYear")
        .map(field_text)
        .unwrap_or_default();
    if calendar_year.is_empty() {
        warn!(date, "'calendarYear' attribute is missing or empty");
    }

    let season = attrs.get("season").map(field_text).unwrap_or_default();
    if season.is_empty() {
        warn!(date, "'season' attribute is missing or empty");
    }

    Ok(TermInfo {
        calendar_year,
        season,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolves_year_and_season() {
        let body = json!({"data": [{"attributes": {
            "calendarYear": "2023",
            "season": "Fall",
        }}]});

        let term = term_for_date(&body, "2023-10-01").unwrap();
        assert_eq!(term.calendar_year, "2023");
        assert_eq!(term.season, "Fall");
    }

    #[test]
    fn test_missing_keys_leave_fields_empty() {
        let body = json!({"data": [{"attributes": {"description": "Fall 2023"}}]});

        let term = term_for_date(&body, "2023-10-01").unwrap();
        assert_eq!(term, TermInfo::default());
    }

    #[test]
    fn test_present_but_empty_value_is_treated_as_missing() {
        let body = json!({"data": [{"attributes": {
            "calendarYear": "",
            "season": "Fall",
        }}]});

        let term = term_for_date(&body, "2023-10-01").unwrap();
        assert_eq!(term.calendar_year, "");
        assert_eq!(term.season, "Fall");
    }

    #[test]
    fn test_numeric_year_renders_as_text() {
        let body = json!({"data": [{"attributes": {
            "calendarYear": 2023,
            "season": "Fall",
        }}]});

        let term = term_for_date(&body, "2023-10-01").unwrap();
        assert_eq!(term.calendar_year, "2023");
    }

    #[test]
    fn test_unusable_response_is_a_shape_error() {
        assert_eq!(
            term_for_date(&json!({"data": []}), "2023-10-01"),
            Err(ShapeError::MissingAttributes)
        );
        assert_eq!(
            term_for_date(&json!({}), "2023-10-01"),
            Err(ShapeError::EmptyResponse)
        );
    }
}
