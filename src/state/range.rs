/// Date range validation
///
/// The two date fields are checked before any request is issued.
/// Dates are compared by their literal calendar value: no clamping,
/// no timezone normalization.

use chrono::{Days, NaiveDate};
use thiserror::Error;

/// ISO calendar date format accepted by the input fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of days shown by default (ending today)
const DEFAULT_SPAN_DAYS: u64 = 9;

/// Which input field a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Start,
    End,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Start => write!(f, "start"),
            Field::End => write!(f, "end"),
        }
    }
}

/// Reasons a submission is rejected before reaching the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select both start and end dates.")]
    MissingInput,

    #[error("Start date must be before or equal to end date.")]
    InvertedRange,

    #[error("The {field} date \"{value}\" is not a valid YYYY-MM-DD date.")]
    MalformedDate { field: Field, value: String },
}

/// A start/end pair that passed validation (start <= end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ValidatedRange {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Validate the raw contents of the two date fields.
///
/// Emptiness is checked for both fields before either is parsed, so an
/// empty field always reports `MissingInput`.
pub fn validate(start: &str, end: &str) -> Result<ValidatedRange, ValidationError> {
    let (start, end) = (start.trim(), end.trim());

    if start.is_empty() || end.is_empty() {
        return Err(ValidationError::MissingInput);
    }

    let start = parse_field(Field::Start, start)?;
    let end = parse_field(Field::End, end)?;

    validate_dates(start, end)
}

/// Validate two already-parsed dates
pub fn validate_dates(start: NaiveDate, end: NaiveDate) -> Result<ValidatedRange, ValidationError> {
    if start > end {
        return Err(ValidationError::InvertedRange);
    }

    Ok(ValidatedRange { start, end })
}

fn parse_field(field: Field, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::MalformedDate {
        field,
        value: value.to_string(),
    })
}

/// The range the input fields are prefilled with: the nine days ending `today`
pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_days(Days::new(DEFAULT_SPAN_DAYS - 1))
        .unwrap_or(today);
    (start, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_start_is_missing_input() {
        assert_eq!(validate("", "2024-01-01"), Err(ValidationError::MissingInput));
    }

    #[test]
    fn test_empty_end_is_missing_input() {
        assert_eq!(validate("2024-01-01", "   "), Err(ValidationError::MissingInput));
    }

    #[test]
    fn test_missing_input_wins_over_malformed() {
        assert_eq!(validate("not-a-date", ""), Err(ValidationError::MissingInput));
    }

    #[test]
    fn test_inverted_range() {
        assert_eq!(
            validate("2024-01-02", "2024-01-01"),
            Err(ValidationError::InvertedRange)
        );
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let range = validate("2024-01-01", "2024-01-01").unwrap();
        assert_eq!(range.start(), date(2024, 1, 1));
        assert_eq!(range.end(), date(2024, 1, 1));
    }

    #[test]
    fn test_malformed_date_names_field() {
        let err = validate("2024-01-01", "2024-13-01").unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedDate {
                field: Field::End,
                value: "2024-13-01".to_string(),
            }
        );
        assert!(err.to_string().contains("end date"));
    }

    #[test]
    fn test_default_range_spans_nine_days() {
        let (start, end) = default_range(date(2024, 3, 10));
        assert_eq!(start, date(2024, 3, 2));
        assert_eq!(end, date(2024, 3, 10));
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..20_000).prop_map(|offset| date(1995, 6, 16) + chrono::Duration::days(offset))
    }

    proptest! {
        #[test]
        fn prop_either_empty_is_missing_input(d in any_date(), start_empty in any::<bool>()) {
            let text = d.format(DATE_FORMAT).to_string();
            let result = if start_empty {
                validate("", &text)
            } else {
                validate(&text, "")
            };
            prop_assert_eq!(result, Err(ValidationError::MissingInput));
        }

        #[test]
        fn prop_start_after_end_is_inverted(a in any_date(), b in any_date()) {
            prop_assume!(a != b);
            let (early, late) = if a < b { (a, b) } else { (b, a) };
            let result = validate(
                &late.format(DATE_FORMAT).to_string(),
                &early.format(DATE_FORMAT).to_string(),
            );
            prop_assert_eq!(result, Err(ValidationError::InvertedRange));
        }

        #[test]
        fn prop_ordered_dates_pass_unchanged(a in any_date(), b in any_date()) {
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            let range = validate(
                &early.format(DATE_FORMAT).to_string(),
                &late.format(DATE_FORMAT).to_string(),
            ).unwrap();
            prop_assert_eq!(range.start(), early);
            prop_assert_eq!(range.end(), late);
        }
    }
}
