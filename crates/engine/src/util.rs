//! Internal helpers for payload validation and date handling.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every operation reports the same messages.

use chrono::{Datelike, NaiveDate, Utc};

use crate::{EngineError, ResultEngine};

/// Trim a required text field, rejecting blank values with
/// "`{label}` is required".
pub(crate) fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

/// Amounts must be finite and strictly positive.
pub(crate) fn require_positive_amount(amount: f64) -> ResultEngine<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::Validation(
            "Valid amount is required".to_string(),
        ));
    }
    Ok(())
}

/// Parse an income date.
///
/// Clients send ISO-ish strings; anything after a literal 'T' is dropped so
/// full timestamps are accepted. A missing date means today.
pub(crate) fn parse_income_date(value: Option<&str>) -> ResultEngine<NaiveDate> {
    let Some(raw) = value else {
        return Ok(Utc::now().date_naive());
    };
    let day = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| EngineError::Validation(format!("Invalid date: {raw}")))
}

/// Expand a "YYYY-MM" month into its first and last day, both inclusive.
pub(crate) fn month_range(month: &str) -> ResultEngine<(NaiveDate, NaiveDate)> {
    let invalid = || EngineError::Validation(format!("Invalid month: {month}"));
    let start =
        NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    }
    .and_then(|day| day.pred_opt())
    .ok_or_else(invalid)?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_range_covers_whole_month() {
        let (start, end) = month_range("2024-03").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn month_range_handles_february_leap_year() {
        let (_, end) = month_range("2024-02").unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn month_range_handles_december() {
        let (start, end) = month_range("2023-12").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn month_range_rejects_garbage() {
        assert!(month_range("2024-13").is_err());
        assert!(month_range("march").is_err());
        assert!(month_range("").is_err());
    }

    #[test]
    fn income_date_strips_time_part() {
        let date = parse_income_date(Some("2024-03-15T10:30:00Z")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn income_date_defaults_to_today() {
        let date = parse_income_date(None).unwrap();
        assert_eq!(date, Utc::now().date_naive());
    }

    #[test]
    fn income_date_rejects_garbage() {
        assert!(parse_income_date(Some("yesterday")).is_err());
        assert!(parse_income_date(Some("")).is_err());
    }

    #[test]
    fn positive_amount_rejects_zero_negative_and_nan() {
        assert!(require_positive_amount(0.0).is_err());
        assert!(require_positive_amount(-5.0).is_err());
        assert!(require_positive_amount(f64::NAN).is_err());
        assert!(require_positive_amount(12.5).is_ok());
    }

    #[test]
    fn required_field_is_trimmed() {
        assert_eq!(normalize_required("  bob  ", "Name").unwrap(), "bob");
        assert!(normalize_required("   ", "Name").is_err());
    }
}
