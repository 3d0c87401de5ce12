use chrono::NaiveDate;

use crate::error::{AggregateError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| {
        AggregateError::MalformedDate {
            field,
            value: value.to_string(),
            source,
        }
    })
}

pub fn parse_count(field: &'static str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| AggregateError::MalformedNumber {
            field,
            value: value.to_string(),
        })
}

pub fn parse_decimal(field: &'static str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(AggregateError::MalformedNumber {
            field,
            value: value.to_string(),
        }),
    }
}

/// Rounds to two decimal places, ties to even.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Adds a parsed count to a running total, treating overflow as bad input.
pub fn add_count(field: &'static str, total: i64, value: i64) -> Result<i64> {
    total
        .checked_add(value)
        .ok_or_else(|| AggregateError::MalformedNumber {
            field,
            value: value.to_string(),
        })
}
