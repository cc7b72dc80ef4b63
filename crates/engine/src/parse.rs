//! Parsers for the free-form fields of a raw receipt.
//!
//! Receipt scanners emit quantities as strings like `"2.5 KG"` or `"1 UN"`
//! and dates as `DD/MM/YYYY`. Quantities fall back to a safe default when
//! the pattern does not match; dates are strict and rejected when invalid.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::EngineError;

/// Quantity used when the raw string does not match the expected pattern.
pub const DEFAULT_QUANTITY: f64 = 1.0;
/// Unit used when the raw string does not match the expected pattern.
pub const DEFAULT_UNIT: &str = "UN";

// Leading numeric token followed by a required alphabetic unit. A bare
// number ("3") deliberately does not match and takes the default.
static QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.]+)\s*([A-Za-z]+)").unwrap());

/// Parses a quantity string into `(quantity, unit)`.
///
/// Unparseable input is accepted with `(1, "UN")` rather than rejected;
/// the upload flow never fails on a malformed quantity.
pub fn parse_quantity(raw: &str) -> (f64, String) {
    let Some(caps) = QUANTITY.captures(raw) else {
        return (DEFAULT_QUANTITY, DEFAULT_UNIT.to_string());
    };

    match caps[1].parse::<f64>() {
        Ok(quantity) => (quantity, caps[2].to_string()),
        // "[\d.]+" admits tokens like "1.2.3" that are not numbers.
        Err(_) => (DEFAULT_QUANTITY, DEFAULT_UNIT.to_string()),
    }
}

/// Parses a strict `DD/MM/YYYY` date.
///
/// Out-of-range day or month values ("32/13/2023") are rejected instead of
/// being normalized by calendar overflow.
pub fn parse_receipt_date(raw: &str) -> Result<NaiveDate, EngineError> {
    let parts: Vec<&str> = raw.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(EngineError::Parse(format!(
            "expected DD/MM/YYYY, got \"{raw}\""
        )));
    };

    let day: u32 = day
        .trim()
        .parse()
        .map_err(|_| EngineError::Parse(format!("invalid day in \"{raw}\"")))?;
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| EngineError::Parse(format!("invalid month in \"{raw}\"")))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| EngineError::Parse(format!("invalid year in \"{raw}\"")))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::Parse(format!("no such calendar date: \"{raw}\"")))
}
