use crate::errors::{RiskError, RiskResult};
use chrono::NaiveDate;
use serde_json::Value;

/// Accepted date layout for trade and expiry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, naming the field in the error.
/// Digits and `-` only, leading digit: no padding, no signed years.
pub fn parse_date(value: &str, name: &str) -> RiskResult<NaiveDate> {
    let bad_format = || {
        RiskError::InvalidInput(format!(
            "{name} should be correctly formatted: '{DATE_FORMAT}' (e.g '2024-10-15')"
        ))
    };

    let plain = value.starts_with(|c: char| c.is_ascii_digit())
        && value.bytes().all(|b| b.is_ascii_digit() || b == b'-');
    if !plain {
        return Err(bad_format());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| bad_format())
}

/// A scalar is numeric when it is a finite float. NaN and infinities are rejected;
/// no range checks are applied.
pub fn validate_number(value: f64, name: &str) -> RiskResult<f64> {
    if !value.is_finite() {
        return Err(RiskError::InvalidInput(format!(
            "{name} must be an integer or float"
        )));
    }
    Ok(value)
}

/// Every element of a rate series must be numeric.
pub fn validate_series(values: Vec<f64>, name: &str) -> RiskResult<Vec<f64>> {
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(RiskError::InvalidInput(format!(
            "the market rates of currency ({name}) should be a numeric array (bad value at index {pos})"
        )));
    }
    Ok(values)
}

/// Parse a text cell (CSV, env) as a numeric value.
pub fn parse_number(text: &str, name: &str) -> RiskResult<f64> {
    let parsed = text
        .trim()
        .parse::<f64>()
        .map_err(|_| RiskError::InvalidInput(format!("{name} must be an integer or float")))?;
    validate_number(parsed, name)
}

// ── JSON field helpers (HTTP boundary) ──

fn field<'a>(obj: &'a Value, key: &str) -> RiskResult<&'a Value> {
    obj.get(key)
        .ok_or_else(|| RiskError::InvalidInput(format!("missing field: {key}")))
}

/// Date fields must be JSON strings in `YYYY-MM-DD` form.
pub fn date_field(obj: &Value, key: &str, name: &str) -> RiskResult<NaiveDate> {
    match field(obj, key)? {
        Value::String(s) => parse_date(s, name),
        _ => Err(RiskError::InvalidInput(format!("{name} should be a string"))),
    }
}

/// Scalar fields must be JSON numbers (integer or float).
pub fn number_field(obj: &Value, key: &str, name: &str) -> RiskResult<f64> {
    match field(obj, key)? {
        Value::Number(n) => match n.as_f64() {
            Some(v) => validate_number(v, name),
            None => Err(RiskError::InvalidInput(format!(
                "{name} must be an integer or float"
            ))),
        },
        _ => Err(RiskError::InvalidInput(format!(
            "{name} must be an integer or float"
        ))),
    }
}

fn numeric_array<E>(obj: &Value, key: &str, not_numeric: E) -> RiskResult<Vec<f64>>
where
    E: Fn() -> RiskError,
{
    let items = match field(obj, key)? {
        Value::Array(items) => items,
        _ => return Err(not_numeric()),
    };

    items
        .iter()
        .map(|v| v.as_f64().filter(|x| x.is_finite()).ok_or_else(&not_numeric))
        .collect()
}

/// Rate series fields must be JSON arrays whose elements are all numbers.
pub fn series_field(obj: &Value, key: &str, name: &str) -> RiskResult<Vec<f64>> {
    let values = numeric_array(obj, key, || {
        RiskError::InvalidInput(format!(
            "the market rates of currency ({name}) should be a numeric array"
        ))
    })?;
    validate_series(values, name)
}

/// Any other list of numbers, e.g. what-if spot prices.
pub fn number_array_field(obj: &Value, key: &str, name: &str) -> RiskResult<Vec<f64>> {
    numeric_array(obj, key, || {
        RiskError::InvalidInput(format!("{name} should be an array of numbers"))
    })
}
