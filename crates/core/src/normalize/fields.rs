//! Fallback-chain field access over loosely-typed JSON.
//!
//! Backend versions disagree on field names (`unitPrice` vs `unit_rate`
//! vs `rate`), so every lookup here is an explicit ordered list of
//! accessor attempts returning the first defined, non-null result.

use serde_json::Value;

/// First string value found under any of `keys`, in order.
pub fn first_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(Value::as_str)
}

/// First numeric value found under any of `keys`, in order.
///
/// Accepts JSON numbers and numeric strings; the backend formats amounts
/// both ways.
pub fn first_f64(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(as_f64)
}

/// First array value found under any of `keys`, in order.
pub fn first_array<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(Value::as_array)
}

/// Coerce a JSON value to f64: numbers directly, strings by parsing.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Resolve a currency code, defaulting to USD when absent or invalid.
///
/// Valid means a three-letter alphabetic code; anything else is treated
/// as garbage from an older backend.
pub fn resolve_currency(raw: Option<&str>) -> String {
    match raw {
        Some(code) if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
            code.to_ascii_uppercase()
        }
        _ => "USD".to_string(),
    }
}

/// Render an amount with its currency code, e.g. `USD 12,500.00`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    format!("{currency} {}", format_amount(amount))
}

/// Render a number with thousands separators and two decimals.
pub fn format_amount(amount: f64) -> String {
    let rendered = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Render a number without currency formatting: integers bare, fractions
/// as-is. Used for duration rows.
pub fn format_bare(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
