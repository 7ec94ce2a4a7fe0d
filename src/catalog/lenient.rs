//! Lenient field decoding
//!
//! Catalog rows are exported from hand-edited spreadsheets, so any cell may be
//! blank, hold a number where text is expected, or hold decorated text such as
//! `"$1,200.50"` where a number is expected. Nothing here fails: unreadable
//! values fall back to zero or the empty string.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Deserializer, de::IgnoredAny};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawField {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Other(IgnoredAny),
}

/// Decode a text cell, rendering numbers in their plain form.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawField>::deserialize(deserializer)? {
        Some(RawField::Text(value)) => value.trim().to_string(),
        Some(RawField::Int(value)) => value.to_string(),
        Some(RawField::Float(value)) => value.to_string(),
        Some(RawField::Bool(value)) => value.to_string(),
        Some(RawField::Other(_)) | None => String::new(),
    };

    Ok(value)
}

/// Decode a numeric cell as a decimal, coercing anything unreadable to zero.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawField>::deserialize(deserializer)? {
        Some(RawField::Int(value)) => Decimal::from(value),
        Some(RawField::Float(value)) => Decimal::from_f64(value).unwrap_or_else(|| {
            tracing::debug!(value, "coerced non-finite numeric field to zero");

            Decimal::ZERO
        }),
        Some(RawField::Text(value)) => clean_decimal(&value),
        Some(RawField::Bool(_) | RawField::Other(_)) | None => Decimal::ZERO,
    };

    Ok(value)
}

/// Decode a stock cell as a whole, non-negative quantity.
pub(crate) fn quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = decimal(deserializer)?;

    Ok(value.trunc().to_u32().unwrap_or(0))
}

/// Strip everything except digits, `.` and `-` and parse what is left.
///
/// Blank or unparsable input yields zero.
pub(crate) fn clean_decimal(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    cleaned.parse::<Decimal>().unwrap_or_else(|_err| {
        tracing::debug!(value = raw, "coerced unparsable numeric field to zero");

        Decimal::ZERO
    })
}
