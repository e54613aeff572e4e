//! Decimal helpers for user-entered money and quantity fields.
//!
//! Form payloads arrive from the UI with numbers, numeric strings, empty
//! strings, and nulls all meaning slightly different things: an empty string
//! is "unset" (fall through to the default), while a negative or unparsable
//! value clamps to zero before any computation.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a decimal.
///
/// Accepts numbers, numeric strings (with optional `$`/`,` noise from older
/// documents), and `{ "value": ... }` display wrappers. Empty strings and
/// anything unparsable yield `None`.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else {
                n.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| !matches!(c, '$' | ','))
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse().ok()
            }
        }
        Value::Object(map) => map.get("value").and_then(decimal_from_value),
        _ => None,
    }
}

/// Serde adapter for `Option<Decimal>` fields fed directly by form input.
pub fn de_flexible<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(decimal_from_value))
}

/// Clamp negative (or non-finite, already filtered to `None` upstream)
/// input to zero.
pub fn clamp_non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Resolve an optional quantity field: unset counts as zero, negatives clamp.
pub fn quantity(value: Option<Decimal>) -> Decimal {
    value.map(clamp_non_negative).unwrap_or(Decimal::ZERO)
}

/// Round to cents, half away from zero, for presentation fields.
///
/// Always carries exactly two decimal places so serialized amounts read
/// uniformly whether they were computed or entered whole ("120.00", never
/// "120").
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Format a decimal as a dollar string for breakdown trails.
pub fn dollars(value: Decimal) -> String {
    format!("${:.2}", round_cents(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn parses_numbers_strings_and_wrappers() {
        assert_eq!(decimal_from_value(&json!(12)), Some(dec!(12)));
        assert_eq!(decimal_from_value(&json!(4.5)), Some(dec!(4.5)));
        assert_eq!(decimal_from_value(&json!("4.50")), Some(dec!(4.50)));
        assert_eq!(decimal_from_value(&json!("$1,250.00")), Some(dec!(1250.00)));
        assert_eq!(
            decimal_from_value(&json!({"value": "88", "type": "currency"})),
            Some(dec!(88))
        );
    }

    #[test]
    fn empty_string_means_unset_not_zero() {
        assert_eq!(decimal_from_value(&json!("")), None);
        assert_eq!(decimal_from_value(&json!("   ")), None);
        assert_eq!(decimal_from_value(&json!(null)), None);
    }

    #[test]
    fn negatives_clamp_to_zero() {
        assert_eq!(quantity(Some(dec!(-3))), Decimal::ZERO);
        assert_eq!(quantity(None), Decimal::ZERO);
        assert_eq!(quantity(Some(dec!(7))), dec!(7));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_cents(dec!(10.005)), dec!(10.01));
        assert_eq!(round_cents(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn whole_dollar_amounts_keep_cent_scale() {
        assert_eq!(round_cents(dec!(120)).to_string(), "120.00");
        assert_eq!(round_cents(dec!(0)).to_string(), "0.00");
        assert_eq!(round_cents(dec!(5.5)).to_string(), "5.50");
    }
}
