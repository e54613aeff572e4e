//! Three-layer value resolution shared by every calculator.
//!
//! For each priced quantity the engine chooses, in priority order:
//! 1. an explicit user override on the live form,
//! 2. a value carried over from a previously saved document, when it differs
//!    from the current config default (this is how edit mode reproduces prior
//!    manual edits without the salesperson re-typing them),
//! 3. the live config default.
//!
//! The `is_custom` flag recorded per field drives UI highlighting and the
//! pricing-refresh rule: when config reloads, non-custom fields move to the
//! new default and custom fields are left alone.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resolved field value with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    pub value: Decimal,
    pub is_custom: bool,
}

/// Resolve one logical field from its three candidate layers.
pub fn resolve(custom: Option<Decimal>, saved: Option<Decimal>, default: Decimal) -> Resolved {
    if let Some(value) = custom {
        return Resolved {
            value,
            is_custom: true,
        };
    }
    if let Some(value) = saved {
        if value != default {
            return Resolved {
                value,
                is_custom: true,
            };
        }
    }
    Resolved {
        value: default,
        is_custom: false,
    }
}

/// Per-field resolution trace attached to a calculation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTrace {
    pub value: Decimal,
    pub default: Decimal,
    pub is_custom: bool,
}

/// Map of logical field key → resolution trace for one service.
///
/// Populated once per calculation, consumed uniformly by the response layer,
/// the change recorder, and the round-trip tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldLedger(BTreeMap<String, FieldTrace>);

impl FieldLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a field and record its trace under `key`.
    pub fn resolve(
        &mut self,
        key: &str,
        custom: Option<Decimal>,
        saved: Option<Decimal>,
        default: Decimal,
    ) -> Decimal {
        let resolved = resolve(custom, saved, default);
        self.0.insert(
            key.to_string(),
            FieldTrace {
                value: resolved.value,
                default,
                is_custom: resolved.is_custom,
            },
        );
        resolved.value
    }

    pub fn is_custom(&self, key: &str) -> bool {
        self.0.get(key).map(|t| t.is_custom).unwrap_or(false)
    }

    pub fn get(&self, key: &str) -> Option<&FieldTrace> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldTrace)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn explicit_override_wins() {
        let r = resolve(Some(dec!(9)), Some(dec!(7)), dec!(5));
        assert_eq!(r.value, dec!(9));
        assert!(r.is_custom);
    }

    #[test]
    fn saved_value_wins_only_when_it_differs_from_default() {
        let r = resolve(None, Some(dec!(7)), dec!(5));
        assert_eq!(r.value, dec!(7));
        assert!(r.is_custom);

        // Saved value equal to the default is not a manual edit.
        let r = resolve(None, Some(dec!(5)), dec!(5));
        assert_eq!(r.value, dec!(5));
        assert!(!r.is_custom);
    }

    #[test]
    fn config_default_is_the_last_resort() {
        let r = resolve(None, None, dec!(5));
        assert_eq!(r.value, dec!(5));
        assert!(!r.is_custom);
    }

    #[test]
    fn ledger_records_provenance_per_field() {
        let mut ledger = FieldLedger::new();
        let rate = ledger.resolve("fixture_rate", Some(dec!(6.25)), None, dec!(5.00));
        let min = ledger.resolve("minimum_per_visit", None, None, dec!(50));
        assert_eq!(rate, dec!(6.25));
        assert_eq!(min, dec!(50));
        assert!(ledger.is_custom("fixture_rate"));
        assert!(!ledger.is_custom("minimum_per_visit"));
        assert_eq!(ledger.get("fixture_rate").unwrap().default, dec!(5.00));
    }
}
