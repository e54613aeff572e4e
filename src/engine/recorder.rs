//! Per-request change recorder.
//!
//! Accumulates the price overrides applied during one pricing pass so the
//! document builder can attach versioning notes. Owned by the caller and
//! passed explicitly; there is no process-wide log, which keeps the
//! calculators testable in isolation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::overrides::FieldLedger;
use crate::domain::service::ServiceKind;

/// One recorded override: a field priced away from its config default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEntry {
    pub service: ServiceKind,
    pub field: String,
    pub default: Decimal,
    pub value: Decimal,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ChangeRecorder {
    session: Uuid,
    entries: Vec<ChangeEntry>,
}

impl ChangeRecorder {
    pub fn new(session: Uuid) -> Self {
        Self {
            session,
            entries: Vec::new(),
        }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    /// Record every custom field from one service's resolution ledger.
    pub fn record_overrides(&mut self, service: ServiceKind, ledger: &FieldLedger) {
        for (field, trace) in ledger.iter() {
            if trace.is_custom {
                self.entries.push(ChangeEntry {
                    service,
                    field: field.clone(),
                    default: trace.default,
                    value: trace.value,
                    recorded_at: Utc::now(),
                });
            }
        }
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ChangeEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn only_custom_fields_are_recorded() {
        let mut ledger = FieldLedger::new();
        ledger.resolve("fixture_rate", Some(dec!(6)), None, dec!(5));
        ledger.resolve("minimum_per_visit", None, None, dec!(50));

        let mut recorder = ChangeRecorder::new(Uuid::new_v4());
        recorder.record_overrides(ServiceKind::SaniClean, &ledger);

        assert_eq!(recorder.entries().len(), 1);
        let entry = &recorder.entries()[0];
        assert_eq!(entry.field, "fixture_rate");
        assert_eq!(entry.default, dec!(5));
        assert_eq!(entry.value, dec!(6));
    }
}
