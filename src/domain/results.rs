//! Derived pricing outputs. Never persisted directly; always recomputed
//! from the current form state and rate tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;
use super::overrides::FieldLedger;
use super::service::ServiceKind;

/// Result of pricing one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub service: ServiceKind,
    /// False when the defining quantity is zero/absent; an inactive service
    /// contributes nothing and is excluded from aggregation.
    pub is_active: bool,
    pub frequency: Frequency,
    pub per_visit: Decimal,
    pub minimum_per_visit: Decimal,
    pub monthly_recurring: Decimal,
    pub annual_price: Decimal,
    /// Full value over the contract window, including the one-time install
    /// fee and custom line items (neither is frequency-converted).
    pub contract_total: Decimal,
    pub install_fee: Decimal,
    pub custom_line_total: Decimal,
    /// Set by all-inclusive SaniClean pricing; the aggregate drops the
    /// agreement trip charge when any active service waives it.
    pub waives_trip_charge: bool,
    /// Per-field resolution trace (value, default, is_custom).
    pub fields: FieldLedger,
    /// Human-readable line items for audit and debugging.
    pub details: Vec<String>,
}

impl CalculationResult {
    /// All-zero result for a service whose defining quantity is unset.
    pub fn inactive(service: ServiceKind, frequency: Frequency) -> Self {
        Self {
            service,
            is_active: false,
            frequency,
            per_visit: Decimal::ZERO,
            minimum_per_visit: Decimal::ZERO,
            monthly_recurring: Decimal::ZERO,
            annual_price: Decimal::ZERO,
            contract_total: Decimal::ZERO,
            install_fee: Decimal::ZERO,
            custom_line_total: Decimal::ZERO,
            waives_trip_charge: false,
            fields: FieldLedger::new(),
            details: Vec::new(),
        }
    }
}

/// Red/Green Line profitability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// At or below the minimum floor; mandatory manager approval.
    Red,
    /// At or above 130% of the floor; auto-approved.
    Green,
    /// Between the floor and the green threshold; requires approval.
    Neutral,
}

/// Agreement-level roll-up across all active services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedQuote {
    pub contract_months: u32,
    pub total_original_per_visit: Decimal,
    pub total_minimum_per_visit: Decimal,
    pub trip_monthly_equivalent: Decimal,
    pub parking_monthly_equivalent: Decimal,
    pub trip_per_visit_equivalent: Decimal,
    pub parking_per_visit_equivalent: Decimal,
    pub total_monthly_recurring: Decimal,
    pub total_agreement_amount: Decimal,
    pub classification: Classification,
    /// Dollar increase to the per-visit total needed to reach green; present
    /// only for neutral quotes.
    pub gap_to_green: Option<Decimal>,
    pub notes: Vec<String>,
}
