//! Janitorial pricing.
//!
//! Short visits are sold as flat add-on tiers bracketed by hours; past the
//! last bracket the visit prices at a flat hourly rate. Either way the
//! per-worker amount is multiplied by the crew size.

use rust_decimal::Decimal;

use crate::domain::forms::JanitorialForm;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::{band_price, JanitorialRates};
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &JanitorialForm,
    rates: &JanitorialRates,
    prior: Option<&JanitorialForm>,
    contract_months: u32,
) -> CalculationResult {
    let hours = quantity(form.hours);
    let active = hours > Decimal::ZERO;
    let workers = {
        let w = quantity(form.workers);
        if w > Decimal::ZERO {
            w
        } else {
            Decimal::ONE
        }
    };

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let hourly_rate = ledger.resolve(
        "hourly_rate",
        form.hourly_rate,
        prior.and_then(|p| p.hourly_rate),
        rates.hourly_rate,
    );

    let per_worker = match band_price(&rates.hour_brackets, hours) {
        Some(tier) if active => {
            details.push(format!(
                "{hours} hours priced at the {} add-on tier",
                money::dollars(tier)
            ));
            tier
        }
        _ if active => {
            let amount = hours * hourly_rate;
            details.push(format!(
                "{hours} hours x {}/hr = {}",
                money::dollars(hourly_rate),
                money::dollars(amount)
            ));
            amount
        }
        _ => Decimal::ZERO,
    };

    if active && workers > Decimal::ONE {
        details.push(format!("{workers} workers"));
    }

    Outcome {
        service: ServiceKind::Janitorial,
        frequency: form.frequency,
        active,
        raw_per_visit: per_worker * workers,
        minimum: rates.minimum_per_visit,
        custom_per_visit: form.custom_per_visit,
        saved_per_visit: prior.and_then(|p| p.custom_per_visit),
        custom_monthly: form.custom_monthly,
        saved_monthly: prior.and_then(|p| p.custom_monthly),
        custom_lines: &form.custom_lines,
        install_fee: Decimal::ZERO,
        waives_trip_charge: false,
    }
    .finish(contract_months, ledger, details)
}
