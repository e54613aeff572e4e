//! SaniClean restroom hygiene pricing.
//!
//! Fixtures × a geography-dependent rate, with an all-inclusive mode that
//! bundles add-ons into one higher per-fixture rate and waives the agreement
//! trip charge. Small facilities are caught by the per-visit minimum.

use rust_decimal::Decimal;

use crate::domain::forms::{Geography, SaniCleanForm};
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::SaniCleanRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &SaniCleanForm,
    rates: &SaniCleanRates,
    prior: Option<&SaniCleanForm>,
    contract_months: u32,
) -> CalculationResult {
    let fixtures = quantity(form.fixtures);
    let active = fixtures > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let default_rate = if form.all_inclusive {
        rates.all_inclusive_fixture_rate
    } else {
        match form.location {
            Geography::InsideBeltway => rates.fixture_rate_inside,
            Geography::OutsideBeltway => rates.fixture_rate_outside,
        }
    };
    let rate = ledger.resolve(
        "fixture_rate",
        form.fixture_rate,
        prior.and_then(|p| p.fixture_rate),
        default_rate,
    );
    let minimum = ledger.resolve(
        "minimum_per_visit",
        form.minimum_per_visit,
        prior.and_then(|p| p.minimum_per_visit),
        rates.minimum_per_visit,
    );

    let raw = fixtures * rate;
    if active {
        let zone = if form.all_inclusive {
            "all-inclusive"
        } else {
            match form.location {
                Geography::InsideBeltway => "inside beltway",
                Geography::OutsideBeltway => "outside beltway",
            }
        };
        details.push(format!(
            "{fixtures} fixtures x {} ({zone}) = {}",
            money::dollars(rate),
            money::dollars(raw)
        ));
    }

    // Install fee keys off the floored per-visit amount and is charged once.
    let install_fee = if active && form.first_time_install {
        let multiplier = if form.dirty_install {
            rates.install_dirty_multiplier
        } else {
            rates.install_clean_multiplier
        };
        raw.max(minimum) * multiplier
    } else {
        Decimal::ZERO
    };

    Outcome {
        service: ServiceKind::SaniClean,
        frequency: form.frequency,
        active,
        raw_per_visit: raw,
        minimum,
        custom_per_visit: form.custom_per_visit,
        saved_per_visit: prior.and_then(|p| p.custom_per_visit),
        custom_monthly: form.custom_monthly,
        saved_monthly: prior.and_then(|p| p.custom_monthly),
        custom_lines: &form.custom_lines,
        install_fee,
        waives_trip_charge: active && form.all_inclusive,
    }
    .finish(contract_months, ledger, details)
}
