//! RPM window cleaning: inside and outside panes at distinct per-pane rates.

use rust_decimal::Decimal;

use crate::domain::forms::RpmWindowForm;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::RpmWindowRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &RpmWindowForm,
    rates: &RpmWindowRates,
    prior: Option<&RpmWindowForm>,
    contract_months: u32,
) -> CalculationResult {
    let inside = quantity(form.inside_panes);
    let outside = quantity(form.outside_panes);
    let active = inside > Decimal::ZERO || outside > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let inside_rate = ledger.resolve(
        "inside_pane_rate",
        form.inside_pane_rate,
        prior.and_then(|p| p.inside_pane_rate),
        rates.inside_pane_rate,
    );
    let outside_rate = ledger.resolve(
        "outside_pane_rate",
        form.outside_pane_rate,
        prior.and_then(|p| p.outside_pane_rate),
        rates.outside_pane_rate,
    );

    let raw = inside * inside_rate + outside * outside_rate;
    if inside > Decimal::ZERO {
        details.push(format!(
            "{inside} inside panes x {} = {}",
            money::dollars(inside_rate),
            money::dollars(inside * inside_rate)
        ));
    }
    if outside > Decimal::ZERO {
        details.push(format!(
            "{outside} outside panes x {} = {}",
            money::dollars(outside_rate),
            money::dollars(outside * outside_rate)
        ));
    }

    Outcome {
        service: ServiceKind::RpmWindows,
        frequency: form.frequency,
        active,
        raw_per_visit: raw,
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
