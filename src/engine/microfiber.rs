//! Microfiber mopping program: mop stations × per-station rate.

use rust_decimal::Decimal;

use crate::domain::forms::MicrofiberForm;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::MicrofiberRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &MicrofiberForm,
    rates: &MicrofiberRates,
    prior: Option<&MicrofiberForm>,
    contract_months: u32,
) -> CalculationResult {
    let stations = quantity(form.stations);
    let active = stations > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let rate = ledger.resolve(
        "station_rate",
        form.station_rate,
        prior.and_then(|p| p.station_rate),
        rates.station_rate,
    );
    let raw = stations * rate;
    if active {
        details.push(format!(
            "{stations} stations x {} = {}",
            money::dollars(rate),
            money::dollars(raw)
        ));
    }

    Outcome {
        service: ServiceKind::Microfiber,
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
