//! Foaming drain treatment: drains × per-drain rate.

use rust_decimal::Decimal;

use crate::domain::forms::FoamingDrainForm;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::FoamingDrainRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &FoamingDrainForm,
    rates: &FoamingDrainRates,
    prior: Option<&FoamingDrainForm>,
    contract_months: u32,
) -> CalculationResult {
    let drains = quantity(form.drains);
    let active = drains > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let rate = ledger.resolve(
        "drain_rate",
        form.drain_rate,
        prior.and_then(|p| p.drain_rate),
        rates.drain_rate,
    );
    let raw = drains * rate;
    if active {
        details.push(format!(
            "{drains} drains x {} = {}",
            money::dollars(rate),
            money::dollars(raw)
        ));
    }

    Outcome {
        service: ServiceKind::FoamingDrain,
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn drains_price_per_unit() {
        let form = FoamingDrainForm {
            drains: Some(dec!(6)),
            ..FoamingDrainForm::default()
        };
        let result = calculate(&form, &FoamingDrainRates::default(), None, 12);
        // 6 x $9.50 = $57
        assert_eq!(result.per_visit, dec!(57.00));
    }

    #[test]
    fn two_drains_hit_the_minimum() {
        let form = FoamingDrainForm {
            drains: Some(dec!(2)),
            ..FoamingDrainForm::default()
        };
        let result = calculate(&form, &FoamingDrainRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(25.00));
    }
}
