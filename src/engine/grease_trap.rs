//! Grease trap service: traps × per-trap rate, quarterly by default.

use rust_decimal::Decimal;

use crate::domain::forms::GreaseTrapForm;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::GreaseTrapRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &GreaseTrapForm,
    rates: &GreaseTrapRates,
    prior: Option<&GreaseTrapForm>,
    contract_months: u32,
) -> CalculationResult {
    let traps = quantity(form.traps);
    let active = traps > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let rate = ledger.resolve(
        "trap_rate",
        form.trap_rate,
        prior.and_then(|p| p.trap_rate),
        rates.trap_rate,
    );
    let raw = traps * rate;
    if active {
        details.push(format!(
            "{traps} traps x {} = {}",
            money::dollars(rate),
            money::dollars(raw)
        ));
    }

    Outcome {
        service: ServiceKind::GreaseTrap,
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
    fn traps_price_per_unit_quarterly() {
        let form = GreaseTrapForm {
            traps: Some(dec!(2)),
            ..GreaseTrapForm::default()
        };
        let result = calculate(&form, &GreaseTrapRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(290.00));
        assert_eq!(result.contract_total, dec!(1160.00)); // 4 visits
    }

    #[test]
    fn single_trap_equals_the_minimum() {
        let form = GreaseTrapForm {
            traps: Some(dec!(1)),
            ..GreaseTrapForm::default()
        };
        let result = calculate(&form, &GreaseTrapRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(145.00));
    }
}
