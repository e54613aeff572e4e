//! Sanipod feminine-hygiene unit servicing: pods × per-pod rate.

use rust_decimal::Decimal;

use crate::domain::forms::SanipodForm;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::SanipodRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &SanipodForm,
    rates: &SanipodRates,
    prior: Option<&SanipodForm>,
    contract_months: u32,
) -> CalculationResult {
    let pods = quantity(form.pods);
    let active = pods > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let rate = ledger.resolve(
        "pod_rate",
        form.pod_rate,
        prior.and_then(|p| p.pod_rate),
        rates.pod_rate,
    );
    let raw = pods * rate;
    if active {
        details.push(format!(
            "{pods} pods x {} = {}",
            money::dollars(rate),
            money::dollars(raw)
        ));
    }

    Outcome {
        service: ServiceKind::Sanipod,
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
    fn pods_price_per_unit_with_minimum_floor() {
        let form = SanipodForm {
            pods: Some(dec!(2)),
            ..SanipodForm::default()
        };
        let result = calculate(&form, &SanipodRates::default(), None, 12);
        // 2 x $12 = $24, lifted to $30 minimum
        assert_eq!(result.per_visit, dec!(30.00));

        let form = SanipodForm {
            pods: Some(dec!(5)),
            ..SanipodForm::default()
        };
        let result = calculate(&form, &SanipodRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(60.00));
    }

    #[test]
    fn no_pods_is_inactive() {
        let result = calculate(&SanipodForm::default(), &SanipodRates::default(), None, 12);
        assert!(!result.is_active);
    }
}
