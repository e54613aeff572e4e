//! Strip & wax floor care: square footage at a flat rate, usually sold on
//! visit-based cadences.

use rust_decimal::Decimal;

use crate::domain::forms::StripWaxForm;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::StripWaxRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &StripWaxForm,
    rates: &StripWaxRates,
    prior: Option<&StripWaxForm>,
    contract_months: u32,
) -> CalculationResult {
    let sqft = quantity(form.sqft);
    let active = sqft > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let rate = ledger.resolve(
        "sqft_rate",
        form.sqft_rate,
        prior.and_then(|p| p.sqft_rate),
        rates.sqft_rate,
    );
    let raw = sqft * rate;
    if active {
        details.push(format!(
            "{sqft} sq ft x {} = {}",
            money::dollars(rate),
            money::dollars(raw)
        ));
    }

    Outcome {
        service: ServiceKind::StripWax,
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
    use crate::domain::frequency::Frequency;
    use rust_decimal_macros::dec;

    #[test]
    fn biannual_default_bills_two_visits_a_year() {
        let form = StripWaxForm {
            sqft: Some(dec!(1000)),
            ..StripWaxForm::default()
        };
        let result = calculate(&form, &StripWaxRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(550.00)); // 1000 x $0.55
        assert_eq!(result.contract_total, dec!(1100.00)); // 2 visits
    }

    #[test]
    fn one_time_job_bills_exactly_once() {
        let form = StripWaxForm {
            sqft: Some(dec!(1000)),
            frequency: Frequency::OneTime,
            ..StripWaxForm::default()
        };
        let result = calculate(&form, &StripWaxRates::default(), None, 24);
        assert_eq!(result.contract_total, dec!(550.00));
        assert_eq!(result.monthly_recurring, Decimal::ZERO);
    }

    #[test]
    fn small_floor_hits_the_minimum() {
        let form = StripWaxForm {
            sqft: Some(dec!(200)),
            ..StripWaxForm::default()
        };
        let result = calculate(&form, &StripWaxRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(250.00));
    }
}
