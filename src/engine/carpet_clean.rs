//! Carpet cleaning: square footage times a method-dependent rate.

use rust_decimal::Decimal;

use crate::domain::forms::{CarpetCleanForm, CarpetMethod};
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::CarpetCleanRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &CarpetCleanForm,
    rates: &CarpetCleanRates,
    prior: Option<&CarpetCleanForm>,
    contract_months: u32,
) -> CalculationResult {
    let sqft = quantity(form.sqft);
    let active = sqft > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let (default_rate, method_label) = match form.method {
        CarpetMethod::Bonnet => (rates.bonnet_sqft_rate, "bonnet"),
        CarpetMethod::HotWaterExtraction => (rates.extraction_sqft_rate, "hot-water extraction"),
    };
    let rate = ledger.resolve(
        "sqft_rate",
        form.sqft_rate,
        prior.and_then(|p| p.sqft_rate),
        default_rate,
    );
    let raw = sqft * rate;
    if active {
        details.push(format!(
            "{sqft} sq ft x {} ({method_label}) = {}",
            money::dollars(rate),
            money::dollars(raw)
        ));
    }

    Outcome {
        service: ServiceKind::CarpetClean,
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
    fn method_selects_the_rate() {
        let mut form = CarpetCleanForm {
            sqft: Some(dec!(2000)),
            ..CarpetCleanForm::default()
        };
        let extraction = calculate(&form, &CarpetCleanRates::default(), None, 12);
        assert_eq!(extraction.per_visit, dec!(400.00)); // 2000 x $0.20

        form.method = CarpetMethod::Bonnet;
        let bonnet = calculate(&form, &CarpetCleanRates::default(), None, 12);
        assert_eq!(bonnet.per_visit, dec!(240.00)); // 2000 x $0.12
    }

    #[test]
    fn quarterly_contract_total_counts_visits_not_months() {
        let form = CarpetCleanForm {
            sqft: Some(dec!(2000)),
            frequency: Frequency::Quarterly,
            ..CarpetCleanForm::default()
        };
        let result = calculate(&form, &CarpetCleanRates::default(), None, 12);
        // 4 visits in 12 months x $400
        assert_eq!(result.contract_total, dec!(1600.00));
    }

    #[test]
    fn small_area_hits_the_minimum() {
        let form = CarpetCleanForm {
            sqft: Some(dec!(300)),
            ..CarpetCleanForm::default()
        };
        let result = calculate(&form, &CarpetCleanRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(125.00));
    }
}
