//! Refresh Power Scrub pricing.
//!
//! Each selected area prices as square footage times a rate when footage is
//! supplied, otherwise at the area's preset package price. The per-area rate
//! override resolves through the standard three layers.

use rust_decimal::Decimal;

use crate::domain::forms::{PowerScrubForm, ScrubAreaSelection};
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::PowerScrubRates;
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &PowerScrubForm,
    rates: &PowerScrubRates,
    prior: Option<&PowerScrubForm>,
    contract_months: u32,
) -> CalculationResult {
    let enabled: Vec<&ScrubAreaSelection> =
        form.areas.iter().filter(|a| a.enabled).collect();
    let active = !enabled.is_empty();

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();
    let mut raw = Decimal::ZERO;

    for selection in &enabled {
        let saved = prior.and_then(|p| {
            p.areas
                .iter()
                .find(|a| a.area == selection.area)
                .and_then(|a| a.rate)
        });
        let sqft = quantity(selection.sqft);
        let key = format!("{}_rate", selection.area.label().replace([' ', '-'], "_"));
        let amount = if sqft > Decimal::ZERO {
            let rate = ledger.resolve(&key, selection.rate, saved, rates.sqft_rate);
            let amount = sqft * rate;
            details.push(format!(
                "{} {sqft} sq ft x {} = {}",
                selection.area.label(),
                money::dollars(rate),
                money::dollars(amount)
            ));
            amount
        } else {
            // No footage: the preset package price is the visit rate.
            let preset = ledger.resolve(&key, selection.rate, saved, selection.area.preset(rates));
            details.push(format!(
                "{} preset package {}",
                selection.area.label(),
                money::dollars(preset)
            ));
            preset
        };
        raw += amount;
    }

    Outcome {
        service: ServiceKind::PowerScrub,
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
    use crate::domain::forms::ScrubArea;
    use rust_decimal_macros::dec;

    fn selection(area: ScrubArea) -> ScrubAreaSelection {
        ScrubAreaSelection {
            area,
            enabled: true,
            sqft: None,
            rate: None,
        }
    }

    #[test]
    fn dumpster_with_no_inputs_prices_at_the_preset() {
        let form = PowerScrubForm {
            areas: vec![selection(ScrubArea::DumpsterPad)],
            ..PowerScrubForm::default()
        };
        let result = calculate(&form, &PowerScrubRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(85.00));
    }

    #[test]
    fn footage_prices_by_rate_and_sums_areas() {
        let mut dumpster = selection(ScrubArea::DumpsterPad);
        dumpster.sqft = Some(dec!(600));
        let form = PowerScrubForm {
            areas: vec![dumpster, selection(ScrubArea::Sidewalk)],
            ..PowerScrubForm::default()
        };
        let result = calculate(&form, &PowerScrubRates::default(), None, 12);
        // 600 x $0.18 + $95 sidewalk preset = $203
        assert_eq!(result.per_visit, dec!(203.00));
    }

    #[test]
    fn disabled_areas_do_not_price() {
        let mut patio = selection(ScrubArea::Patio);
        patio.enabled = false;
        let form = PowerScrubForm {
            areas: vec![patio],
            ..PowerScrubForm::default()
        };
        let result = calculate(&form, &PowerScrubRates::default(), None, 12);
        assert!(!result.is_active);
    }

    #[test]
    fn custom_area_rate_overrides_the_preset() {
        let mut dumpster = selection(ScrubArea::DumpsterPad);
        dumpster.rate = Some(dec!(100));
        let form = PowerScrubForm {
            areas: vec![dumpster],
            ..PowerScrubForm::default()
        };
        let result = calculate(&form, &PowerScrubRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(100.00));
        assert!(result.fields.is_custom("dumpster_pad_rate"));
    }
}
