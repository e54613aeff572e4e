//! SaniScrub deep-clean pricing.
//!
//! Fixtures at a per-fixture rate plus non-bathroom area priced by square
//! footage band. The twice-monthly cadence carries a discounted fixture rate,
//! but only when SaniClean is active on the same agreement; otherwise the
//! service reprices as plain monthly.

use rust_decimal::Decimal;

use crate::domain::forms::SaniScrubForm;
use crate::domain::frequency::Frequency;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::{band_price, SaniScrubRates};
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &SaniScrubForm,
    rates: &SaniScrubRates,
    prior: Option<&SaniScrubForm>,
    contract_months: u32,
    sani_clean_active: bool,
) -> CalculationResult {
    let fixtures = quantity(form.fixtures);
    let sqft = quantity(form.non_bathroom_sqft);
    let active = fixtures > Decimal::ZERO || sqft > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let bundled = form.frequency == Frequency::TwiceMonthly && sani_clean_active;
    let frequency = if form.frequency == Frequency::TwiceMonthly && !bundled {
        details.push("twice-monthly rate requires active SaniClean; repriced as monthly".into());
        Frequency::Monthly
    } else {
        form.frequency
    };

    let default_rate = if bundled {
        rates.twice_monthly_fixture_rate
    } else {
        rates.fixture_rate
    };
    let rate = ledger.resolve(
        "fixture_rate",
        form.fixture_rate,
        prior.and_then(|p| p.fixture_rate),
        default_rate,
    );

    let fixture_amount = fixtures * rate;
    if fixtures > Decimal::ZERO {
        details.push(format!(
            "{fixtures} fixtures x {} = {}",
            money::dollars(rate),
            money::dollars(fixture_amount)
        ));
    }

    let area_amount = if sqft > Decimal::ZERO {
        match band_price(&rates.area_bands, sqft) {
            Some(price) => {
                details.push(format!(
                    "non-bathroom area {sqft} sq ft banded at {}",
                    money::dollars(price)
                ));
                price
            }
            None => {
                let amount = sqft * rates.area_overflow_rate;
                details.push(format!(
                    "non-bathroom area {sqft} sq ft x {} = {}",
                    money::dollars(rates.area_overflow_rate),
                    money::dollars(amount)
                ));
                amount
            }
        }
    } else {
        Decimal::ZERO
    };

    Outcome {
        service: ServiceKind::SaniScrub,
        frequency,
        active,
        raw_per_visit: fixture_amount + area_amount,
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

    fn form(fixtures: i64, sqft: i64) -> SaniScrubForm {
        SaniScrubForm {
            fixtures: (fixtures > 0).then(|| Decimal::from(fixtures)),
            non_bathroom_sqft: (sqft > 0).then(|| Decimal::from(sqft)),
            ..SaniScrubForm::default()
        }
    }

    #[test]
    fn fixtures_plus_banded_area() {
        let result = calculate(&form(6, 800), &SaniScrubRates::default(), None, 12, false);
        // 6 x $15 + $40 band (501-1000 sq ft) = $130
        assert_eq!(result.per_visit, dec!(130.00));
    }

    #[test]
    fn area_beyond_last_band_uses_flat_rate() {
        let result = calculate(&form(0, 4000), &SaniScrubRates::default(), None, 12, false);
        // 4000 x $0.035 = $140
        assert_eq!(result.per_visit, dec!(140.00));
    }

    #[test]
    fn small_job_hits_the_minimum() {
        let result = calculate(&form(2, 0), &SaniScrubRates::default(), None, 12, false);
        // 2 x $15 = $30, lifted to $60 minimum
        assert_eq!(result.per_visit, dec!(60.00));
    }

    #[test]
    fn twice_monthly_rate_only_when_bundled_with_saniclean() {
        let mut f = form(10, 0);
        f.frequency = Frequency::TwiceMonthly;

        let bundled = calculate(&f, &SaniScrubRates::default(), None, 12, true);
        assert_eq!(bundled.per_visit, dec!(120.00)); // 10 x $12 bundled rate
        assert_eq!(bundled.frequency, Frequency::TwiceMonthly);
        assert_eq!(bundled.monthly_recurring, dec!(240.00));

        let alone = calculate(&f, &SaniScrubRates::default(), None, 12, false);
        assert_eq!(alone.per_visit, dec!(150.00)); // standard $15 rate
        assert_eq!(alone.frequency, Frequency::Monthly);
        assert_eq!(alone.monthly_recurring, dec!(150.00));
    }

    #[test]
    fn inactive_without_fixtures_or_area() {
        let result = calculate(&form(0, 0), &SaniScrubRates::default(), None, 12, false);
        assert!(!result.is_active);
        assert_eq!(result.contract_total, Decimal::ZERO);
    }
}
