//! Electrostatic disinfectant spray: square footage priced by band (flat
//! rate past the last band), or a per-room rate when no footage is known.

use rust_decimal::Decimal;

use crate::domain::forms::ElectrostaticForm;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::{band_price, ElectrostaticRates};
use crate::domain::results::CalculationResult;
use crate::domain::service::ServiceKind;

use super::Outcome;

pub fn calculate(
    form: &ElectrostaticForm,
    rates: &ElectrostaticRates,
    prior: Option<&ElectrostaticForm>,
    contract_months: u32,
) -> CalculationResult {
    let sqft = quantity(form.sqft);
    let rooms = quantity(form.rooms);
    let active = sqft > Decimal::ZERO || rooms > Decimal::ZERO;

    let mut ledger = FieldLedger::new();
    let mut details = Vec::new();

    let raw = if sqft > Decimal::ZERO {
        match band_price(&rates.sqft_bands, sqft) {
            Some(price) => {
                details.push(format!("{sqft} sq ft banded at {}", money::dollars(price)));
                price
            }
            None => {
                let amount = sqft * rates.overflow_sqft_rate;
                details.push(format!(
                    "{sqft} sq ft x {} = {}",
                    money::dollars(rates.overflow_sqft_rate),
                    money::dollars(amount)
                ));
                amount
            }
        }
    } else if rooms > Decimal::ZERO {
        let rate = ledger.resolve(
            "room_rate",
            form.room_rate,
            prior.and_then(|p| p.room_rate),
            rates.room_rate,
        );
        let amount = rooms * rate;
        details.push(format!(
            "{rooms} rooms x {} = {}",
            money::dollars(rate),
            money::dollars(amount)
        ));
        amount
    } else {
        Decimal::ZERO
    };

    Outcome {
        service: ServiceKind::Electrostatic,
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
    fn footage_bands_price_flat() {
        let form = ElectrostaticForm {
            sqft: Some(dec!(1800)),
            ..ElectrostaticForm::default()
        };
        let result = calculate(&form, &ElectrostaticRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(140.00)); // 1001-2500 band
    }

    #[test]
    fn past_the_last_band_uses_the_flat_rate() {
        let form = ElectrostaticForm {
            sqft: Some(dec!(8000)),
            ..ElectrostaticForm::default()
        };
        let result = calculate(&form, &ElectrostaticRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(320.00)); // 8000 x $0.04
    }

    #[test]
    fn rooms_price_when_footage_is_unknown() {
        let form = ElectrostaticForm {
            rooms: Some(dec!(5)),
            ..ElectrostaticForm::default()
        };
        let result = calculate(&form, &ElectrostaticRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(90.00)); // 5 x $18
    }

    #[test]
    fn two_rooms_hit_the_minimum() {
        let form = ElectrostaticForm {
            rooms: Some(dec!(2)),
            ..ElectrostaticForm::default()
        };
        let result = calculate(&form, &ElectrostaticRates::default(), None, 12);
        assert_eq!(result.per_visit, dec!(50.00));
    }
}
