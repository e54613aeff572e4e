//! Agreement-level roll-up.
//!
//! Combines the active services' results into comparable per-visit, monthly,
//! and contract-length totals, folds in the global trip/parking charges, and
//! runs the profitability gate. Pure projection: recomputed on every input
//! change, never persisted.

use rust_decimal::Decimal;

use crate::domain::forms::GlobalCharge;
use crate::domain::frequency::Frequency;
use crate::domain::money::{self, quantity};
use crate::domain::results::{AggregatedQuote, CalculationResult};

use super::profitability;

/// Cadence governing the trip/parking per-visit conversion: the declared
/// primary frequency when present, otherwise the highest-cadence active
/// service.
fn primary_frequency(
    declared: Option<Frequency>,
    active: &[&CalculationResult],
) -> Option<Frequency> {
    declared.or_else(|| {
        active
            .iter()
            .map(|r| r.frequency)
            .max_by_key(|f| f.monthly_multiplier())
    })
}

pub fn aggregate(
    results: &[CalculationResult],
    trip: &GlobalCharge,
    parking: &GlobalCharge,
    contract_months: u32,
    declared_primary: Option<Frequency>,
) -> AggregatedQuote {
    let active: Vec<&CalculationResult> = results.iter().filter(|r| r.is_active).collect();
    let mut notes = Vec::new();

    let total_original: Decimal = active.iter().map(|r| r.per_visit).sum();
    let total_minimum: Decimal = active.iter().map(|r| r.minimum_per_visit).sum();
    let total_monthly: Decimal = active.iter().map(|r| r.monthly_recurring).sum();
    let services_contract: Decimal = active.iter().map(|r| r.contract_total).sum();

    let trip_waived = active.iter().any(|r| r.waives_trip_charge);
    let trip_amount = if trip_waived {
        if quantity(trip.amount) > Decimal::ZERO {
            notes.push("trip charge waived by all-inclusive service".to_string());
        }
        Decimal::ZERO
    } else {
        quantity(trip.amount)
    };
    let parking_amount = quantity(parking.amount);

    let trip_monthly = trip_amount * trip.frequency.monthly_multiplier();
    let parking_monthly = parking_amount * parking.frequency.monthly_multiplier();

    let visits_per_month = primary_frequency(declared_primary, &active)
        .map(|f| f.monthly_multiplier())
        .unwrap_or(Decimal::ZERO);
    let per_visit_of = |monthly: Decimal| {
        if visits_per_month > Decimal::ZERO {
            monthly / visits_per_month
        } else {
            Decimal::ZERO
        }
    };

    let months = Decimal::from(contract_months);
    let total_agreement = services_contract + (trip_monthly + parking_monthly) * months;

    let classification = profitability::classify(total_original, total_minimum);
    let gap_to_green =
        profitability::gap_to_green(total_original, total_minimum).map(money::round_cents);

    AggregatedQuote {
        contract_months,
        total_original_per_visit: money::round_cents(total_original),
        total_minimum_per_visit: money::round_cents(total_minimum),
        trip_monthly_equivalent: money::round_cents(trip_monthly),
        parking_monthly_equivalent: money::round_cents(parking_monthly),
        trip_per_visit_equivalent: money::round_cents(per_visit_of(trip_monthly)),
        parking_per_visit_equivalent: money::round_cents(per_visit_of(parking_monthly)),
        total_monthly_recurring: money::round_cents(total_monthly),
        total_agreement_amount: money::round_cents(total_agreement),
        classification,
        gap_to_green,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::results::Classification;
    use crate::domain::service::ServiceKind;
    use rust_decimal_macros::dec;

    fn result(
        service: ServiceKind,
        per_visit: Decimal,
        minimum: Decimal,
        frequency: Frequency,
    ) -> CalculationResult {
        let totals = frequency.project(per_visit, 12);
        CalculationResult {
            per_visit,
            minimum_per_visit: minimum,
            monthly_recurring: totals.monthly,
            annual_price: totals.annual,
            contract_total: totals.contract_total,
            is_active: true,
            ..CalculationResult::inactive(service, frequency)
        }
    }

    fn charge(amount: Decimal, frequency: Frequency) -> GlobalCharge {
        GlobalCharge {
            amount: Some(amount),
            frequency,
        }
    }

    #[test]
    fn sums_active_services_and_classifies_neutral() {
        let results = vec![
            result(ServiceKind::SaniClean, dec!(40), dec!(30), Frequency::Weekly),
            result(ServiceKind::Sanipod, dec!(60), dec!(50), Frequency::Weekly),
        ];
        let quote = aggregate(
            &results,
            &GlobalCharge::default(),
            &GlobalCharge::default(),
            12,
            None,
        );
        assert_eq!(quote.total_original_per_visit, dec!(100.00));
        assert_eq!(quote.total_minimum_per_visit, dec!(80.00));
        // threshold 104: neutral, $4 short of green
        assert_eq!(quote.classification, Classification::Neutral);
        assert_eq!(quote.gap_to_green, Some(dec!(4.00)));
    }

    #[test]
    fn inactive_services_are_excluded() {
        let results = vec![
            result(ServiceKind::SaniClean, dec!(200), dec!(50), Frequency::Weekly),
            CalculationResult::inactive(ServiceKind::Sanipod, Frequency::Weekly),
        ];
        let quote = aggregate(
            &results,
            &GlobalCharge::default(),
            &GlobalCharge::default(),
            12,
            None,
        );
        assert_eq!(quote.total_original_per_visit, dec!(200.00));
        assert_eq!(quote.total_minimum_per_visit, dec!(50.00));
        assert_eq!(quote.classification, Classification::Green);
    }

    #[test]
    fn trip_and_parking_convert_through_the_frequency_table() {
        let results = vec![result(
            ServiceKind::SaniClean,
            dec!(100),
            dec!(50),
            Frequency::Weekly,
        )];
        let quote = aggregate(
            &results,
            &charge(dec!(15), Frequency::Weekly),
            &charge(dec!(20), Frequency::Monthly),
            12,
            None,
        );
        assert_eq!(quote.trip_monthly_equivalent, dec!(64.95)); // 15 x 4.33
        assert_eq!(quote.parking_monthly_equivalent, dec!(20.00));
        // per-visit equivalents divide by the primary (weekly) cadence
        assert_eq!(quote.trip_per_visit_equivalent, dec!(15.00));
        assert_eq!(quote.parking_per_visit_equivalent, dec!(4.62));
        // services: 100 x 4.33 x 12 = 5196; charges: (64.95 + 20) x 12
        assert_eq!(quote.total_agreement_amount, dec!(6215.40));
    }

    #[test]
    fn declared_primary_frequency_governs_conversion() {
        let results = vec![result(
            ServiceKind::CarpetClean,
            dec!(400),
            dec!(125),
            Frequency::Quarterly,
        )];
        let quote = aggregate(
            &results,
            &charge(dec!(30), Frequency::Monthly),
            &GlobalCharge::default(),
            12,
            Some(Frequency::Monthly),
        );
        assert_eq!(quote.trip_per_visit_equivalent, dec!(30.00));
    }

    #[test]
    fn empty_agreement_aggregates_to_zero_and_green() {
        let quote = aggregate(
            &[],
            &GlobalCharge::default(),
            &GlobalCharge::default(),
            12,
            None,
        );
        assert_eq!(quote.total_agreement_amount, dec!(0.00));
        assert_eq!(quote.classification, Classification::Green);
    }
}
