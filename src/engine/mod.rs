//! The pricing engine: one calculator per service, the override machinery,
//! and the agreement-level aggregation and profitability gate.
//!
//! Everything here is pure and synchronous. Calculators take a form state, a
//! rate table, and optionally the matching form from a previously saved
//! document (for override carry-over), and produce a `CalculationResult`.

pub mod aggregate;
pub mod carpet_clean;
pub mod electrostatic;
pub mod foaming_drain;
pub mod grease_trap;
pub mod janitorial;
pub mod microfiber;
pub mod power_scrub;
pub mod profitability;
pub mod recorder;
pub mod rpm_windows;
pub mod saniclean;
pub mod sanipod;
pub mod saniscrub;
pub mod strip_wax;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::forms::{custom_line_total, AgreementForm, CustomLine};
use crate::domain::frequency::Frequency;
use crate::domain::money::{self, quantity};
use crate::domain::overrides::FieldLedger;
use crate::domain::rates::RateBook;
use crate::domain::results::{AggregatedQuote, CalculationResult};
use crate::domain::service::ServiceKind;

use recorder::ChangeRecorder;

/// Everything a calculator has decided about one service, before the shared
/// minimum/override/frequency contract is applied.
pub(crate) struct Outcome<'a> {
    pub service: ServiceKind,
    pub frequency: Frequency,
    pub active: bool,
    pub raw_per_visit: Decimal,
    pub minimum: Decimal,
    pub custom_per_visit: Option<Decimal>,
    pub saved_per_visit: Option<Decimal>,
    pub custom_monthly: Option<Decimal>,
    pub saved_monthly: Option<Decimal>,
    pub custom_lines: &'a [CustomLine],
    pub install_fee: Decimal,
    pub waives_trip_charge: bool,
}

impl Outcome<'_> {
    /// Apply the shared contract: inactive → all zeros, minimum floor only
    /// while active, per-visit/monthly overrides, frequency projection, and
    /// cent rounding.
    pub(crate) fn finish(
        self,
        contract_months: u32,
        mut ledger: FieldLedger,
        mut details: Vec<String>,
    ) -> CalculationResult {
        if !self.active {
            return CalculationResult::inactive(self.service, self.frequency);
        }

        let floored = self.raw_per_visit.max(self.minimum);
        if floored > self.raw_per_visit {
            details.push(format!(
                "raised to {} per-visit minimum",
                money::dollars(self.minimum)
            ));
        }

        let per_visit = ledger.resolve(
            "per_visit",
            self.custom_per_visit,
            self.saved_per_visit,
            floored,
        );
        if ledger.is_custom("per_visit") {
            details.push(format!(
                "per-visit overridden to {}",
                money::dollars(per_visit)
            ));
        }

        let totals = self.frequency.project(per_visit, contract_months);
        let monthly = ledger.resolve(
            "monthly",
            self.custom_monthly,
            self.saved_monthly,
            totals.monthly,
        );

        // Contract totals follow exactly one derivation path: visit-based
        // frequencies bill per visit, everything else bills monthly.
        let contract_base = if self.frequency.is_visit_based() {
            per_visit * Decimal::from(self.frequency.visits_in_window(contract_months))
        } else {
            monthly * Decimal::from(contract_months)
        };
        let annual = if self.frequency.is_visit_based() {
            per_visit * self.frequency.annual_multiplier()
        } else {
            monthly * Decimal::from(12u32)
        };

        let custom_total = custom_line_total(self.custom_lines);
        if custom_total > Decimal::ZERO {
            details.push(format!(
                "custom line items add {} to the contract total",
                money::dollars(custom_total)
            ));
        }
        if self.install_fee > Decimal::ZERO {
            details.push(format!(
                "one-time install fee {}",
                money::dollars(self.install_fee)
            ));
        }

        CalculationResult {
            service: self.service,
            is_active: true,
            frequency: self.frequency,
            per_visit: money::round_cents(per_visit),
            minimum_per_visit: money::round_cents(self.minimum),
            monthly_recurring: money::round_cents(monthly),
            annual_price: money::round_cents(annual),
            contract_total: money::round_cents(contract_base + self.install_fee + custom_total),
            install_fee: money::round_cents(self.install_fee),
            custom_line_total: money::round_cents(custom_total),
            waives_trip_charge: self.waives_trip_charge,
            fields: ledger,
            details,
        }
    }
}

/// A fully priced agreement: per-service results plus the roll-up.
#[derive(Debug, Clone, Serialize)]
pub struct AgreementQuote {
    pub services: Vec<CalculationResult>,
    pub aggregate: AggregatedQuote,
}

/// Price every configured service and aggregate the results.
///
/// `prior` is the form recovered from a previously saved document; its values
/// feed the saved layer of override resolution. Override events are
/// accumulated into `recorder` for the document builder's versioning notes.
pub fn price_agreement(
    form: &AgreementForm,
    rates: &RateBook,
    prior: Option<&AgreementForm>,
    recorder: &mut ChangeRecorder,
) -> AgreementQuote {
    let months = form.contract_months.max(1);
    let sani_clean_active = form
        .sani_clean
        .as_ref()
        .map(|f| quantity(f.fixtures) > Decimal::ZERO)
        .unwrap_or(false);

    let mut services = Vec::new();

    if let Some(f) = &form.sani_clean {
        services.push(saniclean::calculate(
            f,
            &rates.sani_clean,
            prior.and_then(|p| p.sani_clean.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.sani_scrub {
        services.push(saniscrub::calculate(
            f,
            &rates.sani_scrub,
            prior.and_then(|p| p.sani_scrub.as_ref()),
            months,
            sani_clean_active,
        ));
    }
    if let Some(f) = &form.rpm_windows {
        services.push(rpm_windows::calculate(
            f,
            &rates.rpm_windows,
            prior.and_then(|p| p.rpm_windows.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.power_scrub {
        services.push(power_scrub::calculate(
            f,
            &rates.power_scrub,
            prior.and_then(|p| p.power_scrub.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.janitorial {
        services.push(janitorial::calculate(
            f,
            &rates.janitorial,
            prior.and_then(|p| p.janitorial.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.sanipod {
        services.push(sanipod::calculate(
            f,
            &rates.sanipod,
            prior.and_then(|p| p.sanipod.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.foaming_drain {
        services.push(foaming_drain::calculate(
            f,
            &rates.foaming_drain,
            prior.and_then(|p| p.foaming_drain.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.carpet_clean {
        services.push(carpet_clean::calculate(
            f,
            &rates.carpet_clean,
            prior.and_then(|p| p.carpet_clean.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.strip_wax {
        services.push(strip_wax::calculate(
            f,
            &rates.strip_wax,
            prior.and_then(|p| p.strip_wax.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.grease_trap {
        services.push(grease_trap::calculate(
            f,
            &rates.grease_trap,
            prior.and_then(|p| p.grease_trap.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.electrostatic {
        services.push(electrostatic::calculate(
            f,
            &rates.electrostatic,
            prior.and_then(|p| p.electrostatic.as_ref()),
            months,
        ));
    }
    if let Some(f) = &form.microfiber {
        services.push(microfiber::calculate(
            f,
            &rates.microfiber,
            prior.and_then(|p| p.microfiber.as_ref()),
            months,
        ));
    }

    for result in &services {
        recorder.record_overrides(result.service, &result.fields);
    }

    let aggregate = aggregate::aggregate(
        &services,
        &form.trip_charge,
        &form.parking_charge,
        months,
        form.primary_frequency,
    );

    AgreementQuote {
        services,
        aggregate,
    }
}
