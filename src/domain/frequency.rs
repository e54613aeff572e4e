use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Service visit cadence.
///
/// Every monthly/annual figure in the engine is derived through this table;
/// calculators never hand-roll their own conversion factors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Biweekly,
    TwiceMonthly,
    Monthly,
    Bimonthly,
    Quarterly,
    Biannual,
    Annual,
    OneTime,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Monthly
    }
}

impl Frequency {
    /// Visits per month (also the per-visit → monthly-recurring factor)
    pub fn monthly_multiplier(self) -> Decimal {
        match self {
            Self::Weekly => dec!(4.33),
            Self::Biweekly => dec!(2.165),
            Self::TwiceMonthly => dec!(2),
            Self::Monthly => dec!(1),
            Self::Bimonthly => dec!(0.5),
            Self::Quarterly => dec!(0.333),
            Self::Biannual => dec!(0.167),
            Self::Annual => dec!(0.083),
            Self::OneTime => dec!(0),
        }
    }

    /// Visits per year
    pub fn annual_multiplier(self) -> Decimal {
        match self {
            Self::Weekly => dec!(52),
            Self::Biweekly => dec!(26),
            Self::TwiceMonthly => dec!(24),
            Self::Monthly => dec!(12),
            Self::Bimonthly => dec!(6),
            Self::Quarterly => dec!(4),
            Self::Biannual => dec!(2),
            Self::Annual => dec!(1),
            Self::OneTime => dec!(0),
        }
    }

    /// Frequencies billed per visit rather than as monthly recurring.
    ///
    /// For these, a contract total is `per_visit × visits_in_window`; for all
    /// others it is `monthly_recurring × contract_months`. The two derivation
    /// paths are never mixed within one result.
    pub fn is_visit_based(self) -> bool {
        matches!(
            self,
            Self::Quarterly | Self::Biannual | Self::Annual | Self::OneTime
        )
    }

    /// Whole visits that fall inside a contract window, for visit-based
    /// frequencies. A signed one-time service always gets its visit.
    pub fn visits_in_window(self, contract_months: u32) -> u32 {
        let visits = match self {
            Self::Quarterly => contract_months / 3,
            Self::Biannual => contract_months / 6,
            Self::Annual => contract_months / 12,
            Self::OneTime => 1,
            _ => contract_months, // recurring frequencies are not counted this way
        };
        visits.max(1)
    }

    /// Project a per-visit price into monthly, annual, and contract figures.
    pub fn project(self, per_visit: Decimal, contract_months: u32) -> RecurringTotals {
        let monthly = per_visit * self.monthly_multiplier();
        let annual = per_visit * self.annual_multiplier();
        let contract_total = if self.is_visit_based() {
            per_visit * Decimal::from(self.visits_in_window(contract_months))
        } else {
            monthly * Decimal::from(contract_months)
        };
        RecurringTotals {
            monthly,
            annual,
            contract_total,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Biweekly => "Every Other Week",
            Self::TwiceMonthly => "2x Per Month",
            Self::Monthly => "Monthly",
            Self::Bimonthly => "Every Other Month",
            Self::Quarterly => "Quarterly",
            Self::Biannual => "Twice a Year",
            Self::Annual => "Once a Year",
            Self::OneTime => "One Time",
        }
    }

    /// Tolerant parser for frequency strings found in persisted documents.
    /// Older documents used display labels and `NxPERIOD` codes.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let norm: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        match norm.trim_matches('_') {
            "weekly" | "1x_week" | "1x_per_week" => Some(Self::Weekly),
            "biweekly" | "every_other_week" => Some(Self::Biweekly),
            "twice_monthly" | "2x_per_month" | "2x_month" => Some(Self::TwiceMonthly),
            "monthly" | "1x_month" | "1x_per_month" => Some(Self::Monthly),
            "bimonthly" | "every_other_month" => Some(Self::Bimonthly),
            "quarterly" | "4x_year" => Some(Self::Quarterly),
            "biannual" | "semiannual" | "twice_a_year" | "2x_year" => Some(Self::Biannual),
            "annual" | "yearly" | "once_a_year" | "1x_year" => Some(Self::Annual),
            "one_time" | "onetime" => Some(Self::OneTime),
            _ => None,
        }
    }
}

/// Monthly/annual/contract projection of a per-visit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringTotals {
    pub monthly: Decimal,
    pub annual: Decimal,
    pub contract_total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_multipliers_are_monotonic_by_cadence() {
        let per_visit = dec!(100);
        let weekly = Frequency::Weekly.project(per_visit, 12).monthly;
        let monthly = Frequency::Monthly.project(per_visit, 12).monthly;
        let quarterly = Frequency::Quarterly.project(per_visit, 12).monthly;
        assert!(weekly > monthly);
        assert!(monthly > quarterly);
    }

    #[test]
    fn visit_based_contract_totals_count_whole_visits() {
        let totals = Frequency::Quarterly.project(dec!(200), 12);
        assert_eq!(totals.contract_total, dec!(800)); // 4 visits in 12 months

        let totals = Frequency::Biannual.project(dec!(200), 13);
        assert_eq!(totals.contract_total, dec!(400)); // 2 visits, partial month ignored

        let totals = Frequency::OneTime.project(dec!(350), 36);
        assert_eq!(totals.contract_total, dec!(350));
        assert_eq!(totals.monthly, dec!(0));
    }

    #[test]
    fn recurring_contract_totals_use_monthly_path() {
        let totals = Frequency::Weekly.project(dec!(50), 12);
        assert_eq!(totals.monthly, dec!(216.50));
        assert_eq!(totals.contract_total, dec!(2598.00));
    }

    #[test]
    fn short_contract_still_bills_one_visit() {
        assert_eq!(Frequency::Annual.visits_in_window(6), 1);
        assert_eq!(Frequency::Quarterly.visits_in_window(2), 1);
    }

    #[test]
    fn loose_parsing_accepts_legacy_labels() {
        assert_eq!(Frequency::parse_loose("2x Per Month"), Some(Frequency::TwiceMonthly));
        assert_eq!(Frequency::parse_loose("Every Other Week"), Some(Frequency::Biweekly));
        assert_eq!(Frequency::parse_loose("WEEKLY"), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse_loose("fortnightly"), None);
    }
}
