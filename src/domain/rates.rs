//! Rate tables per service.
//!
//! Each table can be fetched from the remote rate store or taken from the
//! static fallbacks below, so the engine keeps pricing when the store is
//! unreachable. Tables are immutable within one calculation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One bracket of a tiered rate: flat `price` for any quantity up to `up_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    pub up_to: Decimal,
    pub price: Decimal,
}

/// Upper-bound bracket lookup: the first band whose `up_to` is at or above
/// the quantity wins. Quantities beyond the last band fall through to the
/// caller's flat per-unit rate.
pub fn band_price(bands: &[RateBand], quantity: Decimal) -> Option<Decimal> {
    bands.iter().find(|b| b.up_to >= quantity).map(|b| b.price)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaniCleanRates {
    pub fixture_rate_inside: Decimal,
    pub fixture_rate_outside: Decimal,
    pub all_inclusive_fixture_rate: Decimal,
    pub minimum_per_visit: Decimal,
    pub install_clean_multiplier: Decimal,
    pub install_dirty_multiplier: Decimal,
}

impl Default for SaniCleanRates {
    fn default() -> Self {
        Self {
            fixture_rate_inside: dec!(5.00),
            fixture_rate_outside: dec!(4.50),
            all_inclusive_fixture_rate: dec!(7.50),
            minimum_per_visit: dec!(50.00),
            install_clean_multiplier: dec!(1.5),
            install_dirty_multiplier: dec!(3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaniScrubRates {
    pub fixture_rate: Decimal,
    /// Discounted per-fixture rate for the twice-monthly cadence, honored
    /// only when SaniClean is active on the same agreement.
    pub twice_monthly_fixture_rate: Decimal,
    pub area_bands: Vec<RateBand>,
    pub area_overflow_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for SaniScrubRates {
    fn default() -> Self {
        Self {
            fixture_rate: dec!(15.00),
            twice_monthly_fixture_rate: dec!(12.00),
            area_bands: vec![
                RateBand { up_to: dec!(500), price: dec!(25.00) },
                RateBand { up_to: dec!(1000), price: dec!(40.00) },
                RateBand { up_to: dec!(2000), price: dec!(65.00) },
            ],
            area_overflow_rate: dec!(0.035),
            minimum_per_visit: dec!(60.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpmWindowRates {
    pub inside_pane_rate: Decimal,
    pub outside_pane_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for RpmWindowRates {
    fn default() -> Self {
        Self {
            inside_pane_rate: dec!(2.50),
            outside_pane_rate: dec!(3.25),
            minimum_per_visit: dec!(35.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerScrubRates {
    pub sqft_rate: Decimal,
    /// Preset per-visit price per scrub area, used when no square footage
    /// and no custom rate is supplied for the area.
    pub dumpster_pad_preset: Decimal,
    pub sidewalk_preset: Decimal,
    pub patio_preset: Decimal,
    pub drive_thru_preset: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for PowerScrubRates {
    fn default() -> Self {
        Self {
            sqft_rate: dec!(0.18),
            dumpster_pad_preset: dec!(85.00),
            sidewalk_preset: dec!(95.00),
            patio_preset: dec!(110.00),
            drive_thru_preset: dec!(125.00),
            minimum_per_visit: dec!(85.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorialRates {
    /// Add-on tiers for short visits, bracketed by hours.
    pub hour_brackets: Vec<RateBand>,
    /// Flat hourly rate past the last bracket.
    pub hourly_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for JanitorialRates {
    fn default() -> Self {
        Self {
            hour_brackets: vec![
                RateBand { up_to: dec!(0.25), price: dec!(15.00) },
                RateBand { up_to: dec!(0.5), price: dec!(20.00) },
                RateBand { up_to: dec!(1), price: dec!(35.00) },
            ],
            hourly_rate: dec!(32.00),
            minimum_per_visit: dec!(15.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanipodRates {
    pub pod_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for SanipodRates {
    fn default() -> Self {
        Self {
            pod_rate: dec!(12.00),
            minimum_per_visit: dec!(30.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoamingDrainRates {
    pub drain_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for FoamingDrainRates {
    fn default() -> Self {
        Self {
            drain_rate: dec!(9.50),
            minimum_per_visit: dec!(25.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarpetCleanRates {
    pub bonnet_sqft_rate: Decimal,
    pub extraction_sqft_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for CarpetCleanRates {
    fn default() -> Self {
        Self {
            bonnet_sqft_rate: dec!(0.12),
            extraction_sqft_rate: dec!(0.20),
            minimum_per_visit: dec!(125.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripWaxRates {
    pub sqft_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for StripWaxRates {
    fn default() -> Self {
        Self {
            sqft_rate: dec!(0.55),
            minimum_per_visit: dec!(250.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreaseTrapRates {
    pub trap_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for GreaseTrapRates {
    fn default() -> Self {
        Self {
            trap_rate: dec!(145.00),
            minimum_per_visit: dec!(145.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectrostaticRates {
    pub sqft_bands: Vec<RateBand>,
    pub overflow_sqft_rate: Decimal,
    pub room_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for ElectrostaticRates {
    fn default() -> Self {
        Self {
            sqft_bands: vec![
                RateBand { up_to: dec!(1000), price: dec!(75.00) },
                RateBand { up_to: dec!(2500), price: dec!(140.00) },
                RateBand { up_to: dec!(5000), price: dec!(225.00) },
            ],
            overflow_sqft_rate: dec!(0.04),
            room_rate: dec!(18.00),
            minimum_per_visit: dec!(50.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicrofiberRates {
    pub station_rate: Decimal,
    pub minimum_per_visit: Decimal,
}

impl Default for MicrofiberRates {
    fn default() -> Self {
        Self {
            station_rate: dec!(6.50),
            minimum_per_visit: dec!(20.00),
        }
    }
}

/// The full set of rate tables an agreement prices against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateBook {
    pub sani_clean: SaniCleanRates,
    pub sani_scrub: SaniScrubRates,
    pub rpm_windows: RpmWindowRates,
    pub power_scrub: PowerScrubRates,
    pub janitorial: JanitorialRates,
    pub sanipod: SanipodRates,
    pub foaming_drain: FoamingDrainRates,
    pub carpet_clean: CarpetCleanRates,
    pub strip_wax: StripWaxRates,
    pub grease_trap: GreaseTrapRates,
    pub electrostatic: ElectrostaticRates,
    pub microfiber: MicrofiberRates,
}

impl RateBook {
    /// Static defaults used whenever the remote rate store is unavailable.
    pub fn fallback() -> Self {
        Self::default()
    }
}
