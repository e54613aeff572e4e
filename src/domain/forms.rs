//! Canonical form state per service.
//!
//! These are the raw user-editable inputs: quantities, categorical choices,
//! flags, and the sparse override fields (`custom_*`, explicit rate fields)
//! that supersede computed defaults. Numeric fields deserialize through the
//! flexible adapter so numbers, numeric strings, and empty strings from the
//! UI all land correctly (`""` is unset, not zero).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;
use super::money;
use super::rates::PowerScrubRates;

/// Geographic pricing zone for restroom-hygiene services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geography {
    InsideBeltway,
    OutsideBeltway,
}

impl Default for Geography {
    fn default() -> Self {
        Self::InsideBeltway
    }
}

/// Carpet cleaning method, each with its own square-footage rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarpetMethod {
    Bonnet,
    HotWaterExtraction,
}

impl Default for CarpetMethod {
    fn default() -> Self {
        Self::HotWaterExtraction
    }
}

/// Named power-scrub area with a preset package price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrubArea {
    DumpsterPad,
    Sidewalk,
    Patio,
    DriveThru,
}

impl ScrubArea {
    pub fn preset(self, rates: &PowerScrubRates) -> Decimal {
        match self {
            Self::DumpsterPad => rates.dumpster_pad_preset,
            Self::Sidewalk => rates.sidewalk_preset,
            Self::Patio => rates.patio_preset,
            Self::DriveThru => rates.drive_thru_preset,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DumpsterPad => "dumpster pad",
            Self::Sidewalk => "sidewalk",
            Self::Patio => "patio",
            Self::DriveThru => "drive-thru",
        }
    }
}

/// Free-form user-added line item, summed directly into contract totals
/// without frequency conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomLine {
    pub label: String,
    #[serde(deserialize_with = "money::de_flexible")]
    pub amount: Option<Decimal>,
}

pub fn custom_line_total(lines: &[CustomLine]) -> Decimal {
    lines.iter().map(|l| money::quantity(l.amount)).sum()
}

/// Agreement-level charge (trip or parking) with its own cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalCharge {
    #[serde(deserialize_with = "money::de_flexible")]
    pub amount: Option<Decimal>,
    pub frequency: Frequency,
}

impl Default for GlobalCharge {
    fn default() -> Self {
        Self {
            amount: None,
            frequency: Frequency::Monthly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaniCleanForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub fixtures: Option<Decimal>,
    pub location: Geography,
    /// Bundled per-fixture pricing that waives the agreement trip charge.
    pub all_inclusive: bool,
    pub first_time_install: bool,
    /// First-time install at a facility in poor condition (3x multiplier).
    pub dirty_install: bool,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub fixture_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub minimum_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for SaniCleanForm {
    fn default() -> Self {
        Self {
            fixtures: None,
            location: Geography::default(),
            all_inclusive: false,
            first_time_install: false,
            dirty_install: false,
            frequency: Frequency::Weekly,
            fixture_rate: None,
            minimum_per_visit: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaniScrubForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub fixtures: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub non_bathroom_sqft: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub fixture_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for SaniScrubForm {
    fn default() -> Self {
        Self {
            fixtures: None,
            non_bathroom_sqft: None,
            frequency: Frequency::Monthly,
            fixture_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpmWindowForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub inside_panes: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub outside_panes: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub inside_pane_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub outside_pane_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for RpmWindowForm {
    fn default() -> Self {
        Self {
            inside_panes: None,
            outside_panes: None,
            frequency: Frequency::Monthly,
            inside_pane_rate: None,
            outside_pane_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

/// One selected power-scrub area. With square footage it prices as
/// `sqft × rate`; without, the area's preset package price applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubAreaSelection {
    pub area: ScrubArea,
    pub enabled: bool,
    #[serde(deserialize_with = "money::de_flexible")]
    pub sqft: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub rate: Option<Decimal>,
}

impl Default for ScrubAreaSelection {
    fn default() -> Self {
        Self {
            area: ScrubArea::DumpsterPad,
            enabled: true,
            sqft: None,
            rate: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerScrubForm {
    pub areas: Vec<ScrubAreaSelection>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for PowerScrubForm {
    fn default() -> Self {
        Self {
            areas: Vec::new(),
            frequency: Frequency::Monthly,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorialForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub hours: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub workers: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub hourly_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for JanitorialForm {
    fn default() -> Self {
        Self {
            hours: None,
            workers: None,
            frequency: Frequency::Weekly,
            hourly_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanipodForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub pods: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub pod_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for SanipodForm {
    fn default() -> Self {
        Self {
            pods: None,
            frequency: Frequency::Weekly,
            pod_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoamingDrainForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub drains: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub drain_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for FoamingDrainForm {
    fn default() -> Self {
        Self {
            drains: None,
            frequency: Frequency::Monthly,
            drain_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarpetCleanForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub sqft: Option<Decimal>,
    pub method: CarpetMethod,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub sqft_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for CarpetCleanForm {
    fn default() -> Self {
        Self {
            sqft: None,
            method: CarpetMethod::default(),
            frequency: Frequency::Quarterly,
            sqft_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripWaxForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub sqft: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub sqft_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for StripWaxForm {
    fn default() -> Self {
        Self {
            sqft: None,
            frequency: Frequency::Biannual,
            sqft_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreaseTrapForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub traps: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub trap_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for GreaseTrapForm {
    fn default() -> Self {
        Self {
            traps: None,
            frequency: Frequency::Quarterly,
            trap_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectrostaticForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub sqft: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub rooms: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub room_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for ElectrostaticForm {
    fn default() -> Self {
        Self {
            sqft: None,
            rooms: None,
            frequency: Frequency::Monthly,
            room_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicrofiberForm {
    #[serde(deserialize_with = "money::de_flexible")]
    pub stations: Option<Decimal>,
    pub frequency: Frequency,
    #[serde(deserialize_with = "money::de_flexible")]
    pub station_rate: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_per_visit: Option<Decimal>,
    #[serde(deserialize_with = "money::de_flexible")]
    pub custom_monthly: Option<Decimal>,
    pub custom_lines: Vec<CustomLine>,
}

impl Default for MicrofiberForm {
    fn default() -> Self {
        Self {
            stations: None,
            frequency: Frequency::Weekly,
            station_rate: None,
            custom_per_visit: None,
            custom_monthly: None,
            custom_lines: Vec::new(),
        }
    }
}

/// The whole agreement: every configured service plus global charges and the
/// billing horizon. Owned by its containing document; the engine treats it
/// read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgreementForm {
    /// Billing horizon in months (2-36 typical).
    pub contract_months: u32,
    /// Cadence governing trip/parking per-visit conversion. When absent, the
    /// highest-cadence active service governs.
    pub primary_frequency: Option<Frequency>,
    pub trip_charge: GlobalCharge,
    pub parking_charge: GlobalCharge,
    pub sani_clean: Option<SaniCleanForm>,
    pub sani_scrub: Option<SaniScrubForm>,
    pub rpm_windows: Option<RpmWindowForm>,
    pub power_scrub: Option<PowerScrubForm>,
    pub janitorial: Option<JanitorialForm>,
    pub sanipod: Option<SanipodForm>,
    pub foaming_drain: Option<FoamingDrainForm>,
    pub carpet_clean: Option<CarpetCleanForm>,
    pub strip_wax: Option<StripWaxForm>,
    pub grease_trap: Option<GreaseTrapForm>,
    pub electrostatic: Option<ElectrostaticForm>,
    pub microfiber: Option<MicrofiberForm>,
}

impl Default for AgreementForm {
    fn default() -> Self {
        Self {
            contract_months: 12,
            primary_frequency: None,
            trip_charge: GlobalCharge::default(),
            parking_charge: GlobalCharge::default(),
            sani_clean: None,
            sani_scrub: None,
            rpm_windows: None,
            power_scrub: None,
            janitorial: None,
            sanipod: None,
            foaming_drain: None,
            carpet_clean: None,
            strip_wax: None,
            grease_trap: None,
            electrostatic: None,
            microfiber: None,
        }
    }
}
