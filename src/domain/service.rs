use serde::{Deserialize, Serialize};

/// Service line offered on an agreement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    SaniClean,
    SaniScrub,
    RpmWindows,
    PowerScrub,
    Janitorial,
    Sanipod,
    FoamingDrain,
    CarpetClean,
    StripWax,
    GreaseTrap,
    Electrostatic,
    Microfiber,
}

impl ServiceKind {
    pub const ALL: [Self; 12] = [
        Self::SaniClean,
        Self::SaniScrub,
        Self::RpmWindows,
        Self::PowerScrub,
        Self::Janitorial,
        Self::Sanipod,
        Self::FoamingDrain,
        Self::CarpetClean,
        Self::StripWax,
        Self::GreaseTrap,
        Self::Electrostatic,
        Self::Microfiber,
    ];

    /// Stable key used in persisted documents and rate-store URLs
    pub fn key(self) -> &'static str {
        match self {
            Self::SaniClean => "sani_clean",
            Self::SaniScrub => "sani_scrub",
            Self::RpmWindows => "rpm_windows",
            Self::PowerScrub => "power_scrub",
            Self::Janitorial => "janitorial",
            Self::Sanipod => "sanipod",
            Self::FoamingDrain => "foaming_drain",
            Self::CarpetClean => "carpet_clean",
            Self::StripWax => "strip_wax",
            Self::GreaseTrap => "grease_trap",
            Self::Electrostatic => "electrostatic",
            Self::Microfiber => "microfiber",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SaniClean => "SaniClean Restroom Hygiene",
            Self::SaniScrub => "SaniScrub Deep Clean",
            Self::RpmWindows => "RPM Window Cleaning",
            Self::PowerScrub => "Refresh Power Scrub",
            Self::Janitorial => "Janitorial",
            Self::Sanipod => "Sanipod Hygiene Units",
            Self::FoamingDrain => "Foaming Drain Treatment",
            Self::CarpetClean => "Carpet Cleaning",
            Self::StripWax => "Strip & Wax",
            Self::GreaseTrap => "Grease Trap Service",
            Self::Electrostatic => "Electrostatic Spray",
            Self::Microfiber => "Microfiber Mopping",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
