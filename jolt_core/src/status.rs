//! Severity bands for an active caffeine level.

use serde::{Deserialize, Serialize};

/// Levels below this are Low
pub const LOW_MAX: f64 = 100.0;
/// Levels below this (and at least `LOW_MAX`) are Moderate
pub const MODERATE_MAX: f64 = 200.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusTier {
    Low,
    Moderate,
    High,
}

impl StatusTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTier::Low => "low",
            StatusTier::Moderate => "moderate",
            StatusTier::High => "high",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StatusTier::Low => {
                "Caffeine levels are mild, resulting in a light boost in alertness with minimal side effects."
            }
            StatusTier::Moderate => {
                "A moderate amount of caffeine leads to noticeable stimulation, increased focus, and potential restlessness."
            }
            StatusTier::High => {
                "Elevated caffeine levels can cause jitteriness, rapid heartbeat, and trouble concentrating, signaling an excessive intake."
            }
        }
    }

    /// Foreground colour as a hex string
    pub fn color_hint(&self) -> &'static str {
        match self {
            StatusTier::Low => "#047857",
            StatusTier::Moderate => "#b45309",
            StatusTier::High => "#e11d48",
        }
    }

    /// Background colour as a hex string
    pub fn background_hint(&self) -> &'static str {
        match self {
            StatusTier::Low => "#d1fae5",
            StatusTier::Moderate => "#fef3c7",
            StatusTier::High => "#ffe4e6",
        }
    }
}

/// Classification result handed to the presentation layer
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusBand {
    pub tier: StatusTier,
    pub description: String,
    pub color_hint: String,
    pub background_hint: String,
}

impl From<StatusTier> for StatusBand {
    fn from(tier: StatusTier) -> Self {
        Self {
            tier,
            description: tier.description().to_string(),
            color_hint: tier.color_hint().to_string(),
            background_hint: tier.background_hint().to_string(),
        }
    }
}

/// Ordered threshold table; each bound is exclusive for the tier below it
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub low_max: f64,
    pub moderate_max: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            low_max: LOW_MAX,
            moderate_max: MODERATE_MAX,
        }
    }
}

impl StatusThresholds {
    pub fn tier(&self, level_mg: f64) -> StatusTier {
        if level_mg < self.low_max {
            StatusTier::Low
        } else if level_mg < self.moderate_max {
            StatusTier::Moderate
        } else {
            StatusTier::High
        }
    }

    pub fn classify(&self, level_mg: f64) -> StatusBand {
        self.tier(level_mg).into()
    }
}

/// Classify with the default thresholds
pub fn classify(level_mg: f64) -> StatusBand {
    StatusThresholds::default().classify(level_mg)
}
