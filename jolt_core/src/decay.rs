//! First-order exponential decay of a single dose.

/// Caffeine metabolic half-life, in hours
pub const HALF_LIFE_HOURS: f64 = 5.0;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Decay curve with a fixed half-life
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecayModel {
    pub half_life_hours: f64,
}

impl Default for DecayModel {
    fn default() -> Self {
        Self {
            half_life_hours: HALF_LIFE_HOURS,
        }
    }
}

impl DecayModel {
    pub const fn new(half_life_hours: f64) -> Self {
        Self { half_life_hours }
    }

    /// Amount of `original_mg` still active after `elapsed_ms`
    ///
    /// Negative elapsed time (an event ahead of "now" through clock skew) counts
    /// as no time elapsed. The result never drops below zero and never exceeds
    /// `original_mg`, but it also never reaches exactly zero.
    pub fn remaining_amount(&self, original_mg: f64, elapsed_ms: i64) -> f64 {
        let elapsed_hours = elapsed_ms.max(0) as f64 / MS_PER_HOUR;
        original_mg * 0.5_f64.powf(elapsed_hours / self.half_life_hours)
    }
}

/// [`DecayModel::remaining_amount`] with the default half-life
pub fn remaining_amount(original_mg: f64, elapsed_ms: i64) -> f64 {
    DecayModel::default().remaining_amount(original_mg, elapsed_ms)
}
