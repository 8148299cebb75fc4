//! Data-driven game balance
//!
//! Every gameplay rate lives here so a run can be rebalanced from JSON without
//! touching the simulation. Missing fields fall back to the shipped values.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::Color;

/// Why a tuning override was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// A rate, speed or period that must be positive and finite is not
    NotPositive { field: &'static str, value: f32 },
    /// A delay that must be finite and non-negative is not
    Negative { field: &'static str, value: f32 },
    /// A spawn divisor offset of zero
    ZeroOffset { field: &'static str },
    /// The targeted divisor offset must stay below the ambient one
    IntervalOrder { ambient_offset: u32, targeted_offset: u32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive and finite, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must be finite and non-negative, got {value}")
            }
            Self::ZeroOffset { field } => write!(f, "{field} must be at least 1"),
            Self::IntervalOrder {
                ambient_offset,
                targeted_offset,
            } => write!(
                f,
                "targeted_interval_offset ({targeted_offset}) must be below \
                 ambient_interval_offset ({ambient_offset})"
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Flare speed (pixels/s)
    pub flare_speed: f32,

    /// Title text fade-out (alpha/s)
    pub title_fade_rate: f32,
    /// End screen fade-in (alpha/s)
    pub end_fade_rate: f32,
    /// Explosion fade-out (alpha/s)
    pub explosion_fade_rate: f32,
    /// Explosion spin (degrees/s)
    pub explosion_rotation_delta: f32,
    pub explosion_tint: Color,

    /// Seconds Earth takes to zoom to the centre after being scorched
    pub end_zoom_period: f32,
    /// Earth scale at the end of the zoom
    pub end_zoom_scale: f32,

    /// Ambient asteroid speed (pixels/s)
    pub ambient_speed: f32,
    /// Targeted asteroid speed (pixels/s)
    pub targeted_speed: f32,
    pub targeted_tint: Color,
    /// Delay before the first targeted asteroid of a run (seconds)
    pub targeted_first_delay: f32,
    /// Spawn interval = orbit period / (floor(years) + offset)
    pub ambient_interval_offset: u32,
    pub targeted_interval_offset: u32,
    /// Asteroid spin range (degrees/s, inclusive)
    pub asteroid_spin_min: i32,
    pub asteroid_spin_max: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            flare_speed: 250.0,

            title_fade_rate: 128.0,
            end_fade_rate: 96.0,
            explosion_fade_rate: 255.0,
            explosion_rotation_delta: 90.0,
            explosion_tint: Color::rgba(208.0, 255.0, 208.0, 255.0),

            end_zoom_period: 4.0,
            end_zoom_scale: 4.0,

            ambient_speed: 35.0,
            targeted_speed: 100.0,
            targeted_tint: Color::rgba(255.0, 208.0, 208.0, 255.0),
            targeted_first_delay: 0.5,
            ambient_interval_offset: 7,
            targeted_interval_offset: 4,
            asteroid_spin_min: 30,
            asteroid_spin_max: 50,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run on
    ///
    /// Fade rates, speeds and the zoom must be positive or entities never
    /// leave the pool and the end sequence never finishes. The targeted
    /// divisor offset stays below the ambient one so the targeted interval
    /// shrinks faster with every year survived.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("flare_speed", self.flare_speed),
            ("title_fade_rate", self.title_fade_rate),
            ("end_fade_rate", self.end_fade_rate),
            ("explosion_fade_rate", self.explosion_fade_rate),
            ("end_zoom_period", self.end_zoom_period),
            ("end_zoom_scale", self.end_zoom_scale),
            ("ambient_speed", self.ambient_speed),
            ("targeted_speed", self.targeted_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let delay = self.targeted_first_delay;
        if !(delay.is_finite() && delay >= 0.0) {
            return Err(TuningError::Negative {
                field: "targeted_first_delay",
                value: delay,
            });
        }

        let ambient_offset = self.ambient_interval_offset;
        let targeted_offset = self.targeted_interval_offset;
        if ambient_offset == 0 {
            return Err(TuningError::ZeroOffset {
                field: "ambient_interval_offset",
            });
        }
        if targeted_offset == 0 {
            return Err(TuningError::ZeroOffset {
                field: "targeted_interval_offset",
            });
        }
        if targeted_offset >= ambient_offset {
            return Err(TuningError::IntervalOrder {
                ambient_offset,
                targeted_offset,
            });
        }
        Ok(())
    }

    /// Parse tuning overrides, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Rejected tuning overrides ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Earth scale growth per second during the end zoom
    pub fn end_zoom_scale_delta(&self) -> f32 {
        self.end_zoom_scale / self.end_zoom_period
    }
}
