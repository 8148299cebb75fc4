//! Run statistics
//!
//! Survival is measured in Earth years (full orbits). The record lives only as
//! long as the process.

use serde::{Deserialize, Serialize};

use crate::consts::EARTH_ORBIT_PERIOD;

/// Current and best survival
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Years survived in the current run (frozen once the run ends)
    pub survival_years: f64,
    /// Best survival seen this session, never decreases
    pub best_survival_years: f64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert elapsed seconds into orbits
    pub fn years_for(elapsed_secs: f64) -> f64 {
        (elapsed_secs / EARTH_ORBIT_PERIOD).max(0.0)
    }

    /// Update the current run from wall time; the record is settled when the run ends
    pub fn update(&mut self, now: f64, run_start: f64) {
        self.survival_years = Self::years_for(now - run_start);
    }

    /// Fold a survival value into the record; returns true if it was beaten
    pub fn record(&mut self, years: f64) -> bool {
        if years > self.best_survival_years {
            self.best_survival_years = years;
            true
        } else {
            false
        }
    }

    /// Start a new run (the record is kept)
    pub fn reset_run(&mut self) {
        self.survival_years = 0.0;
    }

    /// Whole years survived, the spawn difficulty level
    pub fn whole_years(&self) -> u32 {
        self.survival_years.floor() as u32
    }
}
