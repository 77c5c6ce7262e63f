//! Data-driven analysis parameters.
//!
//! Collects the runtime-tunable knobs of the analysis layer into a single
//! [`AnalysisParams`] resource. The binary fills it from a JSON file and
//! environment overrides; tests build it directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BASELINE_AQI, DEFAULT_CITIES, DEFAULT_SEED};
use crate::error::SimError;
use crate::narrative::PatternNarrativeMode;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Seed for `SimRng`.
    pub seed: u64,
    /// Current-condition AQI the forecast starts from.
    pub baseline_aqi: f64,
    pub pattern_mode: PatternNarrativeMode,
    pub cities: Vec<String>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            baseline_aqi: DEFAULT_BASELINE_AQI,
            pattern_mode: PatternNarrativeMode::default(),
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl AnalysisParams {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| SimError::invalid(format!("analysis params: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.baseline_aqi.is_finite() || self.baseline_aqi < 0.0 {
            return Err(SimError::invalid(format!(
                "baseline_aqi must be a non-negative number, got {}",
                self.baseline_aqi
            )));
        }
        if self.cities.is_empty() {
            return Err(SimError::invalid("cities must not be empty"));
        }
        Ok(())
    }

    pub fn knows_city(&self, city: &str) -> bool {
        self.configured_city(city).is_some()
    }

    /// The configured spelling of `city`, matched case-insensitively and
    /// ignoring surrounding whitespace.
    pub fn configured_city(&self, city: &str) -> Option<&str> {
        let city = city.trim();
        self.cities
            .iter()
            .find(|c| c.eq_ignore_ascii_case(city))
            .map(String::as_str)
    }
}
