use bevy::prelude::*;

use crate::forecast::ForecastHorizon;
use crate::historical::{HistoryRange, Pollutant};
use crate::narrative::AnalysisKind;
use crate::scenario::ScenarioParams;

/// Ask the analysis system to (re)compute one report.
///
/// Sending the same request twice recomputes it twice; there is no caching.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum RecomputeRequest {
    Forecast {
        city: String,
        horizon: ForecastHorizon,
        /// Overrides `AnalysisParams::baseline_aqi` when set.
        baseline_aqi: Option<f64>,
    },
    Historical {
        city: String,
        pollutant: Pollutant,
        range: HistoryRange,
    },
    Scenario {
        city: String,
        params: ScenarioParams,
    },
}

impl RecomputeRequest {
    pub fn city(&self) -> &str {
        match self {
            RecomputeRequest::Forecast { city, .. }
            | RecomputeRequest::Historical { city, .. }
            | RecomputeRequest::Scenario { city, .. } => city,
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            RecomputeRequest::Forecast { .. } => AnalysisKind::Forecast,
            RecomputeRequest::Historical { .. } => AnalysisKind::Pattern,
            RecomputeRequest::Scenario { .. } => AnalysisKind::Scenario,
        }
    }
}
