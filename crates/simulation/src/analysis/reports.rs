use bevy::prelude::*;

use crate::aqi_category::AqiCategory;
use crate::forecast::ForecastSeries;
use crate::historical::{HistoricalSeries, Pollutant, SeriesSummary};
use crate::narrative::AnalysisKind;
use crate::scenario::{ImpactEstimate, ScenarioParams};

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub city: String,
    pub series: ForecastSeries,
    /// Band of the baseline the series was anchored on.
    pub current_category: AqiCategory,
    pub narrative: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalReport {
    pub city: String,
    pub pollutant: Pollutant,
    pub series: HistoricalSeries,
    /// Statistics of the series backing `pollutant`.
    pub summary: Option<SeriesSummary>,
    pub narrative: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub city: String,
    pub params: ScenarioParams,
    pub impact: ImpactEstimate,
    pub narrative: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReport {
    Forecast(ForecastReport),
    Historical(HistoricalReport),
    Scenario(ScenarioReport),
}

impl AnalysisReport {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisReport::Forecast(_) => AnalysisKind::Forecast,
            AnalysisReport::Historical(_) => AnalysisKind::Pattern,
            AnalysisReport::Scenario(_) => AnalysisKind::Scenario,
        }
    }
}

/// Latest successful report of each kind. A failed request leaves the
/// previous report in place.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnalysisResults {
    pub forecast: Option<ForecastReport>,
    pub historical: Option<HistoricalReport>,
    pub scenario: Option<ScenarioReport>,
}

impl AnalysisResults {
    pub fn store(&mut self, report: AnalysisReport) {
        match report {
            AnalysisReport::Forecast(r) => self.forecast = Some(r),
            AnalysisReport::Historical(r) => self.historical = Some(r),
            AnalysisReport::Scenario(r) => self.scenario = Some(r),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
