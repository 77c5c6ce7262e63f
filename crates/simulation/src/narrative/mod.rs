//! Analysis narratives.
//!
//! One template per [`AnalysisKind`], each fed by a typed context. Output is
//! plain text with `\n` line breaks and `•` bullets.

mod forecast;
mod pattern;
mod scenario;
#[cfg(test)]
mod tests;

pub use forecast::compose_forecast;
pub use pattern::{compose_pattern, compose_pattern_derived, compose_pattern_static};
pub use scenario::{compose_scenario, recommendations};

use serde::{Deserialize, Serialize};

use crate::forecast::ForecastHorizon;
use crate::historical::{HistoricalSeries, HistoryRange, Pollutant};
use crate::scenario::ScenarioParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisKind {
    Forecast,
    Pattern,
    Scenario,
}

/// How the pattern narrative is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternNarrativeMode {
    /// Fixed illustrative claims, independent of the generated history.
    #[default]
    Static,
    /// Claims computed from the history the caller supplies.
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastContext {
    pub horizon: ForecastHorizon,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternContext<'a> {
    pub city: &'a str,
    pub pollutant: Pollutant,
    pub range: HistoryRange,
    /// Only read in [`PatternNarrativeMode::Derived`].
    pub history: Option<&'a HistoricalSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioContext {
    pub params: ScenarioParams,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisContext<'a> {
    Forecast(ForecastContext),
    Pattern(PatternContext<'a>),
    Scenario(ScenarioContext),
}

impl AnalysisContext<'_> {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisContext::Forecast(_) => AnalysisKind::Forecast,
            AnalysisContext::Pattern(_) => AnalysisKind::Pattern,
            AnalysisContext::Scenario(_) => AnalysisKind::Scenario,
        }
    }
}

/// Render the narrative for `ctx`.
pub fn compose(ctx: &AnalysisContext<'_>, mode: PatternNarrativeMode) -> String {
    match ctx {
        AnalysisContext::Forecast(c) => compose_forecast(c),
        AnalysisContext::Pattern(c) => compose_pattern(c, mode),
        AnalysisContext::Scenario(c) => compose_scenario(c),
    }
}
