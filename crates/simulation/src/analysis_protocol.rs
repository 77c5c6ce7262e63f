//! Analysis text protocol for the `--agent` headless mode.
//!
//! Newline-delimited JSON on stdin/stdout, shaped after the dashboard's
//! backend API. The I/O loop lives in `crates/app/src/agent_mode.rs`; the
//! types live here so they can be unit-tested without the binary.

use serde::{Deserialize, Serialize};

use crate::analysis::{ForecastReport, HistoricalReport, RecomputeRequest, ScenarioReport};
use crate::error::SimError;
use crate::forecast::{ForecastHorizon, ForecastSeries};
use crate::historical::{HistoryRange, Pollutant, SeriesSummary};
use crate::scenario::{ScenarioParams, ScenarioRequest};

// ---------------------------------------------------------------------------
// Commands (stdin → simulation)
// ---------------------------------------------------------------------------

/// A single command read from one line of stdin, discriminated by `cmd`.
///
/// Enumerated arguments (`range`, `pollutant`, scenario levels) arrive as
/// plain strings and numbers so that a bad value yields an `error` response
/// naming the field instead of a generic parse failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd")]
pub enum AnalysisCommand {
    /// List the configured cities.
    #[serde(rename = "cities")]
    Cities,

    /// Forecast for `range` ("24h", "48h" or "7d").
    #[serde(rename = "forecast")]
    Forecast {
        city: String,
        range: String,
        #[serde(default)]
        baseline_aqi: Option<f64>,
    },

    /// Daily history for `range` ("7d", "30d" or "90d").
    #[serde(rename = "historical")]
    Historical {
        city: String,
        pollutant: String,
        range: String,
    },

    /// Evaluate a what-if scenario.
    #[serde(rename = "scenario")]
    Scenario {
        city: String,
        params: ScenarioRequest,
    },

    /// Reseed the random source.
    #[serde(rename = "reseed")]
    Reseed { seed: u64 },

    /// End the session.
    #[serde(rename = "quit")]
    Quit,
}

impl AnalysisCommand {
    /// The recompute request behind an analysis command, or `None` for the
    /// session commands.
    pub fn recompute_request(&self) -> Option<Result<RecomputeRequest, SimError>> {
        let request = match self {
            AnalysisCommand::Forecast {
                city,
                range,
                baseline_aqi,
            } => range
                .parse::<ForecastHorizon>()
                .map(|horizon| RecomputeRequest::Forecast {
                    city: city.clone(),
                    horizon,
                    baseline_aqi: *baseline_aqi,
                }),
            AnalysisCommand::Historical {
                city,
                pollutant,
                range,
            } => pollutant.parse::<Pollutant>().and_then(|pollutant| {
                range
                    .parse::<HistoryRange>()
                    .map(|range| RecomputeRequest::Historical {
                        city: city.clone(),
                        pollutant,
                        range,
                    })
            }),
            AnalysisCommand::Scenario { city, params } => ScenarioParams::try_from(params.clone())
                .map(|params| RecomputeRequest::Scenario {
                    city: city.clone(),
                    params,
                }),
            AnalysisCommand::Cities | AnalysisCommand::Reseed { .. } | AnalysisCommand::Quit => {
                return None
            }
        };
        Some(request)
    }
}

// ---------------------------------------------------------------------------
// Responses (simulation → stdout)
// ---------------------------------------------------------------------------

/// Every response includes the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactPayload {
    pub overall_improvement: u32,
    pub pm25_reduction: u32,
    pub health_risk: u32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    /// The session is ready to accept commands.
    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "cities")]
    Cities { cities: Vec<String> },

    /// `forecast` holds the predicted values only; `series` is the full
    /// chart data.
    #[serde(rename = "forecast")]
    Forecast {
        city: String,
        category: String,
        forecast: Vec<f64>,
        series: ForecastSeries,
        analysis: String,
    },

    #[serde(rename = "historical")]
    Historical {
        city: String,
        pollutant: Pollutant,
        dates: Vec<String>,
        aqi: Vec<f64>,
        pm25: Vec<f64>,
        ozone: Vec<f64>,
        summary: Option<SeriesSummary>,
        analysis: String,
    },

    #[serde(rename = "scenario")]
    Scenario {
        impact: ImpactPayload,
        ai_analysis: String,
    },

    /// Generic success acknowledgement.
    #[serde(rename = "ok")]
    Ok,

    #[serde(rename = "error")]
    Error { message: String },

    /// Response to `quit`.
    #[serde(rename = "goodbye")]
    Goodbye,
}

impl ResponsePayload {
    pub fn forecast(report: &ForecastReport) -> Self {
        ResponsePayload::Forecast {
            city: report.city.clone(),
            category: report.current_category.name().to_string(),
            forecast: report.series.predicted_values(),
            series: report.series.clone(),
            analysis: report.narrative.clone(),
        }
    }

    pub fn historical(report: &HistoricalReport) -> Self {
        let points = &report.series.points;
        ResponsePayload::Historical {
            city: report.city.clone(),
            pollutant: report.pollutant,
            dates: report.series.date_labels(),
            aqi: points.iter().map(|p| p.aqi).collect(),
            pm25: points.iter().map(|p| p.pm25).collect(),
            ozone: points.iter().map(|p| p.ozone).collect(),
            summary: report.summary,
            analysis: report.narrative.clone(),
        }
    }

    pub fn scenario(report: &ScenarioReport) -> Self {
        ResponsePayload::Scenario {
            impact: ImpactPayload {
                overall_improvement: report.impact.overall_improvement_pct,
                pm25_reduction: report.impact.pm25_reduction_pct,
                health_risk: report.impact.health_risk_reduction_pct,
            },
            ai_analysis: report.narrative.clone(),
        }
    }

    pub fn error(err: impl std::fmt::Display) -> Self {
        ResponsePayload::Error {
            message: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> AnalysisResponse {
    AnalysisResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
