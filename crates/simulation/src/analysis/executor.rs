//! Recompute system: drains [`RecomputeRequest`] events each update, runs the
//! matching generator and narrative, and records the outcome.
//!
//! A failing request is logged and leaves the previously stored report of
//! its kind untouched.

use bevy::prelude::*;
use chrono::NaiveDateTime;
use rand::RngCore;

use crate::analysis_params::AnalysisParams;
use crate::aqi_category::AqiCategory;
use crate::error::SimError;
use crate::forecast::{generate_forecast, ForecastHorizon};
use crate::historical::{generate_history, HistoryRange, Pollutant};
use crate::narrative::{
    compose_forecast, compose_pattern, compose_scenario, ForecastContext, PatternContext,
    ScenarioContext,
};
use crate::scenario::{calculate_impact, ScenarioParams};
use crate::sim_rng::SimRng;

use super::plugin::CalendarAnchor;
use super::reports::*;
use super::request_log::AnalysisLog;
use super::RecomputeRequest;

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Processes every pending request in arrival order.
pub fn process_recompute_requests(
    mut requests: EventReader<RecomputeRequest>,
    params: Res<AnalysisParams>,
    anchor: Res<CalendarAnchor>,
    mut rng: ResMut<SimRng>,
    mut results: ResMut<AnalysisResults>,
    mut log: ResMut<AnalysisLog>,
) {
    for request in requests.read() {
        match run_request(request, &params, anchor.0, &mut rng.0) {
            Ok(report) => {
                let kind = report.kind();
                info!("{:?} analysis recomputed for {}", kind, request.city());
                results.store(report);
                log.push(request.clone(), Ok(kind));
            }
            Err(e) => {
                warn!(
                    "{:?} analysis for {} failed: {}",
                    request.kind(),
                    request.city(),
                    e
                );
                log.push(request.clone(), Err(e));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Compute the report for one request without touching any resource.
pub fn run_request<R: RngCore + ?Sized>(
    request: &RecomputeRequest,
    params: &AnalysisParams,
    anchor: NaiveDateTime,
    rng: &mut R,
) -> Result<AnalysisReport, SimError> {
    let city = params.configured_city(request.city()).ok_or_else(|| {
        SimError::invalid(format!("unknown city '{}'", request.city()))
    })?;

    match request {
        RecomputeRequest::Forecast {
            horizon,
            baseline_aqi,
            ..
        } => {
            let baseline = baseline_aqi.unwrap_or(params.baseline_aqi);
            forecast_report(city, *horizon, baseline, anchor, rng).map(AnalysisReport::Forecast)
        }
        RecomputeRequest::Historical {
            pollutant, range, ..
        } => historical_report(city, *pollutant, *range, params, anchor, rng)
            .map(AnalysisReport::Historical),
        RecomputeRequest::Scenario { params: p, .. } => {
            Ok(AnalysisReport::Scenario(scenario_report(city, *p)))
        }
    }
}

fn forecast_report<R: RngCore + ?Sized>(
    city: &str,
    horizon: ForecastHorizon,
    baseline_aqi: f64,
    anchor: NaiveDateTime,
    rng: &mut R,
) -> Result<ForecastReport, SimError> {
    let series = generate_forecast(baseline_aqi, horizon, anchor, rng)?;
    let narrative = compose_forecast(&ForecastContext { horizon });
    Ok(ForecastReport {
        city: city.to_string(),
        series,
        current_category: AqiCategory::from_aqi(baseline_aqi),
        narrative,
    })
}

fn historical_report<R: RngCore + ?Sized>(
    city: &str,
    pollutant: Pollutant,
    range: HistoryRange,
    params: &AnalysisParams,
    anchor: NaiveDateTime,
    rng: &mut R,
) -> Result<HistoricalReport, SimError> {
    let series = generate_history(range, anchor.date(), rng)?;
    let summary = series.summary(pollutant.metric());
    let narrative = compose_pattern(
        &PatternContext {
            city,
            pollutant,
            range,
            history: Some(&series),
        },
        params.pattern_mode,
    );
    Ok(HistoricalReport {
        city: city.to_string(),
        pollutant,
        series,
        summary,
        narrative,
    })
}

fn scenario_report(city: &str, params: ScenarioParams) -> ScenarioReport {
    ScenarioReport {
        city: city.to_string(),
        params,
        impact: calculate_impact(&params),
        narrative: compose_scenario(&ScenarioContext { params }),
    }
}
