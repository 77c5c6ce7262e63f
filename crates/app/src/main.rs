use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::analysis::{AnalysisResults, RecomputeRequest};
use simulation::analysis_params::AnalysisParams;
use simulation::forecast::ForecastHorizon;
use simulation::historical::{HistoryRange, Pollutant};
use simulation::scenario::ScenarioParams;
use simulation::SimError;

mod agent_mode;

/// Names a JSON file holding [`AnalysisParams`].
const CONFIG_ENV: &str = "AIRTWIN_CONFIG";
/// Overrides the seed from the config file.
const SEED_ENV: &str = "AIRTWIN_SEED";

fn main() {
    let params = match load_params() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("airtwin: {e}");
            std::process::exit(2);
        }
    };

    if std::env::args().any(|a| a == "--agent") {
        agent_mode::run_agent_mode(params);
        return;
    }

    run_demo(params);
}

/// Headless app with logging and the analysis layer. Logs go to stderr.
pub(crate) fn build_app(params: AnalysisParams) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(LogPlugin::default());
    app.insert_resource(params);
    app.add_plugins(simulation::SimulationPlugin);
    app
}

fn load_params() -> Result<AnalysisParams, SimError> {
    let mut params = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| SimError::invalid(format!("cannot read {path}: {e}")))?;
            AnalysisParams::from_json_str(&json)?
        }
        Err(_) => AnalysisParams::default(),
    };

    if let Ok(raw) = std::env::var(SEED_ENV) {
        params.seed = raw
            .trim()
            .parse()
            .map_err(|e| SimError::invalid(format!("{SEED_ENV}={raw}: {e}")))?;
    }
    Ok(params)
}

/// Run one request of each kind for the first configured city and log the
/// outcome.
fn run_demo(params: AnalysisParams) {
    let city = params.cities.first().cloned().unwrap_or_default();
    let mut app = build_app(params);

    app.world_mut().send_event(RecomputeRequest::Forecast {
        city: city.clone(),
        horizon: ForecastHorizon::Hours24,
        baseline_aqi: None,
    });
    app.world_mut().send_event(RecomputeRequest::Historical {
        city: city.clone(),
        pollutant: Pollutant::Pm25,
        range: HistoryRange::Month,
    });
    app.world_mut().send_event(RecomputeRequest::Scenario {
        city,
        params: ScenarioParams::default(),
    });
    app.update();

    let results = app.world().resource::<AnalysisResults>();
    if let Some(report) = &results.forecast {
        info!(
            "{} now {} ({}), {} forecast points",
            report.city,
            report.series.baseline_aqi,
            report.current_category.name(),
            report.series.len()
        );
    }
    if let Some(report) = &results.historical {
        if let Some(summary) = report.summary {
            info!(
                "{} {}: mean {:.1}, peak {:.1}, best {:.1}",
                report.city,
                report.series.range.label(),
                summary.mean,
                summary.peak,
                summary.min
            );
        }
    }
    if let Some(report) = &results.scenario {
        info!(
            "scenario: overall {}%, PM2.5 {}%, health {}%",
            report.impact.overall_improvement_pct,
            report.impact.pm25_reduction_pct,
            report.impact.health_risk_reduction_pct
        );
        info!("\n{}", report.narrative);
    }
}
