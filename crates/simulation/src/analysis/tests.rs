use bevy::prelude::*;
use chrono::NaiveDate;

use super::*;
use crate::analysis_params::AnalysisParams;
use crate::forecast::ForecastHorizon;
use crate::historical::{HistoryRange, Pollutant};
use crate::narrative::{AnalysisKind, PatternNarrativeMode};
use crate::scenario::ScenarioParams;
use crate::sim_rng::{ExhaustedRng, SimRng};
use crate::weather_effect::WeatherTag;

fn anchor() -> CalendarAnchor {
    CalendarAnchor(
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    )
}

fn test_app(params: AnalysisParams) -> App {
    let mut app = App::new();
    app.insert_resource(params);
    app.insert_resource(anchor());
    app.add_plugins(AnalysisPlugin);
    app
}

fn send(app: &mut App, request: RecomputeRequest) {
    app.world_mut().send_event(request);
    app.update();
}

fn forecast(city: &str, horizon: ForecastHorizon) -> RecomputeRequest {
    RecomputeRequest::Forecast {
        city: city.to_string(),
        horizon,
        baseline_aqi: None,
    }
}

#[test]
fn test_plugin_registers_resources() {
    let app = test_app(AnalysisParams::default());
    let world = app.world();
    assert!(world.contains_resource::<SimRng>());
    assert!(world.contains_resource::<AnalysisResults>());
    assert!(world.contains_resource::<AnalysisLog>());
    assert_eq!(*world.resource::<CalendarAnchor>(), anchor());
}

#[test]
fn test_forecast_request_stores_report() {
    let mut app = test_app(AnalysisParams::default());
    send(&mut app, forecast("Chicago", ForecastHorizon::Hours48));

    let results = app.world().resource::<AnalysisResults>();
    let report = results.forecast.as_ref().expect("forecast stored");
    assert_eq!(report.city, "Chicago");
    assert_eq!(report.series.len(), 48);
    assert_eq!(report.series.points[0].time_label, "08:00");
    assert!(report.narrative.contains("over the next 48h."));
    assert!(results.historical.is_none());

    let log = app.world().resource::<AnalysisLog>();
    assert_eq!(log.last().unwrap().outcome, Ok(AnalysisKind::Forecast));
}

#[test]
fn test_same_seed_same_results() {
    let run = || {
        let mut app = test_app(AnalysisParams {
            seed: 1234,
            ..Default::default()
        });
        send(&mut app, forecast("Miami", ForecastHorizon::Days7));
        send(
            &mut app,
            RecomputeRequest::Historical {
                city: "Miami".into(),
                pollutant: Pollutant::O3,
                range: HistoryRange::Quarter,
            },
        );
        let results = app.world().resource::<AnalysisResults>().clone();
        (results.forecast.unwrap(), results.historical.unwrap())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_unknown_city_keeps_previous_report() {
    let mut app = test_app(AnalysisParams::default());
    send(&mut app, forecast("Seattle", ForecastHorizon::Hours24));
    let before = app.world().resource::<AnalysisResults>().forecast.clone();

    send(&mut app, forecast("Atlantis", ForecastHorizon::Hours24));

    let results = app.world().resource::<AnalysisResults>();
    assert_eq!(results.forecast, before);
    let entry = app.world().resource::<AnalysisLog>().last().unwrap().clone();
    assert_eq!(entry.request.city(), "Atlantis");
    assert!(entry.outcome.unwrap_err().is_invalid_argument());
}

#[test]
fn test_historical_report_uses_configured_pattern_mode() {
    let mut app = test_app(AnalysisParams {
        pattern_mode: PatternNarrativeMode::Derived,
        ..Default::default()
    });
    send(
        &mut app,
        RecomputeRequest::Historical {
            city: "Denver".into(),
            pollutant: Pollutant::Pm25,
            range: HistoryRange::Week,
        },
    );

    let report = app
        .world()
        .resource::<AnalysisResults>()
        .historical
        .clone()
        .unwrap();
    assert_eq!(report.series.len(), 8);
    assert_eq!(
        report.series.points.last().unwrap().date,
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    );
    let summary = report.summary.unwrap();
    assert!(report
        .narrative
        .contains(&format!("Average: {:.0} μg/m³", summary.mean)));
    assert!(report.narrative.contains("8 daily readings"));
}

#[test]
fn test_scenario_request_does_not_draw_randomness() {
    let mut app = test_app(AnalysisParams::default());
    let params = ScenarioParams::new(0, 0, WeatherTag::Windy, 0).unwrap();
    send(
        &mut app,
        RecomputeRequest::Scenario {
            city: "New York".into(),
            params,
        },
    );
    send(&mut app, forecast("New York", ForecastHorizon::Hours24));

    let mut fresh = test_app(AnalysisParams::default());
    send(&mut fresh, forecast("New York", ForecastHorizon::Hours24));

    let a = app.world().resource::<AnalysisResults>();
    let b = fresh.world().resource::<AnalysisResults>();
    assert_eq!(a.forecast, b.forecast);

    let scenario = a.scenario.as_ref().unwrap();
    assert_eq!(scenario.impact.overall_improvement_pct, 60);
    assert_eq!(scenario.impact.pm25_reduction_pct, 48);
    assert_eq!(scenario.impact.health_risk_reduction_pct, 72);
}

#[test]
fn test_multiple_requests_in_one_update_processed_in_order() {
    let mut app = test_app(AnalysisParams::default());
    app.world_mut()
        .send_event(forecast("Chicago", ForecastHorizon::Hours24));
    app.world_mut()
        .send_event(forecast("Los Angeles", ForecastHorizon::Hours48));
    app.update();

    let entry = app.world().resource::<AnalysisLog>().last().unwrap().clone();
    assert_eq!(entry.request.city(), "Los Angeles");
    let report = app.world().resource::<AnalysisResults>().forecast.clone().unwrap();
    assert_eq!(report.city, "Los Angeles");
    assert_eq!(report.series.len(), 48);
}

#[test]
fn test_failure_then_success_in_one_update_logs_success_last() {
    let mut app = test_app(AnalysisParams::default());
    app.world_mut()
        .send_event(forecast("Atlantis", ForecastHorizon::Hours24));
    app.world_mut()
        .send_event(forecast("Miami", ForecastHorizon::Hours24));
    app.update();

    let entry = app.world().resource::<AnalysisLog>().last().unwrap().clone();
    assert_eq!(entry.request.city(), "Miami");
    assert_eq!(entry.outcome, Ok(AnalysisKind::Forecast));
}

#[test]
fn test_reports_use_configured_city_name() {
    let mut app = test_app(AnalysisParams::default());
    send(&mut app, forecast("miami", ForecastHorizon::Hours24));
    send(
        &mut app,
        RecomputeRequest::Historical {
            city: "  LOS angeles ".into(),
            pollutant: Pollutant::Pm25,
            range: HistoryRange::Week,
        },
    );
    send(
        &mut app,
        RecomputeRequest::Scenario {
            city: "new york".into(),
            params: ScenarioParams::default(),
        },
    );

    let results = app.world().resource::<AnalysisResults>();
    assert_eq!(results.forecast.as_ref().unwrap().city, "Miami");
    assert_eq!(results.historical.as_ref().unwrap().city, "Los Angeles");
    assert_eq!(results.scenario.as_ref().unwrap().city, "New York");
    let historical = results.historical.as_ref().unwrap();
    assert!(historical.narrative.contains("Los Angeles's air quality"));
}

#[test]
fn test_run_request_propagates_exhausted_source() {
    let err = run_request(
        &forecast("Chicago", ForecastHorizon::Hours24),
        &AnalysisParams::default(),
        anchor().0,
        &mut ExhaustedRng,
    )
    .unwrap_err();
    assert!(!err.is_invalid_argument());
}

#[test]
fn test_forecast_baseline_override() {
    let request = RecomputeRequest::Forecast {
        city: "Chicago".into(),
        horizon: ForecastHorizon::Hours24,
        baseline_aqi: Some(180.0),
    };
    let mut rng = SimRng::default();
    let report = run_request(&request, &AnalysisParams::default(), anchor().0, &mut rng.0)
        .unwrap();
    match report {
        AnalysisReport::Forecast(r) => {
            assert_eq!(r.series.baseline_aqi, 180.0);
            assert_eq!(r.current_category, crate::aqi_category::AqiCategory::Unhealthy);
        }
        other => panic!("expected forecast report, got {other:?}"),
    }
}

#[test]
fn test_negative_baseline_rejected() {
    let request = RecomputeRequest::Forecast {
        city: "Chicago".into(),
        horizon: ForecastHorizon::Hours24,
        baseline_aqi: Some(-1.0),
    };
    let mut rng = SimRng::default();
    let err = run_request(&request, &AnalysisParams::default(), anchor().0, &mut rng.0)
        .unwrap_err();
    assert!(err.is_invalid_argument());
}
