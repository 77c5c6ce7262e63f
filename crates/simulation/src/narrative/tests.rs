use chrono::NaiveDate;

use crate::forecast::ForecastHorizon;
use crate::historical::{generate_history, HistoricalSeries, HistoryRange, Pollutant};
use crate::narrative::*;
use crate::scenario::ScenarioParams;
use crate::sim_rng::SimRng;
use crate::weather_effect::WeatherTag;

fn scenario(traffic: u8, industrial: u8, weather: WeatherTag, population: u8) -> ScenarioParams {
    ScenarioParams::new(traffic, industrial, weather, population).unwrap()
}

fn history(seed: u64) -> HistoricalSeries {
    let mut rng = SimRng::from_seed_u64(seed);
    let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    generate_history(HistoryRange::Month, today, &mut rng.0).unwrap()
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

#[test]
fn test_forecast_mentions_range_and_fixed_confidence() {
    for horizon in ForecastHorizon::ALL {
        let text = compose(
            &AnalysisContext::Forecast(ForecastContext { horizon }),
            PatternNarrativeMode::Static,
        );
        assert!(text.contains(&format!("over the next {}.", horizon.as_str())));
        assert!(text.contains("85% for first 24 hours, decreasing to 65%"));
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

#[test]
fn test_static_pattern_ignores_history() {
    let series = history(1);
    let with = PatternContext {
        city: "Chicago",
        pollutant: Pollutant::Pm25,
        range: HistoryRange::Month,
        history: Some(&series),
    };
    let without = PatternContext {
        history: None,
        ..with
    };
    let a = compose(&AnalysisContext::Pattern(with), PatternNarrativeMode::Static);
    let b = compose(&AnalysisContext::Pattern(without), PatternNarrativeMode::Static);
    assert_eq!(a, b);
    assert!(a.contains("Chicago's air quality for PM2.5"));
    assert!(a.contains("7-9 AM and 5-7 PM"));
    assert!(a.contains("20-30% lower than weekdays"));
    assert!(a.contains("winter months"));
}

#[test]
fn test_derived_pattern_reports_series_figures() {
    let series = history(2);
    let ctx = PatternContext {
        city: "Seattle",
        pollutant: Pollutant::Pm25,
        range: HistoryRange::Month,
        history: Some(&series),
    };
    let text = compose(&AnalysisContext::Pattern(ctx), PatternNarrativeMode::Derived);
    let summary = series
        .summary(crate::historical::HistoryMetric::Pm25)
        .unwrap();
    assert!(text.contains(&format!("Average: {:.0} μg/m³", summary.mean)), "{text}");
    assert!(text.contains(&format!("Peak: {:.0} μg/m³", summary.peak)));
    assert!(text.contains(&format!("Best: {:.0} μg/m³", summary.min)));
    assert!(text.contains("last 30 days"));
    assert!(text.contains("31 daily readings"));
    assert!(!text.contains("rush hours"));
}

#[test]
fn test_derived_pattern_without_history_falls_back() {
    let ctx = PatternContext {
        city: "Denver",
        pollutant: Pollutant::O3,
        range: HistoryRange::Week,
        history: None,
    };
    assert_eq!(
        compose_pattern(&ctx, PatternNarrativeMode::Derived),
        compose_pattern_static(&ctx)
    );
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_embeds_impact_and_weather_phrase() {
    let params = scenario(0, 0, WeatherTag::Windy, 0);
    let text = compose(
        &AnalysisContext::Scenario(ScenarioContext { params }),
        PatternNarrativeMode::Static,
    );
    assert!(text.contains("Overall AQI improvement: 60%"));
    assert!(text.contains("PM2.5 reduction: 48%"));
    assert!(text.contains("Health risk reduction: 72%"));
    assert!(text.contains("windy weather conditions are highly favorable for pollutant dispersal"));
    assert!(text.contains("Industrial activity at 0% shows reduced emission levels"));
}

#[test]
fn test_all_recommendations_trigger() {
    let recs = recommendations(&scenario(71, 61, WeatherTag::Foggy, 81));
    assert_eq!(
        recs,
        vec![
            "Implement congestion pricing or car-free zones",
            "Strengthen industrial emission standards",
            "Issue health advisories during foggy conditions",
            "Develop green spaces to mitigate urban heat island effects",
        ]
    );
}

#[test]
fn test_recommendation_thresholds_are_strict() {
    let recs = recommendations(&scenario(70, 60, WeatherTag::Sunny, 80));
    assert_eq!(
        recs,
        vec!["Current parameters show optimal conditions for air quality"]
    );
}

#[test]
fn test_single_recommendation_has_no_optimal_line() {
    let params = scenario(50, 90, WeatherTag::Normal, 50);
    let text = compose_scenario(&ScenarioContext { params });
    assert!(text.contains("• Strengthen industrial emission standards"));
    assert!(!text.contains("optimal conditions"));
    assert!(text.contains("shows elevated emission levels"));
}

#[test]
fn test_context_kind() {
    let params = ScenarioParams::default();
    assert_eq!(
        AnalysisContext::Scenario(ScenarioContext { params }).kind(),
        AnalysisKind::Scenario
    );
    assert_eq!(
        AnalysisContext::Forecast(ForecastContext {
            horizon: ForecastHorizon::Hours48
        })
        .kind(),
        AnalysisKind::Forecast
    );
}
