use crate::config::{
    ELEVATED_INDUSTRIAL_LEVEL, HIGH_INDUSTRIAL_LEVEL, HIGH_POPULATION_LEVEL, HIGH_TRAFFIC_LEVEL,
};
use crate::scenario::{calculate_impact, ScenarioParams};
use crate::weather_effect::WeatherTag;

use super::ScenarioContext;

const OPTIMAL_CONDITIONS: &str = "Current parameters show optimal conditions for air quality";

/// Recommendations triggered by the scenario, in a fixed order. Falls back to
/// a single "optimal conditions" line when nothing triggers.
pub fn recommendations(params: &ScenarioParams) -> Vec<&'static str> {
    let mut recs = Vec::new();
    if params.traffic() > HIGH_TRAFFIC_LEVEL {
        recs.push("Implement congestion pricing or car-free zones");
    }
    if params.industrial() > HIGH_INDUSTRIAL_LEVEL {
        recs.push("Strengthen industrial emission standards");
    }
    if params.weather() == WeatherTag::Foggy {
        recs.push("Issue health advisories during foggy conditions");
    }
    if params.population() > HIGH_POPULATION_LEVEL {
        recs.push("Develop green spaces to mitigate urban heat island effects");
    }
    if recs.is_empty() {
        recs.push(OPTIMAL_CONDITIONS);
    }
    recs
}

pub fn compose_scenario(ctx: &ScenarioContext) -> String {
    let params = &ctx.params;
    let impact = calculate_impact(params);
    let industrial_level = if params.industrial() > ELEVATED_INDUSTRIAL_LEVEL {
        "elevated"
    } else {
        "reduced"
    };
    let recs = recommendations(params)
        .into_iter()
        .map(|r| format!("• {r}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Scenario analysis reveals significant potential for air quality improvement:

Projected Impact:
• Overall AQI improvement: {overall}%
• PM2.5 reduction: {pm25}%
• Health risk reduction: {health}%

Key Findings:
• Traffic reduction of {traffic}% would contribute most significantly to improvement
• Industrial activity at {industrial}% shows {industrial_level} emission levels
• {weather} weather conditions are {phrase}
• Population density adjustment affects localized pollution concentration

Recommendations:
{recs}

This scenario demonstrates the interconnected nature of air quality factors and the potential \
for targeted interventions to create meaningful improvements.",
        overall = impact.overall_improvement_pct,
        pm25 = impact.pm25_reduction_pct,
        health = impact.health_risk_reduction_pct,
        traffic = params.traffic(),
        industrial = params.industrial(),
        weather = params.weather(),
        phrase = params.weather().effect().dispersal_phrase,
    )
}
