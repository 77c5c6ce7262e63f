use std::fmt::Write;

use bevy::log::debug;

use crate::aqi_category::AqiCategory;
use crate::historical::{HistoricalSeries, HistoryMetric};
use crate::trend::{detect_trend, Trend};

use super::{PatternContext, PatternNarrativeMode};

pub fn compose_pattern(ctx: &PatternContext<'_>, mode: PatternNarrativeMode) -> String {
    match (mode, ctx.history) {
        (PatternNarrativeMode::Derived, Some(history)) if !history.is_empty() => {
            compose_pattern_derived(ctx, history)
        }
        (PatternNarrativeMode::Derived, _) => {
            debug!(
                "pattern narrative for {}: no history supplied, using static template",
                ctx.city
            );
            compose_pattern_static(ctx)
        }
        (PatternNarrativeMode::Static, _) => compose_pattern_static(ctx),
    }
}

/// Fixed illustrative claims. Nothing here is read from the generated
/// history, so the text can disagree with the chart next to it.
pub fn compose_pattern_static(ctx: &PatternContext<'_>) -> String {
    format!(
        "Historical analysis reveals significant patterns in {city}'s air quality for {pollutant}:

Temporal Patterns:
• Peak pollution typically occurs between 7-9 AM and 5-7 PM (rush hours)
• Weekend pollution levels are 20-30% lower than weekdays
• Seasonal variations show higher concentrations in winter months

Notable Trends:
• Overall air quality has improved by 12% over the analyzed period
• Weather-related spikes occurred during 3 major inversion events
• Industrial emissions show declining trend following new regulations

The data suggests that traffic reduction measures and industrial regulations are having a \
positive impact on air quality in {city}.",
        city = ctx.city,
        pollutant = ctx.pollutant.display_name(),
    )
}

/// Claims computed from `history`: summary statistics, the AQI band of the
/// mean, the recent trend and the weekend effect.
pub fn compose_pattern_derived(ctx: &PatternContext<'_>, history: &HistoricalSeries) -> String {
    let metric = ctx.pollutant.metric();
    let unit = metric.unit();
    let mut text = format!(
        "Historical analysis of {}'s air quality for {} ({}):\n",
        ctx.city,
        ctx.pollutant.display_name(),
        ctx.range.label().to_lowercase(),
    );

    if let Some(summary) = history.summary(metric) {
        let _ = write!(
            text,
            "\nSummary:\n\
• Average: {:.0} {unit}\n\
• Peak: {:.0} {unit}\n\
• Best: {:.0} {unit}\n",
            summary.mean, summary.peak, summary.min,
        );
    }

    if let Some(aqi) = history.summary(HistoryMetric::Aqi) {
        let category = AqiCategory::from_aqi(aqi.mean);
        let _ = write!(
            text,
            "• Average AQI falls in the \"{}\" category\n",
            category.name()
        );
        if category.warrants_advisory() {
            text.push_str("• Sensitive groups should limit prolonged outdoor exertion\n");
        }
    }

    let trend = detect_trend(&history.values(metric));
    text.push_str("\nTemporal Patterns:\n");
    let _ = writeln!(
        text,
        "• {} over the most recent {} days",
        trend_sentence(trend),
        history.len().min(crate::config::TREND_WINDOW),
    );
    match history.weekend_change_pct(metric) {
        Some(pct) if pct < 0.0 => {
            let _ = writeln!(text, "• Weekend levels are {:.0}% lower than weekdays", -pct);
        }
        Some(pct) => {
            let _ = writeln!(text, "• Weekend levels are {:.0}% higher than weekdays", pct);
        }
        None => text.push_str("• Not enough data to compare weekends with weekdays\n"),
    }

    let _ = write!(
        text,
        "\nThe figures above are computed from the {} daily readings shown for {}.",
        history.len(),
        ctx.city
    );
    text
}

fn trend_sentence(trend: Trend) -> &'static str {
    match trend {
        Trend::Increasing => "Concentrations have been rising",
        Trend::Decreasing => "Concentrations have been falling",
        Trend::Stable => "Concentrations have held steady",
    }
}
