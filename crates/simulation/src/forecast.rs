//! Synthetic AQI forecast with confidence bounds.
//!
//! A series is split into two halves. The first half holds "observed" values
//! oscillating around the baseline; the second half holds predictions that
//! random-walk from the last observation, each wrapped in a confidence band
//! that widens by a fixed step per point.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::{
    CONFIDENCE_BASE_WIDTH, CONFIDENCE_WIDTH_STEP, OBSERVED_FREQUENCY, OBSERVED_NOISE,
    OBSERVED_SWING, PREDICTED_FREQUENCY, PREDICTED_NOISE, PREDICTED_SWING,
};
use crate::error::SimError;
use crate::sim_rng::symmetric;

// ---------------------------------------------------------------------------
// Horizon
// ---------------------------------------------------------------------------

/// Requested forecast span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForecastHorizon {
    #[default]
    #[serde(rename = "24h")]
    Hours24,
    #[serde(rename = "48h")]
    Hours48,
    #[serde(rename = "7d")]
    Days7,
}

impl ForecastHorizon {
    pub const ALL: [ForecastHorizon; 3] = [
        ForecastHorizon::Hours24,
        ForecastHorizon::Hours48,
        ForecastHorizon::Days7,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ForecastHorizon::Hours24 => "24h",
            ForecastHorizon::Hours48 => "48h",
            ForecastHorizon::Days7 => "7d",
        }
    }

    /// Human-readable name for selectors.
    pub fn label(self) -> &'static str {
        match self {
            ForecastHorizon::Hours24 => "24 Hours",
            ForecastHorizon::Hours48 => "48 Hours",
            ForecastHorizon::Days7 => "7 Days",
        }
    }

    pub fn total_hours(self) -> u32 {
        match self {
            ForecastHorizon::Hours24 => 24,
            ForecastHorizon::Hours48 => 48,
            ForecastHorizon::Days7 => 168,
        }
    }

    /// Hours between consecutive points. The week view is collapsed to
    /// 6-hour steps.
    pub fn step_hours(self) -> u32 {
        match self {
            ForecastHorizon::Days7 => 6,
            _ => 1,
        }
    }

    pub fn point_count(self) -> usize {
        (self.total_hours() / self.step_hours()) as usize
    }

    /// Number of leading points that carry an observed value.
    pub fn observed_count(self) -> usize {
        self.point_count().div_ceil(2)
    }

    fn format_label(self, at: NaiveDateTime) -> String {
        match self {
            ForecastHorizon::Days7 => at.format("%a, %b %-d").to_string(),
            _ => at.format("%H:%M").to_string(),
        }
    }
}

impl fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastHorizon {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForecastHorizon::ALL
            .into_iter()
            .find(|h| h.as_str() == s.trim())
            .ok_or_else(|| {
                SimError::invalid(format!(
                    "unknown forecast horizon '{s}' (expected 24h, 48h or 7d)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// One chart point. Exactly one of `observed_aqi` / `predicted_aqi` is set,
/// and the confidence bounds are set together with `predicted_aqi`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time_label: String,
    pub observed_aqi: Option<f64>,
    pub predicted_aqi: Option<f64>,
    pub confidence_upper: Option<f64>,
    pub confidence_lower: Option<f64>,
}

impl ForecastPoint {
    fn observed(time_label: String, aqi: f64) -> Self {
        Self {
            time_label,
            observed_aqi: Some(aqi),
            predicted_aqi: None,
            confidence_upper: None,
            confidence_lower: None,
        }
    }

    fn predicted(time_label: String, aqi: f64, half_width: f64) -> Self {
        Self {
            time_label,
            observed_aqi: None,
            predicted_aqi: Some(aqi),
            confidence_upper: Some(aqi + half_width),
            confidence_lower: Some(aqi - half_width),
        }
    }

    pub fn is_observed(&self) -> bool {
        self.observed_aqi.is_some()
    }

    /// Distance between the bounds, `None` on observed points.
    pub fn confidence_width(&self) -> Option<f64> {
        match (self.confidence_upper, self.confidence_lower) {
            (Some(upper), Some(lower)) => Some(upper - lower),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub horizon: ForecastHorizon,
    pub baseline_aqi: f64,
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn observed_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.observed_aqi).collect()
    }

    /// Flat list of predicted AQI values, the `forecast: number[]` payload.
    pub fn predicted_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.predicted_aqi).collect()
    }

    pub fn time_labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.time_label.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generate a forecast series for `horizon`, anchored on `baseline_aqi`.
///
/// `anchor` is the timestamp of the first point and only affects labels.
pub fn generate_forecast<R: RngCore + ?Sized>(
    baseline_aqi: f64,
    horizon: ForecastHorizon,
    anchor: NaiveDateTime,
    rng: &mut R,
) -> Result<ForecastSeries, SimError> {
    if !baseline_aqi.is_finite() || baseline_aqi < 0.0 {
        return Err(SimError::invalid(format!(
            "baseline AQI must be a non-negative number, got {baseline_aqi}"
        )));
    }

    let n = horizon.point_count();
    let half = horizon.observed_count();
    let step = i64::from(horizon.step_hours());
    let mut points = Vec::with_capacity(n);

    let mut last = baseline_aqi;
    for i in 0..half {
        let variation = (i as f64 * OBSERVED_FREQUENCY).sin() * OBSERVED_SWING
            + symmetric(rng, OBSERVED_NOISE)?;
        last = (baseline_aqi + variation).max(0.0);
        points.push(ForecastPoint::observed(label_at(horizon, anchor, i, step)?, last));
    }

    for i in half..n {
        let trend = (i as f64 * PREDICTED_FREQUENCY).sin() * PREDICTED_SWING;
        let predicted = (last + trend + symmetric(rng, PREDICTED_NOISE)?).max(0.0);
        let half_width = CONFIDENCE_BASE_WIDTH + (i - half) as f64 * CONFIDENCE_WIDTH_STEP;
        points.push(ForecastPoint::predicted(
            label_at(horizon, anchor, i, step)?,
            predicted,
            half_width,
        ));
        last = predicted;
    }

    Ok(ForecastSeries {
        horizon,
        baseline_aqi,
        points,
    })
}

fn label_at(
    horizon: ForecastHorizon,
    anchor: NaiveDateTime,
    index: usize,
    step_hours: i64,
) -> Result<String, SimError> {
    let offset = TimeDelta::try_hours(index as i64 * step_hours)
        .and_then(|delta| anchor.checked_add_signed(delta))
        .ok_or_else(|| SimError::invalid(format!("forecast anchor {anchor} out of range")))?;
    Ok(horizon.format_label(offset))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
