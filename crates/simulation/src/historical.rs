//! Synthetic multi-day history for trend display.
//!
//! Each day combines a seasonal wave keyed on the calendar month, a weekly
//! wave keyed on the weekday, and uniform noise. AQI, PM2.5 and ozone share
//! the same components with different weights.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::{
    HISTORY_BASE_AQI, HISTORY_BASE_OZONE, HISTORY_BASE_PM25, HISTORY_MAX_AQI, HISTORY_NOISE,
    HISTORY_SEASONAL_AMPLITUDE, HISTORY_WEEKLY_AMPLITUDE,
};
use crate::error::SimError;
use crate::sim_rng::symmetric;

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// Length of the history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryRange {
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl HistoryRange {
    pub const ALL: [HistoryRange; 3] = [HistoryRange::Week, HistoryRange::Month, HistoryRange::Quarter];

    pub fn days(self) -> u32 {
        match self {
            HistoryRange::Week => 7,
            HistoryRange::Month => 30,
            HistoryRange::Quarter => 90,
        }
    }

    pub fn from_days(days: u32) -> Result<Self, SimError> {
        HistoryRange::ALL
            .into_iter()
            .find(|r| r.days() == days)
            .ok_or_else(|| {
                SimError::invalid(format!("history length must be 7, 30 or 90 days, got {days}"))
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HistoryRange::Week => "7d",
            HistoryRange::Month => "30d",
            HistoryRange::Quarter => "90d",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HistoryRange::Week => "Last 7 Days",
            HistoryRange::Month => "Last 30 Days",
            HistoryRange::Quarter => "Last 3 Months",
        }
    }

    fn format_label(self, date: NaiveDate) -> String {
        let days = self.days();
        if days <= 7 {
            date.format("%a, %b %-d").to_string()
        } else if days <= 30 {
            date.format("%b %-d").to_string()
        } else {
            date.format("%b %y").to_string()
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HistoryRange::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| {
                SimError::invalid(format!("unknown history range '{s}' (expected 7d, 30d or 90d)"))
            })
    }
}

/// Which generated series a summary or chart reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryMetric {
    Aqi,
    Pm25,
    Ozone,
}

impl HistoryMetric {
    pub fn unit(self) -> &'static str {
        match self {
            HistoryMetric::Aqi => "AQI",
            HistoryMetric::Pm25 => "μg/m³",
            HistoryMetric::Ozone => "ppb",
        }
    }
}

/// Pollutant selector offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    #[default]
    Pm25,
    Pm10,
    O3,
    No2,
    So2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 5] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::So2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
            Pollutant::So2 => "so2",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::O3 => "Ozone",
            Pollutant::No2 => "NO₂",
            Pollutant::So2 => "SO₂",
        }
    }

    /// Series backing this pollutant. Pollutants without a synthetic series of
    /// their own read the AQI series.
    pub fn metric(self) -> HistoryMetric {
        match self {
            Pollutant::Pm25 => HistoryMetric::Pm25,
            Pollutant::O3 => HistoryMetric::Ozone,
            Pollutant::Pm10 | Pollutant::No2 | Pollutant::So2 => HistoryMetric::Aqi,
        }
    }
}

impl FromStr for Pollutant {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pollutant::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::invalid(format!("unknown pollutant '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub date_label: String,
    pub aqi: f64,
    pub pm25: f64,
    pub ozone: f64,
}

impl HistoricalPoint {
    pub fn value(&self, metric: HistoryMetric) -> f64 {
        match metric {
            HistoryMetric::Aqi => self.aqi,
            HistoryMetric::Pm25 => self.pm25,
            HistoryMetric::Ozone => self.ozone,
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// Mean / peak / minimum over a whole series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub mean: f64,
    pub peak: f64,
    pub min: f64,
}

impl SeriesSummary {
    /// `None` for an empty input.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut peak = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for v in values {
            count += 1;
            sum += v;
            peak = peak.max(v);
            min = min.min(v);
        }
        (count > 0).then(|| SeriesSummary {
            mean: sum / count as f64,
            peak,
            min,
        })
    }
}

/// Ordered oldest to newest, `range.days() + 1` points (today included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub range: HistoryRange,
    pub points: Vec<HistoricalPoint>,
}

impl HistoricalSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self, metric: HistoryMetric) -> Vec<f64> {
        self.points.iter().map(|p| p.value(metric)).collect()
    }

    pub fn date_labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.date_label.clone()).collect()
    }

    pub fn summary(&self, metric: HistoryMetric) -> Option<SeriesSummary> {
        SeriesSummary::from_values(self.points.iter().map(|p| p.value(metric)))
    }

    /// Weekend mean relative to weekday mean, as a signed percentage
    /// (negative means weekends are cleaner). `None` unless both kinds of day
    /// are present and the weekday mean is non-zero.
    pub fn weekend_change_pct(&self, metric: HistoryMetric) -> Option<f64> {
        let weekend = SeriesSummary::from_values(
            self.points.iter().filter(|p| p.is_weekend()).map(|p| p.value(metric)),
        )?;
        let weekday = SeriesSummary::from_values(
            self.points.iter().filter(|p| !p.is_weekend()).map(|p| p.value(metric)),
        )?;
        if weekday.mean == 0.0 {
            return None;
        }
        Some((weekend.mean - weekday.mean) / weekday.mean * 100.0)
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generate `range.days() + 1` daily points ending on `today`.
pub fn generate_history<R: RngCore + ?Sized>(
    range: HistoryRange,
    today: NaiveDate,
    rng: &mut R,
) -> Result<HistoricalSeries, SimError> {
    let days = range.days();
    let mut points = Vec::with_capacity(days as usize + 1);

    for offset in (0..=days).rev() {
        let date = today
            .checked_sub_days(Days::new(u64::from(offset)))
            .ok_or_else(|| SimError::invalid(format!("history anchor {today} out of range")))?;

        let seasonal =
            (date.month0() as f64 / 12.0 * PI * 2.0).sin() * HISTORY_SEASONAL_AMPLITUDE;
        let weekly = (date.weekday().num_days_from_sunday() as f64 / 7.0 * PI * 2.0).sin()
            * HISTORY_WEEKLY_AMPLITUDE;
        let noise = symmetric(rng, HISTORY_NOISE)?;

        let aqi = (HISTORY_BASE_AQI + seasonal + weekly + noise).clamp(0.0, HISTORY_MAX_AQI);
        let pm25 = (HISTORY_BASE_PM25 + seasonal * 0.8 + weekly * 0.6 + noise * 0.5).max(0.0);
        let ozone = (HISTORY_BASE_OZONE + seasonal * 0.6 + weekly * 0.4 + noise * 0.3).max(0.0);

        points.push(HistoricalPoint {
            date,
            date_label: range.format_label(date),
            aqi,
            pm25,
            ozone,
        });
    }

    Ok(HistoricalSeries { range, points })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
