//! Least-squares trend detection over the most recent samples of a series.

use serde::{Deserialize, Serialize};

use crate::config::{TREND_SLOPE_THRESHOLD, TREND_WINDOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn name(self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

/// Slope of the ordinary least-squares line through `values` against their
/// index. `None` for fewer than two samples.
pub fn slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    Some(num / den)
}

/// Classify the trend of the last [`TREND_WINDOW`] samples.
pub fn detect_trend(values: &[f64]) -> Trend {
    let start = values.len().saturating_sub(TREND_WINDOW);
    match slope(&values[start..]) {
        Some(s) if s > TREND_SLOPE_THRESHOLD => Trend::Increasing,
        Some(s) if s < -TREND_SLOPE_THRESHOLD => Trend::Decreasing,
        _ => Trend::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_of_line() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let s = slope(&values).unwrap();
        assert!((s - 2.0).abs() < 1e-9, "slope was {s}");
    }

    #[test]
    fn test_slope_needs_two_points() {
        assert_eq!(slope(&[]), None);
        assert_eq!(slope(&[4.0]), None);
    }

    #[test]
    fn test_detect_directions() {
        let up: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let down: Vec<f64> = (0..20).map(|i| -(i as f64)).collect();
        let flat = vec![5.0; 20];
        assert_eq!(detect_trend(&up), Trend::Increasing);
        assert_eq!(detect_trend(&down), Trend::Decreasing);
        assert_eq!(detect_trend(&flat), Trend::Stable);
        assert_eq!(detect_trend(&[1.0]), Trend::Stable);
    }

    #[test]
    fn test_only_recent_window_counts() {
        // A long decline followed by a rise covering the whole window.
        let mut values: Vec<f64> = (0..100).map(|i| 500.0 - i as f64).collect();
        values.extend((0..TREND_WINDOW).map(|i| i as f64));
        assert_eq!(detect_trend(&values), Trend::Increasing);
    }
}
