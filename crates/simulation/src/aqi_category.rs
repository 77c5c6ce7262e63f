//! US EPA AQI bands.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthyForSensitiveGroups,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301+
    Hazardous,
}

impl AqiCategory {
    /// Classify an AQI reading. The value is rounded first so that 50.4 is
    /// still `Good`; negative readings count as `Good`.
    pub fn from_aqi(aqi: f64) -> Self {
        let aqi = aqi.round();
        if aqi <= 50.0 {
            AqiCategory::Good
        } else if aqi <= 100.0 {
            AqiCategory::Moderate
        } else if aqi <= 150.0 {
            AqiCategory::UnhealthyForSensitiveGroups
        } else if aqi <= 200.0 {
            AqiCategory::Unhealthy
        } else if aqi <= 300.0 {
            AqiCategory::VeryUnhealthy
        } else {
            AqiCategory::Hazardous
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Whether sensitive groups should be advised to limit outdoor activity.
    pub fn warrants_advisory(self) -> bool {
        self >= AqiCategory::UnhealthyForSensitiveGroups
    }
}
