//! What-if scenario impact estimation.
//!
//! Lower traffic, industrial activity and population density each contribute
//! a weighted improvement; the weather regime scales the sum. Only the overall
//! figure is clamped, the derived PM2.5 and health-risk figures are plain
//! multiples of it.

use serde::{Deserialize, Serialize};

use crate::config::{
    HEALTH_RISK_RATIO, INDUSTRIAL_WEIGHT, MAX_OVERALL_IMPROVEMENT, PM25_REDUCTION_RATIO,
    POPULATION_WEIGHT, TRAFFIC_WEIGHT,
};
use crate::error::SimError;
use crate::weather_effect::WeatherTag;

/// Largest accepted slider level.
pub const MAX_LEVEL: u8 = 100;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Validated scenario inputs. Levels are percentages in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ScenarioRequest", into = "ScenarioRequest")]
pub struct ScenarioParams {
    traffic: u8,
    industrial: u8,
    weather: WeatherTag,
    population: u8,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            traffic: 50,
            industrial: 50,
            weather: WeatherTag::Normal,
            population: 50,
        }
    }
}

impl ScenarioParams {
    pub fn new(
        traffic: u8,
        industrial: u8,
        weather: WeatherTag,
        population: u8,
    ) -> Result<Self, SimError> {
        Ok(Self {
            traffic: check_level("traffic", i64::from(traffic))?,
            industrial: check_level("industrial", i64::from(industrial))?,
            weather,
            population: check_level("population", i64::from(population))?,
        })
    }

    pub fn traffic(&self) -> u8 {
        self.traffic
    }

    pub fn industrial(&self) -> u8 {
        self.industrial
    }

    pub fn weather(&self) -> WeatherTag {
        self.weather
    }

    pub fn population(&self) -> u8 {
        self.population
    }
}

fn check_level(name: &str, value: i64) -> Result<u8, SimError> {
    if (0..=i64::from(MAX_LEVEL)).contains(&value) {
        Ok(value as u8)
    } else {
        Err(SimError::invalid(format!(
            "{name} must be within 0..={MAX_LEVEL}, got {value}"
        )))
    }
}

/// Raw scenario input as it arrives from a form or the wire. Converting it
/// into [`ScenarioParams`] is the strict validation boundary: out-of-range
/// levels and unknown weather tags are rejected rather than defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub traffic: i64,
    pub industrial: i64,
    pub weather: String,
    pub population: i64,
}

impl TryFrom<ScenarioRequest> for ScenarioParams {
    type Error = SimError;

    fn try_from(req: ScenarioRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            traffic: check_level("traffic", req.traffic)?,
            industrial: check_level("industrial", req.industrial)?,
            weather: req.weather.parse()?,
            population: check_level("population", req.population)?,
        })
    }
}

impl From<ScenarioParams> for ScenarioRequest {
    fn from(params: ScenarioParams) -> Self {
        Self {
            traffic: i64::from(params.traffic),
            industrial: i64::from(params.industrial),
            weather: params.weather.as_str().to_string(),
            population: i64::from(params.population),
        }
    }
}

// ---------------------------------------------------------------------------
// Impact
// ---------------------------------------------------------------------------

/// Intermediate terms of the impact formula, kept for narratives and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactComponents {
    pub traffic_impact: f64,
    pub industrial_impact: f64,
    pub population_impact: f64,
    pub weather_multiplier: f64,
}

impl ImpactComponents {
    pub fn from_params(params: &ScenarioParams) -> Self {
        Self {
            traffic_impact: f64::from(MAX_LEVEL - params.traffic) * TRAFFIC_WEIGHT,
            industrial_impact: f64::from(MAX_LEVEL - params.industrial) * INDUSTRIAL_WEIGHT,
            population_impact: f64::from(MAX_LEVEL - params.population) * POPULATION_WEIGHT,
            weather_multiplier: params.weather.multiplier(),
        }
    }

    /// Weighted sum scaled by the weather multiplier, before rounding and clamping.
    pub fn raw_improvement(&self) -> f64 {
        (self.traffic_impact + self.industrial_impact + self.population_impact)
            * self.weather_multiplier
    }
}

/// Estimated effect of a scenario, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Always within `0..=60`.
    pub overall_improvement_pct: u32,
    pub pm25_reduction_pct: u32,
    /// Not clamped; may exceed `overall_improvement_pct`.
    pub health_risk_reduction_pct: u32,
}

/// Round half up. All inputs here are non-negative.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub fn calculate_impact(params: &ScenarioParams) -> ImpactEstimate {
    let components = ImpactComponents::from_params(params);
    let overall = round_half_up(components.raw_improvement()).clamp(0.0, MAX_OVERALL_IMPROVEMENT);

    ImpactEstimate {
        overall_improvement_pct: overall as u32,
        pm25_reduction_pct: round_half_up(overall * PM25_REDUCTION_RATIO) as u32,
        health_risk_reduction_pct: round_half_up(overall * HEALTH_RISK_RATIO) as u32,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
