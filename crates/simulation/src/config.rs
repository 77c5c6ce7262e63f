/// Seed used for `SimRng` when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Current-condition AQI the forecast is anchored on when no reading is supplied.
pub const DEFAULT_BASELINE_AQI: f64 = 65.0;

// Forecast shape.
pub const OBSERVED_SWING: f64 = 15.0;
pub const OBSERVED_FREQUENCY: f64 = 0.5;
pub const OBSERVED_NOISE: f64 = 10.0;
pub const PREDICTED_SWING: f64 = 10.0;
pub const PREDICTED_FREQUENCY: f64 = 0.3;
pub const PREDICTED_NOISE: f64 = 5.0;
/// Confidence half-width at the first predicted point.
pub const CONFIDENCE_BASE_WIDTH: f64 = 10.0;
/// Half-width added per step into the future.
pub const CONFIDENCE_WIDTH_STEP: f64 = 2.0;

// Historical series shape.
pub const HISTORY_BASE_AQI: f64 = 65.0;
pub const HISTORY_BASE_PM25: f64 = 25.0;
pub const HISTORY_BASE_OZONE: f64 = 45.0;
pub const HISTORY_SEASONAL_AMPLITUDE: f64 = 20.0;
pub const HISTORY_WEEKLY_AMPLITUDE: f64 = 10.0;
pub const HISTORY_NOISE: f64 = 15.0;
/// Synthetic history AQI is clamped to `[0, HISTORY_MAX_AQI]`.
pub const HISTORY_MAX_AQI: f64 = 200.0;

// Scenario weights, applied to `100 - level`.
pub const TRAFFIC_WEIGHT: f64 = 0.3;
pub const INDUSTRIAL_WEIGHT: f64 = 0.4;
pub const POPULATION_WEIGHT: f64 = 0.1;
/// Upper bound for the overall improvement percentage.
pub const MAX_OVERALL_IMPROVEMENT: f64 = 60.0;
pub const PM25_REDUCTION_RATIO: f64 = 0.8;
pub const HEALTH_RISK_RATIO: f64 = 1.2;

// Narrative thresholds.
pub const HIGH_TRAFFIC_LEVEL: u8 = 70;
pub const HIGH_INDUSTRIAL_LEVEL: u8 = 60;
pub const HIGH_POPULATION_LEVEL: u8 = 80;
/// Industrial level above which emissions are described as elevated.
pub const ELEVATED_INDUSTRIAL_LEVEL: u8 = 50;

/// Stated forecast confidence for the first day, in percent.
pub const SHORT_RANGE_CONFIDENCE_PCT: u32 = 85;
/// Stated forecast confidence beyond the first day, in percent.
pub const LONG_RANGE_CONFIDENCE_PCT: u32 = 65;

/// Number of most recent samples used for trend detection.
pub const TREND_WINDOW: usize = 48;
/// Absolute slope below which a series is considered stable.
pub const TREND_SLOPE_THRESHOLD: f64 = 0.01;

/// Cities served when no list is configured.
pub const DEFAULT_CITIES: [&str; 6] = [
    "New York",
    "Los Angeles",
    "Chicago",
    "Miami",
    "Seattle",
    "Denver",
];
