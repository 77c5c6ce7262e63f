//! Weather regime lookup: how much each regime helps or hinders pollutant
//! dispersal.
//!
//! The table is a `const` array built at compile time; there is no mutation
//! and no lazy initialisation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Weather regime selectable in a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherTag {
    Sunny,
    #[default]
    Normal,
    Rainy,
    Windy,
    Foggy,
}

/// Dispersal multiplier and the phrase used to describe it in narratives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherEffect {
    pub multiplier: f64,
    pub dispersal_phrase: &'static str,
}

/// One entry per [`WeatherTag`], ordered from most to least favourable.
pub const WEATHER_EFFECTS: [(WeatherTag, WeatherEffect); 5] = [
    (
        WeatherTag::Windy,
        WeatherEffect {
            multiplier: 1.3,
            dispersal_phrase: "highly favorable for pollutant dispersal",
        },
    ),
    (
        WeatherTag::Rainy,
        WeatherEffect {
            multiplier: 1.2,
            dispersal_phrase: "beneficial for removing particulates",
        },
    ),
    (
        WeatherTag::Normal,
        WeatherEffect {
            multiplier: 1.0,
            dispersal_phrase: "neutral for air quality",
        },
    ),
    (
        WeatherTag::Sunny,
        WeatherEffect {
            multiplier: 0.9,
            dispersal_phrase: "may increase ground-level ozone",
        },
    ),
    (
        WeatherTag::Foggy,
        WeatherEffect {
            multiplier: 0.7,
            dispersal_phrase: "challenging for pollutant dispersal",
        },
    ),
];

impl WeatherTag {
    pub const ALL: [WeatherTag; 5] = [
        WeatherTag::Sunny,
        WeatherTag::Normal,
        WeatherTag::Rainy,
        WeatherTag::Windy,
        WeatherTag::Foggy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WeatherTag::Sunny => "sunny",
            WeatherTag::Normal => "normal",
            WeatherTag::Rainy => "rainy",
            WeatherTag::Windy => "windy",
            WeatherTag::Foggy => "foggy",
        }
    }

    pub fn effect(self) -> WeatherEffect {
        match self {
            WeatherTag::Windy => WEATHER_EFFECTS[0].1,
            WeatherTag::Rainy => WEATHER_EFFECTS[1].1,
            WeatherTag::Normal => WEATHER_EFFECTS[2].1,
            WeatherTag::Sunny => WEATHER_EFFECTS[3].1,
            WeatherTag::Foggy => WEATHER_EFFECTS[4].1,
        }
    }

    pub fn multiplier(self) -> f64 {
        self.effect().multiplier
    }
}

impl fmt::Display for WeatherTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse: unknown tags are an [`SimError::InvalidArgument`].
impl FromStr for WeatherTag {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::invalid(format!("unknown weather tag '{s}'")))
    }
}

/// Lenient lookup by tag name. Unrecognised tags resolve to the `normal` entry.
pub fn lookup_weather_effect(tag: &str) -> WeatherEffect {
    tag.parse::<WeatherTag>()
        .unwrap_or(WeatherTag::Normal)
        .effect()
}
