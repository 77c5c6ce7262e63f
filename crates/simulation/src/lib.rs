use bevy::prelude::*;

pub mod analysis;
pub mod analysis_params;
pub mod analysis_protocol;
pub mod aqi_category;
pub mod config;
pub mod error;
pub mod forecast;
pub mod historical;
pub mod narrative;
pub mod scenario;
pub mod sim_rng;
pub mod trend;
pub mod weather_effect;

pub use error::SimError;

/// Everything the analysis layer needs in a Bevy app.
///
/// Insert an [`analysis_params::AnalysisParams`] (and optionally a
/// [`sim_rng::SimRng`] or [`analysis::CalendarAnchor`]) before adding the
/// plugin to override the defaults.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(analysis::AnalysisPlugin);
    }
}
