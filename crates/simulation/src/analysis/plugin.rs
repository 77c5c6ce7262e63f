//! Plugin that wires up the analysis subsystem: request event, executor,
//! results and log.

use bevy::prelude::*;
use chrono::{NaiveDateTime, Timelike, Utc};

use super::executor::process_recompute_requests;
use super::reports::AnalysisResults;
use super::request_log::AnalysisLog;
use super::RecomputeRequest;
use crate::analysis_params::AnalysisParams;
use crate::sim_rng::SimRngPlugin;

/// Wall-clock instant that forecast labels start from and history ends on.
///
/// Defaults to the current UTC hour. Tests pin it for reproducible labels.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarAnchor(pub NaiveDateTime);

impl Default for CalendarAnchor {
    fn default() -> Self {
        let now = Utc::now().naive_utc();
        let hour = now.date().and_hms_opt(now.hour(), 0, 0).unwrap_or(now);
        Self(hour)
    }
}

/// Registers the recompute event, its executor and the result resources.
/// Resources already inserted by the caller are kept.
pub struct AnalysisPlugin;

impl Plugin for AnalysisPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnalysisParams>();
        app.add_plugins(SimRngPlugin);
        app.init_resource::<CalendarAnchor>();
        app.init_resource::<AnalysisResults>();
        app.init_resource::<AnalysisLog>();
        app.add_event::<RecomputeRequest>();

        app.add_systems(Update, process_recompute_requests);
    }
}
