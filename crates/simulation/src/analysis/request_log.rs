//! Outcome of each recompute request, newest last.
//!
//! The agent loop sends one request, steps the app and reads [`AnalysisLog::last`]
//! to decide between a report payload and an error payload.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::RecomputeRequest;
use crate::error::SimError;
use crate::narrative::AnalysisKind;

/// Oldest outcomes are dropped past this many.
const RETAINED_REQUESTS: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct LoggedRequest {
    pub request: RecomputeRequest,
    /// Kind of report stored on success.
    pub outcome: Result<AnalysisKind, SimError>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct AnalysisLog {
    entries: VecDeque<LoggedRequest>,
}

impl AnalysisLog {
    pub fn push(&mut self, request: RecomputeRequest, outcome: Result<AnalysisKind, SimError>) {
        if self.entries.len() == RETAINED_REQUESTS {
            drop(self.entries.pop_front());
        }
        self.entries.push_back(LoggedRequest { request, outcome });
    }

    /// Most recently processed request.
    pub fn last(&self) -> Option<&LoggedRequest> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::historical::{HistoryRange, Pollutant};
    use crate::scenario::ScenarioParams;

    fn historical(city: &str) -> RecomputeRequest {
        RecomputeRequest::Historical {
            city: city.to_string(),
            pollutant: Pollutant::O3,
            range: HistoryRange::Week,
        }
    }

    #[test]
    fn empty_log_has_no_outcome() {
        assert!(AnalysisLog::default().last().is_none());
    }

    #[test]
    fn failure_after_success_is_reported_last() {
        let mut log = AnalysisLog::default();
        log.push(historical("Denver"), Ok(AnalysisKind::Pattern));
        log.push(
            historical("Gotham"),
            Err(SimError::invalid("unknown city 'Gotham'")),
        );

        let last = log.last().unwrap();
        assert_eq!(last.request.city(), "Gotham");
        assert!(last.outcome.as_ref().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn success_after_failure_replaces_it_as_last() {
        let mut log = AnalysisLog::default();
        log.push(
            historical("Gotham"),
            Err(SimError::invalid("unknown city 'Gotham'")),
        );
        let scenario = RecomputeRequest::Scenario {
            city: "Miami".into(),
            params: ScenarioParams::default(),
        };
        log.push(scenario.clone(), Ok(AnalysisKind::Scenario));

        let last = log.last().unwrap();
        assert_eq!(last.request, scenario);
        assert_eq!(last.outcome, Ok(AnalysisKind::Scenario));
    }

    #[test]
    fn retains_a_bounded_window() {
        let mut log = AnalysisLog::default();
        for day in 0..(RETAINED_REQUESTS * 3) {
            log.push(historical(&format!("Station {day}")), Ok(AnalysisKind::Pattern));
        }
        assert_eq!(log.entries.len(), RETAINED_REQUESTS);
        assert_eq!(
            log.entries.front().unwrap().request.city(),
            format!("Station {}", RETAINED_REQUESTS * 2)
        );
        assert_eq!(
            log.last().unwrap().request.city(),
            format!("Station {}", RETAINED_REQUESTS * 3 - 1)
        );
    }
}
