//! On-demand analysis subsystem: recompute requests in, reports out.

pub mod executor;
pub mod plugin;
pub mod reports;
pub mod request_log;
pub mod requests;

pub use executor::{process_recompute_requests, run_request};
pub use plugin::{AnalysisPlugin, CalendarAnchor};
pub use reports::*;
pub use request_log::{AnalysisLog, LoggedRequest};
pub use requests::RecomputeRequest;

#[cfg(test)]
mod tests;
