// ---------------------------------------------------------------------------
// SimError: error taxonomy for the air-quality simulation core
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors produced by the forecast, history and scenario generators.
///
/// All of them are local and non-fatal: callers are expected to fall back to
/// an empty series or a "no data" state rather than abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A parameter was out of range or an enum tag was not recognised.
    InvalidArgument(String),
    /// The random source could not produce a value.
    ComputationUnavailable(String),
}

impl SimError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SimError::InvalidArgument(_))
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            SimError::ComputationUnavailable(msg) => {
                write!(f, "Computation unavailable: {msg}")
            }
        }
    }
}

impl std::error::Error for SimError {}

impl From<rand::Error> for SimError {
    fn from(e: rand::Error) -> Self {
        SimError::ComputationUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_argument() {
        let err = SimError::invalid("traffic must be within 0..=100, got 140");
        let msg = format!("{err}");
        assert!(msg.contains("Invalid argument"), "got: {msg}");
        assert!(msg.contains("140"), "got: {msg}");
    }

    #[test]
    fn test_display_computation_unavailable() {
        let err = SimError::ComputationUnavailable("entropy exhausted".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("Computation unavailable"), "got: {msg}");
        assert!(msg.contains("entropy exhausted"), "got: {msg}");
    }

    #[test]
    fn test_from_rand_error() {
        let rand_err = rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "no bytes left",
        ));
        let err: SimError = rand_err.into();
        assert!(matches!(err, SimError::ComputationUnavailable(_)));
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_is_error_trait() {
        let err = SimError::invalid("x");
        let as_dyn: &dyn std::error::Error = &err;
        assert!(as_dyn.source().is_none());
    }
}
