use thiserror::Error;

/// Boxed error raised by a caller-supplied quantity callback.
pub type CallbackFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building windows or running a search.
///
/// Every variant is fatal to the call that produced it. An interrupted search
/// is not an error; it returns a partial [`SearchOutcome`](crate::search::SearchOutcome).
#[derive(Debug, Error)]
pub enum GfError {
    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval { start: f64, end: f64 },

    #[error("Window is not canonical at interval {index}: intervals must be sorted and disjoint")]
    NonCanonicalWindow { index: usize },

    #[error("Result window would exceed the workspace capacity of {capacity} intervals")]
    WorkspaceOverflow { capacity: usize },

    #[error("Workspace capacity must be at least one interval")]
    InvalidWorkspaceSize,

    #[error("Search step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("Convergence tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("Extremum adjustment must be non-negative and finite, got {0}")]
    InvalidAdjustment(f64),

    #[error("Unknown relational operator: {0}")]
    UnknownRelation(String),

    #[error("Relational operator {relation} is not applicable to {context}")]
    NotApplicable {
        relation: &'static str,
        context: &'static str,
    },

    #[error("Quantity callback failed: {0}")]
    Callback(#[source] CallbackFailure),
}

impl GfError {
    /// Wraps a callback failure.
    pub fn callback<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GfError::Callback(Box::new(err))
    }
}

/// Result alias used throughout the crate.
pub type GfResult<T> = Result<T, GfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "ephemeris lookup failed")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn test_invalid_interval_display() {
        let e = GfError::InvalidInterval {
            start: 5.0,
            end: 1.0,
        };
        assert_eq!(e.to_string(), "Invalid interval: start 5 is after end 1");
    }

    #[test]
    fn test_workspace_overflow_display() {
        let e = GfError::WorkspaceOverflow { capacity: 3 };
        assert_eq!(
            e.to_string(),
            "Result window would exceed the workspace capacity of 3 intervals"
        );
    }

    #[test]
    fn test_step_and_tolerance_display() {
        assert!(GfError::InvalidStep(-1.0).to_string().contains("-1"));
        assert!(GfError::InvalidTolerance(0.0).to_string().contains("tolerance"));
    }

    #[test]
    fn test_callback_keeps_source() {
        use std::error::Error as _;
        let e = GfError::callback(Boom);
        assert_eq!(
            e.to_string(),
            "Quantity callback failed: ephemeris lookup failed"
        );
        assert!(e.source().is_some());
    }
}
