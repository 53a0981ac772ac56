//! gfsearch - geometry-finder event search over time windows
//!
//! Scans a confinement window for the sub-intervals where a caller-supplied
//! boolean or scalar condition holds, refining every transition to a
//! convergence tolerance. The interval-set algebra used for confinement and
//! result windows is usable on its own.

pub mod error;
pub mod search;
pub mod units;
pub mod window;

pub use error::{GfError, GfResult};
pub use search::{
    run_binary_search, run_numeric_search, GfConstraint, GfSearch, SearchConfig, SearchOutcome,
    SearchStatus,
};
pub use window::{Interval, IntervalSet};

// Re-export unit conversion traits for ergonomic use
pub use units::{convert, SameDim};
