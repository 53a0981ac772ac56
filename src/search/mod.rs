//! The geometry-finder search engine.
//!
//! A search walks a confinement [`IntervalSet`] at the configured step,
//! brackets every change of a caller-supplied condition between two samples,
//! refines each bracket down to the convergence tolerance and accumulates the
//! result window. Two variants share that machinery:
//!
//! - [`BinaryStateSearch`] / [`run_binary_search`]: a boolean condition.
//! - [`NumericSearch`] / [`run_numeric_search`]: a scalar checked against a
//!   [`GfConstraint`].
//!
//! Both honor the progress and interrupt hooks registered on the
//! [`SearchConfig`].

mod binary;
pub mod config;
pub mod constraint;
mod numeric;
pub mod progress;
pub mod quantity;
pub mod refiner;
pub mod sampler;


pub use binary::run_binary_search;
pub use config::{Bisection, Refinement, SearchConfig, StepSize, TieBreak, DEFAULT_TOLERANCE};
pub use constraint::{GfConstraint, Relation};
pub use numeric::run_numeric_search;
pub use progress::{FlagInterrupt, InterruptHandler, LogReporter, ProgressReporter};
pub use quantity::{BooleanQuantity, Fallible, ScalarFn, ScalarQuantity, ScalarWithRate};

use qtty::Unit;

use crate::error::GfResult;
use crate::window::IntervalSet;

/// How a search call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every confinement interval was scanned to its end.
    Completed,
    /// The interrupt hook fired; the window holds the intervals finalized
    /// before that.
    Interrupted,
}

/// Result window of a search plus how the search ended.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<U: Unit> {
    window: IntervalSet<U>,
    status: SearchStatus,
}

impl<U: Unit> SearchOutcome<U> {
    pub(crate) fn new(window: IntervalSet<U>, status: SearchStatus) -> Self {
        Self { window, status }
    }

    pub fn window(&self) -> &IntervalSet<U> {
        &self.window
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_interrupted(&self) -> bool {
        self.status == SearchStatus::Interrupted
    }

    pub fn into_window(self) -> IntervalSet<U> {
        self.window
    }
}

/// A search variant bound to its target quantity.
///
/// # Type Parameters
///
/// * `U` - Unit of the time axis (e.g., [`qtty::Second`])
pub trait GfSearch<U: Unit> {
    /// Scans `confinement` and returns the sub-intervals where the bound
    /// condition holds.
    ///
    /// # Arguments
    ///
    /// * `confinement` - Window the search is restricted to
    /// * `config` - Step, tolerance, refinement and hooks for this call
    /// * `max_result_intervals` - Upper bound on result (and workspace) size
    fn run(
        &mut self,
        confinement: &IntervalSet<U>,
        config: &mut SearchConfig<'_, U>,
        max_result_intervals: usize,
    ) -> GfResult<SearchOutcome<U>>;

    /// Short label for logs.
    fn name(&self) -> &str;
}

/// Search for the times a boolean quantity is true.
#[derive(Debug, Clone)]
pub struct BinaryStateSearch<Q> {
    quantity: Q,
}

impl<Q> BinaryStateSearch<Q> {
    pub fn new(quantity: Q) -> Self {
        Self { quantity }
    }
}

impl<U: Unit, Q: BooleanQuantity<U>> GfSearch<U> for BinaryStateSearch<Q> {
    fn run(
        &mut self,
        confinement: &IntervalSet<U>,
        config: &mut SearchConfig<'_, U>,
        max_result_intervals: usize,
    ) -> GfResult<SearchOutcome<U>> {
        run_binary_search(confinement, config, &mut self.quantity, max_result_intervals)
    }

    fn name(&self) -> &str {
        "binary state search"
    }
}

/// Search for the times a scalar quantity satisfies a constraint.
#[derive(Debug, Clone)]
pub struct NumericSearch<Q> {
    quantity: Q,
    constraint: GfConstraint,
}

impl<Q> NumericSearch<Q> {
    pub fn new(quantity: Q, constraint: GfConstraint) -> Self {
        Self {
            quantity,
            constraint,
        }
    }

    pub fn constraint(&self) -> &GfConstraint {
        &self.constraint
    }
}

impl<U: Unit, Q: ScalarQuantity<U>> GfSearch<U> for NumericSearch<Q> {
    fn run(
        &mut self,
        confinement: &IntervalSet<U>,
        config: &mut SearchConfig<'_, U>,
        max_result_intervals: usize,
    ) -> GfResult<SearchOutcome<U>> {
        run_numeric_search(
            confinement,
            &self.constraint,
            config,
            &mut self.quantity,
            max_result_intervals,
        )
    }

    fn name(&self) -> &str {
        "numeric search"
    }
}
