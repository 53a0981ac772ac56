//! Linear-time sweeps over canonical interval slices.
//!
//! Inputs are assumed canonical (sorted, strictly separated); every function
//! here returns a canonical `Vec` that [`IntervalSet`](super::IntervalSet)
//! can adopt without re-sorting.

pub mod assertions;
mod adjust;
mod complement;
mod difference;
mod intersection;
mod union;

pub use adjust::{compute_expansion, compute_gap_fill, compute_short_filter};
pub use complement::compute_complement;
pub use difference::compute_difference;
pub use intersection::compute_intersection;
pub use union::compute_union;

pub(crate) use union::merge_into;
