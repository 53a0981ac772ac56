//! Time windows: closed intervals and canonical interval sets.
//!
//! An [`IntervalSet`] is both the confinement window handed to a search and
//! the result window it returns. The set algebra in [`operations`] is usable
//! on its own for building confinement windows from external sources.

mod interval;
mod interval_set;
pub mod operations;

pub use interval::Interval;
pub use interval_set::IntervalSet;

use qtty::{Quantity, Unit};

/// Returns the minimum of two quantities.
pub fn quantity_min<U: Unit>(a: Quantity<U>, b: Quantity<U>) -> Quantity<U> {
    if a.value() <= b.value() {
        a
    } else {
        b
    }
}

/// Returns the maximum of two quantities.
pub fn quantity_max<U: Unit>(a: Quantity<U>, b: Quantity<U>) -> Quantity<U> {
    if a.value() >= b.value() {
        a
    } else {
        b
    }
}
