use crate::window::Interval;
use qtty::Unit;

/// Returns the index of the first interval that breaks the canonical ordering
/// against its predecessor, or `None` if the slice is canonical.
///
/// Canonical means sorted by start with each interval ending strictly before
/// the next one starts (touching intervals count as a violation).
pub fn first_violation<U: Unit>(intervals: &[Interval<U>]) -> Option<usize> {
    intervals
        .windows(2)
        .position(|w| w[0].end().value() >= w[1].start().value())
        .map(|i| i + 1)
}

/// Returns true if `intervals` is canonical.
pub fn is_canonical<U: Unit>(intervals: &[Interval<U>]) -> bool {
    first_violation(intervals).is_none()
}
