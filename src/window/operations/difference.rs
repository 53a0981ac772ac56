use super::{compute_complement, compute_intersection};
use crate::window::Interval;
use qtty::Unit;

/// Returns the parts of `a` not covered by `b`.
///
/// Closed semantics: the boundary points shared with `b` stay in the result.
pub fn compute_difference<U: Unit>(a: &[Interval<U>], b: &[Interval<U>]) -> Vec<Interval<U>> {
    let (Some(first), Some(last)) = (a.first(), a.last()) else {
        return Vec::new();
    };
    if b.is_empty() {
        return a.to_vec();
    }
    let hull = Interval::new_unchecked(first.start(), last.end());
    compute_intersection(a, &compute_complement(b, hull))
}
