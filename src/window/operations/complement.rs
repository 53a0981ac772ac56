use super::union::merge_into;
use crate::window::Interval;
use qtty::Unit;

/// Returns the gaps of a canonical interval slice within `bounds`.
///
/// Parts of `canonical` outside `bounds` are ignored. Because endpoints are
/// closed, the gaps keep the boundary points they share with `canonical`;
/// a gap collapsed by a single-point interval therefore merges with its
/// neighbour.
pub fn compute_complement<U: Unit>(
    canonical: &[Interval<U>],
    bounds: Interval<U>,
) -> Vec<Interval<U>> {
    debug_assert!(super::assertions::is_canonical(canonical));

    let mut result = Vec::new();
    let mut cursor = bounds.start();
    let mut touched = false;

    for iv in canonical {
        if iv.end().value() < bounds.start().value() {
            continue;
        }
        if iv.start().value() > bounds.end().value() {
            break;
        }
        touched = true;
        if iv.start().value() > cursor.value() {
            merge_into(&mut result, Interval::new_unchecked(cursor, iv.start()));
        }
        if iv.end().value() > cursor.value() {
            cursor = iv.end();
        }
    }

    if !touched {
        return vec![bounds];
    }
    if cursor.value() < bounds.end().value() {
        merge_into(&mut result, Interval::new_unchecked(cursor, bounds.end()));
    }

    result
}
