use crate::window::{quantity_max, quantity_min, Interval};
use qtty::Unit;

/// Computes the intersection of two canonical interval slices.
///
/// Endpoints are closed, so intervals that only touch contribute a single
/// point to the result.
pub fn compute_intersection<U: Unit>(a: &[Interval<U>], b: &[Interval<U>]) -> Vec<Interval<U>> {
    debug_assert!(super::assertions::is_canonical(a));
    debug_assert!(super::assertions::is_canonical(b));

    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        let ia = &a[i];
        let ib = &b[j];

        if ia.overlaps(ib) {
            result.push(Interval::new_unchecked(
                quantity_max(ia.start(), ib.start()),
                quantity_min(ia.end(), ib.end()),
            ));
        }

        match ia.end().value().partial_cmp(&ib.end().value()) {
            Some(std::cmp::Ordering::Less) => i += 1,
            Some(std::cmp::Ordering::Greater) => j += 1,
            _ => {
                i += 1;
                j += 1;
            }
        }
    }

    result
}
