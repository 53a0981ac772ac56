use crate::window::Interval;
use qtty::Unit;

/// Appends `iv` to a canonical accumulator, merging with the last interval
/// when they overlap or touch. `iv` must not start before the last interval.
pub(crate) fn merge_into<U: Unit>(result: &mut Vec<Interval<U>>, iv: Interval<U>) {
    if let Some(last) = result.last_mut() {
        if last.end().value() >= iv.start().value() {
            if iv.end().value() > last.end().value() {
                *last = Interval::new_unchecked(last.start(), iv.end());
            }
            return;
        }
    }
    result.push(iv);
}

/// Computes the union of two canonical interval slices.
pub fn compute_union<U: Unit>(a: &[Interval<U>], b: &[Interval<U>]) -> Vec<Interval<U>> {
    debug_assert!(super::assertions::is_canonical(a));
    debug_assert!(super::assertions::is_canonical(b));
    let mut result: Vec<Interval<U>> = Vec::with_capacity(a.len() + b.len());
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        if a[i].start().value() <= b[j].start().value() {
            merge_into(&mut result, a[i]);
            i += 1;
        } else {
            merge_into(&mut result, b[j]);
            j += 1;
        }
    }

    for iv in a[i..].iter().chain(&b[j..]) {
        merge_into(&mut result, *iv);
    }

    result
}
