use super::union::merge_into;
use crate::window::Interval;
use qtty::{Quantity, Unit};

/// Moves every left endpoint by `-left` and every right endpoint by `+right`.
///
/// Negative amounts contract. Intervals that would invert are dropped and
/// the survivors are re-merged.
pub fn compute_expansion<U: Unit>(
    canonical: &[Interval<U>],
    left: Quantity<U>,
    right: Quantity<U>,
) -> Vec<Interval<U>> {
    let mut result = Vec::with_capacity(canonical.len());
    for iv in canonical {
        if let Ok(moved) = Interval::new(iv.start() - left, iv.end() + right) {
            // Starts shift uniformly, so the sequence stays sorted by start.
            merge_into(&mut result, moved);
        }
    }
    result
}

/// Merges neighbours whose gap is no wider than `small`.
pub fn compute_gap_fill<U: Unit>(canonical: &[Interval<U>], small: Quantity<U>) -> Vec<Interval<U>> {
    let mut result: Vec<Interval<U>> = Vec::with_capacity(canonical.len());
    for iv in canonical {
        if let Some(last) = result.last_mut() {
            if (iv.start() - last.end()).value() <= small.value() {
                *last = Interval::new_unchecked(last.start(), iv.end());
                continue;
            }
        }
        result.push(*iv);
    }
    result
}

/// Drops intervals no wider than `small`.
pub fn compute_short_filter<U: Unit>(
    canonical: &[Interval<U>],
    small: Quantity<U>,
) -> Vec<Interval<U>> {
    canonical
        .iter()
        .filter(|iv| iv.duration().value() > small.value())
        .copied()
        .collect()
}
