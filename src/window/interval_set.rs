//! A canonical container for disjoint, sorted closed intervals.
//!
//! [`IntervalSet`] wraps a `Vec<Interval<U>>` and guarantees the **canonical
//! invariant** at all times: intervals are sorted by start and every interval
//! ends strictly before the next one begins (touching intervals are merged).
//!
//! Read access is transparent via `Deref<Target = [Interval<U>]>`.
//! Mutation goes through methods that re-establish the invariant.

use std::fmt::Display;
use std::ops::Deref;

use qtty::{Quantity, Unit};

use super::interval::Interval;
use super::operations;
use crate::error::{GfError, GfResult};

/// A sorted, disjoint set of closed intervals.
///
/// # Performance
///
/// - Construction from an unsorted literal list: O(n log n) sort + O(n) merge.
/// - `insert`: O(n) worst case (binary search + splice), O(1) amortized when
///   appending in order.
/// - `union`, `intersection`, `complement`, `difference`: O(n + m) sweeps.
/// - `contains_point`: O(log n).
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSet<U: Unit>(Vec<Interval<U>>);

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> IntervalSet<U> {
    /// Creates an empty interval set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adopts a `Vec` that must already be canonical.
    ///
    /// # Errors
    ///
    /// Returns [`GfError::NonCanonicalWindow`] naming the first interval that
    /// is out of order, overlaps, or touches its predecessor.
    pub fn try_from_sorted(vec: Vec<Interval<U>>) -> GfResult<Self> {
        match operations::assertions::first_violation(&vec) {
            Some(index) => Err(GfError::NonCanonicalWindow { index }),
            None => Ok(Self(vec)),
        }
    }

    /// Builds a normalized set from raw `(start, end)` pairs.
    ///
    /// Pairs may be unsorted and may overlap; an inverted pair is an error.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> GfResult<Self> {
        pairs
            .iter()
            .map(|&(start, end)| Interval::from_f64(start, end))
            .collect::<GfResult<Vec<_>>>()
            .map(Self::from)
    }

    /// Wraps the output of a canonical sweep.
    pub(crate) fn from_canonical(vec: Vec<Interval<U>>) -> Self {
        debug_assert!(
            operations::assertions::is_canonical(&vec),
            "IntervalSet::from_canonical called with non-canonical input"
        );
        Self(vec)
    }
}

impl<U: Unit> IntervalSet<U> {
    /// Sorts by start and merges overlapping / touching intervals in place.
    fn normalize(&mut self) {
        if self.0.len() <= 1 {
            return;
        }
        self.0.sort_by(|a, b| a.start().value().total_cmp(&b.start().value()));
        let mut merged: Vec<Interval<U>> = Vec::with_capacity(self.0.len());
        for interval in self.0.drain(..) {
            operations::merge_into(&mut merged, interval);
        }
        self.0 = merged;
    }
}

// ─────────────────────────────────────────────────────────────────────
// Mutation
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> IntervalSet<U> {
    /// Inserts an interval, merging it with every neighbour it overlaps or
    /// touches.
    pub fn insert(&mut self, interval: Interval<U>) {
        let lo = self
            .0
            .partition_point(|iv| iv.end().value() < interval.start().value());
        let hi = self
            .0
            .partition_point(|iv| iv.start().value() <= interval.end().value());

        if lo == hi {
            self.0.insert(lo, interval);
            return;
        }

        let merged = Interval::new_unchecked(
            super::quantity_min(self.0[lo].start(), interval.start()),
            super::quantity_max(self.0[hi - 1].end(), interval.end()),
        );
        self.0.splice(lo..hi, std::iter::once(merged));
    }

    /// Returns a slice of the intervals.
    pub fn as_slice(&self) -> &[Interval<U>] {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> IntervalSet<U> {
    /// Number of disjoint intervals in the set.
    pub fn interval_count(&self) -> usize {
        self.0.len()
    }

    /// Sum of interval widths.
    pub fn measure(&self) -> Quantity<U> {
        Quantity::new(self.0.iter().map(|iv| iv.duration().value()).sum())
    }

    /// Returns true if `t` lies inside (or on the boundary of) some interval.
    pub fn contains_point(&self, t: Quantity<U>) -> bool {
        let idx = self.0.partition_point(|iv| iv.end().value() < t.value());
        self.0
            .get(idx)
            .is_some_and(|iv| iv.start().value() <= t.value())
    }

    /// Smallest interval covering the whole set, or `None` when empty.
    pub fn bounds(&self) -> Option<Interval<U>> {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => Some(Interval::new_unchecked(first.start(), last.end())),
            _ => None,
        }
    }

    /// Re-expresses the set in another unit of the same dimension.
    pub fn to<T: Unit<Dim = U::Dim>>(&self) -> IntervalSet<T> {
        IntervalSet(self.0.iter().map(|iv| iv.to()).collect())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Set operations
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> IntervalSet<U> {
    /// Returns the union of `self` and `other`.
    pub fn union(&self, other: &IntervalSet<U>) -> IntervalSet<U> {
        Self::from_canonical(operations::compute_union(&self.0, &other.0))
    }

    /// Returns the intersection of `self` and `other`.
    pub fn intersection(&self, other: &IntervalSet<U>) -> IntervalSet<U> {
        Self::from_canonical(operations::compute_intersection(&self.0, &other.0))
    }

    /// Returns the complement of `self` within `within`.
    pub fn complement(&self, within: Interval<U>) -> IntervalSet<U> {
        Self::from_canonical(operations::compute_complement(&self.0, within))
    }

    /// Returns the parts of `self` not covered by `other`.
    pub fn difference(&self, other: &IntervalSet<U>) -> IntervalSet<U> {
        Self::from_canonical(operations::compute_difference(&self.0, &other.0))
    }

    /// Widens every interval by `left` before and `right` after.
    ///
    /// Negative amounts contract; intervals that would invert are removed.
    pub fn expand(&self, left: Quantity<U>, right: Quantity<U>) -> IntervalSet<U> {
        Self::from_canonical(operations::compute_expansion(&self.0, left, right))
    }

    /// Merges intervals separated by gaps no wider than `small`.
    pub fn fill_gaps(&self, small: Quantity<U>) -> IntervalSet<U> {
        Self::from_canonical(operations::compute_gap_fill(&self.0, small))
    }

    /// Removes intervals no wider than `small`.
    pub fn filter_short(&self, small: Quantity<U>) -> IntervalSet<U> {
        Self::from_canonical(operations::compute_short_filter(&self.0, small))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Read access and conversions
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> Deref for IntervalSet<U> {
    type Target = [Interval<U>];

    fn deref(&self) -> &[Interval<U>] {
        &self.0
    }
}

impl<U: Unit> From<Vec<Interval<U>>> for IntervalSet<U> {
    /// Normalizes a literal list: sorts it and merges overlapping or touching
    /// intervals.
    fn from(vec: Vec<Interval<U>>) -> Self {
        let mut set = Self(vec);
        set.normalize();
        set
    }
}

impl<U: Unit> From<Interval<U>> for IntervalSet<U> {
    fn from(interval: Interval<U>) -> Self {
        Self(vec![interval])
    }
}

impl<U: Unit> FromIterator<Interval<U>> for IntervalSet<U> {
    fn from_iter<I: IntoIterator<Item = Interval<U>>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<U: Unit> IntoIterator for IntervalSet<U> {
    type Item = Interval<U>;
    type IntoIter = std::vec::IntoIter<Interval<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, U: Unit> IntoIterator for &'a IntervalSet<U> {
    type Item = &'a Interval<U>;
    type IntoIter = std::slice::Iter<'a, Interval<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<U: Unit> Default for IntervalSet<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit> Display for IntervalSet<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, interval) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", interval)?;
        }
        write!(f, "}}")
    }
}

/// Enables `assert_eq!(interval_set, vec![...])` in tests.
impl<U: Unit> PartialEq<Vec<Interval<U>>> for IntervalSet<U> {
    fn eq(&self, other: &Vec<Interval<U>>) -> bool {
        self.0 == *other
    }
}

// ─────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for IntervalSet<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.0, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for IntervalSet<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec = <Vec<Interval<U>> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from(vec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Second;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn iv(start: f64, end: f64) -> Interval<Second> {
        Interval::from_f64(start, end).unwrap()
    }

    fn s(v: f64) -> Quantity<Second> {
        Quantity::new(v)
    }

    /// Random set with integer endpoints in `[0, 100]`, so set algebra is exact.
    fn random_set(rng: &mut StdRng) -> IntervalSet<Second> {
        let n = rng.gen_range(0..8);
        (0..n)
            .map(|_| {
                let a = rng.gen_range(0..100) as f64;
                let w = rng.gen_range(0..15) as f64;
                iv(a, (a + w).min(100.0))
            })
            .collect()
    }

    // ── Construction ──────────────────────────────────────────────────

    #[test]
    fn test_new_is_empty() {
        let set = IntervalSet::<Second>::new();
        assert!(set.is_empty());
        assert_eq!(set.interval_count(), 0);
        assert_eq!(set.measure().value(), 0.0);
        assert_eq!(set.bounds(), None);
    }

    #[test]
    fn test_overlapping_literals_normalize() {
        let set = IntervalSet::from(vec![iv(1.0, 3.0), iv(2.0, 5.0)]);
        assert_eq!(set, vec![iv(1.0, 5.0)]);
    }

    #[test]
    fn test_unsorted_and_touching_literals_normalize() {
        let set = IntervalSet::from(vec![iv(200.0, 300.0), iv(0.0, 50.0), iv(50.0, 150.0)]);
        assert_eq!(set, vec![iv(0.0, 150.0), iv(200.0, 300.0)]);
    }

    #[test]
    fn test_from_pairs_rejects_inverted() {
        let err = IntervalSet::<Second>::from_pairs(&[(0.0, 1.0), (4.0, 2.0)]).unwrap_err();
        assert!(matches!(err, GfError::InvalidInterval { .. }));
        let ok = IntervalSet::<Second>::from_pairs(&[(4.0, 6.0), (0.0, 1.0)]).unwrap();
        assert_eq!(ok, vec![iv(0.0, 1.0), iv(4.0, 6.0)]);
    }

    #[test]
    fn test_try_from_sorted_rejects_overlap() {
        let err = IntervalSet::try_from_sorted(vec![iv(0.0, 3.0), iv(2.0, 5.0)]).unwrap_err();
        assert!(matches!(err, GfError::NonCanonicalWindow { index: 1 }));
        assert!(IntervalSet::try_from_sorted(vec![iv(0.0, 1.0), iv(2.0, 5.0)]).is_ok());
    }

    // ── Insert ────────────────────────────────────────────────────────

    #[test]
    fn test_insert_appends_in_order() {
        let mut set = IntervalSet::from(iv(0.0, 10.0));
        set.insert(iv(20.0, 30.0));
        assert_eq!(set, vec![iv(0.0, 10.0), iv(20.0, 30.0)]);
    }

    #[test]
    fn test_insert_before_existing() {
        let mut set = IntervalSet::from(iv(50.0, 100.0));
        set.insert(iv(0.0, 30.0));
        assert_eq!(set, vec![iv(0.0, 30.0), iv(50.0, 100.0)]);
    }

    #[test]
    fn test_insert_touching_merges() {
        let mut set = IntervalSet::from(iv(0.0, 10.0));
        set.insert(iv(10.0, 20.0));
        assert_eq!(set, vec![iv(0.0, 20.0)]);
    }

    #[test]
    fn test_insert_bridging_multiple_merges() {
        let mut set = IntervalSet::from(vec![iv(0.0, 10.0), iv(20.0, 30.0), iv(40.0, 50.0)]);
        set.insert(iv(5.0, 25.0));
        assert_eq!(set, vec![iv(0.0, 30.0), iv(40.0, 50.0)]);
    }

    #[test]
    fn test_insert_inside_existing_is_noop() {
        let mut set = IntervalSet::from(iv(0.0, 10.0));
        set.insert(iv(2.0, 3.0));
        assert_eq!(set, vec![iv(0.0, 10.0)]);
    }

    #[test]
    fn test_insert_point_between() {
        let mut set = IntervalSet::from(vec![iv(0.0, 1.0), iv(4.0, 5.0)]);
        set.insert(iv(2.0, 2.0));
        assert_eq!(set, vec![iv(0.0, 1.0), iv(2.0, 2.0), iv(4.0, 5.0)]);
    }

    // ── Queries ───────────────────────────────────────────────────────

    #[test]
    fn test_measure_and_count() {
        let set = IntervalSet::from(vec![iv(0.0, 10.0), iv(20.0, 25.0)]);
        assert_eq!(set.interval_count(), 2);
        assert_eq!(set.measure().value(), 15.0);
        assert_eq!(set.bounds(), Some(iv(0.0, 25.0)));
    }

    #[test]
    fn test_contains_point_checks_closed_bounds() {
        let set = IntervalSet::from(vec![iv(0.0, 10.0), iv(20.0, 25.0)]);
        assert!(set.contains_point(s(0.0)));
        assert!(set.contains_point(s(10.0)));
        assert!(set.contains_point(s(22.0)));
        assert!(!set.contains_point(s(15.0)));
        assert!(!set.contains_point(s(-1.0)));
        assert!(!set.contains_point(s(26.0)));
    }

    #[test]
    fn test_to_other_unit_keeps_shape() {
        let set = IntervalSet::from(vec![iv(0.0, 43200.0), iv(86400.0, 172800.0)]);
        let days: IntervalSet<qtty::Day> = set.to();
        assert_eq!(days.len(), 2);
        assert!((days[1].end().value() - 2.0).abs() < 1e-12);
    }

    // ── Set operations ────────────────────────────────────────────────

    #[test]
    fn test_complement_and_difference() {
        let set = IntervalSet::from(vec![iv(20.0, 40.0), iv(60.0, 80.0)]);
        assert_eq!(
            set.complement(iv(0.0, 100.0)),
            vec![iv(0.0, 20.0), iv(40.0, 60.0), iv(80.0, 100.0)]
        );
        let cut = IntervalSet::from(iv(30.0, 70.0));
        assert_eq!(set.difference(&cut), vec![iv(20.0, 30.0), iv(70.0, 80.0)]);
    }

    #[test]
    fn test_window_adjustments() {
        let set = IntervalSet::from(vec![iv(0.0, 1.0), iv(1.5, 4.0), iv(10.0, 10.2)]);
        assert_eq!(set.fill_gaps(s(1.0)), vec![iv(0.0, 4.0), iv(10.0, 10.2)]);
        assert_eq!(set.filter_short(s(0.5)), vec![iv(0.0, 1.0), iv(1.5, 4.0)]);
        assert_eq!(
            set.expand(s(0.5), s(0.0)),
            vec![iv(-0.5, 4.0), iv(9.5, 10.2)]
        );
    }

    #[test]
    fn test_union_and_intersection_are_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let a = random_set(&mut rng);
            assert_eq!(a.union(&a), a);
            assert_eq!(a.intersection(&a), a);
        }
    }

    #[test]
    fn test_union_and_intersection_commute_and_associate() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let a = random_set(&mut rng);
            let b = random_set(&mut rng);
            let c = random_set(&mut rng);
            assert_eq!(a.union(&b), b.union(&a));
            assert_eq!(a.intersection(&b), b.intersection(&a));
            assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
            assert_eq!(
                a.intersection(&b).intersection(&c),
                a.intersection(&b.intersection(&c))
            );
        }
    }

    #[test]
    fn test_union_with_complement_restores_window() {
        let mut rng = StdRng::seed_from_u64(23);
        let within = iv(-10.0, 120.0);
        for _ in 0..200 {
            let a = random_set(&mut rng);
            let whole = a.union(&a.complement(within));
            assert_eq!(whole, vec![within]);
        }
    }

    #[test]
    fn test_operations_preserve_canonical_form() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let a = random_set(&mut rng);
            let b = random_set(&mut rng);
            for set in [
                a.union(&b),
                a.intersection(&b),
                a.difference(&b),
                a.complement(iv(0.0, 100.0)),
            ] {
                assert!(operations::assertions::is_canonical(set.as_slice()));
            }
        }
    }

    // ── Display / iteration ───────────────────────────────────────────

    #[test]
    fn test_display_format() {
        let set = IntervalSet::from(vec![iv(0.0, 10.0), iv(20.0, 30.0)]);
        let s = format!("{}", set);
        assert!(s.starts_with('{'));
        assert!(s.ends_with('}'));
        assert!(s.contains("20.000000"));
    }

    #[test]
    fn test_into_iter_owned_and_borrowed() {
        let set = IntervalSet::from(vec![iv(0.0, 10.0), iv(20.0, 30.0)]);
        assert_eq!((&set).into_iter().count(), 2);
        assert_eq!(set.into_iter().collect::<Vec<_>>().len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_normalizes_and_validates() {
        let set: IntervalSet<Second> =
            serde_json::from_str(r#"[{"start":2.0,"end":5.0},{"start":1.0,"end":3.0}]"#).unwrap();
        assert_eq!(set, vec![iv(1.0, 5.0)]);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(serde_json::from_str::<IntervalSet<Second>>(&json).unwrap(), set);

        let bad = serde_json::from_str::<IntervalSet<Second>>(r#"[{"start":4.0,"end":1.0}]"#);
        assert!(bad.is_err());
    }
}
