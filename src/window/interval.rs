//! Closed interval `[start, end]` on a time axis.

use std::fmt::Display;

use qtty::{Quantity, Unit};

use crate::error::{GfError, GfResult};

/// Closed range `[start, end]` on the time axis of unit `U`.
///
/// Intervals are immutable once built; every constructor rejects
/// `start > end` (and NaN endpoints) with [`GfError::InvalidInterval`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<U: Unit> {
    start: Quantity<U>,
    end: Quantity<U>,
}

impl<U: Unit> Interval<U> {
    /// Creates interval `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`GfError::InvalidInterval`] if `start > end` or either
    /// endpoint is NaN.
    pub fn new(start: Quantity<U>, end: Quantity<U>) -> GfResult<Self> {
        if start.value() <= end.value() {
            Ok(Self { start, end })
        } else {
            Err(GfError::InvalidInterval {
                start: start.value(),
                end: end.value(),
            })
        }
    }

    /// Creates interval `[start, end]` from raw axis values.
    pub fn from_f64(start: f64, end: f64) -> GfResult<Self> {
        Self::new(Quantity::<U>::new(start), Quantity::<U>::new(end))
    }

    /// Creates the degenerate interval `[t, t]`.
    ///
    /// # Errors
    ///
    /// Returns [`GfError::InvalidInterval`] if `t` is NaN.
    pub fn point(t: Quantity<U>) -> GfResult<Self> {
        Self::new(t, t)
    }

    /// Builds an interval whose ordering the caller has already established.
    pub(crate) const fn new_unchecked(start: Quantity<U>, end: Quantity<U>) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> Quantity<U> {
        self.start
    }

    pub const fn end(&self) -> Quantity<U> {
        self.end
    }

    pub fn duration(&self) -> Quantity<U> {
        self.end - self.start
    }

    /// Returns true if the interval is a single point.
    pub fn is_point(&self) -> bool {
        self.start.value() == self.end.value()
    }

    /// Converts this interval to another unit of the same dimension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qtty::*;
    /// use gfsearch::window::Interval;
    ///
    /// let interval_sec = Interval::<Second>::from_f64(0.0, 86400.0).unwrap();
    /// let interval_day: Interval<Day> = interval_sec.to();
    /// assert!((interval_day.end().value() - 1.0).abs() < 1e-12);
    /// ```
    pub fn to<T: Unit<Dim = U::Dim>>(self) -> Interval<T> {
        Interval::new_unchecked(self.start.to(), self.end.to())
    }

    /// Returns true if `t` ∈ `[start, end]`.
    pub fn contains(&self, t: Quantity<U>) -> bool {
        self.start.value() <= t.value() && t.value() <= self.end.value()
    }

    /// Checks if this interval shares at least one point with `other`.
    pub fn overlaps(&self, other: &Interval<U>) -> bool {
        self.start.value() <= other.end.value() && other.start.value() <= self.end.value()
    }

    pub fn intersection(&self, other: &Interval<U>) -> Option<Interval<U>> {
        if self.overlaps(other) {
            Some(Interval::new_unchecked(
                crate::window::quantity_max(self.start, other.start),
                crate::window::quantity_min(self.end, other.end),
            ))
        } else {
            None
        }
    }
}

impl<U: Unit> Display for Interval<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.start.value(), self.end.value())
    }
}

// =============================================================================
// Interval Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for Interval<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start.value())?;
        s.serialize_field("end", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for Interval<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: f64,
            end: f64,
        }

        let raw = <Raw as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_f64(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}
