//! Target-quantity callbacks supplied by domain code.
//!
//! The engine treats these as opaque, possibly slow, synchronous calls. A
//! callback failure is propagated as [`GfError::Callback`] and ends the search.

use qtty::{Quantity, Unit};

use crate::error::{GfError, GfResult};

/// A boolean condition of time, for binary state searches.
pub trait BooleanQuantity<U: Unit> {
    fn state(&mut self, t: Quantity<U>) -> GfResult<bool>;
}

/// A scalar function of time plus its trend, for numeric searches.
///
/// `is_decreasing` locates local extrema and must agree with `value`.
pub trait ScalarQuantity<U: Unit> {
    fn value(&mut self, t: Quantity<U>) -> GfResult<f64>;

    fn is_decreasing(&mut self, t: Quantity<U>) -> GfResult<bool>;
}

impl<U: Unit, F> BooleanQuantity<U> for F
where
    F: FnMut(Quantity<U>) -> bool,
{
    fn state(&mut self, t: Quantity<U>) -> GfResult<bool> {
        Ok(self(t))
    }
}

/// Adapts a closure that can fail into a boolean quantity.
///
/// ```rust
/// use qtty::{Quantity, Second};
/// use gfsearch::search::{BooleanQuantity, Fallible};
///
/// let mut lit = Fallible(|t: Quantity<Second>| -> Result<bool, std::io::Error> {
///     Ok(t.value() > 1.0)
/// });
/// assert!(lit.state(Quantity::new(2.0)).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<U: Unit, F, E> BooleanQuantity<U> for Fallible<F>
where
    F: FnMut(Quantity<U>) -> Result<bool, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    fn state(&mut self, t: Quantity<U>) -> GfResult<bool> {
        (self.0)(t).map_err(GfError::callback)
    }
}

/// Scalar quantity whose trend is taken from a central finite difference.
#[derive(Debug, Clone, Copy)]
pub struct ScalarFn<F> {
    f: F,
    half_width: f64,
}

impl<F> ScalarFn<F> {
    /// Default half-width of the difference stencil, in axis units.
    pub const DEFAULT_HALF_WIDTH: f64 = 1e-4;

    pub fn new(f: F) -> Self {
        Self {
            f,
            half_width: Self::DEFAULT_HALF_WIDTH,
        }
    }

    pub fn with_half_width(mut self, half_width: f64) -> Self {
        self.half_width = half_width;
        self
    }
}

impl<U: Unit, F> ScalarQuantity<U> for ScalarFn<F>
where
    F: FnMut(Quantity<U>) -> f64,
{
    fn value(&mut self, t: Quantity<U>) -> GfResult<f64> {
        Ok((self.f)(t))
    }

    fn is_decreasing(&mut self, t: Quantity<U>) -> GfResult<bool> {
        let ahead = (self.f)(Quantity::new(t.value() + self.half_width));
        let behind = (self.f)(Quantity::new(t.value() - self.half_width));
        Ok(ahead < behind)
    }
}

/// Scalar quantity with an explicit rate of change.
#[derive(Debug, Clone, Copy)]
pub struct ScalarWithRate<F, G> {
    value: F,
    rate: G,
}

impl<F, G> ScalarWithRate<F, G> {
    pub fn new(value: F, rate: G) -> Self {
        Self { value, rate }
    }
}

impl<U: Unit, F, G> ScalarQuantity<U> for ScalarWithRate<F, G>
where
    F: FnMut(Quantity<U>) -> f64,
    G: FnMut(Quantity<U>) -> f64,
{
    fn value(&mut self, t: Quantity<U>) -> GfResult<f64> {
        Ok((self.value)(t))
    }

    fn is_decreasing(&mut self, t: Quantity<U>) -> GfResult<bool> {
        Ok((self.rate)(t) < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Second;

    fn s(v: f64) -> Quantity<Second> {
        Quantity::new(v)
    }

    #[derive(Debug)]
    struct LookupFailed;

    impl std::fmt::Display for LookupFailed {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "no ephemeris data")
        }
    }

    impl std::error::Error for LookupFailed {}

    #[test]
    fn test_closure_is_boolean_quantity() {
        let mut q = |t: Quantity<Second>| t.value() >= 2.0;
        assert!(!q.state(s(1.0)).unwrap());
        assert!(q.state(s(2.0)).unwrap());
    }

    #[test]
    fn test_fallible_propagates_errors() {
        let mut q = Fallible(|t: Quantity<Second>| {
            if t.value() < 5.0 {
                Ok(true)
            } else {
                Err(LookupFailed)
            }
        });
        assert!(q.state(s(1.0)).unwrap());
        let err = q.state(s(6.0)).unwrap_err();
        assert!(matches!(err, GfError::Callback(_)));
        assert!(err.to_string().contains("no ephemeris data"));
    }

    #[test]
    fn test_finite_difference_trend() {
        let mut q = ScalarFn::new(|t: Quantity<Second>| (t.value() - 3.0).powi(2));
        assert!(q.is_decreasing(s(1.0)).unwrap());
        assert!(!q.is_decreasing(s(4.0)).unwrap());
        assert_eq!(q.value(s(5.0)).unwrap(), 4.0);
    }

    #[test]
    fn test_explicit_rate_trend() {
        let mut q = ScalarWithRate::new(
            |t: Quantity<Second>| t.value().sin(),
            |t: Quantity<Second>| t.value().cos(),
        );
        assert!(!q.is_decreasing(s(0.5)).unwrap());
        assert!(q.is_decreasing(s(2.0)).unwrap());
    }
}
