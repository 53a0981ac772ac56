//! Adapting external time representations onto the search axis.
//!
//! The engine only ever sees `Quantity<U>` values on one continuous axis.
//! Callers holding times in another unit, or as absolute instants, convert
//! them here before building windows or callbacks.

use qtty::{Quantity, Unit};

/// Marker trait for units that share the same physical dimension.
///
/// Implemented automatically for every pair of units with equal `Dim`, so a
/// mismatched conversion (seconds to meters) fails to compile.
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity to another unit of the same dimension.
#[inline]
pub fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to_const::<To>()
}

/// Expresses the absolute time `t` as an offset past `epoch` on the search
/// axis, in the axis unit `To`.
///
/// ```rust
/// use qtty::{Day, Quantity, Second};
/// use gfsearch::units::axis_offset;
///
/// let epoch = Quantity::<Day>::new(60000.0);
/// let t = Quantity::<Day>::new(60000.5);
/// let offset: Quantity<Second> = axis_offset(epoch, t);
/// assert!((offset.value() - 43200.0).abs() < 1e-6);
/// ```
#[inline]
pub fn axis_offset<From, To>(epoch: Quantity<From>, t: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    convert(t - epoch)
}
