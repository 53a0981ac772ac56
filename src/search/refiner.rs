//! Narrowing a transition bracket to within the convergence tolerance.

use qtty::{Quantity, Unit};

use super::config::{midpoint, Refinement};
use crate::error::GfResult;

/// Locates the state change inside `(t1, t2)`.
///
/// `t1` must have state `s1` and `t2` state `s2 != s1`. Each iteration
/// evaluates `state` at the guess chosen by `refinement` and moves whichever
/// end shares the guess's state, until the bracket is narrower than
/// `tolerance`. Returns the midpoint of the final bracket.
///
/// If the bracket holds more than one transition the loop still terminates
/// inside `[t1, t2]`, but which transition it converges to is unspecified.
pub fn refine_transition<U, S>(
    (t1, s1): (Quantity<U>, bool),
    (t2, s2): (Quantity<U>, bool),
    tolerance: Quantity<U>,
    refinement: &dyn Refinement<U>,
    state: &mut S,
) -> GfResult<Quantity<U>>
where
    U: Unit,
    S: FnMut(Quantity<U>) -> GfResult<bool> + ?Sized,
{
    let mut lo = t1;
    let mut hi = t2;

    while (hi - lo).value() >= tolerance.value() {
        let mut guess = refinement.next_guess(lo, hi, s1, s2);
        if !(guess.value() > lo.value() && guess.value() < hi.value()) {
            log::warn!(
                "refinement guess {} outside bracket ({}, {}); using midpoint",
                guess.value(),
                lo.value(),
                hi.value()
            );
            guess = midpoint(lo, hi);
            if !(guess.value() > lo.value() && guess.value() < hi.value()) {
                // Bracket is down to adjacent floats.
                break;
            }
        }

        if state(guess)? == s1 {
            lo = guess;
        } else {
            hi = guess;
        }
    }

    Ok(midpoint(lo, hi))
}
