//! Fixed- or variable-step walk across one confinement interval.

use qtty::{Quantity, Unit};

use super::config::StepSize;
use crate::error::{GfError, GfResult};
use crate::window::Interval;

/// Iterator over sample times of one confinement interval.
///
/// Yields `start`, then `start + step`, ... and finally exactly `end`; the
/// last step is clamped so the walk never overshoots. A degenerate interval
/// yields its single point once.
pub struct Sampler<'c, 'a, U: Unit> {
    step: &'c StepSize<'a, U>,
    next: Option<Quantity<U>>,
    end: Quantity<U>,
}

impl<'c, 'a, U: Unit> Sampler<'c, 'a, U> {
    pub fn new(bounds: Interval<U>, step: &'c StepSize<'a, U>) -> Self {
        Self {
            step,
            next: Some(bounds.start()),
            end: bounds.end(),
        }
    }
}

impl<U: Unit> Iterator for Sampler<'_, '_, U> {
    type Item = GfResult<Quantity<U>>;

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.next.take()?;
        if t.value() >= self.end.value() {
            return Some(Ok(t));
        }
        let step = match self.step.at(t) {
            Ok(step) => step,
            Err(err) => return Some(Err(err)),
        };
        let ahead = t + step;
        if ahead.value() <= t.value() {
            // Step lost below the resolution of `t`.
            return Some(Err(GfError::InvalidStep(step.value())));
        }
        self.next = Some(if ahead.value() < self.end.value() {
            ahead
        } else {
            self.end
        });
        Some(Ok(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Second;

    fn iv(start: f64, end: f64) -> Interval<Second> {
        Interval::from_f64(start, end).unwrap()
    }

    fn times(bounds: Interval<Second>, step: &StepSize<'_, Second>) -> Vec<f64> {
        Sampler::new(bounds, step)
            .map(|t| t.unwrap().value())
            .collect()
    }

    #[test]
    fn test_clamps_last_sample_to_end() {
        let step = StepSize::Constant(Quantity::new(0.4));
        let t = times(iv(0.0, 1.0), &step);
        assert_eq!(t.len(), 4);
        assert_eq!(t[0], 0.0);
        assert!((t[2] - 0.8).abs() < 1e-12);
        assert_eq!(t[3], 1.0);
    }

    #[test]
    fn test_exact_multiple_does_not_repeat_end() {
        let step = StepSize::Constant(Quantity::new(0.5));
        assert_eq!(times(iv(0.0, 1.0), &step), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_degenerate_interval_yields_one_sample() {
        let step = StepSize::Constant(Quantity::new(1.0));
        assert_eq!(times(iv(3.0, 3.0), &step), vec![3.0]);
    }

    #[test]
    fn test_variable_step_follows_time() {
        let step: StepSize<'_, Second> =
            StepSize::Variable(Box::new(|t: Quantity<Second>| Quantity::new(1.0 + t.value())));
        assert_eq!(times(iv(0.0, 10.0), &step), vec![0.0, 1.0, 3.0, 7.0, 10.0]);
    }

    #[test]
    fn test_invalid_step_surfaces_as_error() {
        let step = StepSize::Constant(Quantity::<Second>::new(-1.0));
        let mut sampler = Sampler::new(iv(0.0, 1.0), &step);
        assert!(matches!(sampler.next(), Some(Err(GfError::InvalidStep(_)))));
    }
}
