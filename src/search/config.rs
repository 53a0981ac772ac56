//! Search configuration: step, tolerance, refinement and hooks.

use qtty::{Quantity, Unit};

use super::progress::{InterruptHandler, ProgressReporter};
use crate::error::{GfError, GfResult};
use crate::window::Interval;

/// Default convergence tolerance, in axis units.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Sampling step used to walk a confinement interval.
///
/// The step must be shorter than the shortest feature (interval or gap) the
/// caller wants to detect; anything narrower may fall between two samples.
pub enum StepSize<'a, U: Unit> {
    Constant(Quantity<U>),
    /// Step chosen from the current sample time.
    Variable(Box<dyn Fn(Quantity<U>) -> Quantity<U> + 'a>),
}

impl<U: Unit> StepSize<'_, U> {
    /// Returns the step to take from `t`.
    ///
    /// # Errors
    ///
    /// Returns [`GfError::InvalidStep`] for non-positive or non-finite steps.
    pub fn at(&self, t: Quantity<U>) -> GfResult<Quantity<U>> {
        let step = match self {
            StepSize::Constant(step) => *step,
            StepSize::Variable(f) => f(t),
        };
        if step.value() > 0.0 && step.value().is_finite() {
            Ok(step)
        } else {
            Err(GfError::InvalidStep(step.value()))
        }
    }
}

impl<U: Unit> std::fmt::Debug for StepSize<'_, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepSize::Constant(step) => write!(f, "Constant({})", step.value()),
            StepSize::Variable(_) => write!(f, "Variable(..)"),
        }
    }
}

/// Chooses the next trial time inside a transition bracket.
///
/// `t1` has state `s1` and `t2` has state `s2`. The returned time should lie
/// strictly inside `(t1, t2)`; a guess outside is replaced by the midpoint.
pub trait Refinement<U: Unit> {
    fn next_guess(&self, t1: Quantity<U>, t2: Quantity<U>, s1: bool, s2: bool) -> Quantity<U>;
}

impl<U: Unit, F> Refinement<U> for F
where
    F: Fn(Quantity<U>, Quantity<U>, bool, bool) -> Quantity<U>,
{
    fn next_guess(&self, t1: Quantity<U>, t2: Quantity<U>, s1: bool, s2: bool) -> Quantity<U> {
        self(t1, t2, s1, s2)
    }
}

/// Plain bisection: always try the midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bisection;

impl<U: Unit> Refinement<U> for Bisection {
    fn next_guess(&self, t1: Quantity<U>, t2: Quantity<U>, _s1: bool, _s2: bool) -> Quantity<U> {
        midpoint(t1, t2)
    }
}

pub(crate) fn midpoint<U: Unit>(a: Quantity<U>, b: Quantity<U>) -> Quantity<U> {
    Quantity::new(a.value() + 0.5 * (b.value() - a.value()))
}

/// Policy for absolute-extremum searches when several local extrema share
/// the best value exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Report every candidate equal to the best value.
    #[default]
    KeepAll,
    /// Report only the earliest candidate.
    KeepFirst,
}

/// Everything a single search call needs besides the window and quantity.
///
/// Owned by the caller for the duration of one call. Step and tolerance may be
/// changed between calls; nothing else persists.
///
/// ```rust
/// use qtty::{Quantity, Second};
/// use gfsearch::search::{SearchConfig, TieBreak};
///
/// let config = SearchConfig::<Second>::new(Quantity::new(60.0))
///     .with_tolerance(Quantity::new(1e-3))
///     .with_tie_break(TieBreak::KeepFirst);
/// assert!(config.validate().is_ok());
/// ```
pub struct SearchConfig<'a, U: Unit> {
    step: StepSize<'a, U>,
    tolerance: Quantity<U>,
    refinement: Box<dyn Refinement<U> + 'a>,
    reporter: Option<Box<dyn ProgressReporter<U> + 'a>>,
    interrupt: Option<Box<dyn InterruptHandler + 'a>>,
    tie_break: TieBreak,
}

impl<'a, U: Unit> SearchConfig<'a, U> {
    /// Creates a configuration with a constant step, the default tolerance,
    /// bisection refinement and no hooks.
    pub fn new(step: Quantity<U>) -> Self {
        Self {
            step: StepSize::Constant(step),
            tolerance: Quantity::new(DEFAULT_TOLERANCE),
            refinement: Box::new(Bisection),
            reporter: None,
            interrupt: None,
            tie_break: TieBreak::default(),
        }
    }

    /// Replaces the constant step with a step chosen per sample time.
    pub fn with_variable_step<F>(mut self, step: F) -> Self
    where
        F: Fn(Quantity<U>) -> Quantity<U> + 'a,
    {
        self.step = StepSize::Variable(Box::new(step));
        self
    }

    pub fn with_tolerance(mut self, tolerance: Quantity<U>) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_refinement<R: Refinement<U> + 'a>(mut self, refinement: R) -> Self {
        self.refinement = Box::new(refinement);
        self
    }

    pub fn with_reporter<R: ProgressReporter<U> + 'a>(mut self, reporter: R) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    pub fn with_interrupt<H: InterruptHandler + 'a>(mut self, handler: H) -> Self {
        self.interrupt = Some(Box::new(handler));
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn set_step(&mut self, step: Quantity<U>) {
        self.step = StepSize::Constant(step);
    }

    pub fn set_tolerance(&mut self, tolerance: Quantity<U>) {
        self.tolerance = tolerance;
    }

    pub fn step(&self) -> &StepSize<'a, U> {
        &self.step
    }

    pub fn tolerance(&self) -> Quantity<U> {
        self.tolerance
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn is_reporting_enabled(&self) -> bool {
        self.reporter.is_some()
    }

    pub fn is_interrupt_handling_enabled(&self) -> bool {
        self.interrupt.is_some()
    }

    /// Clears the interrupt handler's status, if one is registered.
    pub fn clear_interrupt(&mut self) {
        if let Some(handler) = self.interrupt.as_mut() {
            handler.clear();
        }
    }

    /// Checks the numeric parameters.
    ///
    /// A variable step is checked at every sample instead.
    pub fn validate(&self) -> GfResult<()> {
        if let StepSize::Constant(step) = &self.step {
            if !(step.value() > 0.0 && step.value().is_finite()) {
                return Err(GfError::InvalidStep(step.value()));
            }
        }
        let tol = self.tolerance.value();
        if !(tol > 0.0 && tol.is_finite()) {
            return Err(GfError::InvalidTolerance(tol));
        }
        Ok(())
    }

    /// Splits the configuration into the read-only scan parameters and the
    /// mutable hooks so the scan loop can use both at once.
    pub(crate) fn split(&mut self) -> (ScanParams<'_, 'a, U>, Hooks<'_, 'a, U>) {
        (
            ScanParams {
                step: &self.step,
                tolerance: self.tolerance,
                refinement: self.refinement.as_ref(),
            },
            Hooks {
                reporter: self.reporter.as_deref_mut(),
                interrupt: self.interrupt.as_deref_mut(),
            },
        )
    }
}

impl<U: Unit> std::fmt::Debug for SearchConfig<'_, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("step", &self.step)
            .field("tolerance", &self.tolerance.value())
            .field("reporting", &self.reporter.is_some())
            .field("interrupt_handling", &self.interrupt.is_some())
            .field("tie_break", &self.tie_break)
            .finish()
    }
}

pub(crate) struct ScanParams<'c, 'a, U: Unit> {
    pub step: &'c StepSize<'a, U>,
    pub tolerance: Quantity<U>,
    pub refinement: &'c (dyn Refinement<U> + 'a),
}

pub(crate) struct Hooks<'c, 'a, U: Unit> {
    reporter: Option<&'c mut (dyn ProgressReporter<U> + 'a)>,
    interrupt: Option<&'c mut (dyn InterruptHandler + 'a)>,
}

impl<U: Unit> Hooks<'_, '_, U> {
    pub fn initialize(&mut self, bounds: Interval<U>, begin: &str, end: &str) {
        if let Some(reporter) = self.reporter.as_deref_mut() {
            reporter.initialize(bounds, begin, end);
        }
    }

    pub fn update(&mut self, bounds: Interval<U>, current: Quantity<U>) {
        if let Some(reporter) = self.reporter.as_deref_mut() {
            reporter.update(bounds.start(), bounds.end(), current);
        }
    }

    pub fn finalize(&mut self) {
        if let Some(reporter) = self.reporter.as_deref_mut() {
            reporter.finalize();
        }
    }

    pub fn interrupted(&mut self) -> bool {
        self.interrupt
            .as_deref_mut()
            .is_some_and(|handler| handler.interrupted())
    }
}
