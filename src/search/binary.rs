//! Transition-detection scan shared by every search variant.
//!
//! A scan walks each confinement interval with the [`Sampler`], watches a
//! boolean state for changes between consecutive samples and hands each
//! change bracket to the refiner. What the refined transition times become
//! depends on the [`Emit`] mode of the pass.

use qtty::{Quantity, Unit};

use super::config::SearchConfig;
use super::quantity::BooleanQuantity;
use super::refiner::refine_transition;
use super::sampler::Sampler;
use super::{SearchOutcome, SearchStatus};
use crate::error::{GfError, GfResult};
use crate::window::{Interval, IntervalSet};

/// What a scan records at each refined transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Emit {
    /// Maximal sub-intervals where the state is true.
    Intervals,
    /// A point at every transition.
    Crossings,
    /// A point at every false-to-true transition.
    Rises,
    /// A point at every true-to-false transition.
    Falls,
}

/// One scan over the confinement window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pass<'m> {
    pub emit: Emit,
    pub begin: &'m str,
    pub end: &'m str,
}

impl Pass<'static> {
    pub const fn new(emit: Emit) -> Self {
        Self {
            emit,
            begin: "Search",
            end: "done.",
        }
    }
}

impl<'m> Pass<'m> {
    pub const fn with_messages(mut self, begin: &'m str, end: &'m str) -> Self {
        self.begin = begin;
        self.end = end;
        self
    }
}

/// Result accumulator bounded by the caller's interval budget.
struct Accumulator<U: Unit> {
    window: IntervalSet<U>,
    capacity: usize,
}

impl<U: Unit> Accumulator<U> {
    fn new(capacity: usize) -> Self {
        Self {
            window: IntervalSet::new(),
            capacity,
        }
    }

    fn push(&mut self, interval: Interval<U>) -> GfResult<()> {
        self.window.insert(interval);
        if self.window.interval_count() > self.capacity {
            return Err(GfError::WorkspaceOverflow {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

/// Runs one scan pass of `state` over `confinement`.
///
/// Validates the configuration and the interval budget, polls the interrupt
/// hook before every sample and drives the progress hooks. The result is
/// clipped to the confinement window.
pub(crate) fn scan_states<U, S>(
    confinement: &IntervalSet<U>,
    config: &mut SearchConfig<'_, U>,
    max_result_intervals: usize,
    pass: Pass<'_>,
    state: &mut S,
) -> GfResult<SearchOutcome<U>>
where
    U: Unit,
    S: FnMut(Quantity<U>) -> GfResult<bool>,
{
    config.validate()?;
    if max_result_intervals == 0 {
        return Err(GfError::InvalidWorkspaceSize);
    }

    log::debug!(
        "{:?} scan over {} confinement interval(s), step {:?}, tolerance {}",
        pass.emit,
        confinement.interval_count(),
        config.step(),
        config.tolerance().value()
    );

    let (params, mut hooks) = config.split();
    let mut found = Accumulator::new(max_result_intervals);
    let mut status = SearchStatus::Completed;

    'confinement: for &bounds in confinement {
        hooks.initialize(bounds, pass.begin, pass.end);

        let mut previous: Option<(Quantity<U>, bool)> = None;
        let mut open: Option<Quantity<U>> = None;

        for sample in Sampler::new(bounds, params.step) {
            if hooks.interrupted() {
                log::debug!("scan interrupted before sample in {}", bounds);
                hooks.finalize();
                status = SearchStatus::Interrupted;
                break 'confinement;
            }

            let t = sample?;
            let s = state(t)?;

            match previous {
                None => {
                    if s && pass.emit == Emit::Intervals {
                        open = Some(t);
                    }
                }
                Some((t_prev, s_prev)) if s_prev != s => {
                    let edge = refine_transition(
                        (t_prev, s_prev),
                        (t, s),
                        params.tolerance,
                        params.refinement,
                        &mut *state,
                    )?;
                    log::trace!(
                        "transition {} -> {} at {} in ({}, {})",
                        s_prev,
                        s,
                        edge.value(),
                        t_prev.value(),
                        t.value()
                    );

                    let completed = match pass.emit {
                        Emit::Intervals if s => {
                            open = Some(edge);
                            None
                        }
                        Emit::Intervals => open
                            .take()
                            .map(|start| Interval::new(start, edge))
                            .transpose()?,
                        Emit::Crossings => Some(Interval::new_unchecked(edge, edge)),
                        Emit::Rises if s => Some(Interval::new_unchecked(edge, edge)),
                        Emit::Falls if !s => Some(Interval::new_unchecked(edge, edge)),
                        Emit::Rises | Emit::Falls => None,
                    };
                    if let Some(interval) = completed {
                        found.push(interval)?;
                        hooks.update(bounds, t);
                    }
                }
                Some(_) => {}
            }

            previous = Some((t, s));
        }

        if let Some(start) = open.take() {
            found.push(Interval::new(start, bounds.end())?)?;
        }
        hooks.update(bounds, bounds.end());
        hooks.finalize();
    }

    let window = found.window.intersection(confinement);
    log::debug!(
        "{:?} scan {:?} with {} result interval(s)",
        pass.emit,
        status,
        window.interval_count()
    );
    Ok(SearchOutcome::new(window, status))
}

/// Finds the sub-intervals of `confinement` where `quantity` is true.
///
/// # Errors
///
/// Fails with [`GfError::InvalidStep`], [`GfError::InvalidTolerance`],
/// [`GfError::InvalidWorkspaceSize`], [`GfError::WorkspaceOverflow`] when the
/// result needs more than `max_result_intervals` intervals, or
/// [`GfError::Callback`] when the quantity fails. An interrupt is not an
/// error: the outcome carries the intervals completed so far.
pub fn run_binary_search<U, Q>(
    confinement: &IntervalSet<U>,
    config: &mut SearchConfig<'_, U>,
    quantity: &mut Q,
    max_result_intervals: usize,
) -> GfResult<SearchOutcome<U>>
where
    U: Unit,
    Q: BooleanQuantity<U> + ?Sized,
{
    let mut state = |t: Quantity<U>| quantity.state(t);
    scan_states(
        confinement,
        config,
        max_result_intervals,
        Pass::new(Emit::Intervals).with_messages("Binary state search", "done."),
        &mut state,
    )
}
