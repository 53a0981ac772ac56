//! Numeric search: a scalar quantity checked against a [`GfConstraint`].
//!
//! Thresholds reduce to a binary scan of `value(t) <op> reference + adjustment`.
//! Local extrema are the points where the quantity's trend flips. Absolute
//! extrema take the best local extremum, then optionally widen it into every
//! time the quantity comes within the adjustment of that value.

use qtty::{Quantity, Unit};

use super::binary::{scan_states, Emit, Pass};
use super::config::{SearchConfig, TieBreak};
use super::constraint::GfConstraint;
use super::quantity::ScalarQuantity;
use super::SearchOutcome;
use crate::error::GfResult;
use crate::window::{Interval, IntervalSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extreme {
    Maximum,
    Minimum,
}

impl Extreme {
    /// Transition of the "is decreasing" state that marks this extremum.
    fn trend_flip(self) -> Emit {
        match self {
            Extreme::Maximum => Emit::Rises,
            Extreme::Minimum => Emit::Falls,
        }
    }

    fn beats(self, candidate: f64, best: f64) -> bool {
        match self {
            Extreme::Maximum => candidate > best,
            Extreme::Minimum => candidate < best,
        }
    }

    fn within(self, value: f64, extreme: f64, adjustment: f64) -> bool {
        match self {
            Extreme::Maximum => value >= extreme - adjustment,
            Extreme::Minimum => value <= extreme + adjustment,
        }
    }
}

/// Finds where `quantity` satisfies `constraint` inside `confinement`.
///
/// Local and unadjusted absolute extrema are reported as single-point
/// intervals. A quantity that is monotonic over the whole window has no
/// extrema; the result is then empty.
///
/// # Errors
///
/// Same failure modes as [`run_binary_search`](super::run_binary_search),
/// plus [`GfError::InvalidAdjustment`](crate::GfError::InvalidAdjustment)
/// for a constraint whose adjustment fails validation.
pub fn run_numeric_search<U, Q>(
    confinement: &IntervalSet<U>,
    constraint: &GfConstraint,
    config: &mut SearchConfig<'_, U>,
    quantity: &mut Q,
    max_workspace_intervals: usize,
) -> GfResult<SearchOutcome<U>>
where
    U: Unit,
    Q: ScalarQuantity<U> + ?Sized,
{
    constraint.validate()?;
    log::debug!("numeric search for {}", constraint);

    match *constraint {
        GfConstraint::GreaterThan { .. } | GfConstraint::LessThan { .. } => {
            let target = constraint.target().unwrap_or_default();
            let above = matches!(constraint, GfConstraint::GreaterThan { .. });
            let mut state = |t: Quantity<U>| -> GfResult<bool> {
                let v = quantity.value(t)?;
                Ok(if above { v > target } else { v < target })
            };
            scan_states(
                confinement,
                config,
                max_workspace_intervals,
                Pass::new(Emit::Intervals).with_messages("Threshold search", "done."),
                &mut state,
            )
        }
        GfConstraint::EqualTo { .. } => {
            let target = constraint.target().unwrap_or_default();
            let mut state = |t: Quantity<U>| -> GfResult<bool> { Ok(quantity.value(t)? > target) };
            scan_states(
                confinement,
                config,
                max_workspace_intervals,
                Pass::new(Emit::Crossings).with_messages("Equality search", "done."),
                &mut state,
            )
        }
        GfConstraint::LocalMaximum => local_extrema(
            confinement,
            config,
            quantity,
            max_workspace_intervals,
            Extreme::Maximum,
        ),
        GfConstraint::LocalMinimum => local_extrema(
            confinement,
            config,
            quantity,
            max_workspace_intervals,
            Extreme::Minimum,
        ),
        GfConstraint::AbsoluteMaximum { adjustment } => absolute_extremum(
            confinement,
            config,
            quantity,
            max_workspace_intervals,
            Extreme::Maximum,
            adjustment,
        ),
        GfConstraint::AbsoluteMinimum { adjustment } => absolute_extremum(
            confinement,
            config,
            quantity,
            max_workspace_intervals,
            Extreme::Minimum,
            adjustment,
        ),
    }
}

fn local_extrema<U, Q>(
    confinement: &IntervalSet<U>,
    config: &mut SearchConfig<'_, U>,
    quantity: &mut Q,
    max_workspace_intervals: usize,
    extreme: Extreme,
) -> GfResult<SearchOutcome<U>>
where
    U: Unit,
    Q: ScalarQuantity<U> + ?Sized,
{
    let mut trend = |t: Quantity<U>| quantity.is_decreasing(t);
    scan_states(
        confinement,
        config,
        max_workspace_intervals,
        Pass::new(extreme.trend_flip()).with_messages("Extremum search", "done."),
        &mut trend,
    )
}

fn absolute_extremum<U, Q>(
    confinement: &IntervalSet<U>,
    config: &mut SearchConfig<'_, U>,
    quantity: &mut Q,
    max_workspace_intervals: usize,
    extreme: Extreme,
    adjustment: f64,
) -> GfResult<SearchOutcome<U>>
where
    U: Unit,
    Q: ScalarQuantity<U> + ?Sized,
{
    let candidates = local_extrema(
        confinement,
        config,
        quantity,
        max_workspace_intervals,
        extreme,
    )?;

    let keep_ties = config.tie_break() == TieBreak::KeepAll;
    let mut best: Vec<Quantity<U>> = Vec::new();
    let mut best_value: Option<f64> = None;
    for candidate in candidates.window() {
        let t = candidate.start();
        let v = quantity.value(t)?;
        match best_value {
            Some(b) if extreme.beats(v, b) => {
                best.clear();
                best.push(t);
                best_value = Some(v);
            }
            Some(b) if v == b => {
                if keep_ties {
                    best.push(t);
                }
            }
            Some(_) => {}
            None => {
                best.push(t);
                best_value = Some(v);
            }
        }
    }

    let Some(extreme_value) = best_value else {
        log::debug!("no interior {:?} found", extreme);
        return Ok(SearchOutcome::new(IntervalSet::new(), candidates.status()));
    };
    log::debug!(
        "absolute {:?} {} at {} point(s) among {} candidate(s)",
        extreme,
        extreme_value,
        best.len(),
        candidates.window().interval_count()
    );

    if adjustment == 0.0 || candidates.is_interrupted() {
        let window = best
            .into_iter()
            .map(|t| Interval::new_unchecked(t, t))
            .collect();
        return Ok(SearchOutcome::new(window, candidates.status()));
    }

    let mut state = |t: Quantity<U>| -> GfResult<bool> {
        Ok(extreme.within(quantity.value(t)?, extreme_value, adjustment))
    };
    scan_states(
        confinement,
        config,
        max_workspace_intervals,
        Pass::new(Emit::Intervals).with_messages("Adjusted extremum search", "done."),
        &mut state,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GfError;
    use crate::search::constraint::Relation;
    use crate::search::quantity::{ScalarFn, ScalarWithRate};
    use qtty::Second;
    use std::f64::consts::PI;

    fn window(pairs: &[(f64, f64)]) -> IntervalSet<Second> {
        IntervalSet::from_pairs(pairs).unwrap()
    }

    fn config(step: f64) -> SearchConfig<'static, Second> {
        SearchConfig::new(Quantity::new(step)).with_tolerance(Quantity::new(1e-9))
    }

    fn sine() -> impl ScalarQuantity<Second> {
        ScalarWithRate::new(
            |t: Quantity<Second>| t.value().sin(),
            |t: Quantity<Second>| t.value().cos(),
        )
    }

    fn starts(set: &IntervalSet<Second>) -> Vec<f64> {
        set.iter().map(|iv| iv.start().value()).collect()
    }

    #[test]
    fn test_less_than_threshold() {
        let mut q = ScalarFn::new(|t: Quantity<Second>| t.value() / 10.0);
        let outcome = run_numeric_search(
            &window(&[(0.0, 10.0)]),
            &GfConstraint::less_than(0.5),
            &mut config(0.1),
            &mut q,
            4,
        )
        .unwrap();
        let result = outcome.window();
        assert_eq!(result.interval_count(), 1);
        assert_eq!(result[0].start().value(), 0.0);
        assert!((result[0].end().value() - 5.0).abs() < 1e-8);
    }

    #[test]
    fn test_adjustment_moves_threshold() {
        let mut q = ScalarFn::new(|t: Quantity<Second>| t.value() / 10.0);
        let constraint = GfConstraint::greater_than(0.5).with_adjustment(0.2).unwrap();
        let outcome =
            run_numeric_search(&window(&[(0.0, 10.0)]), &constraint, &mut config(0.1), &mut q, 4)
                .unwrap();
        assert!((outcome.window()[0].start().value() - 7.0).abs() < 1e-8);
        assert_eq!(outcome.window()[0].end().value(), 10.0);
    }

    #[test]
    fn test_equality_reports_crossing_points() {
        let outcome = run_numeric_search(
            &window(&[(0.0, 2.0 * PI)]),
            &GfConstraint::equal_to(0.5),
            &mut config(0.05),
            &mut sine(),
            8,
        )
        .unwrap();
        let points = starts(outcome.window());
        assert_eq!(points.len(), 2);
        assert!((points[0] - PI / 6.0).abs() < 1e-8);
        assert!((points[1] - 5.0 * PI / 6.0).abs() < 1e-8);
        assert!(outcome.window().iter().all(|iv| iv.is_point()));
    }

    #[test]
    fn test_local_extrema_of_sine() {
        let ctx = window(&[(0.0, 4.0 * PI)]);
        let maxima = run_numeric_search(
            &ctx,
            &GfConstraint::local_maximum(),
            &mut config(0.05),
            &mut sine(),
            8,
        )
        .unwrap();
        let minima = run_numeric_search(
            &ctx,
            &GfConstraint::local_minimum(),
            &mut config(0.05),
            &mut sine(),
            8,
        )
        .unwrap();

        let maxima = starts(maxima.window());
        assert_eq!(maxima.len(), 2);
        assert!((maxima[0] - PI / 2.0).abs() < 1e-8);
        assert!((maxima[1] - 5.0 * PI / 2.0).abs() < 1e-8);

        let minima = starts(minima.window());
        assert_eq!(minima.len(), 2);
        assert!((minima[0] - 3.0 * PI / 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_absolute_maximum_picks_global_best() {
        // Damped: the first peak is the highest.
        let mut q = ScalarFn::new(|t: Quantity<Second>| (-0.1 * t.value()).exp() * t.value().sin())
            .with_half_width(1e-7);
        let outcome = run_numeric_search(
            &window(&[(0.0, 20.0)]),
            &GfConstraint::absolute_maximum(),
            &mut config(0.05),
            &mut q,
            8,
        )
        .unwrap();
        let points = starts(outcome.window());
        assert_eq!(points.len(), 1);
        // d/dt e^{-0.1t} sin t = 0  =>  tan t = 10
        assert!((points[0] - 10f64.atan()).abs() < 1e-5);
    }

    #[test]
    fn test_absolute_minimum_of_parabola() {
        let mut q = ScalarWithRate::new(
            |t: Quantity<Second>| (t.value() - 3.0).powi(2),
            |t: Quantity<Second>| 2.0 * (t.value() - 3.0),
        );
        let outcome = run_numeric_search(
            &window(&[(0.0, 10.0)]),
            &GfConstraint::absolute_minimum(),
            &mut config(0.25),
            &mut q,
            4,
        )
        .unwrap();
        assert!((outcome.window()[0].start().value() - 3.0).abs() < 1e-8);
    }

    #[test]
    fn test_adjusted_absolute_maximum_widens_to_interval() {
        let constraint =
            GfConstraint::adjusted_extremum(Relation::AdjustedAbsoluteMaximum, 0.5).unwrap();
        let outcome = run_numeric_search(
            &window(&[(0.0, 2.0 * PI)]),
            &constraint,
            &mut config(0.05),
            &mut sine(),
            4,
        )
        .unwrap();
        // sin t >= 0.5 on [pi/6, 5pi/6]
        let result = outcome.window();
        assert_eq!(result.interval_count(), 1);
        assert!((result[0].start().value() - PI / 6.0).abs() < 1e-6);
        assert!((result[0].end().value() - 5.0 * PI / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic_quantity_has_no_extremum() {
        let mut q = ScalarWithRate::new(|t: Quantity<Second>| t.value(), |_: Quantity<Second>| 1.0);
        for constraint in [
            GfConstraint::local_maximum(),
            GfConstraint::local_minimum(),
            GfConstraint::absolute_maximum(),
            GfConstraint::absolute_minimum(),
        ] {
            let outcome = run_numeric_search(
                &window(&[(0.0, 10.0)]),
                &constraint,
                &mut config(0.5),
                &mut q,
                4,
            )
            .unwrap();
            assert!(outcome.window().is_empty(), "{constraint} gave {}", outcome.window());
        }
    }

    #[test]
    fn test_invalid_adjustment_is_rejected_before_scanning() {
        let mut calls = 0usize;
        let mut q = ScalarFn::new(|t: Quantity<Second>| {
            calls += 1;
            t.value()
        });
        let constraint = GfConstraint::AbsoluteMaximum { adjustment: -1.0 };
        let err = run_numeric_search(
            &window(&[(0.0, 1.0)]),
            &constraint,
            &mut config(0.1),
            &mut q,
            4,
        )
        .unwrap_err();
        assert!(matches!(err, GfError::InvalidAdjustment(_)));
        drop(q);
        assert_eq!(calls, 0);
    }
}
