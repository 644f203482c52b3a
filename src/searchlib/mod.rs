//! Locating the discontinuities of piecewise-constant functions of time
//!
//! Provides [`find_discrete`], which finds the times within a bounded
//! interval at which a [`StepFunction`] changes value, and reports the new
//! value at each change point. Used for instantaneous astronomical events:
//! moon-phase quarters, season boundaries.
//!
//! The caller chooses the sampling step. It must be finer than the closest
//! spacing of the function's true transitions, or events are silently
//! missed; that is a precondition, not a detected error (see
//! [`find_discrete_checked`] for an opt-in consistency check). Concrete
//! step functions in [`crate::almanac`] document the step they need.

use log::{debug, trace};

use crate::constants::DAY_S;
use crate::errors::{Error, Result};
use crate::timelib::{Interval, Time};

/// Default refinement tolerance: half a second, in days
///
/// Sub-second timing is already below the accuracy of any practical
/// ephemeris provider, so refining further buys nothing.
pub const TOLERANCE_DEFAULT: f64 = 0.5 / DAY_S;

/// Hard cap on bisection rounds, so refinement terminates even when a
/// pathological tolerance runs into floating-point spacing
const MAX_BISECTIONS: usize = 64;

/// A function of time taking discrete values from a finite set
///
/// Implementations must be deterministic and piecewise constant with
/// finitely many discontinuities in any bounded interval. Sampling is
/// batched: one call evaluates a whole slice of Julian dates, so an
/// implementation backed by an expensive ephemeris can amortize per-call
/// overhead. Errors from the underlying provider propagate; they are
/// deterministic, so the search never retries.
pub trait StepFunction {
    /// Evaluate the function at each of the given Julian dates
    fn sample(&mut self, jd: &[f64]) -> Result<Vec<i64>>;
}

impl<F> StepFunction for F
where
    F: FnMut(&[f64]) -> Result<Vec<i64>>,
{
    fn sample(&mut self, jd: &[f64]) -> Result<Vec<i64>> {
        self(jd)
    }
}

/// A located discontinuity: the instant a step function changed value,
/// carrying the value immediately after the transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub time: Time,
    pub value: i64,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.time, self.value)
    }
}

/// A sampling bracket known to contain at least one transition
struct Bracket {
    lo: f64,
    hi: f64,
    lo_value: i64,
    hi_value: i64,
}

/// Find the times at which a step function changes value within an interval.
///
/// Samples `f` at boundaries spaced at most `step_days` apart, then refines
/// each adjacent pair of differing samples by bisection on the continuous
/// timeline until the bracket is narrower than `tolerance_days`.
///
/// Returned events are strictly increasing in time, and each carries the
/// value immediately after its transition. A function that is constant
/// throughout the interval yields an empty vector, not an error.
///
/// If `step_days` is coarser than the spacing of the function's true
/// transitions, events are silently missed; choosing an adequate step is
/// the caller's responsibility.
pub fn find_discrete<F>(
    f: &mut F,
    span: &Interval,
    step_days: f64,
    tolerance_days: f64,
) -> Result<Vec<Event>>
where
    F: StepFunction + ?Sized,
{
    if !(step_days > 0.0 && step_days.is_finite()) {
        return Err(Error::InvalidStep(step_days));
    }
    if !(tolerance_days > 0.0 && tolerance_days.is_finite()) {
        return Err(Error::InvalidTolerance(tolerance_days));
    }

    let width = span.width_days();
    if width == 0.0 {
        return Ok(Vec::new());
    }

    let samples = (width / step_days).ceil() as usize + 1;
    let jd = linspace(span.start().julian_date(), span.end().julian_date(), samples);
    let values = f.sample(&jd)?;

    let mut brackets: Vec<Bracket> = Vec::new();
    for i in 0..values.len().saturating_sub(1) {
        if values[i] != values[i + 1] {
            brackets.push(Bracket {
                lo: jd[i],
                hi: jd[i + 1],
                lo_value: values[i],
                hi_value: values[i + 1],
            });
        }
    }

    if brackets.is_empty() {
        return Ok(Vec::new());
    }
    debug!(
        "refining {} transition bracket(s) to {:.3e} days",
        brackets.len(),
        tolerance_days
    );

    // Bisect every unconverged bracket in lockstep, batching the midpoint
    // evaluations into a single sample call per round.
    for round in 0..MAX_BISECTIONS {
        let open: Vec<usize> = (0..brackets.len())
            .filter(|&i| brackets[i].hi - brackets[i].lo > tolerance_days)
            .collect();
        if open.is_empty() {
            trace!("converged after {round} bisection round(s)");
            break;
        }

        let midpoints: Vec<f64> = open
            .iter()
            .map(|&i| 0.5 * (brackets[i].lo + brackets[i].hi))
            .collect();
        let mid_values = f.sample(&midpoints)?;

        for ((&i, &mid), &value) in open.iter().zip(&midpoints).zip(&mid_values) {
            let b = &mut brackets[i];
            if value == b.lo_value {
                b.lo = mid;
            } else {
                // Keeps the bracket on the earliest transition even if the
                // step precondition was violated and a third value appears.
                b.hi = mid;
                b.hi_value = value;
            }
        }
    }

    Ok(brackets
        .into_iter()
        .map(|b| Event {
            time: Time::from_julian_date(b.hi),
            value: b.hi_value,
        })
        .collect())
}

/// [`find_discrete`], plus a consistency check against a too-coarse step.
///
/// Runs the search twice, the second time at half the step, and fails with
/// [`Error::ResolutionTooCoarse`] when the finer sampling turns up a
/// different event sequence. Costs roughly triple the evaluations; useful
/// when the transition spacing of `f` is not known in advance.
pub fn find_discrete_checked<F>(
    f: &mut F,
    span: &Interval,
    step_days: f64,
    tolerance_days: f64,
) -> Result<Vec<Event>>
where
    F: StepFunction + ?Sized,
{
    let coarse = find_discrete(&mut *f, span, step_days, tolerance_days)?;
    let fine = find_discrete(&mut *f, span, step_days / 2.0, tolerance_days)?;

    let consistent = coarse.len() == fine.len()
        && coarse.iter().zip(&fine).all(|(a, b)| a.value == b.value);
    if !consistent {
        return Err(Error::ResolutionTooCoarse { step_days });
    }
    Ok(fine)
}

/// Generate `n` evenly spaced values from `start` to `end` (inclusive)
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}
