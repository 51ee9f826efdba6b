//! Bounded bisection for monotone conditions and angular functions.

use tracing::{trace, warn};

use crate::consts::MAX_SOLVER_ITERATIONS;
use crate::divmod::mod3;
use crate::{CalendarError, Result};

/// Precision of [`invert_angular`], in days.
pub const ANGULAR_EPSILON: f64 = 1e-5;

/// Finds the boundary in `[lo, hi]` where `test` switches from false to true.
///
/// `test` must be monotone on the interval. If it already holds at `lo`,
/// `lo` is returned.
///
/// # Errors
/// `NoBracket` if `test` is false at `hi`, `NoConvergence` if the interval is
/// not narrowed to `epsilon` within the iteration cap.
pub fn bisect(
    what: &'static str,
    mut lo: f64,
    mut hi: f64,
    epsilon: f64,
    test: impl Fn(f64) -> bool,
) -> Result<f64> {
    if lo > hi || !test(hi) {
        warn!(what, lo, hi, "root not bracketed");
        return Err(CalendarError::NoBracket { what, lo, hi });
    }
    if test(lo) {
        return Ok(lo);
    }
    for iteration in 0..MAX_SOLVER_ITERATIONS {
        let mid = lo + (hi - lo) / 2.0;
        if test(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
        if hi - lo < epsilon {
            trace!(what, iteration, root = mid, "bisection converged");
            return Ok(mid);
        }
    }
    warn!(what, lo, hi, "bisection did not converge");
    Err(CalendarError::NoConvergence { what, iterations: MAX_SOLVER_ITERATIONS })
}

/// The moment in `[lo, hi]` at which the angular function `f` reaches `angle`.
///
/// `f` must increase through `angle` exactly once on the interval (modulo
/// 360 degrees).
///
/// # Errors
/// See [`bisect`].
pub fn invert_angular(
    what: &'static str,
    f: impl Fn(f64) -> f64,
    angle: f64,
    lo: f64,
    hi: f64,
) -> Result<f64> {
    bisect(what, lo, hi, ANGULAR_EPSILON, |x| mod3(f(x) - angle, -180.0, 180.0) >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCase {
        f:        fn(f64) -> f64,
        angle:    f64,
        range:    (f64, f64),
        expected: f64,
    }

    #[test]
    fn test_invert_angular() {
        let cases = [
            TestCase { f: |x| (2.0 * x).rem_euclid(360.0), angle: 4.0, range: (0.0, 10.0), expected: 2.0 },
            TestCase { f: |x| (3.0 * x).rem_euclid(360.0), angle: 6.0, range: (0.0, 20.0), expected: 2.0 },
            TestCase { f: |x| x.rem_euclid(360.0), angle: 350.0, range: (300.0, 400.0), expected: 350.0 },
            TestCase { f: |x| x.rem_euclid(360.0), angle: 10.0, range: (300.0, 400.0), expected: 370.0 },
        ];
        for case in cases {
            let root = invert_angular("test", case.f, case.angle, case.range.0, case.range.1).unwrap();
            assert!((root - case.expected).abs() < 2.0 * ANGULAR_EPSILON, "{root} != {}", case.expected);
        }
    }

    #[test]
    fn test_bisect_reports_missing_bracket() {
        let result = bisect("square", 0.0, 1.0, 1e-9, |x| x * x > 4.0);
        assert_eq!(result, Err(CalendarError::NoBracket { what: "square", lo: 0.0, hi: 1.0 }));
    }

    #[test]
    fn test_bisect_returns_lower_bound_when_already_true() {
        assert_eq!(bisect("true", 3.0, 5.0, 1e-9, |_| true), Ok(3.0));
    }

    #[test]
    fn test_bisect_reports_non_convergence() {
        // An epsilon below f64 resolution at this magnitude never closes.
        let result = bisect("tiny", 1e9, 2e9, 0.0, |x| x > 1.5e9);
        assert_eq!(result, Err(CalendarError::NoConvergence { what: "tiny", iterations: MAX_SOLVER_ITERATIONS }));
    }
}
