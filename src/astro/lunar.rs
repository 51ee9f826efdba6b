//! New moons from the Meeus series.

use tracing::warn;

use super::{J2000, Moment, universal_from_dynamical};
use crate::consts::{MEAN_SYNODIC_MONTH, RATA_DIE_OFFSET};
use crate::{CalendarError, Result};

/// The first new moon after the start of 1 CE (11 January, Gregorian).
pub const NEW_MOON_ZERO: Moment = Moment(11.458_922_815_770_109 + RATA_DIE_OFFSET as f64);

/// Steps allowed when correcting the mean-motion estimate of a lunation
const MAX_LUNATION_STEPS: usize = 8;

// Periodic terms: amplitude, power of the eccentricity factor, then the
// multipliers of solar anomaly, lunar anomaly and moon argument.
const SINE_COEFFICIENTS: [f64; 24] = [
    -0.40720, 0.17241, 0.01608, 0.01039, 0.00739, -0.00514, 0.00208, -0.00111, -0.00057, 0.00056,
    -0.00042, 0.00042, 0.00038, -0.00024, -0.00007, 0.00004, 0.00004, 0.00003, 0.00003, -0.00003,
    0.00003, -0.00002, -0.00002, 0.00002,
];
const E_FACTOR: [i32; 24] = [0, 1, 0, 0, 1, 1, 2, 0, 0, 1, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
const SOLAR_COEFFICIENTS: [f64; 24] = [
    0.0, 1.0, 0.0, 0.0, -1.0, 1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, -1.0, 2.0, 0.0, 3.0, 1.0, 0.0,
    1.0, -1.0, -1.0, 1.0, 0.0,
];
const LUNAR_COEFFICIENTS: [f64; 24] = [
    1.0, 0.0, 2.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 2.0, 3.0, 0.0, 0.0, 2.0, 1.0, 2.0, 0.0, 1.0, 2.0,
    1.0, 1.0, 1.0, 3.0, 4.0,
];
const MOON_COEFFICIENTS: [f64; 24] = [
    0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, -2.0, 2.0, 0.0, 0.0, 2.0, -2.0, 0.0, 0.0, -2.0, 0.0, -2.0, 2.0,
    2.0, 2.0, -2.0, 0.0, 0.0,
];

// Planetary arguments: phase, rate per lunation, amplitude.
const ADD_CONST: [f64; 13] = [
    251.88, 251.83, 349.42, 84.66, 141.74, 207.14, 154.84, 34.52, 207.19, 291.34, 161.72, 239.56,
    331.55,
];
const ADD_COEFF: [f64; 13] = [
    0.016321, 26.651886, 36.412478, 18.206239, 53.303771, 2.453732, 7.306860, 27.261239, 0.121824,
    1.844379, 24.198154, 25.513099, 3.592518,
];
const ADD_FACTOR: [f64; 13] = [
    0.000165, 0.000164, 0.000126, 0.000110, 0.000062, 0.000060, 0.000056, 0.000047, 0.000042,
    0.000040, 0.000037, 0.000035, 0.000023,
];

/// Moment (universal time) of the `n`-th new moon after [`NEW_MOON_ZERO`].
pub fn nth_new_moon(n: i64) -> Moment {
    let k = n as f64 - 24724.0;
    let c = k / 1236.85;
    let approx = J2000
        + (5.09766 + MEAN_SYNODIC_MONTH * 1236.85 * c + 0.00015437 * c * c - 0.00000015 * c.powi(3)
            + 0.00000000073 * c.powi(4));
    let e = 1.0 - 0.002516 * c - 0.0000074 * c * c;
    let solar_anomaly = 2.5534 + 1236.85 * 29.10535670 * c - 0.0000014 * c * c - 0.00000011 * c.powi(3);
    let lunar_anomaly = 201.5643 + 385.81693528 * 1236.85 * c + 0.0107582 * c * c + 0.00001238 * c.powi(3)
        - 0.000000058 * c.powi(4);
    let moon_argument = 160.7108 + 390.67050284 * 1236.85 * c - 0.0016118 * c * c - 0.00000227 * c.powi(3)
        + 0.000000011 * c.powi(4);
    let omega = 124.7746 - 1.56375588 * 1236.85 * c + 0.0020672 * c * c + 0.00000215 * c.powi(3);

    let periodic: f64 = SINE_COEFFICIENTS
        .iter()
        .zip(E_FACTOR)
        .zip(SOLAR_COEFFICIENTS.iter().zip(LUNAR_COEFFICIENTS.iter()).zip(MOON_COEFFICIENTS.iter()))
        .map(|((v, w), ((x, y), z))| {
            v * e.powi(w) * (x * solar_anomaly + y * lunar_anomaly + z * moon_argument).to_radians().sin()
        })
        .sum();
    let correction = -0.00017 * omega.to_radians().sin() + periodic;
    let extra = 0.000325 * (299.77 + 132.8475848 * c - 0.009173 * c * c).to_radians().sin();
    let additional: f64 = ADD_CONST
        .iter()
        .zip(ADD_COEFF.iter())
        .zip(ADD_FACTOR.iter())
        .map(|((i, j), l)| l * (i + j * k).to_radians().sin())
        .sum();

    universal_from_dynamical(approx + (correction + extra + additional))
}

/// Index of the first new moon at or after `moment`.
///
/// # Errors
/// `NoConvergence` if the mean-motion estimate cannot be corrected.
pub fn lunation_at_or_after(moment: Moment) -> Result<i64> {
    let mut n = ((moment - NEW_MOON_ZERO) / MEAN_SYNODIC_MONTH).ceil() as i64;
    for _ in 0..MAX_LUNATION_STEPS {
        if nth_new_moon(n) < moment {
            n += 1;
        } else if nth_new_moon(n - 1) >= moment {
            n -= 1;
        } else {
            return Ok(n);
        }
    }
    warn!(%moment, "new moon search did not settle");
    Err(CalendarError::NoConvergence { what: "new moon", iterations: MAX_LUNATION_STEPS })
}

/// First new moon at or after `moment`.
///
/// # Errors
/// See [`lunation_at_or_after`].
pub fn new_moon_at_or_after(moment: Moment) -> Result<Moment> {
    Ok(nth_new_moon(lunation_at_or_after(moment)?))
}

/// Last new moon strictly before `moment`.
///
/// # Errors
/// See [`lunation_at_or_after`].
pub fn new_moon_before(moment: Moment) -> Result<Moment> {
    Ok(nth_new_moon(lunation_at_or_after(moment)? - 1))
}

/// Days since the last new moon.
///
/// # Errors
/// See [`lunation_at_or_after`].
pub fn moon_age(moment: Moment) -> Result<f64> {
    Ok(moment - new_moon_before(moment)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroth_new_moon() {
        let zero = nth_new_moon(0);
        assert!((zero - NEW_MOON_ZERO).abs() < 1e-6, "{zero}");
        assert_eq!(lunation_at_or_after(Moment::from_jd(RATA_DIE_OFFSET)).unwrap(), 0);
    }

    #[test]
    fn test_new_moon_reference_values() {
        let cases = [
            (-214_193, -214_174.60582868298),
            (25469, 25495.80977675628),
            (664_224, 664_242.8867184789),
            (764_652, 764_676.1912733881),
        ];
        for (rd, expected) in cases {
            let moment = new_moon_at_or_after(Moment::from_jd(rd + RATA_DIE_OFFSET)).unwrap();
            let rd_moment = moment.inner() - RATA_DIE_OFFSET as f64;
            assert!((rd_moment - expected).abs() < 1e-6, "{rd}: {rd_moment} != {expected}");
        }
    }

    #[test]
    fn test_new_moons_bracket_moment() {
        for day in (2_450_000..2_452_000).step_by(7) {
            let moment = Moment::from_jd(day) + 0.3;
            let before = new_moon_before(moment).unwrap();
            let after = new_moon_at_or_after(moment).unwrap();
            assert!(before < moment && moment <= after);
            let gap = after - before;
            assert!((29.2..29.9).contains(&gap), "{gap}");
        }
    }

    #[test]
    fn test_moon_age() {
        // New moon of 8 April 2024 at 18:21 UT
        let age = moon_age(Moment::from_jd(2_460_410) + 0.5).unwrap();
        assert!((0.70..0.77).contains(&age), "{age}");
    }
}
