//! Division with selectable sign conventions.
//!
//! Every convention satisfies `dividend == divisor * quotient + remainder`;
//! they differ only in which way the quotient is rounded:
//!
//! | convention | quotient                | remainder sign    |
//! |------------|-------------------------|-------------------|
//! | `p`        | adjusted as needed      | `0 <= r < |d|`    |
//! | `f`        | `floor(n / d)`          | sign of divisor   |
//! | `c`        | `ceil(n / d)`           | opposite divisor  |
//! | `a`        | toward zero             | sign of dividend  |
//!
//! A zero divisor is a caller bug and panics (integers) or yields NaN
//! (reals).

/// Quotient/remainder under the four sign conventions.
pub trait DivMod: Copy {
    /// Positive remainder: `0 <= r < |divisor|`.
    fn div_mod_p(self, divisor: Self) -> (Self, Self);
    /// Floor division: remainder has the sign of the divisor.
    fn div_mod_f(self, divisor: Self) -> (Self, Self);
    /// Ceiling division: remainder has the opposite sign of the divisor.
    fn div_mod_c(self, divisor: Self) -> (Self, Self);
    /// Truncating division: remainder has the sign of the dividend.
    fn div_mod_a(self, divisor: Self) -> (Self, Self);
}

impl DivMod for i64 {
    fn div_mod_p(self, divisor: Self) -> (Self, Self) {
        debug_assert!(divisor != 0, "division by zero");
        (self.div_euclid(divisor), self.rem_euclid(divisor))
    }

    fn div_mod_f(self, divisor: Self) -> (Self, Self) {
        debug_assert!(divisor != 0, "division by zero");
        let (q, r) = (self / divisor, self % divisor);
        if r != 0 && ((r < 0) != (divisor < 0)) {
            (q - 1, r + divisor)
        } else {
            (q, r)
        }
    }

    fn div_mod_c(self, divisor: Self) -> (Self, Self) {
        debug_assert!(divisor != 0, "division by zero");
        let (q, r) = (self / divisor, self % divisor);
        if r != 0 && ((r < 0) == (divisor < 0)) {
            (q + 1, r - divisor)
        } else {
            (q, r)
        }
    }

    fn div_mod_a(self, divisor: Self) -> (Self, Self) {
        debug_assert!(divisor != 0, "division by zero");
        (self / divisor, self % divisor)
    }
}

impl DivMod for f64 {
    fn div_mod_p(self, divisor: Self) -> (Self, Self) {
        let q = self.div_euclid(divisor);
        (q, self - divisor * q)
    }

    fn div_mod_f(self, divisor: Self) -> (Self, Self) {
        let q = (self / divisor).floor();
        (q, self - divisor * q)
    }

    fn div_mod_c(self, divisor: Self) -> (Self, Self) {
        let q = (self / divisor).ceil();
        (q, self - divisor * q)
    }

    fn div_mod_a(self, divisor: Self) -> (Self, Self) {
        let q = (self / divisor).trunc();
        (q, self - divisor * q)
    }
}

/// Floor quotient.
#[inline]
pub fn div_f(n: i64, d: i64) -> i64 {
    n.div_mod_f(d).0
}

/// Floor remainder, same sign as `d`.
#[inline]
pub fn mod_f(n: i64, d: i64) -> i64 {
    n.div_mod_f(d).1
}

/// Positive remainder, in `0..|d|`.
#[inline]
pub fn mod_p(n: i64, d: i64) -> i64 {
    n.div_mod_p(d).1
}

/// Real floor remainder, in `[0, d)` for positive `d`.
#[inline]
pub fn fmod_f(n: f64, d: f64) -> f64 {
    n.div_mod_f(d).1
}

/// Adjusted remainder: like `mod_f` but returns `d` instead of `0`.
#[inline]
pub fn amod(n: i64, d: i64) -> i64 {
    d + mod_f(n, -d)
}

/// Shifts `x` into the half-open interval `[a, b)`.
#[inline]
pub fn mod3(x: f64, a: f64, b: f64) -> f64 {
    if (a - b).abs() < f64::EPSILON {
        x
    } else {
        a + fmod_f(x - a, b - a)
    }
}

/// Integer flavour of [`mod3`].
#[inline]
pub fn mod3_i(x: i64, a: i64, b: i64) -> i64 {
    if a == b { x } else { a + mod_f(x - a, b - a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_conventions_negative_dividend() {
        assert_eq!((-7_i64).div_mod_f(3), (-3, 2));
        assert_eq!((-7_i64).div_mod_c(3), (-2, -1));
        assert_eq!((-7_i64).div_mod_a(3), (-2, -1));
        assert_eq!((-7_i64).div_mod_p(3), (-3, 2));
    }

    #[test]
    fn test_sign_conventions_negative_divisor() {
        assert_eq!(7_i64.div_mod_f(-3), (-3, -2));
        assert_eq!(7_i64.div_mod_c(-3), (-2, 1));
        assert_eq!(7_i64.div_mod_a(-3), (-2, 1));
        assert_eq!(7_i64.div_mod_p(-3), (-2, 1));
        assert_eq!((-7_i64).div_mod_p(-3), (3, 2));
    }

    #[test]
    fn test_identity_and_ranges_integer() {
        for n in -40_i64..=40 {
            for d in [-7_i64, -3, -1, 1, 2, 5, 12] {
                let (q, r) = n.div_mod_p(d);
                assert_eq!(n, d * q + r);
                assert!((0..d.abs()).contains(&r), "P {n}/{d}");

                let (q, r) = n.div_mod_f(d);
                assert_eq!(n, d * q + r);
                assert!(r == 0 || r.signum() == d.signum(), "F {n}/{d}");
                assert!(r.abs() < d.abs());

                let (q, r) = n.div_mod_c(d);
                assert_eq!(n, d * q + r);
                assert!(r == 0 || r.signum() == -d.signum(), "C {n}/{d}");
                assert!(r.abs() < d.abs());

                let (q, r) = n.div_mod_a(d);
                assert_eq!(n, d * q + r);
                assert!(r == 0 || r.signum() == n.signum(), "A {n}/{d}");
            }
        }
    }

    #[test]
    fn test_real_conventions() {
        assert_eq!((-7.0_f64).div_mod_f(3.0), (-3.0, 2.0));
        assert_eq!((-7.0_f64).div_mod_c(3.0), (-2.0, -1.0));
        assert_eq!((-7.0_f64).div_mod_a(3.0), (-2.0, -1.0));
        assert_eq!((-7.0_f64).div_mod_p(3.0), (-3.0, 2.0));
        assert_eq!((-7.0_f64).div_mod_p(-3.0), (3.0, 2.0));

        let (q, r) = 10.5_f64.div_mod_f(-4.0);
        assert_eq!(q, -3.0);
        assert!((r - -1.5).abs() < 1e-12);
    }

    #[test]
    fn test_amod_and_mod3() {
        assert_eq!(mod_p(-7, -3), 2);
        assert_eq!(amod(12, 12), 12);
        assert_eq!(amod(0, 12), 12);
        assert_eq!(amod(13, 12), 1);
        assert_eq!(amod(-1, 12), 11);
        assert_eq!(mod3_i(17, -15, 15), -13);
        assert_eq!(mod3_i(3, 1, 31), 3);
        assert!((mod3(370.0, -180.0, 180.0) - 10.0).abs() < 1e-12);
        assert!((mod3(0.75, -0.5, 0.5) - -0.25).abs() < 1e-12);
    }
}
