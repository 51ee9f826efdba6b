//! Apparent solar longitude and the searches built on it.

use super::solve::invert_angular;
use super::{Moment, julian_centuries};
use crate::Result;
use crate::consts::MEAN_TROPICAL_YEAR;
use crate::divmod::{fmod_f, mod3};

/// Longitude of the Sun at the spring equinox
pub const SPRING: f64 = 0.0;
/// Longitude of the Sun at the summer solstice
pub const SUMMER: f64 = 90.0;
/// Longitude of the Sun at the autumn equinox
pub const AUTUMN: f64 = 180.0;
/// Longitude of the Sun at the winter solstice
pub const WINTER: f64 = 270.0;

// Bretagnon & Simon periodic terms: amplitude, phase, rate.
const COEFFICIENTS: [f64; 49] = [
    403_406.0, 195_207.0, 119_433.0, 112_392.0, 3891.0, 2819.0, 1721.0, 660.0, 350.0, 334.0, 314.0,
    268.0, 242.0, 234.0, 158.0, 132.0, 129.0, 114.0, 99.0, 93.0, 86.0, 78.0, 72.0, 68.0, 64.0, 46.0,
    38.0, 37.0, 32.0, 29.0, 28.0, 27.0, 27.0, 25.0, 24.0, 21.0, 21.0, 20.0, 18.0, 17.0, 14.0, 13.0,
    13.0, 13.0, 12.0, 10.0, 10.0, 10.0, 10.0,
];

const ADDENDS: [f64; 49] = [
    270.54861, 340.19128, 63.91854, 331.26220, 317.843, 86.631, 240.052, 310.26, 247.23, 260.87,
    297.82, 343.14, 166.79, 81.53, 3.50, 132.75, 182.95, 162.03, 29.8, 266.4, 249.2, 157.6, 257.8,
    185.1, 69.9, 8.0, 197.1, 250.4, 65.3, 162.7, 341.5, 291.6, 98.5, 146.7, 110.0, 5.2, 342.6,
    230.9, 256.1, 45.3, 242.9, 115.2, 151.8, 285.3, 53.3, 126.6, 205.7, 85.9, 146.1,
];

const MULTIPLIERS: [f64; 49] = [
    0.9287892, 35999.1376958, 35999.4089666, 35998.7287385, 71998.20261, 71998.4403, 36000.35726,
    71997.4812, 32964.4678, -19.4410, 445_267.1117, 45036.8840, 3.1008, 22518.4434, -19.9739,
    65928.9345, 9038.0293, 3034.7684, 33718.148, 3034.448, -2280.773, 29929.992, 31556.493, 149.588,
    9037.750, 107_997.405, -4444.176, 151.771, 67555.316, 31556.080, -4561.540, 107_996.706,
    1221.655, 62894.167, 31437.369, 14578.298, -31931.757, 34777.243, 1221.999, 62894.511,
    -4442.039, 107_997.909, 119.066, 16859.071, -4.578, 26895.292, -39.127, 12297.536, 90073.778,
];

fn aberration(c: f64) -> f64 {
    0.0000974 * (177.63 + 35999.01848 * c).to_radians().cos() - 0.005575
}

fn nutation(c: f64) -> f64 {
    let a = 124.90 - 1934.134 * c + 0.002063 * c * c;
    let b = 201.11 + 72001.5377 * c + 0.00057 * c * c;
    -0.004778 * a.to_radians().sin() - 0.0003667 * b.to_radians().sin()
}

/// Apparent longitude of the Sun at `moment` (universal time), in `[0, 360)`.
pub fn solar_longitude(moment: Moment) -> f64 {
    let c = julian_centuries(moment);
    let sum: f64 = COEFFICIENTS
        .iter()
        .zip(ADDENDS.iter())
        .zip(MULTIPLIERS.iter())
        .map(|((x, y), z)| x * (y + z * c).to_radians().sin())
        .sum();
    let lambda = 282.7771834 + 36000.76953744 * c + 0.000005729577951308232 * sum;
    fmod_f(lambda + aberration(c) + nutation(c), 360.0)
}

/// A moment close to, and not after, `moment` at which the Sun's longitude
/// was `angle`.
pub fn estimate_prior_solar_longitude(angle: f64, moment: Moment) -> Moment {
    let rate = MEAN_TROPICAL_YEAR / 360.0;
    let tau = moment - rate * fmod_f(solar_longitude(moment) - angle, 360.0);
    let delta = mod3(solar_longitude(tau) - angle, -180.0, 180.0);
    let estimate = tau - rate * delta;
    if moment < estimate { moment } else { estimate }
}

/// First moment at or after `moment` when the Sun's longitude reaches `angle`.
///
/// # Errors
/// Propagates root-finder failures.
pub fn solar_longitude_after(angle: f64, moment: Moment) -> Result<Moment> {
    let rate = MEAN_TROPICAL_YEAR / 360.0;
    let tau = moment + rate * fmod_f(angle - solar_longitude(moment), 360.0);
    let lo = moment.inner().max(tau.inner() - 5.0);
    let hi = tau.inner() + 5.0;
    let root = invert_angular("solar longitude", |x| solar_longitude(Moment(x)), angle, lo, hi)?;
    Ok(Moment(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RATA_DIE_OFFSET;

    #[test]
    fn test_solar_longitude_reference_values() {
        // Noon on the given R.D. days.
        let cases = [
            (-214_193, 119.47343190503307),
            (25469, 181.43599673954304),
            (400_085, 63.18799596698955),
            (664_224, 129.289884101192),
            (727_274, 357.15125499424175),
            (764_652, 116.43935225951282),
        ];
        for (rd, expected) in cases {
            let moment = Moment::from_jd(rd + RATA_DIE_OFFSET) + 0.5;
            let longitude = solar_longitude(moment);
            assert!((longitude - expected).abs() < 1e-5, "{rd}: {longitude} != {expected}");
        }
    }

    #[test]
    fn test_equinox_2024() {
        // 20 March 2024 03:06 UT
        let start = Moment::from_jd(2_460_380);
        let equinox = solar_longitude_after(SPRING, start).unwrap();
        assert_eq!(equinox.day(), 2_460_390);
        let hours = (equinox.inner() - 2_460_390.0) * 24.0;
        assert!((2.5..3.7).contains(&hours), "{hours}");
    }

    #[test]
    fn test_winter_solstice_2023() {
        // 22 December 2023 03:27 UT
        let solstice = solar_longitude_after(WINTER, Moment::from_jd(2_460_200)).unwrap();
        assert_eq!(solstice.day(), 2_460_301);
    }

    #[test]
    fn test_estimate_prior_is_close_and_not_after() {
        let moment = Moment::from_jd(2_460_450);
        let estimate = estimate_prior_solar_longitude(SPRING, moment);
        assert!(estimate <= moment);
        let equinox = solar_longitude_after(SPRING, Moment::from_jd(2_460_380)).unwrap();
        assert!((estimate - equinox).abs() < 1.0);
    }
}
