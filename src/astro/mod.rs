//! Astronomical helpers for the observational calendars.
//!
//! Times are [`Moment`]s: fractional day counts aligned with Julian Day
//! Numbers so that `floor(moment)` is the civil day and the fraction is the
//! time since midnight. The series follow Reingold & Dershowitz,
//! *Calendrical Calculations*, which in turn take them from Meeus and from
//! Bretagnon & Simon.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::calendars::gregorian::fixed_from_gregorian;
use crate::consts::RATA_DIE_OFFSET;
use crate::prelude::*;

pub mod hindu;
pub mod lunar;
pub mod solar;
pub mod solve;

pub use lunar::{new_moon_at_or_after, new_moon_before, nth_new_moon};
pub use solar::{estimate_prior_solar_longitude, solar_longitude, solar_longitude_after};
pub use solve::{bisect, invert_angular};

/// A point in time, in days, with JDN-aligned midnights.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, From, Into)]
pub struct Moment(pub f64);

impl Moment {
    pub const fn new(days: f64) -> Self {
        Self(days)
    }

    /// Midnight at the start of day `jd`.
    pub const fn from_jd(jd: i64) -> Self {
        Self(jd as f64)
    }

    pub const fn inner(self) -> f64 {
        self.0
    }

    /// The civil day containing this moment.
    pub fn day(self) -> i64 {
        self.0.floor() as i64
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}", self.0)
    }
}

impl Add<f64> for Moment {
    type Output = Self;

    fn add(self, days: f64) -> Self {
        Self(self.0 + days)
    }
}

impl Sub<f64> for Moment {
    type Output = Self;

    fn sub(self, days: f64) -> Self {
        Self(self.0 - days)
    }
}

impl Sub for Moment {
    type Output = f64;

    fn sub(self, other: Self) -> f64 {
        self.0 - other.0
    }
}

/// Noon on 1 January 2000, the origin of Julian centuries.
pub const J2000: Moment = Moment(2_451_545.5);

/// A place on Earth.
///
/// Latitude and longitude are in degrees (east and north positive), elevation
/// in metres, and the standard time zone in hours east of Greenwich.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude:  f64,
    pub longitude: f64,
    pub elevation: f64,
    pub zone:      f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64, elevation: f64, zone: f64) -> Self {
        Self { latitude, longitude, elevation, zone }
    }

    /// The Kaaba, the reference point for Islamic observations
    pub const MECCA: Self = Self::new(21.4225, 39.8262, 298.0, 3.0);

    /// Tehran meridian of the astronomical Persian calendar
    pub const TEHRAN_MERIDIAN: Self = Self::new(35.68, 52.5, 0.0, 3.5);

    /// Ujjain, the prime meridian of Hindu astronomy
    pub const UJJAIN: Self = Self::new(23.15, 75.768_333, 0.0, 5.0 + 461.0 / 9000.0);

    /// Universal time of a local mean time moment.
    pub fn universal_from_local(&self, local: Moment) -> Moment {
        local - self.longitude / 360.0
    }

    pub fn local_from_universal(&self, universal: Moment) -> Moment {
        universal + self.longitude / 360.0
    }

    /// Universal time of a standard (zone) time moment.
    pub fn universal_from_standard(&self, standard: Moment) -> Moment {
        standard - self.zone / 24.0
    }

    pub fn standard_from_universal(&self, universal: Moment) -> Moment {
        universal + self.zone / 24.0
    }
}

/// Horner evaluation; coefficients are lowest power first.
pub(crate) fn poly(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Difference between dynamical and universal time (ΔT), in days.
pub fn ephemeris_correction(moment: Moment) -> f64 {
    let approx = (moment.inner() - RATA_DIE_OFFSET as f64) / 365.2425;
    let year = (if approx > 0.0 { approx + 1.0 } else { approx }) as i64;
    let mid_year = fixed_from_gregorian(year, 7, 1);
    // Centuries from 1 January 1900
    let c = (mid_year - 2_415_021) as f64 / 36525.0;
    let yf = year as f64;

    match year {
        2051..=2150 => {
            let y1820 = (yf - 1820.0) / 100.0;
            (-20.0 + 32.0 * y1820 * y1820 + 0.5628 * (2150.0 - yf)) / 86400.0
        },
        2006..=2050 => poly(yf - 2000.0, &[62.92, 0.32217, 0.005589]) / 86400.0,
        1987..=2005 => {
            poly(yf - 2000.0, &[63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599])
                / 86400.0
        },
        1900..=1986 => {
            poly(c, &[-0.00002, 0.000297, 0.025184, -0.181133, 0.553040, -0.861938, 0.677066, -0.212591])
        },
        1800..=1899 => poly(
            c,
            &[
                -0.000009, 0.003844, 0.083563, 0.865736, 4.867575, 15.845535, 31.332267, 38.291999,
                28.316289, 11.636204, 2.043794,
            ],
        ),
        1700..=1799 => poly(yf - 1700.0, &[8.118780842, -0.005092142, 0.003336121, -0.0000266484]) / 86400.0,
        1600..=1699 => poly(yf - 1600.0, &[120.0, -0.9808, -0.01532, 0.000140272128]) / 86400.0,
        500..=1599 => {
            poly(
                (yf - 1000.0) / 100.0,
                &[1574.2, -556.01, 71.23472, 0.319781, -0.8503463, -0.005050998, 0.0083572073],
            ) / 86400.0
        },
        -499..=499 => {
            poly(yf / 100.0, &[10583.6, -1014.41, 33.78311, -5.952053, -0.1798452, 0.022174192, 0.0090316521])
                / 86400.0
        },
        _ => {
            let y1820 = (yf - 1820.0) / 100.0;
            (-20.0 + 32.0 * y1820 * y1820) / 86400.0
        },
    }
}

pub fn dynamical_from_universal(universal: Moment) -> Moment {
    universal + ephemeris_correction(universal)
}

pub fn universal_from_dynamical(dynamical: Moment) -> Moment {
    dynamical - ephemeris_correction(dynamical)
}

/// Dynamical-time centuries of 36525 days since [`J2000`].
pub fn julian_centuries(moment: Moment) -> f64 {
    (dynamical_from_universal(moment) - J2000) / 36525.0
}
