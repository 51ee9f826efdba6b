//! The Persian (Solar Hijri) calendar.
//!
//! Six months of 31 days, five of 30 and Esfand with 29 or 30. The year
//! starts at Nowruz, either computed from the vernal equinox or read off a
//! 33-year arithmetic cycle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::astro::solar::{SPRING, solar_longitude_after};
use crate::astro::{Location, Moment};
use crate::consts::{MEAN_TROPICAL_YEAR, PERSIAN_EPOCH};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::div_f;
use crate::{Dmy, Result};

/// Day before [`PERSIAN_EPOCH`]; anchors the 33-year cycle so that it
/// agrees with the equinox rule on modern years
const ARITHMETIC_EPOCH: i64 = PERSIAN_EPOCH - 1;

/// How far before the estimated Nowruz the equinox search starts
const EQUINOX_LEAD_DAYS: f64 = 20.0;

const MONTH_NAMES: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// How Nowruz is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersianMethod {
    /// Nowruz is the day the equinox falls before noon on the 52.5°E meridian
    #[default]
    Astronomical,
    /// Leap years are those with `(25y + 11) mod 33 < 8`.
    ///
    /// Agrees with the equinox rule on every Nowruz from 1178 to 1634 AP
    /// (1799 to 2255 CE). Outside that span the rules part ways on some
    /// years; year 1 starts a day earlier.
    Arithmetic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Persian {
    pub method: PersianMethod,
}

/// Leap rule of the 33-year cycle.
pub fn is_arithmetic_leap_year(year: i64) -> bool {
    (25 * year + 11).rem_euclid(33) < 8
}

fn arithmetic_new_year(year: i64) -> i64 {
    ARITHMETIC_EPOCH + 365 * (year - 1) + div_f(8 * year + 21, 33)
}

/// Nowruz of `year` by the equinox rule.
///
/// # Errors
/// Propagates root-finder failures.
pub fn astronomical_new_year(year: i64) -> Result<i64> {
    let estimate = PERSIAN_EPOCH as f64 + (MEAN_TROPICAL_YEAR * (year - 1) as f64).floor();
    let equinox = solar_longitude_after(SPRING, Moment::new(estimate - EQUINOX_LEAD_DAYS))?;
    let local = Location::TEHRAN_MERIDIAN.local_from_universal(equinox);
    // Before local noon the day itself is Nowruz, otherwise the next one.
    Ok((local + 0.5).day())
}

const fn days_before_month(month: i32) -> i64 {
    let month = month as i64;
    if month <= 7 { 31 * (month - 1) } else { 30 * (month - 1) + 6 }
}

impl Persian {
    pub const fn new(method: PersianMethod) -> Self {
        Self { method }
    }

    /// JDN of 1 Farvardin of `year`.
    ///
    /// # Errors
    /// Propagates root-finder failures.
    pub fn new_year(&self, year: i64) -> Result<i64> {
        match self.method {
            PersianMethod::Astronomical => astronomical_new_year(year),
            PersianMethod::Arithmetic => Ok(arithmetic_new_year(year)),
        }
    }
}

impl DmyCalendar for Persian {
    fn months_in_year(&self, _year: i64) -> u8 {
        12
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        Ok(match month {
            1..=6 => 31,
            12 if self.is_leap_year(year)? => 30,
            12 => 29,
            _ => 30,
        })
    }

    fn is_leap_year(&self, year: i64) -> Result<bool> {
        match self.method {
            PersianMethod::Arithmetic => Ok(is_arithmetic_leap_year(year)),
            PersianMethod::Astronomical => Ok(self.days_in_year(year)? == 366),
        }
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        Ok(self.new_year(dmy.year)? - 1 + days_before_month(dmy.month) + i64::from(dmy.day))
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        let mut year = ((jd - PERSIAN_EPOCH) as f64 / MEAN_TROPICAL_YEAR).round() as i64 + 1;
        let mut start = self.new_year(year)?;
        if start > jd {
            year -= 1;
            start = self.new_year(year)?;
        } else {
            let next = self.new_year(year + 1)?;
            if next <= jd {
                year += 1;
                start = next;
            }
        }
        debug!(jd, year, start, "located Persian year");
        let day_of_year = jd - start + 1;
        let month = if day_of_year <= 186 { (day_of_year + 30) / 31 } else { (day_of_year - 6 + 29) / 30 };
        let day = day_of_year - days_before_month(month as i32);
        Ok(Dmy::new(day as i32, month as i32, year))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
    }

    fn days_in_year(&self, year: i64) -> Result<i64> {
        Ok(self.new_year(year + 1)? - self.new_year(year)?)
    }
}

dmy_calendar!(Persian, "Persian", crate::week::PERSIAN);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::gregorian::fixed_from_gregorian;
    use crate::{Calendar, Date};

    const ASTRONOMICAL: Persian = Persian::new(PersianMethod::Astronomical);
    const ARITHMETIC: Persian = Persian::new(PersianMethod::Arithmetic);

    #[test]
    fn test_methods_agree_on_modern_years() {
        assert_eq!(ASTRONOMICAL.new_year(1403).unwrap(), fixed_from_gregorian(2024, 3, 20));
        assert_eq!(ASTRONOMICAL.new_year(1404).unwrap(), fixed_from_gregorian(2025, 3, 21));
        for year in 1200..1500 {
            assert_eq!(ASTRONOMICAL.new_year(year).unwrap(), ARITHMETIC.new_year(year).unwrap(), "{year}");
        }
    }

    #[test]
    fn test_epoch() {
        assert_eq!(ASTRONOMICAL.new_year(1).unwrap(), PERSIAN_EPOCH);
        assert_eq!(ARITHMETIC.new_year(1).unwrap(), PERSIAN_EPOCH - 1);
    }

    #[test]
    fn test_leap_years() {
        let leaps: Vec<i64> = (1395..1412).filter(|&y| is_arithmetic_leap_year(y)).collect();
        assert_eq!(leaps, [1395, 1399, 1403, 1408]);
        assert!(ASTRONOMICAL.is_leap_year(1403).unwrap());
        assert!(!ASTRONOMICAL.is_leap_year(1404).unwrap());
        assert_eq!(ASTRONOMICAL.days_in_month(12, 1403).unwrap(), 30);
        assert_eq!(ARITHMETIC.days_in_month(12, 1402).unwrap(), 29);
    }

    #[test]
    fn test_known_dates() {
        let cases = [
            ((2000, 1, 1), Dmy::new(11, 10, 1378)),
            ((2024, 3, 19), Dmy::new(29, 12, 1402)),
            ((2024, 3, 20), Dmy::new(1, 1, 1403)),
            ((2024, 9, 22), Dmy::new(1, 7, 1403)),
        ];
        for ((y, m, d), persian) in cases {
            let jd = fixed_from_gregorian(y, m, d);
            for calendar in [ASTRONOMICAL, ARITHMETIC] {
                assert_eq!(calendar.from_jd(jd).unwrap(), persian, "{y}-{m}-{d}");
                assert_eq!(calendar.validate(&persian).unwrap(), jd);
            }
        }
    }

    #[test]
    fn test_round_trip() {
        for jd in (2_459_000..2_461_500).step_by(29) {
            for calendar in [ASTRONOMICAL, ARITHMETIC] {
                let dmy = calendar.from_jd(jd).unwrap();
                assert_eq!(calendar.validate(&dmy).unwrap(), jd, "{dmy}");
            }
        }
    }

    #[test]
    fn test_week_starts_saturday() {
        let nowruz = Date::new(ASTRONOMICAL, Dmy::new(1, 1, 1403));
        assert_eq!(nowruz.weekday_name().unwrap(), "Chaharshanbeh");
        assert_eq!(nowruz.format("%d %M %y").unwrap(), "1 Farvardin 1403");
    }
}
