use super::gregorian::{MONTH_NAMES, days_before_month, month_day, month_length};
use crate::consts::{JULIAN_EPOCH, LEAP_YEAR_CYCLE};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::{div_f, mod_f};
use crate::{Dmy, Result};

/// The proleptic Julian calendar, with a year 0 (1 BCE).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Julian;

pub const fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(LEAP_YEAR_CYCLE) == 0
}

pub fn fixed_from_julian(year: i64, month: i32, day: i32) -> i64 {
    let prior = year - 1;
    JULIAN_EPOCH - 1
        + 365 * prior
        + div_f(prior, LEAP_YEAR_CYCLE)
        + days_before_month(month, is_leap_year(year))
        + i64::from(day)
}

pub fn julian_from_fixed(jd: i64) -> Dmy {
    let year = div_f(4 * (jd - JULIAN_EPOCH) + 1464, 1461);
    let leap = is_leap_year(year);
    let new_year = fixed_from_julian(year, 1, 1);
    let (month, day) = month_day(jd - new_year, fixed_from_julian(year, 3, 1) - new_year, leap);
    Dmy::new(day, month, year)
}

impl DmyCalendar for Julian {
    fn months_in_year(&self, _year: i64) -> u8 {
        12
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        Ok(month_length(month, is_leap_year(year)))
    }

    fn is_leap_year(&self, year: i64) -> Result<bool> {
        Ok(is_leap_year(year))
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        Ok(fixed_from_julian(dmy.year, dmy.month, dmy.day))
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        Ok(julian_from_fixed(jd))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        MONTH_NAMES[mod_f(i64::from(month) - 1, 12) as usize]
    }

    fn days_in_year(&self, year: i64) -> Result<i64> {
        Ok(if is_leap_year(year) { 366 } else { 365 })
    }
}

dmy_calendar!(Julian, "Julian", crate::week::SEVEN_DAY);
