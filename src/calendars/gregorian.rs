use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_GREGORIAN_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    GREGORIAN_EPOCH, LEAP_YEAR_CYCLE,
};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::{DivMod, div_f, mod_f};
use crate::{Dmy, Result};

/// English month names shared by the Gregorian and Julian calendars.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The proleptic Gregorian calendar, with a year 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gregorian;

pub const fn is_leap_year(year: i64) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

/// Month length shared by the Julian and Gregorian rules.
pub(crate) fn month_length(month: i32, leap: bool) -> u8 {
    if month == i32::from(FEBRUARY) && leap {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month.clamp(1, 12) as usize]
    }
}

/// Days before the first of `month` in a year starting 1 January.
pub(crate) fn days_before_month(month: i32, leap: bool) -> i64 {
    let month = i64::from(month);
    let correction = if month <= 2 {
        0
    } else if leap {
        -1
    } else {
        -2
    };
    div_f(367 * month - 362, 12) + correction
}

/// Month and day of the `day_of_year`-th day (0-based) of a year.
pub(crate) fn month_day(day_of_year: i64, first_of_march: i64, leap: bool) -> (i32, i32) {
    let correction = if day_of_year < first_of_march {
        0
    } else if leap {
        1
    } else {
        2
    };
    let month = div_f(12 * (day_of_year + correction) + 373, 367);
    let day = day_of_year - days_before_month(month as i32, leap) + 1;
    (month as i32, day as i32)
}

/// JDN of a Gregorian date; month and day may overflow.
pub fn fixed_from_gregorian(year: i64, month: i32, day: i32) -> i64 {
    let prior = year - 1;
    GREGORIAN_EPOCH - 1
        + 365 * prior
        + div_f(prior, LEAP_YEAR_CYCLE)
        - div_f(prior, CENTURY_CYCLE)
        + div_f(prior, GREGORIAN_CYCLE)
        + days_before_month(month, is_leap_year(year))
        + i64::from(day)
}

pub fn year_from_fixed(jd: i64) -> i64 {
    let (n400, d1) = (jd - GREGORIAN_EPOCH).div_mod_f(DAYS_IN_GREGORIAN_CYCLE);
    let (n100, d2) = d1.div_mod_f(36524);
    let (n4, d3) = d2.div_mod_f(1461);
    let n1 = div_f(d3, 365);
    let year = GREGORIAN_CYCLE * n400 + CENTURY_CYCLE * n100 + LEAP_YEAR_CYCLE * n4 + n1;
    if n100 == 4 || n1 == 4 { year } else { year + 1 }
}

pub fn gregorian_from_fixed(jd: i64) -> Dmy {
    let year = year_from_fixed(jd);
    let leap = is_leap_year(year);
    let new_year = fixed_from_gregorian(year, 1, 1);
    let (month, day) = month_day(jd - new_year, fixed_from_gregorian(year, 3, 1) - new_year, leap);
    Dmy::new(day, month, year)
}

impl DmyCalendar for Gregorian {
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
        Ok(fixed_from_gregorian(dmy.year, dmy.month, dmy.day))
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        Ok(gregorian_from_fixed(jd))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        MONTH_NAMES[mod_f(i64::from(month) - 1, 12) as usize]
    }

    fn days_in_year(&self, year: i64) -> Result<i64> {
        Ok(if is_leap_year(year) { 366 } else { 365 })
    }
}

dmy_calendar!(Gregorian, "Gregorian", crate::week::SEVEN_DAY);
