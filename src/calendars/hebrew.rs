//! The arithmetic Hebrew calendar.
//!
//! Months are numbered in civil order from Tishri = 1. In a leap year the
//! sixth and seventh months are Adar I and Adar II and Elul is month 13;
//! otherwise Adar is month 6 and Elul month 12.

use tracing::debug;

use crate::astro::Moment;
use crate::consts::HEBREW_EPOCH;
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::{div_f, mod_f};
use crate::{Dmy, Result};

/// Shortest possible year
pub const MIN_YEAR_DAYS: i64 = 353;
/// Longest possible year
pub const MAX_YEAR_DAYS: i64 = 385;

/// Parts (halakim) per day
const PARTS_PER_DAY: i64 = 25_920;
/// Mean lunation in days: 29 days, 12 hours and 793 parts
pub const MEAN_MONTH: f64 = 29.5 + 793.0 / PARTS_PER_DAY as f64;

const COMMON_MONTHS: [&str; 12] =
    ["Tishri", "Heshvan", "Kislev", "Tevet", "Shevat", "Adar", "Nisan", "Iyyar", "Sivan", "Tammuz", "Av", "Elul"];

const LEAP_MONTHS: [&str; 13] = [
    "Tishri", "Heshvan", "Kislev", "Tevet", "Shevat", "Adar I", "Adar II", "Nisan", "Iyyar", "Sivan", "Tammuz", "Av",
    "Elul",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hebrew;

/// Seven leap years in each 19-year Metonic cycle.
pub fn is_leap_year(year: i64) -> bool {
    mod_f(7 * year + 1, 19) < 7
}

fn months_before_year(year: i64) -> i64 {
    div_f(235 * year - 234, 19)
}

/// Days from the epoch to the molad of Tishri of `year`, postponed by one
/// day when that would put Rosh Hashanah on Sunday, Wednesday or Friday.
fn elapsed_days(year: i64) -> i64 {
    let months = months_before_year(year);
    let parts = 12_084 + 13_753 * months;
    let days = 29 * months + div_f(parts, PARTS_PER_DAY);
    if mod_f(3 * (days + 1), 7) < 3 { days + 1 } else { days }
}

/// Remaining postponements that keep year lengths within 353..=385.
fn year_length_correction(year: i64) -> i64 {
    let previous = elapsed_days(year - 1);
    let current = elapsed_days(year);
    let next = elapsed_days(year + 1);
    if next - current == 356 {
        2
    } else if current - previous == 382 {
        1
    } else {
        0
    }
}

/// JDN of 1 Tishri of `year`.
pub fn new_year(year: i64) -> i64 {
    HEBREW_EPOCH + elapsed_days(year) + year_length_correction(year)
}

pub fn days_in_year(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

/// Heshvan has 30 days in complete years.
pub fn is_long_heshvan(year: i64) -> bool {
    matches!(days_in_year(year), 355 | 385)
}

/// Kislev has 29 days in deficient years.
pub fn is_short_kislev(year: i64) -> bool {
    matches!(days_in_year(year), 353 | 383)
}

/// Mean conjunction (molad) opening civil `month` of `year`.
pub fn molad(month: i32, year: i64) -> Moment {
    let months = i64::from(month) - 1 + months_before_year(year);
    Moment::from_jd(HEBREW_EPOCH) - 876.0 / PARTS_PER_DAY as f64 + months as f64 * MEAN_MONTH
}

fn month_length(month: i32, year: i64) -> u8 {
    let leap = is_leap_year(year);
    match month {
        2 if is_long_heshvan(year) => 30,
        3 if is_short_kislev(year) => 29,
        1 | 3 | 5 => 30,
        2 | 4 => 29,
        6 if leap => 30,
        6 | 7 if leap => 29,
        // Nisan alternates 30, 29 through Elul.
        _ => {
            let from_nisan = if leap { month - 8 } else { month - 7 };
            if from_nisan.rem_euclid(2) == 0 { 30 } else { 29 }
        },
    }
}

fn months_in_year(year: i64) -> u8 {
    if is_leap_year(year) { 13 } else { 12 }
}

/// Last year whose new year falls at or before `jd`, by bisection between
/// the bounds set by the shortest and longest year lengths.
fn year_at(jd: i64) -> i64 {
    let days = jd - HEBREW_EPOCH;
    let (a, b) = (div_f(days, MAX_YEAR_DAYS) + 1, div_f(days, MIN_YEAR_DAYS) + 1);
    let (mut lo, mut hi) = (a.min(b) - 1, a.max(b) + 1);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if new_year(mid) <= jd {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    debug!(jd, year = lo, "located Hebrew year");
    lo
}

impl DmyCalendar for Hebrew {
    fn months_in_year(&self, year: i64) -> u8 {
        months_in_year(year)
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        Ok(month_length(month, year))
    }

    fn is_leap_year(&self, year: i64) -> Result<bool> {
        Ok(is_leap_year(year))
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        let before: i64 = (1..dmy.month).map(|m| i64::from(month_length(m, dmy.year))).sum();
        Ok(new_year(dmy.year) + before + i64::from(dmy.day) - 1)
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        let year = year_at(jd);
        let mut start = new_year(year);
        let mut month = 1;
        while month < i32::from(months_in_year(year)) && jd >= start + i64::from(month_length(month, year)) {
            start += i64::from(month_length(month, year));
            month += 1;
        }
        Ok(Dmy::new((jd - start + 1) as i32, month, year))
    }

    fn month_name(&self, month: i32, year: i64) -> &'static str {
        if is_leap_year(year) {
            LEAP_MONTHS[(month.clamp(1, 13) - 1) as usize]
        } else {
            COMMON_MONTHS[(month.clamp(1, 12) - 1) as usize]
        }
    }

    fn days_in_year(&self, year: i64) -> Result<i64> {
        Ok(days_in_year(year))
    }
}

dmy_calendar!(Hebrew, "Hebrew", crate::week::HEBREW);
