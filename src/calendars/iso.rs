//! The ISO 8601 week-date calendar.
//!
//! Fields reuse [`Dmy`]: `day` is the weekday (1 = Monday), `month` the
//! week number and `year` the ISO week-year. Week 1 is the week containing
//! 4 January.

use super::gregorian::{fixed_from_gregorian, year_from_fixed};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::{div_f, mod_f};
use crate::{Dmy, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Iso;

/// Monday of week 1 of `year`.
fn first_monday(year: i64) -> i64 {
    let fourth = fixed_from_gregorian(year, 1, 4);
    // JDN 0 was a Monday.
    fourth - mod_f(fourth, 7)
}

pub fn weeks_in_year(year: i64) -> u8 {
    div_f(first_monday(year + 1) - first_monday(year), 7) as u8
}

impl DmyCalendar for Iso {
    fn months_in_year(&self, year: i64) -> u8 {
        weeks_in_year(year)
    }

    fn days_in_month(&self, _week: i32, _year: i64) -> Result<u8> {
        Ok(7)
    }

    /// Long years have 53 weeks.
    fn is_leap_year(&self, year: i64) -> Result<bool> {
        Ok(weeks_in_year(year) == 53)
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        Ok(first_monday(dmy.year) + 7 * (i64::from(dmy.month) - 1) + i64::from(dmy.day) - 1)
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        let approx = year_from_fixed(jd - 3);
        let year = if jd >= first_monday(approx + 1) { approx + 1 } else { approx };
        let week = div_f(jd - first_monday(year), 7) + 1;
        Ok(Dmy::new(mod_f(jd, 7) as i32 + 1, week as i32, year))
    }

    fn month_name(&self, _week: i32, _year: i64) -> &'static str {
        "Week"
    }
}

dmy_calendar!(Iso, "ISO", crate::week::ISO);
