//! The French Republican calendar with the arithmetic leap rule proposed by
//! Romme: leap years as in the Gregorian calendar, except that multiples of
//! 4000 are common.
//!
//! Twelve months of three décades each are followed by the Sansculottides,
//! numbered here as month 13.

use crate::consts::{CENTURY_CYCLE, FRENCH_EPOCH, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::div_f;
use crate::{Dmy, Result};

/// Mean year length under the Romme rule
const MEAN_YEAR: f64 = 1_460_969.0 / 4000.0;

const MONTH_NAMES: [&str; 13] = [
    "Vendémiaire",
    "Brumaire",
    "Frimaire",
    "Nivôse",
    "Pluviôse",
    "Ventôse",
    "Germinal",
    "Floréal",
    "Prairial",
    "Messidor",
    "Thermidor",
    "Fructidor",
    "Sansculottides",
];

const DECADE_DAYS: [&str; 10] =
    ["Primidi", "Duodi", "Tridi", "Quartidi", "Quintidi", "Sextidi", "Septidi", "Octidi", "Nonidi", "Décadi"];

const SANSCULOTTIDES: [&str; 6] = [
    "Fête de la Vertu",
    "Fête du Génie",
    "Fête du Travail",
    "Fête de l'Opinion",
    "Fête des Récompenses",
    "Fête de la Révolution",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct French;

pub fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(LEAP_YEAR_CYCLE) == 0
        && !matches!(year.rem_euclid(GREGORIAN_CYCLE), 100 | 200 | 300)
        && year.rem_euclid(4000) != 0
}

/// Décade number (1 to 3) and day name of a date in months 1 to 12, or the
/// festival name of a Sansculottide (décade 0).
pub fn decade(dmy: &Dmy) -> (u8, &'static str) {
    let day = (dmy.day.max(1) - 1) as usize;
    if dmy.month == 13 {
        (0, SANSCULOTTIDES[day.min(5)])
    } else {
        ((day / 10).min(2) as u8 + 1, DECADE_DAYS[day % 10])
    }
}

impl DmyCalendar for French {
    fn months_in_year(&self, _year: i64) -> u8 {
        13
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        Ok(match month {
            13 if is_leap_year(year) => 6,
            13 => 5,
            _ => 30,
        })
    }

    fn is_leap_year(&self, year: i64) -> Result<bool> {
        Ok(is_leap_year(year))
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        let prior = dmy.year - 1;
        Ok(FRENCH_EPOCH - 1
            + 365 * prior
            + div_f(prior, LEAP_YEAR_CYCLE)
            - div_f(prior, CENTURY_CYCLE)
            + div_f(prior, GREGORIAN_CYCLE)
            - div_f(prior, 4000)
            + 30 * (i64::from(dmy.month) - 1)
            + i64::from(dmy.day))
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        let approx = ((jd - FRENCH_EPOCH + 2) as f64 / MEAN_YEAR).floor() as i64 + 1;
        let year = if jd < self.dmy_to_jd(Dmy::new(1, 1, approx))? { approx - 1 } else { approx };
        let month = div_f(jd - self.dmy_to_jd(Dmy::new(1, 1, year))?, 30) as i32 + 1;
        let day = jd - self.dmy_to_jd(Dmy::new(1, month, year))? + 1;
        Ok(Dmy::new(day as i32, month, year))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        MONTH_NAMES[(month.clamp(1, 13) - 1) as usize]
    }
}

dmy_calendar!(French, "French Republican", crate::week::SEVEN_DAY);
