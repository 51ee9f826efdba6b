//! The Coptic and Ethiopic calendars: twelve months of thirty days, a short
//! thirteenth month, and a leap year every fourth year.

use crate::consts::{COPTIC_EPOCH, ETHIOPIC_EPOCH, LEAP_YEAR_CYCLE};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::div_f;
use crate::{Dmy, Result};

const COPTIC_MONTHS: [&str; 13] = [
    "Thoout",
    "Paope",
    "Athor",
    "Koiak",
    "Tobe",
    "Meshir",
    "Paremotep",
    "Parmoute",
    "Pashons",
    "Paone",
    "Epep",
    "Mesore",
    "Epagomene",
];

const ETHIOPIC_MONTHS: [&str; 13] = [
    "Maskaram",
    "Teqemt",
    "Hedar",
    "Takhsas",
    "Ter",
    "Yakatit",
    "Magabit",
    "Miyazya",
    "Genbot",
    "Sane",
    "Hamle",
    "Nahase",
    "Paguemen",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coptic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ethiopic;

/// Leap years precede a Julian leap year.
pub const fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(LEAP_YEAR_CYCLE) == 3
}

fn to_jd(epoch: i64, dmy: Dmy) -> i64 {
    epoch - 1
        + 365 * (dmy.year - 1)
        + div_f(dmy.year, LEAP_YEAR_CYCLE)
        + 30 * (i64::from(dmy.month) - 1)
        + i64::from(dmy.day)
}

fn from_jd(epoch: i64, jd: i64) -> Dmy {
    let year = div_f(4 * (jd - epoch) + 1463, 1461);
    let month = div_f(jd - to_jd(epoch, Dmy::new(1, 1, year)), 30) + 1;
    let day = jd + 1 - to_jd(epoch, Dmy::new(1, month as i32, year));
    Dmy::new(day as i32, month as i32, year)
}

fn days_in_month(month: i32, year: i64) -> u8 {
    match month {
        13 if is_leap_year(year) => 6,
        13 => 5,
        _ => 30,
    }
}

impl DmyCalendar for Coptic {
    fn months_in_year(&self, _year: i64) -> u8 {
        13
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        Ok(days_in_month(month, year))
    }

    fn is_leap_year(&self, year: i64) -> Result<bool> {
        Ok(is_leap_year(year))
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        Ok(to_jd(COPTIC_EPOCH, dmy))
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        Ok(from_jd(COPTIC_EPOCH, jd))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        COPTIC_MONTHS[(month.clamp(1, 13) - 1) as usize]
    }
}

impl DmyCalendar for Ethiopic {
    fn months_in_year(&self, _year: i64) -> u8 {
        13
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        Ok(days_in_month(month, year))
    }

    fn is_leap_year(&self, year: i64) -> Result<bool> {
        Ok(is_leap_year(year))
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        Ok(to_jd(ETHIOPIC_EPOCH, dmy))
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        Ok(from_jd(ETHIOPIC_EPOCH, jd))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        ETHIOPIC_MONTHS[(month.clamp(1, 13) - 1) as usize]
    }
}

dmy_calendar!(Coptic, "Coptic", crate::week::COPTIC);
dmy_calendar!(Ethiopic, "Ethiopic", crate::week::ETHIOPIC);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::gregorian::fixed_from_gregorian;
    use crate::{Calendar, Date};

    #[test]
    fn test_epoch_formats() {
        let date = Date::new(Coptic, Dmy::new(1, 1, 1));
        assert_eq!(date.format("%W, %d %M %y").unwrap(), "Psoou, 1 Thoout 1");
    }

    #[test]
    fn test_year_lengths() {
        let lengths: Vec<i64> = (1..=8).map(|y| Coptic.days_in_year(y).unwrap()).collect();
        assert_eq!(lengths, [365, 365, 366, 365, 365, 365, 366, 365]);
        assert_eq!(Ethiopic.days_in_month(13, 2015).unwrap(), 6);
        assert_eq!(Ethiopic.days_in_month(13, 2016).unwrap(), 5);
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(Coptic.from_jd(2_451_545).unwrap(), Dmy::new(22, 4, 1716));
        assert_eq!(Ethiopic.from_jd(2_451_545).unwrap(), Dmy::new(22, 4, 1992));

        // Genna fell on 28 Takhsas after the leap year 2015.
        let genna = fixed_from_gregorian(2024, 1, 7);
        assert_eq!(Ethiopic.from_jd(genna).unwrap(), Dmy::new(28, 4, 2016));
        assert_eq!(Ethiopic.month_name(4, 2016), "Takhsas");
    }

    #[test]
    fn test_round_trip() {
        for jd in (1_700_000..2_600_000).step_by(97) {
            for dmy in [Coptic.from_jd(jd).unwrap(), Ethiopic.from_jd(jd).unwrap()] {
                assert!((1..=13).contains(&dmy.month) && dmy.day >= 1, "{dmy}");
            }
            assert_eq!(Coptic.validate(&Coptic.from_jd(jd).unwrap()).unwrap(), jd);
            assert_eq!(Ethiopic.validate(&Ethiopic.from_jd(jd).unwrap()).unwrap(), jd);
        }
    }
}
