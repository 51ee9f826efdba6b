//! Twelve months of thirty days and five epagomenal days, no leap years.
//!
//! The Egyptian and Armenian calendars share this structure and differ only
//! in epoch, names and week.

use crate::consts::{ARMENIAN_EPOCH, EGYPTIAN_EPOCH};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::DivMod;
use crate::{Dmy, Result};

const EGYPTIAN_MONTHS: [&str; 13] = [
    "Thoth",
    "Phaophi",
    "Athyr",
    "Choiak",
    "Tybi",
    "Mechir",
    "Phamenoth",
    "Pharmuthi",
    "Pachon",
    "Payni",
    "Epiphi",
    "Mesori",
    "Epagomenae",
];

const ARMENIAN_MONTHS: [&str; 13] = [
    "Nawasardi",
    "Hori",
    "Sahmi",
    "Tre",
    "K`aloch",
    "Arach",
    "Mehekani",
    "Areg",
    "Ahekani",
    "Mareri",
    "Margach",
    "Hrotich",
    "Aweleach",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Egyptian;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Armenian;

fn to_jd(epoch: i64, dmy: Dmy) -> i64 {
    epoch + 365 * (dmy.year - 1) + 30 * (i64::from(dmy.month) - 1) + i64::from(dmy.day) - 1
}

fn from_jd(epoch: i64, jd: i64) -> Dmy {
    let (years, day_of_year) = (jd - epoch).div_mod_f(365);
    let (months, day) = day_of_year.div_mod_f(30);
    Dmy::new(day as i32 + 1, months as i32 + 1, years + 1)
}

const fn days_in_month(month: i32) -> u8 {
    if month == 13 { 5 } else { 30 }
}

fn month_name(names: &[&'static str; 13], month: i32) -> &'static str {
    names[(month.clamp(1, 13) - 1) as usize]
}

impl DmyCalendar for Egyptian {
    fn months_in_year(&self, _year: i64) -> u8 {
        13
    }

    fn days_in_month(&self, month: i32, _year: i64) -> Result<u8> {
        Ok(days_in_month(month))
    }

    fn is_leap_year(&self, _year: i64) -> Result<bool> {
        Ok(false)
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        Ok(to_jd(EGYPTIAN_EPOCH, dmy))
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        Ok(from_jd(EGYPTIAN_EPOCH, jd))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        month_name(&EGYPTIAN_MONTHS, month)
    }

    fn days_in_year(&self, _year: i64) -> Result<i64> {
        Ok(365)
    }
}

impl DmyCalendar for Armenian {
    fn months_in_year(&self, _year: i64) -> u8 {
        13
    }

    fn days_in_month(&self, month: i32, _year: i64) -> Result<u8> {
        Ok(days_in_month(month))
    }

    fn is_leap_year(&self, _year: i64) -> Result<bool> {
        Ok(false)
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        Ok(to_jd(ARMENIAN_EPOCH, dmy))
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        Ok(from_jd(ARMENIAN_EPOCH, jd))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        month_name(&ARMENIAN_MONTHS, month)
    }

    fn days_in_year(&self, _year: i64) -> Result<i64> {
        Ok(365)
    }
}

dmy_calendar!(Egyptian, "Egyptian", crate::week::SEVEN_DAY);
dmy_calendar!(Armenian, "Armenian", crate::week::ARMENIAN);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Calendar, Date};

    #[test]
    fn test_epochs() {
        assert_eq!(Egyptian.to_jd(&Dmy::new(1, 1, 1)).unwrap(), EGYPTIAN_EPOCH);
        assert_eq!(Armenian.to_jd(&Dmy::new(1, 1, 1)).unwrap(), ARMENIAN_EPOCH);
        assert_eq!(Egyptian.from_jd(EGYPTIAN_EPOCH - 1).unwrap(), Dmy::new(5, 13, 0));
    }

    #[test]
    fn test_millennium() {
        assert_eq!(Egyptian.from_jd(2_451_545).unwrap(), Dmy::new(13, 9, 2748));
        assert_eq!(Armenian.from_jd(2_451_545).unwrap(), Dmy::new(8, 6, 1449));
    }

    #[test]
    fn test_epagomenal_days() {
        assert!(Egyptian.is_valid(&Dmy::new(5, 13, 100)));
        assert!(!Egyptian.is_valid(&Dmy::new(6, 13, 100)));
        assert!(!Armenian.is_valid(&Dmy::new(1, 14, 100)));
        assert_eq!(Egyptian.days_in_year(7).unwrap(), 365);
    }

    #[test]
    fn test_armenian_week_and_names() {
        // 1 January 2000 was a Saturday.
        let date = Date::from_jd(Armenian, 2_451_545).unwrap();
        assert_eq!(date.weekday_name().unwrap(), "Shabath");
        assert_eq!(date.format("%d %M %y").unwrap(), "8 Arach 1449");
    }
}
