//! The Islamic (Hijri) calendar, either tabular or observational.
//!
//! Tabular variants differ in which years of the 30-year cycle get a 30th
//! day in Dhu al-Hijjah, and in whether the era starts on 15 or 16 July 622
//! (Julian). The observational variant starts each month on the first day
//! whose eve satisfies a visibility rule at a given place.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::astro::{Location, Moment, lunar};
use crate::consts::{ISLAMIC_ASTRONOMICAL_EPOCH, ISLAMIC_CIVIL_EPOCH, MEAN_SYNODIC_MONTH};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::{DivMod, div_f, mod_f};
use crate::{CalendarError, Dmy, Result};

/// Days scanned backwards for the start of an observational month
const MAX_MONTH_SEARCH_DAYS: i64 = 60;

const MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi` al-Awwal",
    "Rabi` al-Thani",
    "Jumada al-Ula",
    "Jumada al-Akhirah",
    "Rajab",
    "Sha`ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qa`dah",
    "Dhu al-Hijjah",
];

/// Leap years of the 30-year tabular cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeapSequence {
    /// 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29
    #[default]
    Nizari,
    /// 2, 5, 7, 10, 13, 15, 18, 21, 24, 26, 29
    Fazari,
    /// 2, 5, 8, 10, 13, 16, 19, 21, 24, 27, 29
    Misri,
    /// 2, 5, 8, 11, 13, 16, 19, 21, 24, 27, 30
    Habash,
}

impl LeapSequence {
    pub const fn years(self) -> [i64; 11] {
        match self {
            Self::Nizari => [2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29],
            Self::Fazari => [2, 5, 7, 10, 13, 15, 18, 21, 24, 26, 29],
            Self::Misri => [2, 5, 8, 10, 13, 16, 19, 21, 24, 27, 29],
            Self::Habash => [2, 5, 8, 11, 13, 16, 19, 21, 24, 27, 30],
        }
    }

    pub fn is_leap_year(self, year: i64) -> bool {
        let position = mod_f(year - 1, 30) + 1;
        self.years().contains(&position)
    }

    /// Leap years among years 1 to `year - 1`.
    fn leap_years_before(self, year: i64) -> i64 {
        let (cycles, position) = (year - 1).div_mod_f(30);
        cycles * 11 + self.years().iter().filter(|&&k| k <= position).count() as i64
    }
}

/// Day numbered 1 Muharram AH 1 by the tabular calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IslamicEpoch {
    /// Friday 16 July 622 (Julian)
    #[default]
    Civil,
    /// Thursday 15 July 622 (Julian)
    Astronomical,
}

impl IslamicEpoch {
    pub const fn jd(self) -> i64 {
        match self {
            Self::Civil => ISLAMIC_CIVIL_EPOCH,
            Self::Astronomical => ISLAMIC_ASTRONOMICAL_EPOCH,
        }
    }
}

/// Rule deciding whether a day is the first of a month, judged at sunset on
/// its eve (18:00 local mean time).
///
/// A rule must hold on exactly one day per lunation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum MonthFunc {
    /// The Moon is at least `hours` old at sunset on the eve.
    MinimumAge { hours: f64 },
    /// Conjunction happens before sunset on the eve. This approximates the
    /// Umm al-Qura rule and has not been checked against its tables.
    ConjunctionBeforeSunset,
    /// A caller-supplied rule, given the day and the place.
    #[serde(skip)]
    Custom(fn(i64, &Location) -> bool),
}

impl MonthFunc {
    /// Whether `jd` is the first day of a month at `location`.
    ///
    /// # Errors
    /// Propagates new-moon search failures.
    pub fn is_first_day(&self, jd: i64, location: &Location) -> Result<bool> {
        let min_age = match *self {
            Self::MinimumAge { hours } => hours / 24.0,
            Self::ConjunctionBeforeSunset => 0.0,
            Self::Custom(rule) => return Ok(rule(jd, location)),
        };
        let sunset = location.universal_from_local(Moment::from_jd(jd - 1) + 0.75);
        let age = lunar::moon_age(sunset)?;
        Ok(min_age <= age && age < min_age + 1.0)
    }
}

/// How the calendar decides month starts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum IslamicSystem {
    Arithmetic { leaps: LeapSequence, epoch: IslamicEpoch },
    Astronomical { visibility: MonthFunc, location: Location },
}

impl Default for IslamicSystem {
    fn default() -> Self {
        Self::Arithmetic { leaps: LeapSequence::default(), epoch: IslamicEpoch::default() }
    }
}

/// The Islamic calendar under a chosen [`IslamicSystem`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Islamic {
    pub system: IslamicSystem,
}

impl Islamic {
    pub const fn new(system: IslamicSystem) -> Self {
        Self { system }
    }

    pub const fn arithmetic(leaps: LeapSequence, epoch: IslamicEpoch) -> Self {
        Self::new(IslamicSystem::Arithmetic { leaps, epoch })
    }

    /// Observational months seen from Mecca.
    pub const fn observational(visibility: MonthFunc) -> Self {
        Self::new(IslamicSystem::Astronomical { visibility, location: Location::MECCA })
    }

    /// Last month start at or before `jd` under an observational rule.
    fn month_start(visibility: &MonthFunc, location: &Location, jd: i64) -> Result<i64> {
        for day in (jd - MAX_MONTH_SEARCH_DAYS..=jd).rev() {
            if visibility.is_first_day(day, location)? {
                return Ok(day);
            }
        }
        warn!(jd, ?visibility, "no month start found");
        Err(CalendarError::NoConvergence { what: "Islamic month start", iterations: MAX_MONTH_SEARCH_DAYS as usize })
    }

    fn observed_to_jd(visibility: &MonthFunc, location: &Location, dmy: Dmy) -> Result<i64> {
        let months = 12 * (dmy.year - 1) + i64::from(dmy.month) - 1;
        let middle = ISLAMIC_CIVIL_EPOCH + ((months as f64 + 0.5) * MEAN_SYNODIC_MONTH).floor() as i64;
        Ok(Self::month_start(visibility, location, middle)? + i64::from(dmy.day) - 1)
    }

    fn observed_from_jd(visibility: &MonthFunc, location: &Location, jd: i64) -> Result<Dmy> {
        let start = Self::month_start(visibility, location, jd)?;
        let months = ((start - ISLAMIC_CIVIL_EPOCH) as f64 / MEAN_SYNODIC_MONTH).round() as i64;
        let (years, month) = months.div_mod_f(12);
        debug!(jd, start, months, "observational month located");
        Ok(Dmy::new((jd - start + 1) as i32, month as i32 + 1, years + 1))
    }

    fn tabular_to_jd(leaps: LeapSequence, epoch: IslamicEpoch, dmy: Dmy) -> i64 {
        let month = i64::from(dmy.month);
        epoch.jd() - 1
            + 354 * (dmy.year - 1)
            + leaps.leap_years_before(dmy.year)
            + 29 * (month - 1)
            + div_f(month, 2)
            + i64::from(dmy.day)
    }

    fn tabular_from_jd(leaps: LeapSequence, epoch: IslamicEpoch, jd: i64) -> Dmy {
        let new_year = |year| Self::tabular_to_jd(leaps, epoch, Dmy::new(1, 1, year));
        let mut year = div_f(30 * (jd - epoch.jd()) + 10_646, 10_631);
        while new_year(year + 1) <= jd {
            year += 1;
        }
        while new_year(year) > jd {
            year -= 1;
        }
        let month = div_f(11 * (jd - new_year(year)) + 330, 325) as i32;
        let day = jd - Self::tabular_to_jd(leaps, epoch, Dmy::new(1, month, year)) + 1;
        Dmy::new(day as i32, month, year)
    }
}

impl DmyCalendar for Islamic {
    fn months_in_year(&self, _year: i64) -> u8 {
        12
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        match self.system {
            IslamicSystem::Arithmetic { leaps, .. } => {
                Ok(if month % 2 == 1 || (month == 12 && leaps.is_leap_year(year)) { 30 } else { 29 })
            },
            IslamicSystem::Astronomical { .. } => {
                let start = self.dmy_to_jd(Dmy::new(1, month, year))?;
                let next = self.dmy_to_jd(Dmy::new(1, month + 1, year))?;
                Ok((next - start) as u8)
            },
        }
    }

    /// A leap year has 355 days.
    fn is_leap_year(&self, year: i64) -> Result<bool> {
        match self.system {
            IslamicSystem::Arithmetic { leaps, .. } => Ok(leaps.is_leap_year(year)),
            IslamicSystem::Astronomical { .. } => Ok(self.days_in_year(year)? == 355),
        }
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        match &self.system {
            IslamicSystem::Arithmetic { leaps, epoch } => Ok(Self::tabular_to_jd(*leaps, *epoch, dmy)),
            IslamicSystem::Astronomical { visibility, location } => Self::observed_to_jd(visibility, location, dmy),
        }
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        match &self.system {
            IslamicSystem::Arithmetic { leaps, epoch } => Ok(Self::tabular_from_jd(*leaps, *epoch, jd)),
            IslamicSystem::Astronomical { visibility, location } => Self::observed_from_jd(visibility, location, jd),
        }
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        MONTH_NAMES[mod_f(i64::from(month) - 1, 12) as usize]
    }
}

dmy_calendar!(Islamic, "Islamic", crate::week::ISLAMIC);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::gregorian::fixed_from_gregorian;
    use crate::calendars::julian::fixed_from_julian;
    use crate::{Calendar, Date};

    #[test]
    fn test_epochs() {
        let civil = Islamic::default();
        assert_eq!(civil.to_jd(&Dmy::new(1, 1, 1)).unwrap(), fixed_from_julian(622, 7, 16));
        let astronomical = Islamic::arithmetic(LeapSequence::Nizari, IslamicEpoch::Astronomical);
        assert_eq!(astronomical.to_jd(&Dmy::new(1, 1, 1)).unwrap(), fixed_from_julian(622, 7, 15));
    }

    #[test]
    fn test_leap_sequences() {
        let cases = [
            (LeapSequence::Nizari, 7, true),
            (LeapSequence::Fazari, 15, true),
            (LeapSequence::Fazari, 16, false),
            (LeapSequence::Misri, 8, true),
            (LeapSequence::Habash, 30, true),
            (LeapSequence::Habash, 60, true),
            (LeapSequence::Habash, 29, false),
            (LeapSequence::Nizari, 1445, true),
            (LeapSequence::Nizari, 1446, false),
        ];
        for (leaps, year, expected) in cases {
            assert_eq!(leaps.is_leap_year(year), expected, "{leaps:?} {year}");
        }
        for leaps in [LeapSequence::Nizari, LeapSequence::Fazari, LeapSequence::Misri, LeapSequence::Habash] {
            assert_eq!(leaps.leap_years_before(31), 11);
            assert_eq!((1..=30).filter(|&y| leaps.is_leap_year(y)).count(), 11);
        }
    }

    #[test]
    fn test_tabular_dates() {
        let ramadan = fixed_from_gregorian(2024, 3, 11);
        assert_eq!(Islamic::default().from_jd(ramadan).unwrap(), Dmy::new(1, 9, 1445));
        let habash = Islamic::arithmetic(LeapSequence::Habash, IslamicEpoch::Civil);
        assert_eq!(habash.from_jd(ramadan).unwrap(), Dmy::new(1, 9, 1445));
        let astronomical = Islamic::arithmetic(LeapSequence::Nizari, IslamicEpoch::Astronomical);
        assert_eq!(astronomical.from_jd(ramadan).unwrap(), Dmy::new(2, 9, 1445));
        assert_eq!(Islamic::default().from_jd(2_451_545).unwrap(), Dmy::new(24, 9, 1420));
    }

    #[test]
    fn test_tabular_round_trip() {
        for leaps in [LeapSequence::Nizari, LeapSequence::Habash] {
            let calendar = Islamic::arithmetic(leaps, IslamicEpoch::Civil);
            for jd in (1_900_000..2_600_000).step_by(131) {
                let dmy = calendar.from_jd(jd).unwrap();
                assert_eq!(calendar.validate(&dmy).unwrap(), jd, "{leaps:?} {dmy}");
            }
        }
    }

    #[test]
    fn test_tabular_month_lengths() {
        let calendar = Islamic::default();
        assert_eq!(calendar.days_in_month(1, 1446).unwrap(), 30);
        assert_eq!(calendar.days_in_month(2, 1446).unwrap(), 29);
        assert_eq!(calendar.days_in_month(12, 1446).unwrap(), 29);
        assert_eq!(calendar.days_in_month(12, 1447).unwrap(), 30);
        assert_eq!(calendar.days_in_year(1446).unwrap(), 354);
        assert_eq!(calendar.days_in_year(1447).unwrap(), 355);
        assert!(!calendar.is_valid(&Dmy::new(30, 12, 1446)));
    }

    #[test]
    fn test_observational_ramadan_1445() {
        let ramadan = fixed_from_gregorian(2024, 3, 11);
        let conjunction = Islamic::observational(MonthFunc::ConjunctionBeforeSunset);
        assert_eq!(conjunction.from_jd(ramadan).unwrap(), Dmy::new(1, 9, 1445));
        assert_eq!(conjunction.to_jd(&Dmy::new(1, 9, 1445)).unwrap(), ramadan);
        assert_eq!(conjunction.days_in_month(9, 1445).unwrap(), 30);

        // A crescent younger than 15 hours is not accepted.
        let aged = Islamic::observational(MonthFunc::MinimumAge { hours: 15.0 });
        assert_eq!(aged.from_jd(ramadan).unwrap(), Dmy::new(30, 8, 1445));
    }

    #[test]
    fn test_observational_round_trip() {
        let calendar = Islamic::observational(MonthFunc::MinimumAge { hours: 15.0 });
        for jd in (2_460_000..2_460_800).step_by(17) {
            let dmy = calendar.from_jd(jd).unwrap();
            assert_eq!(calendar.validate(&dmy).unwrap(), jd, "{dmy}");
        }
    }

    #[test]
    fn test_custom_rule() {
        // Months of exactly four weeks, each starting on a Monday.
        fn mondays(jd: i64, _: &Location) -> bool {
            mod_f(jd, 28) == 0
        }
        let calendar = Islamic::observational(MonthFunc::Custom(mondays));
        let date = Date::from_jd(calendar, 2_460_360).unwrap();
        assert_eq!(date.day(), 1);
        assert_eq!(date.weekday_name().unwrap(), "Yawm al-Ithnayn");
    }

    #[test]
    fn test_system_serde() {
        let system = IslamicSystem::Arithmetic { leaps: LeapSequence::Misri, epoch: IslamicEpoch::Astronomical };
        let json = serde_json::to_string(&system).unwrap();
        assert_eq!(json, r#"{"Arithmetic":{"leaps":"Misri","epoch":"Astronomical"}}"#);
        let parsed: IslamicSystem = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            parsed,
            IslamicSystem::Arithmetic { leaps: LeapSequence::Misri, epoch: IslamicEpoch::Astronomical }
        ));
        assert!(serde_json::to_string(&MonthFunc::Custom(|_, _| true)).is_err());
    }
}
