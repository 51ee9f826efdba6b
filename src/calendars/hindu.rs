//! Hindu solar and lunisolar calendars.
//!
//! The modern versions follow the Surya Siddhanta: solar months begin when
//! the true Sun enters a sidereal sign at sunrise, and lunisolar months run
//! from new moon to new moon and take the name of the sign the Sun is in at
//! the opening new moon. A lunar month that starts and ends in the same sign
//! is an adhika (leap) month; lunar days that span two sunrises repeat, and
//! those that span none are skipped.
//!
//! The old versions use Aryabhata's mean motions and count years from the
//! Kali Yuga. The modern solar calendar counts Saka years, the modern
//! lunisolar calendar Vikrama years.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::astro::Moment;
use crate::astro::hindu::{
    ARYA_LUNAR_DAY, ARYA_LUNAR_MONTH, ARYA_SOLAR_MONTH, ARYA_SOLAR_YEAR, LUNAR_ERA, SIDEREAL_YEAR, SOLAR_ERA,
    arya_sun, calendar_year, lunar_day, new_moon_before, solar_longitude, sunrise, zodiac,
};
use crate::consts::HINDU_EPOCH;
use crate::date::{Calendar, DmyCalendar, Parts, dmy_calendar};
use crate::divmod::{amod, div_f, fmod_f, mod_f, mod3, mod3_i};
use crate::fixup::{Fixup, FixupMethod};
use crate::{CalendarError, Dmy, HinduLunarFields, Result};

/// Bound on day-by-day scans for a sign change or a lunar day
const MAX_SCAN_DAYS: i64 = 64;

/// Days past the last new moon that surely lie beyond the next one
const PAST_NEXT_NEW_MOON: i64 = 35;

/// Step that cannot jump over a whole lunar month
const MONTH_SCAN_STEP: usize = 14;

const SOLAR_MONTHS: [&str; 12] = [
    "Mesha",
    "Vrishabha",
    "Mithuna",
    "Karka",
    "Simha",
    "Kanya",
    "Tula",
    "Vrischika",
    "Dhanu",
    "Makara",
    "Kumbha",
    "Mina",
];

const LUNAR_MONTHS: [&str; 12] = [
    "Chaitra",
    "Vaishakha",
    "Jyeshtha",
    "Ashadha",
    "Shravana",
    "Bhadrapada",
    "Ashvin",
    "Kartika",
    "Margashirsha",
    "Pausha",
    "Magha",
    "Phalguna",
];

/// Which astronomical model drives the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HinduVersion {
    /// Surya Siddhanta true positions
    #[default]
    Modern,
    /// Aryabhata mean positions
    Old,
}

/// The Hindu solar calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HinduSolar {
    pub version: HinduVersion,
}

/// The Hindu lunisolar calendar (amanta: months end at new moon).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HinduLunisolar {
    pub version: HinduVersion,
}

fn scan_exhausted(what: &'static str, jd: i64) -> CalendarError {
    warn!(jd, what, "Hindu day scan did not settle");
    CalendarError::NoConvergence { what, iterations: MAX_SCAN_DAYS as usize }
}

/// First day from `start` whose following sunrise has the Sun in `sign`.
fn first_day_in_sign(start: i64, sign: u8) -> Result<i64> {
    (start..start + MAX_SCAN_DAYS)
        .find(|&d| zodiac(sunrise(d + 1)) == sign)
        .ok_or_else(|| scan_exhausted("Hindu solar month start", start))
}

fn solar_from_fixed(jd: i64) -> Result<Dmy> {
    let critical = sunrise(jd + 1);
    let month = zodiac(critical);
    let year = calendar_year(critical) - SOLAR_ERA;
    let approx = jd - 3 - mod_f(solar_longitude(critical).floor() as i64, 30);
    let start = first_day_in_sign(approx, month)?;
    Ok(Dmy::new((jd - start + 1) as i32, i32::from(month), year))
}

fn fixed_from_solar(dmy: Dmy) -> Result<i64> {
    let years = (dmy.year + SOLAR_ERA) as f64 + f64::from(dmy.month - 1) / 12.0;
    let start = (years * SIDEREAL_YEAR).floor() as i64 + HINDU_EPOCH;
    let sign = u8::try_from(dmy.month).map_err(|_| CalendarError::InvalidDate {
        calendar: "Hindu Solar",
        fields:   dmy.to_string(),
    })?;
    Ok(i64::from(dmy.day) - 1 + first_day_in_sign(start - 3, sign)?)
}

fn old_solar_from_fixed(jd: i64) -> Dmy {
    let sun = arya_sun(jd);
    let year = (sun / ARYA_SOLAR_YEAR).floor() as i64;
    let month = mod_f((sun / ARYA_SOLAR_MONTH).floor() as i64, 12) + 1;
    let day = fmod_f(sun, ARYA_SOLAR_MONTH).floor() as i32 + 1;
    Dmy::new(day, month as i32, year)
}

fn fixed_from_old_solar(dmy: Dmy) -> i64 {
    let elapsed = dmy.year as f64 * ARYA_SOLAR_YEAR + f64::from(dmy.month - 1) * ARYA_SOLAR_MONTH;
    (HINDU_EPOCH as f64 + elapsed + f64::from(dmy.day) - 1.25).ceil() as i64
}

impl HinduSolar {
    pub const fn new(version: HinduVersion) -> Self {
        Self { version }
    }
}

impl DmyCalendar for HinduSolar {
    fn months_in_year(&self, _year: i64) -> u8 {
        12
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        let next = if month == 12 { Dmy::new(1, 1, year + 1) } else { Dmy::new(1, month + 1, year) };
        let length = self.dmy_to_jd(next)? - self.dmy_to_jd(Dmy::new(1, month, year))?;
        Ok(length as u8)
    }

    fn is_leap_year(&self, year: i64) -> Result<bool> {
        Ok(self.days_in_year(year)? > 365)
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        match self.version {
            HinduVersion::Modern => fixed_from_solar(dmy),
            HinduVersion::Old => Ok(fixed_from_old_solar(dmy)),
        }
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        match self.version {
            HinduVersion::Modern => solar_from_fixed(jd),
            HinduVersion::Old => Ok(old_solar_from_fixed(jd)),
        }
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        SOLAR_MONTHS[(month.clamp(1, 12) - 1) as usize]
    }
}

dmy_calendar!(HinduSolar, "Hindu Solar", crate::week::HINDU);

fn lunar_from_fixed(jd: i64) -> Result<HinduLunarFields> {
    let critical = sunrise(jd);
    let day = lunar_day(critical);
    let leap_day = day == lunar_day(sunrise(jd - 1));
    let last = new_moon_before(critical)?;
    let next = new_moon_before(Moment::from_jd(last.day() + PAST_NEXT_NEW_MOON))?;
    let sign = zodiac(last);
    let leap_month = sign == zodiac(next);
    let month = amod(i64::from(sign) + 1, 12) as i32;
    // Chaitra and Vaishakha can open before the solar year turns.
    let reference = if month <= 2 { jd + 180 } else { jd };
    let year = calendar_year(Moment::from_jd(reference)) - LUNAR_ERA;
    Ok(HinduLunarFields::new(year, month, leap_month, day, leap_day))
}

fn fixed_from_lunar(fields: &HinduLunarFields) -> Result<i64> {
    let month = f64::from(fields.month - 1) / 12.0;
    let approx = HINDU_EPOCH as f64 + SIDEREAL_YEAR * ((fields.year + LUNAR_ERA) as f64 + month);
    let drift = mod3(solar_longitude(Moment::new(approx)) / 360.0 - month, -0.5, 0.5);
    let s = (approx - SIDEREAL_YEAR * drift).floor() as i64;
    let k = i64::from(lunar_day(sunrise(s)));
    let mid = lunar_from_fixed(s - 15)?;
    let offset = if 3 < k && k < 27 {
        k
    } else if mid.month != fields.month || (mid.leap_month && !fields.leap_month) {
        mod3_i(k, -15, 15)
    } else {
        mod3_i(k, 15, 45)
    };
    let day = i64::from(fields.day);
    let estimate = s + day - offset;
    let tau = estimate - mod3_i(i64::from(lunar_day(sunrise(estimate))) - day, -15, 15);
    let following = amod(day + 1, 30);
    let found = (tau - 1..tau - 1 + MAX_SCAN_DAYS)
        .find(|&d| {
            let current = i64::from(lunar_day(sunrise(d)));
            current == day || current == following
        })
        .ok_or_else(|| scan_exhausted("Hindu lunar day", tau))?;
    Ok(if fields.leap_day { found + 1 } else { found })
}

fn old_lunar_from_fixed(jd: i64) -> HinduLunarFields {
    let sun = arya_sun(jd);
    let new_moon = sun - fmod_f(sun, ARYA_LUNAR_MONTH);
    let into_month = fmod_f(new_moon, ARYA_SOLAR_MONTH);
    let leap_month = ARYA_SOLAR_MONTH - ARYA_LUNAR_MONTH >= into_month && into_month > 0.0;
    let month = mod_f((new_moon / ARYA_SOLAR_MONTH).ceil() as i64, 12) + 1;
    let day = mod_f((sun / ARYA_LUNAR_DAY).floor() as i64, 30) + 1;
    let year = ((new_moon + ARYA_SOLAR_MONTH) / ARYA_SOLAR_YEAR).ceil() as i64 - 1;
    HinduLunarFields::new(year, month as i32, leap_month, day as i32, false)
}

fn fixed_from_old_lunar(fields: &HinduLunarFields) -> i64 {
    let mina = (12 * fields.year - 1) as f64 * ARYA_SOLAR_MONTH;
    let lunar_new_year = ARYA_LUNAR_MONTH * ((mina / ARYA_LUNAR_MONTH).floor() + 1.0);
    let leap_at = ((lunar_new_year - mina) / (ARYA_SOLAR_MONTH - ARYA_LUNAR_MONTH)).ceil();
    let month = if !fields.leap_month && leap_at <= f64::from(fields.month) { fields.month } else { fields.month - 1 };
    let elapsed = lunar_new_year + ARYA_LUNAR_MONTH * f64::from(month) + f64::from(fields.day - 1) * ARYA_LUNAR_DAY;
    (HINDU_EPOCH as f64 + elapsed + 0.75).floor() as i64
}

impl HinduLunisolar {
    pub const fn new(version: HinduVersion) -> Self {
        Self { version }
    }

    /// Month of `year` that is preceded by an adhika month of the same
    /// name, if the year has one.
    ///
    /// # Errors
    /// Propagates astronomical search failures.
    pub fn leap_month(&self, year: i64) -> Result<Option<u8>> {
        let start = self.to_jd(&HinduLunarFields::new(year, 1, false, 1, false))?;
        let end = self.to_jd(&HinduLunarFields::new(year + 1, 1, false, 1, false))?;
        for jd in (start - 45..end + 45).step_by(MONTH_SCAN_STEP) {
            let fields = self.from_jd(jd)?;
            if fields.year == year && fields.leap_month {
                debug!(year, month = fields.month, "found adhika month");
                return Ok(Some(fields.month as u8));
            }
        }
        Ok(None)
    }

    /// First civil day after the month that opens on `start`.
    fn next_month_start(&self, fields: &HinduLunarFields, start: i64) -> Result<i64> {
        let month = (fields.year, fields.month, fields.leap_month);
        for jd in start + 27..start + MAX_SCAN_DAYS {
            let next = self.from_jd(jd)?;
            if (next.year, next.month, next.leap_month) != month {
                return Ok(jd);
            }
        }
        Err(scan_exhausted("Hindu lunar month end", start))
    }

    /// Lunar day numbers that no civil day of the given month carries.
    ///
    /// # Errors
    /// Propagates astronomical search failures.
    pub fn lost_days(&self, year: i64, month: i32, leap_month: bool) -> Result<Vec<i32>> {
        let middle = self.to_jd(&HinduLunarFields::new(year, month, leap_month, 15, false))?;
        let mut seen = [false; 30];
        for jd in middle - 20..middle + 20 {
            let fields = self.from_jd(jd)?;
            if (fields.year, fields.month, fields.leap_month) == (year, month, leap_month) {
                seen[(fields.day - 1) as usize] = true;
            }
        }
        Ok((1..=30).filter(|day| !seen[(day - 1) as usize]).collect())
    }
}

impl Calendar for HinduLunisolar {
    type Fields = HinduLunarFields;

    fn name(&self) -> &'static str {
        "Hindu Lunisolar"
    }

    fn to_jd(&self, fields: &HinduLunarFields) -> Result<i64> {
        match self.version {
            HinduVersion::Modern => fixed_from_lunar(fields),
            HinduVersion::Old => Ok(fixed_from_old_lunar(fields)),
        }
    }

    fn from_jd(&self, jd: i64) -> Result<HinduLunarFields> {
        match self.version {
            HinduVersion::Modern => lunar_from_fixed(jd),
            HinduVersion::Old => Ok(old_lunar_from_fixed(jd)),
        }
    }

    fn validate(&self, fields: &HinduLunarFields) -> Result<i64> {
        if !(1..=12).contains(&fields.month) || !(1..=30).contains(&fields.day) {
            return Err(self.invalid_date(fields));
        }
        let jd = self.to_jd(fields)?;
        if self.from_jd(jd)? == *fields { Ok(jd) } else { Err(self.invalid_date(fields)) }
    }

    /// Leap markers that name nothing are dropped. Under `Clamp`, numbers
    /// are pulled into range and a skipped lunar day resolves to the civil
    /// day that follows it. Under `Carry`, months spill into years and a
    /// day outside 1..=30 counts civil days from the start of its month.
    fn make_valid(&self, fields: &HinduLunarFields, fixup: Fixup) -> Result<HinduLunarFields> {
        if self.is_valid(fields) {
            return Ok(*fields);
        }
        let mut fixed = *fields;
        match fixup.month {
            FixupMethod::Clamp => fixed.month = fixed.month.clamp(1, 12),
            FixupMethod::Carry => {
                fixed.year += div_f(i64::from(fixed.month) - 1, 12);
                fixed.month = amod(i64::from(fixed.month), 12) as i32;
            },
        }
        if fixed.leap_month && self.leap_month(fixed.year)? != Some(fixed.month as u8) {
            fixed.leap_month = false;
        }
        if fixup.day == FixupMethod::Clamp {
            fixed.day = fixed.day.clamp(1, 30);
        }
        if (1..=30).contains(&fixed.day) {
            if fixed.leap_day && !self.is_valid(&fixed) {
                fixed.leap_day = false;
            }
            if self.is_valid(&fixed) {
                return Ok(fixed);
            }
            let jd = self.to_jd(&fixed)?;
            return self.from_jd(jd);
        }
        let start = self.to_jd(&HinduLunarFields { day: 1, leap_day: false, ..fixed })?;
        let jd = if fixed.day < 1 {
            start + i64::from(fixed.day) - 1
        } else {
            self.next_month_start(&fixed, start)? + i64::from(fixed.day) - 31
        };
        self.from_jd(jd)
    }

    fn parts(&self, fields: &HinduLunarFields) -> Parts {
        let name = LUNAR_MONTHS[(fields.month.clamp(1, 12) - 1) as usize];
        Parts {
            day:        i64::from(fields.day),
            month:      i64::from(fields.month),
            year:       fields.year,
            month_name: if fields.leap_month { Cow::Owned(format!("Adhika {name}")) } else { Cow::Borrowed(name) },
            year_name:  None,
        }
    }

    fn week(&self) -> &'static crate::Week {
        &crate::week::HINDU
    }
}
