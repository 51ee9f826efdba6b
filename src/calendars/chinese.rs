//! The Chinese lunisolar calendar, computed from true solar and lunar
//! positions as seen from Beijing.
//!
//! The calendar is laid out one sui at a time: the span from the month
//! holding one winter solstice (always month 11) to the month holding the
//! next. A sui with 13 new moons gets a leap month, the first one in which
//! no major solar term begins; it repeats the number of the month before.
//! Years are counted in sexagenary cycles from 2637 BCE.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::astro::solar::{WINTER, estimate_prior_solar_longitude, solar_longitude, solar_longitude_after};
use crate::astro::{Location, Moment, lunar};
use crate::calendars::gregorian::{fixed_from_gregorian, year_from_fixed};
use crate::date::{Calendar, Parts};
use crate::divmod::{DivMod, amod, div_f, fmod_f, mod3};
use crate::fixup::{Fixup, FixupMethod};
use crate::{CalendarError, ChineseFields, Result};

/// Offset from the Gregorian year of a new year to its elapsed-year count;
/// the year holding [`CHINESE_EPOCH`](crate::CHINESE_EPOCH) is elapsed year 1
const ELAPSED_YEAR_OFFSET: i64 = 2637;

/// Day count origin of the sexagenary day names
const DAY_NAME_EPOCH: i64 = 1_721_470;

/// Month count origin of the sexagenary month names
const MONTH_NAME_EPOCH: i64 = 57;

/// Bound on day-by-day scans for the winter solstice
const MAX_SOLSTICE_SCAN_DAYS: i64 = 32;

/// A sui spans 12 or 13 months
const MAX_MONTHS_PER_SUI: usize = 13;

/// Beijing local mean time, used before 1929
const BEIJING_MEAN: Location = Location::new(39.55, 116.416_667, 43.5, 1397.0 / 180.0);

/// Beijing on China Standard Time (UTC+8)
const BEIJING_STANDARD: Location = Location::new(39.55, 116.416_667, 43.5, 8.0);

pub const STEMS: [&str; 10] = ["Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui"];

pub const BRANCHES: [&str; 12] = ["Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai"];

const MONTH_NAMES: [&str; 12] = [
    "Zhengyue", "Eryue", "Sanyue", "Siyue", "Wuyue", "Liuyue", "Qiyue", "Bayue", "Jiuyue", "Shiyue", "Dongyue",
    "Layue",
];

/// The Chinese calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Chinese;

/// Stem (1..=10) and branch (1..=12) of position `n` in the sexagenary
/// cycle.
pub fn sexagesimal_name(n: i64) -> (u8, u8) {
    (amod(n, 10) as u8, amod(n, 12) as u8)
}

/// Position (1..=60) of the stem/branch pair in the sexagenary cycle.
///
/// # Errors
/// `InvalidSexagesimal` if either part is out of range or their parities
/// differ, since such pairs never occur.
pub fn sexagesimal_index(stem: u8, branch: u8) -> Result<u8> {
    if !(1..=10).contains(&stem) || !(1..=12).contains(&branch) || stem % 2 != branch % 2 {
        return Err(CalendarError::InvalidSexagesimal { stem, branch });
    }
    Ok(amod(6 * i64::from(stem) - 5 * i64::from(branch), 60) as u8)
}

/// Romanized name of cycle position `n`, e.g. "Jia-Zi".
pub fn stem_branch(n: i64) -> String {
    let (stem, branch) = sexagesimal_name(n);
    format!("{}-{}", STEMS[usize::from(stem - 1)], BRANCHES[usize::from(branch - 1)])
}

pub fn day_name(jd: i64) -> String {
    stem_branch(jd - DAY_NAME_EPOCH)
}

/// Stem-branch name of a month; a leap month shares its predecessor's.
pub fn month_name(fields: &ChineseFields) -> String {
    let elapsed_months = 12 * (elapsed_years(fields) - 1) + i64::from(fields.month) - 1;
    stem_branch(elapsed_months - MONTH_NAME_EPOCH)
}

pub fn year_name(year: i32) -> String {
    stem_branch(i64::from(year))
}

/// Years elapsed since [`CHINESE_EPOCH`](crate::CHINESE_EPOCH), counting the current one.
pub fn elapsed_years(fields: &ChineseFields) -> i64 {
    60 * (fields.cycle - 1) + i64::from(fields.year)
}

/// Gregorian year in which the Chinese year of `fields` begins.
pub fn gregorian_year(fields: &ChineseFields) -> i64 {
    elapsed_years(fields) - ELAPSED_YEAR_OFFSET
}

fn fields_from_elapsed(elapsed: i64, month: i32, leap: bool, day: i32) -> ChineseFields {
    let (cycle, year) = (elapsed - 1).div_mod_f(60);
    ChineseFields::new(cycle + 1, year as i32 + 1, month, leap, day)
}

fn location(jd: i64) -> Location {
    if jd < fixed_from_gregorian(1929, 1, 1) { BEIJING_MEAN } else { BEIJING_STANDARD }
}

/// Universal time of the midnight that starts Beijing day `jd`.
fn midnight_in_china(jd: i64) -> Moment {
    location(jd).universal_from_standard(Moment::from_jd(jd))
}

fn beijing_day(universal: Moment, near: i64) -> i64 {
    location(near).standard_from_universal(universal).day()
}

/// Major solar term in effect at the start of Beijing day `jd`: 1 from
/// 330° (Yushui), then one per 30° of solar longitude.
pub fn current_major_solar_term(jd: i64) -> u8 {
    let longitude = solar_longitude(midnight_in_china(jd));
    amod(2 + (longitude / 30.0).floor() as i64, 12) as u8
}

/// First Beijing day on which the Sun reaches `longitude`.
///
/// # Errors
/// Propagates root-finder failures.
pub fn solar_term_on_or_after(jd: i64, longitude: f64) -> Result<i64> {
    let moment = solar_longitude_after(longitude, midnight_in_china(jd))?;
    Ok(beijing_day(moment, jd))
}

/// First Beijing day at or after `jd` on which a major solar term begins.
///
/// # Errors
/// Propagates root-finder failures.
pub fn major_solar_term_on_or_after(jd: i64) -> Result<i64> {
    let longitude = solar_longitude(midnight_in_china(jd));
    solar_term_on_or_after(jd, fmod_f(30.0 * (longitude / 30.0).ceil(), 360.0))
}

/// Beijing day of the last winter solstice at or before `jd`.
fn winter_solstice_on_or_before(jd: i64) -> Result<i64> {
    let approx = estimate_prior_solar_longitude(WINTER, midnight_in_china(jd + 1));
    let start = approx.day() - 1;
    (start..start + MAX_SOLSTICE_SCAN_DAYS)
        .find(|&day| mod3(solar_longitude(midnight_in_china(day + 1)) - WINTER, -180.0, 180.0) > 0.0)
        .ok_or_else(|| {
            warn!(jd, "winter solstice scan did not settle");
            CalendarError::NoConvergence { what: "winter solstice", iterations: MAX_SOLSTICE_SCAN_DAYS as usize }
        })
}

fn new_moon_on_or_after(jd: i64) -> Result<i64> {
    Ok(beijing_day(lunar::new_moon_at_or_after(midnight_in_china(jd))?, jd))
}

fn new_moon_before(jd: i64) -> Result<i64> {
    Ok(beijing_day(lunar::new_moon_before(midnight_in_china(jd))?, jd))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MonthStart {
    month: i32,
    leap:  bool,
    jd:    i64,
}

/// Months from the one holding a winter solstice up to the one holding the
/// next; the last entry opens the following sui.
#[derive(Debug, Clone)]
struct Sui {
    /// Gregorian year of the closing solstice
    year:   i64,
    months: Vec<MonthStart>,
}

impl Sui {
    fn from_solstice(solstice: i64) -> Result<Self> {
        let next_solstice = winter_solstice_on_or_before(solstice + 370)?;
        let first = new_moon_before(solstice + 1)?;
        let last = new_moon_before(next_solstice + 1)?;

        let mut starts = vec![first];
        while let Some(&current) = starts.last() {
            if current >= last {
                break;
            }
            if starts.len() > MAX_MONTHS_PER_SUI {
                warn!(solstice, "too many new moons between solstices");
                return Err(CalendarError::NoConvergence { what: "Chinese sui", iterations: starts.len() });
            }
            starts.push(new_moon_on_or_after(current + 1)?);
        }

        let mut needs_leap = starts.len() == MAX_MONTHS_PER_SUI + 1;
        let mut month = 11;
        let mut months = vec![MonthStart { month, leap: false, jd: first }];
        for (i, &jd) in starts.iter().enumerate().skip(1) {
            let no_major_term = starts
                .get(i + 1)
                .is_some_and(|&next| current_major_solar_term(jd) == current_major_solar_term(next));
            if needs_leap && no_major_term {
                months.push(MonthStart { month, leap: true, jd });
                needs_leap = false;
                continue;
            }
            month = month % 12 + 1;
            months.push(MonthStart { month, leap: false, jd });
        }

        let year = year_from_fixed(next_solstice);
        debug!(year, months = months.len() - 1, "laid out Chinese sui");
        Ok(Self { year, months })
    }

    /// The sui closing with the winter solstice of Gregorian `year`.
    fn closing(year: i64) -> Result<Self> {
        Self::from_solstice(winter_solstice_on_or_before(fixed_from_gregorian(year - 1, 12, 31))?)
    }

    fn containing(jd: i64) -> Result<Self> {
        let sui = Self::from_solstice(winter_solstice_on_or_before(jd)?)?;
        if jd >= sui.end() { Self::closing(sui.year + 1) } else { Ok(sui) }
    }

    fn end(&self) -> i64 {
        self.months.last().map_or(i64::MIN, |m| m.jd)
    }

    /// Months proper, without the closing entry.
    fn body(&self) -> &[MonthStart] {
        &self.months[..self.months.len().saturating_sub(1)]
    }

    fn find(&self, month: i32, leap: bool) -> Option<(MonthStart, i64)> {
        self.months
            .windows(2)
            .find(|pair| pair[0].month == month && pair[0].leap == leap)
            .map(|pair| (pair[0], pair[1].jd - pair[0].jd))
    }

    /// Gregorian year of the Chinese year a month of this sui belongs to.
    fn year_of(&self, month: &MonthStart) -> i64 {
        if month.month >= 11 { self.year - 1 } else { self.year }
    }
}

impl Chinese {
    /// Sui that holds `month` of the Chinese year starting in Gregorian
    /// `year`.
    fn sui_for(year: i64, month: i32) -> Result<Sui> {
        Sui::closing(if month >= 11 { year + 1 } else { year })
    }

    /// JDN of the Chinese new year on or before `jd`.
    ///
    /// # Errors
    /// Propagates astronomical search failures.
    pub fn new_year(&self, jd: i64) -> Result<i64> {
        let sui = Sui::containing(jd)?;
        match sui.find(1, false) {
            Some((start, _)) if start.jd <= jd => Ok(start.jd),
            _ => {
                let previous = Sui::closing(sui.year - 1)?;
                previous.find(1, false).map(|(start, _)| start.jd).ok_or_else(|| {
                    CalendarError::NoConvergence { what: "Chinese new year", iterations: MAX_MONTHS_PER_SUI }
                })
            },
        }
    }

    /// Months of the Chinese year beginning in Gregorian `year`, in order,
    /// as `(number, leap)` pairs.
    ///
    /// # Errors
    /// Propagates astronomical search failures.
    pub fn months_of_year(&self, year: i64) -> Result<Vec<(i32, bool)>> {
        let this = Sui::closing(year)?;
        let next = Sui::closing(year + 1)?;
        Ok(this
            .body()
            .iter()
            .filter(|m| this.year_of(m) == year)
            .chain(next.body().iter().filter(|m| next.year_of(m) == year))
            .map(|m| (m.month, m.leap))
            .collect())
    }

    /// The month that is repeated as a leap month in the Chinese year
    /// beginning in Gregorian `year`, if any.
    ///
    /// # Errors
    /// Propagates astronomical search failures.
    pub fn leap_month(&self, year: i64) -> Result<Option<i32>> {
        Ok(self.months_of_year(year)?.into_iter().find(|&(_, leap)| leap).map(|(month, _)| month))
    }
}

impl Calendar for Chinese {
    type Fields = ChineseFields;

    fn name(&self) -> &'static str {
        "Chinese"
    }

    fn to_jd(&self, fields: &ChineseFields) -> Result<i64> {
        let sui = Self::sui_for(gregorian_year(fields), fields.month)?;
        let (start, _) = sui.find(fields.month, fields.leap).ok_or_else(|| self.invalid_date(fields))?;
        Ok(start.jd + i64::from(fields.day) - 1)
    }

    fn from_jd(&self, jd: i64) -> Result<ChineseFields> {
        let sui = Sui::containing(jd)?;
        let month = sui
            .body()
            .iter()
            .rev()
            .find(|m| m.jd <= jd)
            .copied()
            .ok_or(CalendarError::NoConvergence { what: "Chinese month", iterations: MAX_MONTHS_PER_SUI })?;
        let elapsed = sui.year_of(&month) + ELAPSED_YEAR_OFFSET;
        Ok(fields_from_elapsed(elapsed, month.month, month.leap, (jd - month.jd + 1) as i32))
    }

    /// The cycle position is normalized first. `Clamp` then pulls the month
    /// into 1..=12, drops a leap flag the year does not have and limits the
    /// day to the month length; `Carry` moves excess months into later
    /// years and excess days into later months.
    fn make_valid(&self, fields: &ChineseFields, fixup: Fixup) -> Result<ChineseFields> {
        if self.is_valid(fields) {
            return Ok(*fields);
        }
        let mut elapsed = elapsed_years(fields);
        let mut month = fields.month;
        match fixup.month {
            FixupMethod::Clamp => month = month.clamp(1, 12),
            FixupMethod::Carry => {
                elapsed += div_f(i64::from(month) - 1, 12);
                month = amod(i64::from(month), 12) as i32;
            },
        }
        let mut fixed = fields_from_elapsed(elapsed, month, fields.leap, fields.day);
        let sui = Self::sui_for(gregorian_year(&fixed), month)?;
        if fixed.leap && sui.find(month, true).is_none() {
            fixed.leap = false;
        }
        match fixup.day {
            FixupMethod::Clamp => {
                let length = sui.find(month, fixed.leap).map_or(29, |(_, length)| length);
                fixed.day = fixed.day.clamp(1, length as i32);
                Ok(fixed)
            },
            FixupMethod::Carry => {
                let jd = self.to_jd(&fixed)?;
                self.from_jd(jd)
            },
        }
    }

    fn parts(&self, fields: &ChineseFields) -> Parts {
        let name = MONTH_NAMES[(fields.month.clamp(1, 12) - 1) as usize];
        Parts {
            day:        i64::from(fields.day),
            month:      i64::from(fields.month),
            year:       gregorian_year(fields),
            month_name: if fields.leap { Cow::Owned(format!("Run {name}")) } else { Cow::Borrowed(name) },
            year_name:  Some(year_name(fields.year)),
        }
    }

    fn week(&self) -> &'static crate::Week {
        &crate::week::CHINESE
    }
}
