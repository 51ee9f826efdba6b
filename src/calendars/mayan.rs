//! Mayan calendars under the GMT correlation.
//!
//! The Long Count is a plain positional day count and converts both ways.
//! The Haab (365 days) and Tzolkin (260 days) are cycles: any day maps to a
//! cycle position, but a position only names a day relative to an anchor,
//! hence the `on_or_before` searches.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::MAYAN_EPOCH;
use crate::date::{Calendar, Parts};
use crate::divmod::{DivMod, amod, mod_f};
use crate::{LongCountFields, Result};

/// Days per kin, uinal, tun, katun and baktun
const PLACE_VALUES: [i64; 5] = [144_000, 7200, 360, 20, 1];

/// Haab position of the Long Count epoch, 8 Cumku
const EPOCH_HAAB: HaabDate = HaabDate { month: 18, day: 8 };
/// Tzolkin position of the Long Count epoch, 4 Ahau
const EPOCH_TZOLKIN: TzolkinDate = TzolkinDate { number: 4, name: 20 };
/// Length of a Calendar Round, in days
pub const CALENDAR_ROUND: i64 = 18_980;

pub const HAAB_MONTHS: [&str; 19] = [
    "Pop", "Wo'", "Sip", "Sotz'", "Sek", "Xul", "Yaxk'in", "Mol", "Ch'en", "Yax", "Sak'", "Keh", "Mak",
    "K'ank'in", "Muwan", "Pax", "K'ayab", "Kumk'u", "Wayeb'",
];

pub const TZOLKIN_NAMES: [&str; 20] = [
    "Imix", "Ik'", "Ak'b'al", "K'an", "Chikchan", "Kimi", "Manik'", "Lamat", "Muluk", "Ok", "Chuwen", "Eb'",
    "B'en", "Ix", "Men", "Kib'", "Kab'an", "Etz'nab'", "Kawak", "Ajaw",
];

/// The Long Count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LongCount;

impl Calendar for LongCount {
    type Fields = LongCountFields;

    fn name(&self) -> &'static str {
        "Mayan Long Count"
    }

    fn to_jd(&self, fields: &LongCountFields) -> Result<i64> {
        let places = [
            fields.baktun,
            i64::from(fields.katun),
            i64::from(fields.tun),
            i64::from(fields.uinal),
            i64::from(fields.kin),
        ];
        Ok(MAYAN_EPOCH + places.iter().zip(PLACE_VALUES).map(|(place, value)| place * value).sum::<i64>())
    }

    fn from_jd(&self, jd: i64) -> Result<LongCountFields> {
        let (baktun, rest) = (jd - MAYAN_EPOCH).div_mod_f(144_000);
        let (katun, rest) = rest.div_mod_f(7200);
        let (tun, rest) = rest.div_mod_f(360);
        let (uinal, kin) = rest.div_mod_f(20);
        Ok(LongCountFields::new(baktun, katun as i32, tun as i32, uinal as i32, kin as i32))
    }

    fn parts(&self, fields: &LongCountFields) -> Parts {
        Parts {
            day:        i64::from(fields.kin),
            month:      i64::from(fields.uinal),
            year:       fields.baktun,
            month_name: Cow::Owned(fields.uinal.to_string()),
            year_name:  Some(fields.to_string()),
        }
    }
}

/// A position in the 365-day Haab: month 1 to 19 (Wayeb' has 5 days), day
/// 0 to 19.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HaabDate {
    pub month: u8,
    pub day:   u8,
}

/// A position in the 260-day Tzolkin: number 1 to 13, name 1 to 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TzolkinDate {
    pub number: u8,
    pub name:   u8,
}

impl fmt::Display for HaabDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = HAAB_MONTHS.get(usize::from(self.month).wrapping_sub(1)).unwrap_or(&"?");
        write!(f, "{} {name}", self.day)
    }
}

impl fmt::Display for TzolkinDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = TZOLKIN_NAMES.get(usize::from(self.name).wrapping_sub(1)).unwrap_or(&"?");
        write!(f, "{} {name}", self.number)
    }
}

impl HaabDate {
    pub const fn new(month: u8, day: u8) -> Self {
        Self { month, day }
    }

    pub fn is_valid(&self) -> bool {
        match self.month {
            1..=18 => self.day < 20,
            19 => self.day < 5,
            _ => false,
        }
    }

    /// Days since the start of the Haab year.
    pub fn ordinal(&self) -> i64 {
        (i64::from(self.month) - 1) * 20 + i64::from(self.day)
    }

    /// JDN of a day in Haab position 0 Pop.
    fn epoch() -> i64 {
        MAYAN_EPOCH - EPOCH_HAAB.ordinal()
    }

    pub fn from_jd(jd: i64) -> Self {
        let (month, day) = mod_f(jd - Self::epoch(), 365).div_mod_f(20);
        Self { month: month as u8 + 1, day: day as u8 }
    }

    /// Latest day at or before `jd` with this Haab position.
    pub fn on_or_before(&self, jd: i64) -> i64 {
        jd - mod_f(jd - Self::epoch() - self.ordinal(), 365)
    }
}

impl TzolkinDate {
    pub const fn new(number: u8, name: u8) -> Self {
        Self { number, name }
    }

    pub const fn is_valid(&self) -> bool {
        matches!(self.number, 1..=13) && matches!(self.name, 1..=20)
    }

    /// Days since 1 Imix.
    pub fn ordinal(&self) -> i64 {
        let number = i64::from(self.number);
        mod_f(number - 1 + 39 * (number - i64::from(self.name)), 260)
    }

    /// JDN of a day in Tzolkin position 1 Imix.
    fn epoch() -> i64 {
        MAYAN_EPOCH - EPOCH_TZOLKIN.ordinal()
    }

    pub fn from_jd(jd: i64) -> Self {
        let count = jd - Self::epoch() + 1;
        Self { number: amod(count, 13) as u8, name: amod(count, 20) as u8 }
    }

    /// Latest day at or before `jd` with this Tzolkin position.
    pub fn on_or_before(&self, jd: i64) -> i64 {
        jd - mod_f(jd - Self::epoch() - self.ordinal(), 260)
    }
}

/// Latest day at or before `jd` with the given Haab and Tzolkin positions.
///
/// Only a fifth of the combinations occur in the 52-year Calendar Round;
/// impossible or out-of-range ones yield `None`.
pub fn calendar_round_on_or_before(haab: HaabDate, tzolkin: TzolkinDate, jd: i64) -> Option<i64> {
    if !haab.is_valid() || !tzolkin.is_valid() {
        return None;
    }
    let haab_count = haab.ordinal() + HaabDate::epoch();
    let tzolkin_count = tzolkin.ordinal() + TzolkinDate::epoch();
    let diff = tzolkin_count - haab_count;
    if mod_f(diff, 5) != 0 {
        debug!(%haab, %tzolkin, "combination never occurs in a Calendar Round");
        return None;
    }
    Some(jd - mod_f(jd - haab_count - 365 * diff, CALENDAR_ROUND))
}
