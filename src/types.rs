use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A day/month/year triple.
///
/// Day and month are 1-based; the year may be zero or negative (proleptic,
/// astronomical numbering). Fields are stored unchecked so that an
/// out-of-range triple can be carried around until it is repaired with
/// [`crate::fixup::make_valid`].
///
/// Field order makes the derived ordering lexicographic (year, month, day).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display(fmt = "{year}-{month:02}-{day:02}")]
pub struct Dmy {
    pub year:  i64,
    pub month: i32,
    pub day:   i32,
}

impl Dmy {
    /// Creates a triple in the customary (day, month, year) argument order.
    pub const fn new(day: i32, month: i32, year: i64) -> Self {
        Self { year, month, day }
    }
}

impl From<(i32, i32, i64)> for Dmy {
    fn from((day, month, year): (i32, i32, i64)) -> Self {
        Self::new(day, month, year)
    }
}

/// A Mayan long count, most significant place first.
///
/// Every place is base 20 except the uinal, which is base 18.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display(fmt = "{baktun}.{katun}.{tun}.{uinal}.{kin}")]
pub struct LongCountFields {
    pub baktun: i64,
    pub katun:  i32,
    pub tun:    i32,
    pub uinal:  i32,
    pub kin:    i32,
}

impl LongCountFields {
    pub const fn new(baktun: i64, katun: i32, tun: i32, uinal: i32, kin: i32) -> Self {
        Self { baktun, katun, tun, uinal, kin }
    }
}

/// A Chinese lunisolar date.
///
/// `year` is the position (1..=60) inside sexagenary `cycle`; `leap` marks an
/// intercalary month, which repeats the number of the month before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{cycle}-{year:02}-{month:02}{}-{day:02}", r#"if *leap { "L" } else { "" }"#)]
pub struct ChineseFields {
    pub cycle: i64,
    pub year:  i32,
    pub month: i32,
    pub leap:  bool,
    pub day:   i32,
}

impl ChineseFields {
    pub const fn new(cycle: i64, year: i32, month: i32, leap: bool, day: i32) -> Self {
        Self { cycle, year, month, leap, day }
    }
}

/// A Hindu lunisolar date.
///
/// `leap_month` marks an adhika (added) month, `leap_day` the second civil
/// day carrying the same lunar day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(
    fmt = "{year}-{month:02}{}-{day:02}{}",
    r#"if *leap_month { "L" } else { "" }"#,
    r#"if *leap_day { "L" } else { "" }"#
)]
pub struct HinduLunarFields {
    pub year:       i64,
    pub month:      i32,
    pub leap_month: bool,
    pub day:        i32,
    pub leap_day:   bool,
}

impl HinduLunarFields {
    pub const fn new(year: i64, month: i32, leap_month: bool, day: i32, leap_day: bool) -> Self {
        Self { year, month, leap_month, day, leap_day }
    }
}
