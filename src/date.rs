//! The calendar capability traits and the generic, JD-anchored [`Date`].

use std::borrow::Cow;
use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;

use chrono::Datelike;

use crate::calendars::Gregorian;
use crate::fixup::Fixup;
use crate::week::{self, Week};
use crate::{CalendarError, Dmy, Result, format};

/// A civil calendar: a bijection between its own fields and Julian Day
/// Numbers on the set of valid fields.
pub trait Calendar: Clone + fmt::Debug {
    /// The civil representation of a day.
    type Fields: Copy + fmt::Debug + fmt::Display + PartialEq;

    /// Human readable calendar name.
    fn name(&self) -> &'static str;

    /// Julian Day Number of `fields`.
    ///
    /// The result is only meaningful for valid fields; see [`Self::validate`].
    fn to_jd(&self, fields: &Self::Fields) -> Result<i64>;

    /// Fields of the day `jd`.
    fn from_jd(&self, jd: i64) -> Result<Self::Fields>;

    /// Julian Day Number of `fields`, or `InvalidDate` if they name no day.
    fn validate(&self, fields: &Self::Fields) -> Result<i64> {
        let jd = self.to_jd(fields)?;
        if self.from_jd(jd)? == *fields {
            Ok(jd)
        } else {
            Err(self.invalid_date(fields))
        }
    }

    /// Whether `fields` names a day of this calendar.
    fn is_valid(&self, fields: &Self::Fields) -> bool {
        self.validate(fields).is_ok()
    }

    /// Repairs `fields` under `fixup`.
    ///
    /// Calendars without a day/month/year structure carry by mapping the
    /// fields through the day count and back; `Clamp` is only a no-op check.
    fn make_valid(&self, fields: &Self::Fields, fixup: Fixup) -> Result<Self::Fields> {
        if self.is_valid(fields) {
            return Ok(*fields);
        }
        if fixup == Fixup::CARRY {
            let jd = self.to_jd(fields)?;
            return self.from_jd(jd);
        }
        Err(self.invalid_date(fields))
    }

    /// Field values and names used by the formatter.
    fn parts(&self, fields: &Self::Fields) -> Parts;

    /// The week cycle used alongside this calendar.
    fn week(&self) -> &'static Week {
        &week::SEVEN_DAY
    }

    /// Builds the error for an invalid set of fields.
    fn invalid_date(&self, fields: &Self::Fields) -> CalendarError {
        CalendarError::InvalidDate { calendar: self.name(), fields: fields.to_string() }
    }
}

/// Calendars whose fields are a plain day/month/year triple.
pub trait DmyCalendar: Calendar<Fields = Dmy> {
    fn months_in_year(&self, year: i64) -> u8;

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8>;

    fn is_leap_year(&self, year: i64) -> Result<bool>;

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64>;

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy>;

    fn month_name(&self, month: i32, year: i64) -> &'static str;

    /// A name for the year beyond its number, if the calendar has one.
    fn year_name(&self, _year: i64) -> Option<String> {
        None
    }

    /// Total days in `year`.
    fn days_in_year(&self, year: i64) -> Result<i64> {
        let first = self.dmy_to_jd(Dmy::new(1, 1, year))?;
        let next = self.dmy_to_jd(Dmy::new(1, 1, year + 1))?;
        Ok(next - first)
    }
}

/// Formatter view of a date: numbers plus whatever names the calendar has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parts {
    pub day:        i64,
    pub month:      i64,
    pub year:       i64,
    pub month_name: Cow<'static, str>,
    pub year_name:  Option<String>,
}

/// Range-checks `dmy` and converts it.
pub(crate) fn validate_dmy<C: DmyCalendar>(calendar: &C, dmy: &Dmy) -> Result<i64> {
    let months = i32::from(calendar.months_in_year(dmy.year));
    if !(1..=months).contains(&dmy.month) {
        return Err(calendar.invalid_date(dmy));
    }
    let days = i32::from(calendar.days_in_month(dmy.month, dmy.year)?);
    if !(1..=days).contains(&dmy.day) {
        return Err(calendar.invalid_date(dmy));
    }
    calendar.dmy_to_jd(*dmy)
}

pub(crate) fn dmy_parts<C: DmyCalendar>(calendar: &C, dmy: &Dmy) -> Parts {
    Parts {
        day:        i64::from(dmy.day),
        month:      i64::from(dmy.month),
        year:       dmy.year,
        month_name: Cow::Borrowed(calendar.month_name(dmy.month, dmy.year)),
        year_name:  calendar.year_name(dmy.year),
    }
}

/// Implements [`Calendar`] for a type from its [`DmyCalendar`] rules.
macro_rules! dmy_calendar {
    ($ty:ty, $name:expr, $week:expr) => {
        impl $crate::date::Calendar for $ty {
            type Fields = $crate::Dmy;

            fn name(&self) -> &'static str {
                $name
            }

            fn to_jd(&self, fields: &$crate::Dmy) -> $crate::Result<i64> {
                $crate::date::DmyCalendar::dmy_to_jd(self, *fields)
            }

            fn from_jd(&self, jd: i64) -> $crate::Result<$crate::Dmy> {
                $crate::date::DmyCalendar::jd_to_dmy(self, jd)
            }

            fn validate(&self, fields: &$crate::Dmy) -> $crate::Result<i64> {
                $crate::date::validate_dmy(self, fields)
            }

            fn make_valid(
                &self,
                fields: &$crate::Dmy,
                fixup: $crate::Fixup,
            ) -> $crate::Result<$crate::Dmy> {
                $crate::fixup::make_valid(self, *fields, fixup)
            }

            fn parts(&self, fields: &$crate::Dmy) -> $crate::Parts {
                $crate::date::dmy_parts(self, fields)
            }

            fn week(&self) -> &'static $crate::Week {
                &$week
            }
        }
    };
}
pub(crate) use dmy_calendar;

/// A day in calendar `C`.
///
/// The fields are stored as given, valid or not. The Julian Day Number is
/// computed on first use and cached until the fields change.
#[derive(Debug, Clone)]
pub struct Date<C: Calendar> {
    calendar: C,
    fields:   C::Fields,
    jd:       Cell<Option<i64>>,
}

impl<C: Calendar> Date<C> {
    /// Wraps `fields` without validating them.
    pub const fn new(calendar: C, fields: C::Fields) -> Self {
        Self { calendar, fields, jd: Cell::new(None) }
    }

    /// The date falling on day `jd`.
    ///
    /// # Errors
    /// Propagates failures of the calendar's conversion.
    pub fn from_jd(calendar: C, jd: i64) -> Result<Self> {
        let fields = calendar.from_jd(jd)?;
        Ok(Self { calendar, fields, jd: Cell::new(Some(jd)) })
    }

    /// Today's local date.
    ///
    /// # Errors
    /// Propagates failures of the calendar's conversion.
    pub fn today(calendar: C) -> Result<Self> {
        let now = chrono::Local::now().date_naive();
        let gregorian = Dmy::new(now.day() as i32, now.month() as i32, i64::from(now.year()));
        Self::from_jd(calendar, Gregorian.to_jd(&gregorian)?)
    }

    /// The same day as `other`, expressed in `calendar`.
    ///
    /// # Errors
    /// Returns `InvalidDate` if `other` is not a valid date.
    pub fn convert<D: Calendar>(other: &Date<D>, calendar: C) -> Result<Self> {
        Self::from_jd(calendar, other.jd()?)
    }

    pub const fn calendar(&self) -> &C {
        &self.calendar
    }

    pub const fn fields(&self) -> &C::Fields {
        &self.fields
    }

    /// Julian Day Number of this date.
    ///
    /// # Errors
    /// Returns `InvalidDate` for fields naming no day, or a convergence error
    /// from an astronomical calendar.
    pub fn jd(&self) -> Result<i64> {
        if let Some(jd) = self.jd.get() {
            return Ok(jd);
        }
        let jd = self.calendar.validate(&self.fields)?;
        self.jd.set(Some(jd));
        Ok(jd)
    }

    pub fn is_valid(&self) -> bool {
        self.jd().is_ok()
    }

    pub fn set_fields(&mut self, fields: C::Fields) {
        self.fields = fields;
        self.jd.set(None);
    }

    /// Moves the date to day `jd`.
    ///
    /// # Errors
    /// Propagates failures of the calendar's conversion; the date is left
    /// unchanged on error.
    pub fn set_jd(&mut self, jd: i64) -> Result<()> {
        self.fields = self.calendar.from_jd(jd)?;
        self.jd.set(Some(jd));
        Ok(())
    }

    /// Repairs the fields in place.
    ///
    /// # Errors
    /// See [`Calendar::make_valid`].
    pub fn make_valid(&mut self, fixup: Fixup) -> Result<()> {
        let fields = self.calendar.make_valid(&self.fields, fixup)?;
        if fields != self.fields {
            self.set_fields(fields);
        }
        Ok(())
    }

    /// Moves the date by `days`.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the current date is invalid.
    pub fn increment_days(&mut self, days: i64) -> Result<()> {
        let jd = self.jd()?;
        self.set_jd(jd + days)
    }

    /// Weekday index in the calendar's week.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the date is invalid.
    pub fn weekday(&self) -> Result<u8> {
        Ok(self.calendar.week().weekday(self.jd()?))
    }

    /// # Errors
    /// Returns `InvalidDate` if the date is invalid.
    pub fn weekday_name(&self) -> Result<&'static str> {
        let week = self.calendar.week();
        Ok(week.name(i64::from(week.weekday(self.jd()?))))
    }

    /// Offset in days to the `n`-th occurrence of weekday `target`.
    ///
    /// `n = 0` is the first occurrence on or after this date, negative `n`
    /// counts backwards from the last occurrence strictly before it.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the date is invalid.
    pub fn days_until_weekday(&self, target: u8, n: i64) -> Result<i64> {
        Ok(self.calendar.week().days_until(self.jd()?, target, n))
    }

    /// Moves the date to the `n`-th occurrence of weekday `target`.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the date is invalid.
    pub fn increment_weekday(&mut self, target: u8, n: i64) -> Result<()> {
        let days = self.days_until_weekday(target, n)?;
        self.increment_days(days)
    }

    /// Whether both dates denote the same day, whatever their calendars.
    pub fn same_day<D: Calendar>(&self, other: &Date<D>) -> bool {
        matches!((self.jd(), other.jd()), (Ok(a), Ok(b)) if a == b)
    }

    /// Renders the date with the `%`-directive mini-language.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the date is invalid.
    pub fn format(&self, fmt: &str) -> Result<String> {
        let jd = self.jd()?;
        let parts = self.calendar.parts(&self.fields);
        Ok(format::render(fmt, &parts, jd, self.calendar.week()))
    }
}

impl<C: DmyCalendar> Date<C> {
    pub const fn day(&self) -> i32 {
        self.fields.day
    }

    pub const fn month(&self) -> i32 {
        self.fields.month
    }

    pub const fn year(&self) -> i64 {
        self.fields.year
    }

    /// Adds to each field independently, then repairs the result.
    ///
    /// Months and years are applied first, so `31 January + 1 month` is
    /// `28/29 February` under `Clamp` and early March under `Carry`.
    ///
    /// # Errors
    /// See [`Calendar::make_valid`].
    pub fn increment_dmy(&mut self, days: i32, months: i32, years: i64, fixup: Fixup) -> Result<()> {
        let shifted = Dmy::new(self.fields.day, self.fields.month + months, self.fields.year + years);
        let mut fields = crate::fixup::make_valid(&self.calendar, shifted, fixup)?;
        if days != 0 {
            let jd = self.calendar.dmy_to_jd(fields)?;
            fields = self.calendar.jd_to_dmy(jd + i64::from(days))?;
        }
        self.set_fields(fields);
        Ok(())
    }
}

impl<C: Calendar> PartialEq for Date<C> {
    fn eq(&self, other: &Self) -> bool {
        self.same_day(other)
    }
}

impl<C: Calendar> PartialOrd for Date<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.jd(), other.jd()) {
            (Ok(a), Ok(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl<C: Calendar> fmt::Display for Date<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.fields, self.calendar.name())
    }
}
