//! Repairing out-of-range civil dates.
//!
//! Two policies exist per field. `Clamp` pins a field into its valid range
//! without touching anything else; `Carry` lets the overflow spill into the
//! next larger unit (days into months, months into years) using the
//! calendar's own, possibly leap-dependent, month lengths.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{MAX_FIXUP_ITERATIONS, MIN_DAY};
use crate::date::DmyCalendar;
use crate::prelude::*;
use crate::{CalendarError, Dmy, Result};

/// How a single field is brought back into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum FixupMethod {
    /// Restrict the field to its valid range
    Clamp,
    /// Propagate overflow into the next larger unit
    Carry,
}

/// Per-field repair policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixup {
    pub day:   FixupMethod,
    pub month: FixupMethod,
}

impl Fixup {
    /// Clamp every field; used when repairing constructed dates
    pub const CLAMP: Self = Self { day: FixupMethod::Clamp, month: FixupMethod::Clamp };
    /// Carry every field; used by increments
    pub const CARRY: Self = Self { day: FixupMethod::Carry, month: FixupMethod::Carry };
}

impl Default for Fixup {
    fn default() -> Self {
        Self::CLAMP
    }
}

/// Whether `dmy` names a day that exists in `calendar`.
pub fn is_valid_dmy<C: DmyCalendar>(calendar: &C, dmy: &Dmy) -> bool {
    let months = i32::from(calendar.months_in_year(dmy.year));
    if !(1..=months).contains(&dmy.month) {
        return false;
    }
    calendar
        .days_in_month(dmy.month, dmy.year)
        .is_ok_and(|days| (i32::from(MIN_DAY)..=i32::from(days)).contains(&dmy.day))
}

/// Brings `dmy` into range under `fixup`.
///
/// Already valid dates are returned unchanged, so the operation is
/// idempotent.
///
/// # Errors
/// Returns `CalendarError::FixupUnstable` if the carry loop does not settle,
/// or any error the calendar raises while measuring months.
pub fn make_valid<C: DmyCalendar>(calendar: &C, dmy: Dmy, fixup: Fixup) -> Result<Dmy> {
    let mut current = dmy;
    for _ in 0..MAX_FIXUP_ITERATIONS {
        if is_valid_dmy(calendar, &current) {
            return Ok(current);
        }
        current = fix_month(calendar, current, fixup.month)?;
        current = fix_day(calendar, current, fixup.day)?;
    }
    debug!(%dmy, calendar = calendar.name(), "fixup did not settle");
    Err(CalendarError::FixupUnstable { iterations: MAX_FIXUP_ITERATIONS })
}

fn fix_month<C: DmyCalendar>(calendar: &C, mut dmy: Dmy, method: FixupMethod) -> Result<Dmy> {
    match method {
        FixupMethod::Clamp => {
            let months = i32::from(calendar.months_in_year(dmy.year));
            dmy.month = dmy.month.clamp(1, months);
        },
        FixupMethod::Carry => {
            // Month counts can change from year to year, so walk one year at a
            // time. Every step moves at least one month, bounding the loop.
            let budget = MAX_FIXUP_ITERATIONS + dmy.month.unsigned_abs() as usize;
            let mut steps = 0;
            loop {
                let months = i32::from(calendar.months_in_year(dmy.year));
                if months == 0 || steps > budget {
                    return Err(CalendarError::FixupUnstable { iterations: steps });
                }
                if dmy.month < 1 {
                    dmy.year -= 1;
                    dmy.month += i32::from(calendar.months_in_year(dmy.year));
                } else if dmy.month > months {
                    dmy.month -= months;
                    dmy.year += 1;
                } else {
                    break;
                }
                steps += 1;
            }
        },
    }
    Ok(dmy)
}

fn fix_day<C: DmyCalendar>(calendar: &C, mut dmy: Dmy, method: FixupMethod) -> Result<Dmy> {
    let months = i32::from(calendar.months_in_year(dmy.year));
    if !(1..=months).contains(&dmy.month) {
        // Month is still out of range under Clamp/Carry mixing; retry next round.
        return Ok(dmy);
    }
    match method {
        FixupMethod::Clamp => {
            let days = i32::from(calendar.days_in_month(dmy.month, dmy.year)?);
            dmy.day = dmy.day.clamp(i32::from(MIN_DAY), days);
            Ok(dmy)
        },
        FixupMethod::Carry => {
            // Day overflow is a pure offset from the first of the month.
            let first = calendar.dmy_to_jd(Dmy { day: 1, ..dmy })?;
            calendar.jd_to_dmy(first + i64::from(dmy.day) - 1)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{Coptic, Gregorian, Hebrew};

    #[test]
    fn test_clamp_day_and_month() {
        let cases = [
            (Dmy::new(32, 1, 2023), Dmy::new(31, 1, 2023)),
            (Dmy::new(30, 2, 2023), Dmy::new(28, 2, 2023)),
            (Dmy::new(30, 2, 2024), Dmy::new(29, 2, 2024)),
            (Dmy::new(0, 13, 2024), Dmy::new(1, 12, 2024)),
            (Dmy::new(15, -4, 1900), Dmy::new(15, 1, 1900)),
        ];
        for (input, expected) in cases {
            assert_eq!(make_valid(&Gregorian, input, Fixup::CLAMP).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_carry_day_and_month() {
        let cases = [
            (Dmy::new(32, 1, 2023), Dmy::new(1, 2, 2023)),
            (Dmy::new(30, 2, 2023), Dmy::new(2, 3, 2023)),
            (Dmy::new(0, 3, 2024), Dmy::new(29, 2, 2024)),
            (Dmy::new(1, 13, 2024), Dmy::new(1, 1, 2025)),
            (Dmy::new(1, 0, 2024), Dmy::new(1, 12, 2023)),
            (Dmy::new(1, -23, 2024), Dmy::new(1, 1, 2022)),
            (Dmy::new(366, 1, 2024), Dmy::new(31, 12, 2024)),
            (Dmy::new(-30, 1, 2024), Dmy::new(1, 12, 2023)),
        ];
        for (input, expected) in cases {
            assert_eq!(make_valid(&Gregorian, input, Fixup::CARRY).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_mixed_policies() {
        let clamp_day = Fixup { day: FixupMethod::Clamp, month: FixupMethod::Carry };
        assert_eq!(make_valid(&Gregorian, Dmy::new(31, 14, 2023), clamp_day).unwrap(), Dmy::new(29, 2, 2024));
        let carry_day = Fixup { day: FixupMethod::Carry, month: FixupMethod::Clamp };
        assert_eq!(make_valid(&Gregorian, Dmy::new(31, 14, 2023), carry_day).unwrap(), Dmy::new(31, 12, 2023));
    }

    #[test]
    fn test_carry_through_epagomenal_month() {
        // Coptic year 3 is leap: the short 13th month has 6 days.
        assert_eq!(make_valid(&Coptic, Dmy::new(7, 13, 3), Fixup::CARRY).unwrap(), Dmy::new(1, 1, 4));
        assert_eq!(make_valid(&Coptic, Dmy::new(7, 13, 4), Fixup::CARRY).unwrap(), Dmy::new(2, 1, 5));
        assert_eq!(make_valid(&Coptic, Dmy::new(7, 13, 4), Fixup::CLAMP).unwrap(), Dmy::new(5, 13, 4));
    }

    #[test]
    fn test_carry_with_varying_months_per_year() {
        // 5784 is a Hebrew leap year with 13 months, 5785 has 12.
        let hebrew = Hebrew;
        assert_eq!(make_valid(&hebrew, Dmy::new(1, 14, 5784), Fixup::CARRY).unwrap(), Dmy::new(1, 1, 5785));
        assert_eq!(make_valid(&hebrew, Dmy::new(1, 13, 5785), Fixup::CARRY).unwrap(), Dmy::new(1, 1, 5786));
        assert_eq!(make_valid(&hebrew, Dmy::new(1, 0, 5785), Fixup::CARRY).unwrap(), Dmy::new(1, 13, 5784));
    }

    #[test]
    fn test_idempotence() {
        for input in [Dmy::new(45, 15, 2023), Dmy::new(-3, 0, 1), Dmy::new(29, 2, 1900)] {
            for fixup in [Fixup::CLAMP, Fixup::CARRY] {
                let once = make_valid(&Gregorian, input, fixup).unwrap();
                let twice = make_valid(&Gregorian, once, fixup).unwrap();
                assert_eq!(once, twice);
                assert!(is_valid_dmy(&Gregorian, &once));
            }
        }
    }

    #[test]
    fn test_clamp_leaves_valid_dates_alone() {
        for input in [Dmy::new(29, 2, 2000), Dmy::new(31, 12, -500), Dmy::new(1, 1, 0)] {
            assert_eq!(make_valid(&Gregorian, input, Fixup::CLAMP).unwrap(), input);
        }
    }

    #[test]
    fn test_fixup_serde() {
        let json = serde_json::to_string(&Fixup::CARRY).unwrap();
        assert_eq!(json, r#"{"day":"Carry","month":"Carry"}"#);
        let parsed: Fixup = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Fixup::CARRY);
    }
}
