//! The calendars. Each submodule keeps its free-standing arithmetic (leap
//! rules, new-year functions, name tables) next to the calendar type.

pub mod bahai;
pub mod chinese;
pub mod coptic;
pub mod egyptian;
pub mod french;
pub mod gregorian;
pub mod hebrew;
pub mod hindu;
pub mod islamic;
pub mod iso;
pub mod julian;
pub mod mayan;
pub mod persian;

pub use bahai::Bahai;
pub use chinese::Chinese;
pub use coptic::{Coptic, Ethiopic};
pub use egyptian::{Armenian, Egyptian};
pub use french::French;
pub use gregorian::Gregorian;
pub use hebrew::Hebrew;
pub use hindu::{HinduLunisolar, HinduSolar, HinduVersion};
pub use islamic::{Islamic, IslamicEpoch, IslamicSystem, LeapSequence, MonthFunc};
pub use iso::Iso;
pub use julian::Julian;
pub use mayan::{HaabDate, LongCount, TzolkinDate};
pub use persian::{Persian, PersianMethod};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Calendar, Dmy, DmyCalendar};

    /// Spans negative day numbers and several millennia either side of the
    /// common era.
    const WIDE_START: i64 = -2_000_000;
    const WIDE_END: i64 = 3_000_000;

    fn assert_round_trip<C: Calendar>(calendar: &C, start: i64, end: i64, step: usize) {
        for jd in (start..end).step_by(step) {
            let fields = calendar.from_jd(jd).unwrap();
            assert_eq!(calendar.validate(&fields).unwrap(), jd, "{} {fields}", calendar.name());
        }
    }

    /// Each day is the day after the one before, or the first day of the
    /// month that follows once the month is full.
    fn assert_successors<C: DmyCalendar>(calendar: &C, start: i64, days: i64) {
        let mut previous = calendar.from_jd(start).unwrap();
        for jd in start + 1..start + days {
            let next = calendar.from_jd(jd).unwrap();
            let length = i32::from(calendar.days_in_month(previous.month, previous.year).unwrap());
            let expected = if previous.day < length {
                Dmy::new(previous.day + 1, previous.month, previous.year)
            } else if previous.month == i32::from(calendar.months_in_year(previous.year)) {
                Dmy::new(1, 1, previous.year + 1)
            } else {
                Dmy::new(1, previous.month + 1, previous.year)
            };
            assert_eq!(next, expected, "{} after {previous}", calendar.name());
            previous = next;
        }
    }

    #[test]
    fn test_arithmetic_round_trips() {
        assert_round_trip(&Gregorian, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Julian, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Egyptian, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Armenian, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Coptic, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Ethiopic, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Bahai, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Iso, WIDE_START, WIDE_END, 997);
        assert_round_trip(&French, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Hebrew, WIDE_START, WIDE_END, 997);
        assert_round_trip(&LongCount, WIDE_START, WIDE_END, 997);
        assert_round_trip(&Islamic::default(), WIDE_START, WIDE_END, 997);
        assert_round_trip(&Persian::new(PersianMethod::Arithmetic), WIDE_START, WIDE_END, 997);
    }

    #[test]
    fn test_astronomical_round_trips() {
        assert_round_trip(&Persian::new(PersianMethod::Astronomical), WIDE_START, WIDE_END, 9_973);
        for version in [HinduVersion::Modern, HinduVersion::Old] {
            assert_round_trip(&HinduSolar::new(version), WIDE_START, WIDE_END, 9_973);
            assert_round_trip(&HinduLunisolar::new(version), WIDE_START, WIDE_END, 9_973);
        }
        for visibility in [MonthFunc::ConjunctionBeforeSunset, MonthFunc::MinimumAge { hours: 15.0 }] {
            assert_round_trip(&Islamic::observational(visibility), 1_948_440, 2_700_000, 7_919);
        }
        assert_round_trip(&Chinese, 2_000_000, 2_600_000, 997);
    }

    #[test]
    fn test_days_follow_in_order() {
        for start in [-1_500_000, 0, 1_000_000, 2_451_000] {
            assert_successors(&Gregorian, start, 800);
            assert_successors(&Julian, start, 800);
            assert_successors(&Egyptian, start, 800);
            assert_successors(&Armenian, start, 800);
            assert_successors(&Coptic, start, 800);
            assert_successors(&Ethiopic, start, 800);
            assert_successors(&Bahai, start, 800);
            assert_successors(&Iso, start, 800);
            assert_successors(&French, start, 800);
            assert_successors(&Hebrew, start, 800);
            assert_successors(&Islamic::default(), start, 800);
            assert_successors(&Persian::new(PersianMethod::Arithmetic), start, 800);
            assert_successors(&Persian::new(PersianMethod::Astronomical), start, 400);
            assert_successors(&HinduSolar::default(), start, 400);
            assert_successors(&HinduSolar::new(HinduVersion::Old), start, 400);
        }
        assert_successors(&Islamic::observational(MonthFunc::ConjunctionBeforeSunset), 2_451_000, 400);
    }
}
