//! The Badí calendar of the Bahá'í Faith, with its year fixed to start on
//! 21 March (Gregorian).
//!
//! Eighteen months of nineteen days are followed by the intercalary days of
//! Ayyám-i-Há (month 19 here) and the fasting month of ʻAláʼ (month 20).
//! Ayyám-i-Há has five days when the following Gregorian February is a leap
//! month, otherwise four.

use super::gregorian::{self, fixed_from_gregorian, year_from_fixed};
use crate::date::{DmyCalendar, dmy_calendar};
use crate::divmod::{amod, div_f};
use crate::{Dmy, Result};

/// Years since 1843 CE
const GREGORIAN_OFFSET: i64 = 1843;
/// Days in the first eighteen months
const REGULAR_DAYS: i64 = 18 * 19;
/// Month number of Ayyám-i-Há
pub const AYYAM_I_HA: i32 = 19;
/// Month number of ʻAláʼ
pub const ALA: i32 = 20;

const MONTH_NAMES: [&str; 20] = [
    "Bahā`",
    "Jalāl",
    "Jamāl",
    "`Aẓamat",
    "Nūr",
    "Raḥmat",
    "Kalimāt",
    "Kamāl",
    "Asmā`",
    "`Izzat",
    "Mashīyyat",
    "`Ilm",
    "Qudrat",
    "Qawl",
    "Masā`il",
    "Sharaf",
    "Sulṭān",
    "Mulk",
    "Ayyām-i-Hā",
    "`Alā`",
];

const YEAR_NAMES: [&str; 19] = [
    "Alif",
    "Bā`",
    "Ab",
    "Dāl",
    "Bāb",
    "Vāv",
    "Abad",
    "Jād",
    "Bahā",
    "Ḥubb",
    "Bahhāj",
    "Javāb",
    "Aḥad",
    "Vahhāb",
    "Vidād",
    "Badī`",
    "Bahī",
    "Abhā",
    "Vāḥid",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bahai;

impl Bahai {
    /// The 19-year cycle (Váḥid) containing `year`, counted from 1.
    pub fn vahid(year: i64) -> i64 {
        div_f(year - 1, 19) + 1
    }

    /// Position of `year` inside its Váḥid, 1 to 19.
    pub fn year_in_vahid(year: i64) -> i64 {
        amod(year, 19)
    }

    /// The 361-year cycle (Kull-i-Shay) containing `year`, counted from 1.
    pub fn kull_i_shay(year: i64) -> i64 {
        div_f(year - 1, 361) + 1
    }

    /// Length of Ayyám-i-Há in `year`.
    pub fn ayyam_i_ha_days(year: i64) -> u8 {
        if gregorian::is_leap_year(year + GREGORIAN_OFFSET + 1) { 5 } else { 4 }
    }

    fn new_year(year: i64) -> i64 {
        fixed_from_gregorian(year + GREGORIAN_OFFSET, 3, 21)
    }
}

impl DmyCalendar for Bahai {
    fn months_in_year(&self, _year: i64) -> u8 {
        20
    }

    fn days_in_month(&self, month: i32, year: i64) -> Result<u8> {
        Ok(if month == AYYAM_I_HA { Self::ayyam_i_ha_days(year) } else { 19 })
    }

    fn is_leap_year(&self, year: i64) -> Result<bool> {
        Ok(Self::ayyam_i_ha_days(year) == 5)
    }

    fn dmy_to_jd(&self, dmy: Dmy) -> Result<i64> {
        let start = Self::new_year(dmy.year);
        let day = i64::from(dmy.day) - 1;
        Ok(match dmy.month {
            AYYAM_I_HA => start + REGULAR_DAYS + day,
            ALA => start + REGULAR_DAYS + i64::from(Self::ayyam_i_ha_days(dmy.year)) + day,
            month => start + 19 * (i64::from(month) - 1) + day,
        })
    }

    fn jd_to_dmy(&self, jd: i64) -> Result<Dmy> {
        let gregorian_year = year_from_fixed(jd);
        let year = if jd >= fixed_from_gregorian(gregorian_year, 3, 21) {
            gregorian_year - GREGORIAN_OFFSET
        } else {
            gregorian_year - GREGORIAN_OFFSET - 1
        };
        let day_of_year = jd - Self::new_year(year);
        let ayyam = i64::from(Self::ayyam_i_ha_days(year));
        let (month, day) = if day_of_year < REGULAR_DAYS {
            (div_f(day_of_year, 19) as i32 + 1, day_of_year % 19)
        } else if day_of_year < REGULAR_DAYS + ayyam {
            (AYYAM_I_HA, day_of_year - REGULAR_DAYS)
        } else {
            (ALA, day_of_year - REGULAR_DAYS - ayyam)
        };
        Ok(Dmy::new(day as i32 + 1, month, year))
    }

    fn month_name(&self, month: i32, _year: i64) -> &'static str {
        MONTH_NAMES[(month.clamp(1, 20) - 1) as usize]
    }

    fn year_name(&self, year: i64) -> Option<String> {
        Some(YEAR_NAMES[(Self::year_in_vahid(year) - 1) as usize].to_owned())
    }
}

dmy_calendar!(Bahai, "Bahá'í", crate::week::BAHAI);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BAHAI_EPOCH;
    use crate::{Calendar, Date};

    #[test]
    fn test_known_dates() {
        struct TestCase {
            gregorian: (i64, i32, i32),
            badi:      Dmy,
        }

        let cases = [
            TestCase { gregorian: (1844, 3, 21), badi: Dmy::new(1, 1, 1) },
            TestCase { gregorian: (1961, 9, 23), badi: Dmy::new(16, 10, 118) },
            TestCase { gregorian: (2000, 1, 1), badi: Dmy::new(2, 16, 156) },
            TestCase { gregorian: (2024, 2, 26), badi: Dmy::new(1, 19, 180) },
            TestCase { gregorian: (2024, 3, 1), badi: Dmy::new(5, 19, 180) },
            TestCase { gregorian: (2024, 3, 2), badi: Dmy::new(1, 20, 180) },
            TestCase { gregorian: (2024, 3, 20), badi: Dmy::new(19, 20, 180) },
        ];
        for case in &cases {
            let (y, m, d) = case.gregorian;
            let jd = fixed_from_gregorian(y, m, d);
            assert_eq!(Bahai.from_jd(jd).unwrap(), case.badi, "{y}-{m}-{d}");
            assert_eq!(Bahai.validate(&case.badi).unwrap(), jd);
        }
    }

    #[test]
    fn test_ayyam_i_ha_length() {
        assert_eq!(Bahai::ayyam_i_ha_days(155), 4);
        assert_eq!(Bahai::ayyam_i_ha_days(156), 5);
        assert_eq!(Bahai::ayyam_i_ha_days(180), 5);
        assert!(!Bahai.is_valid(&Dmy::new(5, 19, 157)));
        assert_eq!(Bahai.days_in_year(156).unwrap(), 366);
    }

    #[test]
    fn test_cycles() {
        assert_eq!(Bahai::vahid(1), 1);
        assert_eq!(Bahai::vahid(19), 1);
        assert_eq!(Bahai::vahid(20), 2);
        assert_eq!(Bahai::year_in_vahid(19), 19);
        assert_eq!(Bahai::year_in_vahid(181), 10);
        assert_eq!(Bahai::kull_i_shay(361), 1);
        assert_eq!(Bahai::kull_i_shay(362), 2);
        assert_eq!(Bahai.year_name(181).as_deref(), Some("Ḥubb"));
    }

    #[test]
    fn test_epoch_format() {
        let date = Date::new(Bahai, Dmy::new(1, 1, 1));
        assert_eq!(date.jd().unwrap(), BAHAI_EPOCH);
        assert_eq!(date.weekday().unwrap(), 5);
        assert_eq!(date.format("%W, %d %M %y (%Y)").unwrap(), "Istijlāl, 1 Bahā` 1 (Alif)");
    }
}
