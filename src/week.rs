//! Week cycles, independent of any calendar's month structure.
//!
//! A week is fully described by its length, the weekday index of JDN 0 and a
//! name table. The weekday of any day is `(jd + jd0_offset) mod length`.

use crate::divmod::mod_f;

/// A repeating cycle of named days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    /// Days per cycle
    pub length:     u8,
    /// Weekday index of Julian Day 0
    pub jd0_offset: u8,
    /// Day names, indexed by weekday
    pub names:      &'static [&'static str],
}

// JDN 0 fell on a Monday, so a Sunday-first table has offset 1.

/// Seven-day week, Sunday = 0
pub const SEVEN_DAY: Week = Week {
    length:     7,
    jd0_offset: 1,
    names:      &["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"],
};

/// ISO 8601 week, Monday = 0
pub const ISO: Week = Week {
    length:     7,
    jd0_offset: 0,
    names:      &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"],
};

/// Armenian week, Sunday = 0
pub const ARMENIAN: Week = Week {
    length:     7,
    jd0_offset: 1,
    names:      &[
        "Miashabathi",
        "Erkushabathi",
        "Erekhshabathi",
        "Chorekhshabathi",
        "Hingshabathi",
        "Urbath",
        "Shabath",
    ],
};

/// Badí week, Saturday = 0
pub const BAHAI: Week = Week {
    length:     7,
    jd0_offset: 2,
    names:      &["Jalāl", "Jamāl", "Kamāl", "Fiḍāl", "`Idāl", "Istijlāl", "Istiqlāl"],
};

/// Coptic week, Sunday = 0
pub const COPTIC: Week = Week {
    length:     7,
    jd0_offset: 1,
    names:      &["Tkyriake", "Pesnau", "Pshoment", "Peftoou", "Ptiou", "Psoou", "Psabbaton"],
};

/// Ethiopic week, Sunday = 0
pub const ETHIOPIC: Week = Week {
    length:     7,
    jd0_offset: 1,
    names:      &["Ehud", "Segno", "Maksegno", "Rob", "Hamus", "Arb", "Kidamme"],
};

/// Hebrew week, Sunday = 0
pub const HEBREW: Week = Week {
    length:     7,
    jd0_offset: 1,
    names:      &["Yom Rishon", "Yom Sheni", "Yom Shlishi", "Yom Revi`i", "Yom Hamishi", "Yom Shishi", "Shabbat"],
};

/// Islamic week, Sunday = 0
pub const ISLAMIC: Week = Week {
    length:     7,
    jd0_offset: 1,
    names:      &[
        "Yawm al-Ahad",
        "Yawm al-Ithnayn",
        "Yawm ath-Thulatha'",
        "Yawm al-Arba`a'",
        "Yawm al-Khamis",
        "Yawm al-Jum`a",
        "Yawm as-Sabt",
    ],
};

/// Persian week, Saturday = 0
pub const PERSIAN: Week = Week {
    length:     7,
    jd0_offset: 2,
    names:      &["Shanbeh", "Yekshanbeh", "Doshanbeh", "Seshanbeh", "Chaharshanbeh", "Panjshanbeh", "Jom`eh"],
};

/// Hindu week (vara), Sunday = 0
pub const HINDU: Week = Week {
    length:     7,
    jd0_offset: 1,
    names:      &["Ravivara", "Somavara", "Mangalavara", "Budhavara", "Brihaspatavara", "Sukravara", "Sanivara"],
};

/// Chinese week, Sunday = 0
pub const CHINESE: Week = Week {
    length:     7,
    jd0_offset: 1,
    names:      &["Xingqiri", "Xingqiyi", "Xingqi'er", "Xingqisan", "Xingqisi", "Xingqiwu", "Xingqiliu"],
};

impl Week {
    /// Weekday index of `jd`, in `0..length`.
    pub fn weekday(&self, jd: i64) -> u8 {
        mod_f(jd + i64::from(self.jd0_offset), i64::from(self.length)) as u8
    }

    /// Name of weekday `index`, wrapping out-of-range indices.
    pub fn name(&self, index: i64) -> &'static str {
        self.names[mod_f(index, i64::from(self.length)) as usize]
    }

    /// Offset in days from `jd` to the `n`-th occurrence of `target`.
    ///
    /// `n = 0` is the first occurrence on or after `jd`, `n = 1` the one after
    /// that; `n = -1` is the last occurrence strictly before `jd`.
    pub fn days_until(&self, jd: i64, target: u8, n: i64) -> i64 {
        let len = i64::from(self.length);
        mod_f(i64::from(target) - i64::from(self.weekday(jd)), len) + n * len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_day_week() {
        // 1 January 2000 was a Saturday
        assert_eq!(SEVEN_DAY.weekday(2_451_545), 6);
        assert_eq!(SEVEN_DAY.name(6), "Saturday");
        // JDN 0 was a Monday
        assert_eq!(SEVEN_DAY.weekday(0), 1);
        assert_eq!(ISO.weekday(0), 0);
        assert_eq!(SEVEN_DAY.weekday(-1), 0);
    }

    #[test]
    fn test_bahai_week_starts_saturday() {
        assert_eq!(BAHAI.weekday(2_451_545), 0);
        assert_eq!(BAHAI.weekday(crate::BAHAI_EPOCH), 5);
        assert_eq!(BAHAI.name(5), "Istijlāl");
    }

    #[test]
    fn test_days_until_forward() {
        let sat = 2_451_545;
        assert_eq!(SEVEN_DAY.days_until(sat, 6, 0), 0);
        assert_eq!(SEVEN_DAY.days_until(sat, 6, 1), 7);
        assert_eq!(SEVEN_DAY.days_until(sat, 1, 0), 2);
        assert_eq!(SEVEN_DAY.days_until(sat, 1, 2), 16);
    }

    #[test]
    fn test_days_until_backward() {
        let sat = 2_451_545;
        assert_eq!(SEVEN_DAY.days_until(sat, 6, -1), -7);
        assert_eq!(SEVEN_DAY.days_until(sat, 5, -1), -1);
        assert_eq!(SEVEN_DAY.days_until(sat, 0, -1), -6);
        assert_eq!(SEVEN_DAY.days_until(sat, 5, -2), -8);
    }

    #[test]
    fn test_days_until_lands_on_target() {
        for jd in 2_451_540..2_451_560 {
            for target in 0..7 {
                for n in [-3, -1, 0, 2] {
                    let offset = SEVEN_DAY.days_until(jd, target, n);
                    assert_eq!(SEVEN_DAY.weekday(jd + offset), target);
                    if n >= 0 {
                        assert!(offset >= 0 && offset < 7 * (n + 1));
                    } else {
                        assert!(offset < 0 && offset >= 7 * n);
                    }
                }
            }
        }
    }
}
