/// Julian Day Number of 1 January 1 CE, proleptic Gregorian calendar
pub const GREGORIAN_EPOCH: i64 = 1_721_426;
/// Julian Day Number of 1 January 1 CE, Julian calendar
pub const JULIAN_EPOCH: i64 = 1_721_424;
/// Egyptian era of Nabonassar, 26 February 747 BCE (Julian)
pub const EGYPTIAN_EPOCH: i64 = 1_448_638;
/// Armenian era, 11 July 552 CE (Julian)
pub const ARMENIAN_EPOCH: i64 = 1_922_868;
/// Era of the Martyrs, 29 August 284 CE (Julian)
pub const COPTIC_EPOCH: i64 = 1_825_030;
/// Era of Incarnation, 29 August 8 CE (Julian)
pub const ETHIOPIC_EPOCH: i64 = 1_724_221;
/// 21 March 1844 (Gregorian)
pub const BAHAI_EPOCH: i64 = 2_394_647;
/// 22 September 1792 (Gregorian)
pub const FRENCH_EPOCH: i64 = 2_375_840;
/// Long count 0.0.0.0.0, 6 September 3114 BCE (Julian), GMT correlation
pub const MAYAN_EPOCH: i64 = 584_283;
/// 1 Tishri AM 1, 7 October 3761 BCE (Julian)
pub const HEBREW_EPOCH: i64 = 347_998;
/// 1 Muharram AH 1, civil reckoning, 16 July 622 CE (Julian)
pub const ISLAMIC_CIVIL_EPOCH: i64 = 1_948_440;
/// 1 Muharram AH 1, astronomical reckoning, 15 July 622 CE (Julian)
pub const ISLAMIC_ASTRONOMICAL_EPOCH: i64 = 1_948_439;
/// 1 Farvardin AP 1, 19 March 622 CE (Julian)
pub const PERSIAN_EPOCH: i64 = 1_948_321;
/// Start of the Kali Yuga, 18 February 3102 BCE (Julian)
pub const HINDU_EPOCH: i64 = 588_466;
/// 15 February 2637 BCE (Gregorian), first year of the first sexagenary cycle
pub const CHINESE_EPOCH: i64 = 758_326;

/// Offset between Rata Die day numbers and Julian Day Numbers
pub const RATA_DIE_OFFSET: i64 = 1_721_425;

/// Days in each Gregorian/Julian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;
/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;
/// Days in a full 400-year Gregorian cycle
pub(crate) const DAYS_IN_GREGORIAN_CYCLE: i64 = 146_097;

/// Mean synodic month in days
pub const MEAN_SYNODIC_MONTH: f64 = 29.530_588_861;
/// Mean tropical year in days
pub const MEAN_TROPICAL_YEAR: f64 = 365.242_189;

/// Upper bound on outer rounds of carry normalization
pub const MAX_FIXUP_ITERATIONS: usize = 64;
/// Upper bound on bisection steps in the angular root finder
pub const MAX_SOLVER_ITERATIONS: usize = 128;
