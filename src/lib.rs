//! Conversions between civil calendars through a shared Julian Day Number.
//!
//! Every calendar maps its own fields (day, month, year and whatever extra
//! cycle or leap markers it needs) to and from a signed Julian Day Number
//! (JDN). Converting between two calendars is always a trip through the JDN.
//!
//! ```
//! use multical::calendars::{Bahai, Gregorian};
//! use multical::{BAHAI_EPOCH, Date, Dmy};
//!
//! let naw_ruz = Date::new(Gregorian, Dmy::new(21, 3, 1844));
//! let badi = Date::convert(&naw_ruz, Bahai).unwrap();
//!
//! assert_eq!(badi.jd().unwrap(), BAHAI_EPOCH);
//! assert_eq!(badi.format("%W, %d %M %y").unwrap(), "Istijlāl, 1 Bahā` 1");
//! ```
//!
//! Calendars whose rules have competing variants (Islamic, Persian, Hindu)
//! take the variant as part of the calendar value rather than as global
//! state; see [`CalendarConfig`].

pub mod astro;
pub mod calendars;
mod config;
mod consts;
pub mod date;
pub mod divmod;
pub mod fixup;
pub mod format;
mod prelude;
mod types;
pub mod week;

pub use config::CalendarConfig;
pub use consts::*;
pub use date::{Calendar, Date, DmyCalendar, Parts};
pub use fixup::{Fixup, FixupMethod};
pub use types::{ChineseFields, Dmy, HinduLunarFields, LongCountFields};
pub use week::Week;

/// Errors raised by calendar conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// An iterative astronomical search ran out of iterations.
    #[error("{what} did not converge after {iterations} iterations")]
    NoConvergence { what: &'static str, iterations: usize },

    /// A root finder was handed an interval that does not contain a root.
    #[error("{what}: no root bracketed in [{lo}, {hi}]")]
    NoBracket { what: &'static str, lo: f64, hi: f64 },

    /// A conversion needed a valid civil date.
    #[error("Invalid {calendar} date: {fields}")]
    InvalidDate { calendar: &'static str, fields: String },

    /// Carry normalization kept changing the date.
    #[error("Date fixup did not stabilise after {iterations} iterations")]
    FixupUnstable { iterations: usize },

    /// Stem and branch of a sexagenary pair must share parity.
    #[error("Invalid sexagenary pair: stem {stem}, branch {branch}")]
    InvalidSexagesimal { stem: u8, branch: u8 },

    /// Configuration could not be read.
    #[error("Invalid calendar configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CalendarError>;
