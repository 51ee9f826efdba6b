//! A small `%`-directive formatter shared by every calendar.
//!
//! | directive | output                                  |
//! |-----------|-----------------------------------------|
//! | `%d`      | day number                              |
//! | `%D`      | ordinal day (`1st`, `22nd`)             |
//! | `%m`      | month number                            |
//! | `%M`      | month name                              |
//! | `%y`      | year number                             |
//! | `%Y`      | year name, or the number if unnamed     |
//! | `%w`      | weekday number                          |
//! | `%W`      | weekday name                            |
//! | `%j`      | Julian Day Number                       |
//! | `%%`      | a literal `%`                           |
//!
//! A directive may carry flags and a width between `%` and its letter:
//! `0` pads numbers with zeros, `-` left-aligns, and a decimal width sets
//! the minimum field size (`%02d`, `%-10M`). Unknown directives are copied
//! to the output unchanged.

use crate::date::Parts;
use crate::week::Week;

#[derive(Debug, Default, Clone, Copy)]
struct Padding {
    zero:  bool,
    left:  bool,
    width: usize,
}

impl Padding {
    fn pad(self, out: &mut String, text: &str, numeric: bool) {
        let len = text.chars().count();
        if len >= self.width {
            out.push_str(text);
            return;
        }
        let fill = self.width - len;
        if self.left {
            out.push_str(text);
            out.extend(std::iter::repeat_n(' ', fill));
        } else if self.zero && numeric {
            // Zeros go after the sign.
            let (sign, digits) = text.strip_prefix('-').map_or(("", text), |rest| ("-", rest));
            out.push_str(sign);
            out.extend(std::iter::repeat_n('0', fill));
            out.push_str(digits);
        } else {
            out.extend(std::iter::repeat_n(' ', fill));
            out.push_str(text);
        }
    }
}

/// English ordinal of `n`: `1st`, `2nd`, `11th`, `23rd`.
pub fn ordinal(n: i64) -> String {
    let suffix = match (n.abs() % 10, n.abs() % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Expands `fmt` for the day `jd` described by `parts`.
pub fn render(fmt: &str, parts: &Parts, jd: i64, week: &Week) -> String {
    let mut out = String::with_capacity(fmt.len() + 16);
    let mut chars = fmt.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut padding = Padding::default();
        while let Some(&(_, flag)) = chars.peek() {
            match flag {
                '0' => padding.zero = true,
                '-' => padding.left = true,
                _ => break,
            }
            chars.next();
        }
        while let Some(&(_, digit)) = chars.peek() {
            let Some(value) = digit.to_digit(10) else { break };
            padding.width = padding.width * 10 + value as usize;
            chars.next();
        }

        let Some((end, directive)) = chars.next() else {
            // Dangling directive at the end of the format.
            out.push_str(&fmt[start..]);
            break;
        };

        let weekday = week.weekday(jd);
        match directive {
            'd' => padding.pad(&mut out, &parts.day.to_string(), true),
            'D' => padding.pad(&mut out, &ordinal(parts.day), false),
            'm' => padding.pad(&mut out, &parts.month.to_string(), true),
            'M' => padding.pad(&mut out, &parts.month_name, false),
            'y' => padding.pad(&mut out, &parts.year.to_string(), true),
            'Y' => match &parts.year_name {
                Some(name) => padding.pad(&mut out, name, false),
                None => padding.pad(&mut out, &parts.year.to_string(), true),
            },
            'w' => padding.pad(&mut out, &weekday.to_string(), true),
            'W' => padding.pad(&mut out, week.name(i64::from(weekday)), false),
            'j' => padding.pad(&mut out, &jd.to_string(), true),
            '%' => out.push('%'),
            _ => out.push_str(&fmt[start..end + directive.len_utf8()]),
        }
    }
    out
}
