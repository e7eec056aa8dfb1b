//! Range predicates for CAFF block fields.
//!
//! Each check returns the first violated constraint, in field order, or `None`.

use crate::foundation::error::DecodeError;

/// A field whose value fell outside its permitted range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeViolation {
    /// Field name as it appears in the format description.
    pub field: &'static str,
    /// Offending value.
    pub value: u64,
}

impl From<RangeViolation> for DecodeError {
    fn from(v: RangeViolation) -> Self {
        DecodeError::InvalidFieldRange {
            field: v.field,
            value: v.value,
        }
    }
}

fn check(field: &'static str, value: u8, lo: u8, hi: u8) -> Option<RangeViolation> {
    if (lo..=hi).contains(&value) {
        return None;
    }
    Some(RangeViolation {
        field,
        value: u64::from(value),
    })
}

/// Calendar and clock ranges of a credits block.
///
/// The day is only checked against `1..=31`, not against the month.
pub fn check_credits(month: u8, day: u8, hour: u8, minute: u8) -> Option<RangeViolation> {
    check("month", month, 1, 12)
        .or_else(|| check("day", day, 1, 31))
        .or_else(|| check("hour", hour, 0, 23))
        .or_else(|| check("minute", minute, 0, 59))
}

/// Day-of-month against the actual length of `month` in `year`.
///
/// Assumes `month` already passed [`check_credits`].
pub fn check_calendar_day(year: u16, month: u8, day: u8) -> Option<RangeViolation> {
    check("day", day, 1, days_in_month(year, month))
}

/// Display duration of an animation frame, in milliseconds.
pub fn check_duration(duration: u16) -> Option<RangeViolation> {
    if duration >= 1 {
        return None;
    }
    Some(RangeViolation {
        field: "duration",
        value: u64::from(duration),
    })
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: u16) -> bool {
    (year.is_multiple_of(4) && !year.is_multiple_of(100)) || year.is_multiple_of(400)
}

/// Days in `month` (1-based); 31 for anything out of range.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/validate.rs"]
mod tests;
