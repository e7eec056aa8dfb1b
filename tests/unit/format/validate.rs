use super::*;

fn violation(field: &'static str, value: u64) -> Option<RangeViolation> {
    Some(RangeViolation { field, value })
}

#[test]
fn month_boundaries() {
    assert_eq!(check_credits(0, 1, 0, 0), violation("month", 0));
    assert_eq!(check_credits(1, 1, 0, 0), None);
    assert_eq!(check_credits(12, 1, 0, 0), None);
    assert_eq!(check_credits(13, 1, 0, 0), violation("month", 13));
}

#[test]
fn day_boundaries() {
    assert_eq!(check_credits(1, 0, 0, 0), violation("day", 0));
    assert_eq!(check_credits(1, 1, 0, 0), None);
    assert_eq!(check_credits(1, 31, 0, 0), None);
    assert_eq!(check_credits(1, 32, 0, 0), violation("day", 32));
}

#[test]
fn hour_and_minute_boundaries() {
    assert_eq!(check_credits(1, 1, 23, 0), None);
    assert_eq!(check_credits(1, 1, 24, 0), violation("hour", 24));
    assert_eq!(check_credits(1, 1, 0, 59), None);
    assert_eq!(check_credits(1, 1, 0, 60), violation("minute", 60));
}

#[test]
fn first_violation_in_field_order_wins() {
    assert_eq!(check_credits(13, 40, 99, 99), violation("month", 13));
    assert_eq!(check_credits(2, 40, 99, 99), violation("day", 40));
    assert_eq!(check_credits(2, 4, 99, 99), violation("hour", 99));
}

#[test]
fn lenient_check_accepts_impossible_dates() {
    assert_eq!(check_credits(2, 30, 0, 0), None);
    assert_eq!(check_credits(4, 31, 0, 0), None);
}

#[test]
fn calendar_day_respects_month_length() {
    assert_eq!(check_calendar_day(2023, 2, 28), None);
    assert_eq!(check_calendar_day(2023, 2, 29), violation("day", 29));
    assert_eq!(check_calendar_day(2024, 2, 29), None);
    assert_eq!(check_calendar_day(1900, 2, 29), violation("day", 29));
    assert_eq!(check_calendar_day(2000, 2, 29), None);
    assert_eq!(check_calendar_day(2024, 4, 31), violation("day", 31));
    assert_eq!(check_calendar_day(2024, 12, 31), None);
}

#[test]
fn duration_must_be_positive() {
    assert_eq!(check_duration(0), violation("duration", 0));
    assert_eq!(check_duration(1), None);
    assert_eq!(check_duration(u16::MAX), None);
}

#[test]
fn violation_converts_to_decode_error() {
    let err: DecodeError = RangeViolation {
        field: "month",
        value: 13,
    }
    .into();
    assert_eq!(
        err,
        DecodeError::InvalidFieldRange {
            field: "month",
            value: 13
        }
    );
}
