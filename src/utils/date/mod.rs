// Date utility functions

use chrono::{Datelike, Days, NaiveDate};

/// Number of days in [start, end], counting both endpoints.
/// Returns 0 for an inverted range.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    (end - start).num_days() + 1
}

/// The same day one month later, clamped to the last day of the target month
/// (Jan 31 -> Feb 28).
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(chrono::Months::new(1))
        .unwrap_or(date)
}

/// Whole months between two dates, counted the way the occurrence scheduler
/// needs them: calendar-month difference, plus one when the end day-of-month
/// has reached the start day-of-month.
pub fn month_anniversaries(start: NaiveDate, end: NaiveDate) -> i64 {
    let months =
        i64::from(end.year() - start.year()) * 12 + i64::from(end.month()) - i64::from(start.month());
    if end.day() >= start.day() {
        months + 1
    } else {
        months
    }
}

/// `date` advanced by `days`, saturating instead of overflowing.
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}
