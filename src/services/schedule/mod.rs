//! Occurrence scheduling.
//!
//! Pure date arithmetic that turns a dosing schedule into the bounded
//! occurrence count a recurrence rule needs, plus a coarse human-readable
//! duration label shown as a preview before submission. No I/O, no state;
//! every function is total and returns immediately.

use chrono::NaiveDate;

use crate::models::schedule::{Frequency, OccurrenceResult, ScheduleRequest};
use crate::utils::date::{add_days, days_inclusive, month_anniversaries};

/// How many occurrences fall in the inclusive range [start, end].
///
/// Defined for every input: an inverted range yields 0 (the request validator
/// rejects those before scheduling, so this is a fallback rather than an
/// error path), and a custom frequency without a positive interval yields 0.
///
/// Monthly counts calendar-month anniversaries of the start date, floored at
/// 1 for any non-empty range. A start day of 29-31 can land in a shorter
/// month; the count deliberately ignores that overflow.
pub fn compute_occurrence_count(
    start: NaiveDate,
    end: NaiveDate,
    frequency: Frequency,
    interval_days: Option<u32>,
) -> u32 {
    let total_days = days_inclusive(start, end);
    if total_days == 0 {
        return 0;
    }

    let count = match frequency {
        Frequency::Daily => total_days,
        Frequency::Weekly => (total_days as u64).div_ceil(7) as i64,
        Frequency::Monthly => month_anniversaries(start, end).max(1),
        Frequency::CustomDays => match interval_days {
            Some(interval) if interval > 0 => (total_days as u64).div_ceil(u64::from(interval)) as i64,
            _ => 0,
        },
    };

    count as u32
}

/// Coarse duration summary for the inclusive range [start, end]:
/// days up to a week, then approximate weeks, months and years.
pub fn format_duration_label(start: NaiveDate, end: NaiveDate) -> String {
    let total_days = days_inclusive(start, end);
    duration_label_for_days(total_days)
}

fn duration_label_for_days(total_days: i64) -> String {
    if total_days <= 7 {
        return format!("{} day{}", total_days, plural(total_days));
    }
    if total_days <= 31 {
        let weeks = (total_days as u64).div_ceil(7) as i64;
        return format!("≈ {} week{}", weeks, plural(weeks));
    }
    if total_days <= 365 {
        let months = (total_days as u64).div_ceil(30) as i64;
        return format!("≈ {} month{}", months, plural(months));
    }

    let years = total_days as f64 / 365.0;
    if years >= 2.0 {
        // One decimal; always plural this far out
        format!("≈ {:.1} years", years)
    } else {
        let months = (total_days as u64).div_ceil(30) as i64;
        format!("≈ {} month{}", months, plural(months))
    }
}

/// Duration hint for a capped monthly series, e.g.
/// "≈ 1 year and 2 months" for 14 occurrences.
pub fn format_monthly_cap_label(cap: u32) -> String {
    let years = i64::from(cap / 12);
    let months = i64::from(cap % 12);
    if years > 0 {
        let mut label = format!("≈ {} year{}", years, plural(years));
        if months > 0 {
            label.push_str(&format!(" and {} month{}", months, plural(months)));
        }
        label
    } else {
        format!("≈ {} month{}", months, plural(months))
    }
}

/// Resolve a validated request into its occurrence summary.
///
/// An explicit cap wins over the date range; an open-ended request falls back
/// to `default_cap`, since the calendar encoder always needs a bounded count.
pub fn schedule(request: &ScheduleRequest, default_cap: u32) -> OccurrenceResult {
    if let Some(cap) = request.occurrence_cap {
        return OccurrenceResult {
            count: cap,
            duration_label: capped_label(request, cap),
        };
    }

    if let Some(end) = request.end_date {
        return OccurrenceResult {
            count: compute_occurrence_count(
                request.start_date,
                end,
                request.frequency,
                request.interval_days,
            ),
            duration_label: format_duration_label(request.start_date, end),
        };
    }

    OccurrenceResult {
        count: default_cap,
        duration_label: capped_label(request, default_cap),
    }
}

/// Label for a series bounded by an occurrence count rather than an end date.
/// Monthly gets the exact year-and-month hint; other frequencies derive an
/// approximate end date from the stride and reuse the range label.
fn capped_label(request: &ScheduleRequest, cap: u32) -> String {
    if cap == 0 {
        return duration_label_for_days(0);
    }
    match request.frequency {
        Frequency::Monthly => format_monthly_cap_label(cap),
        Frequency::Daily => duration_label_for_days(i64::from(cap)),
        Frequency::Weekly => {
            let end = add_days(request.start_date, u64::from(cap - 1) * 7);
            format_duration_label(request.start_date, end)
        }
        Frequency::CustomDays => {
            let stride = u64::from(request.interval_days.unwrap_or(1));
            let end = add_days(request.start_date, u64::from(cap - 1) * stride);
            format_duration_label(request.start_date, end)
        }
    }
}

fn plural(quantity: i64) -> &'static str {
    if quantity > 1 {
        "s"
    } else {
        ""
    }
}
