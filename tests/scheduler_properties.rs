// Property-based tests for occurrence scheduling
// Random date ranges exercise counting and labelling invariants

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use pet_reminder::models::schedule::Frequency;
use pet_reminder::services::schedule::{compute_occurrence_count, format_duration_label};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_frequency() -> impl Strategy<Value = (Frequency, Option<u32>)> {
    prop_oneof![
        Just((Frequency::Daily, None)),
        Just((Frequency::Weekly, None)),
        Just((Frequency::Monthly, None)),
        (1u32..=90).prop_map(|n| (Frequency::CustomDays, Some(n))),
    ]
}

proptest! {
    /// Daily count over any valid range equals the inclusive day count.
    #[test]
    fn prop_daily_counts_inclusive_days(start in arb_date(), span in 0i64..2000) {
        let end = start + Duration::days(span);
        let count = compute_occurrence_count(start, end, Frequency::Daily, None);
        prop_assert_eq!(i64::from(count), span + 1);
    }

    /// Extending the end date by one day never decreases the count.
    #[test]
    fn prop_count_monotone_in_end_date(
        start in arb_date(),
        span in 0i64..2000,
        (frequency, interval) in arb_frequency(),
    ) {
        let end = start + Duration::days(span);
        let count = compute_occurrence_count(start, end, frequency, interval);
        let extended = compute_occurrence_count(
            start,
            end + Duration::days(1),
            frequency,
            interval,
        );
        prop_assert!(extended >= count);
    }

    /// A 7-day custom stride behaves exactly like the weekly frequency.
    #[test]
    fn prop_custom_seven_matches_weekly(start in arb_date(), span in 0i64..2000) {
        let end = start + Duration::days(span);
        prop_assert_eq!(
            compute_occurrence_count(start, end, Frequency::CustomDays, Some(7)),
            compute_occurrence_count(start, end, Frequency::Weekly, None),
        );
    }

    /// Every frequency returns at least one occurrence for a valid range.
    #[test]
    fn prop_valid_range_yields_at_least_one(
        start in arb_date(),
        span in 0i64..2000,
        (frequency, interval) in arb_frequency(),
    ) {
        let end = start + Duration::days(span);
        let count = compute_occurrence_count(start, end, frequency, interval);
        prop_assert!(count >= 1);
    }

    /// Weekly count is the daily count divided by seven, rounded up.
    #[test]
    fn prop_weekly_is_ceil_of_daily(start in arb_date(), span in 0i64..2000) {
        let end = start + Duration::days(span);
        let daily = i64::from(compute_occurrence_count(start, end, Frequency::Daily, None));
        let weekly = i64::from(compute_occurrence_count(start, end, Frequency::Weekly, None));
        prop_assert_eq!(weekly, (daily + 6) / 7);
    }

    /// The duration label is never empty and pluralizes only past one unit.
    #[test]
    fn prop_label_is_well_formed(start in arb_date(), span in 0i64..3000) {
        let end = start + Duration::days(span);
        let label = format_duration_label(start, end);
        prop_assert!(!label.is_empty());
        if label == "1 day" || label.ends_with(" 1 week") || label.ends_with(" 1 month") {
            prop_assert!(!label.ends_with('s'));
        }
    }
}
