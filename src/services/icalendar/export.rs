use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Local, TimeZone};
use uuid::Uuid;

use crate::models::reminder::ReminderPlan;
use crate::models::schedule::Frequency;
use crate::utils::date::next_month;

use super::utils::{alarm_trigger, escape_text, format_datetime};

pub(super) fn reminder(
    plan: &ReminderPlan,
    count: u32,
    now: DateTime<Local>,
    prod_id: &str,
    alarm_lead_minutes: u32,
) -> Result<String> {
    let start = first_occurrence(plan, now)?;
    let end = start + Duration::hours(1);

    let mut ics = calendar_header(prod_id);
    ics.push_str("BEGIN:VEVENT\r\n");
    ics.push_str(&format!("UID:{}\r\n", Uuid::new_v4()));
    ics.push_str(&format!("DTSTAMP:{}\r\n", format_datetime(&now)));
    ics.push_str(&format!("DTSTART:{}\r\n", format_datetime(&start)));
    ics.push_str(&format!("DTEND:{}\r\n", format_datetime(&end)));
    ics.push_str(&format!("SUMMARY:{}\r\n", escape_text(&plan.summary())));
    ics.push_str(&format!(
        "DESCRIPTION:{}\r\n",
        escape_text(&description(plan))
    ));
    ics.push_str(&format!("RRULE:{}\r\n", rrule(&plan.schedule.frequency, plan.schedule.interval_days, count)));

    ics.push_str("BEGIN:VALARM\r\n");
    ics.push_str("ACTION:DISPLAY\r\n");
    ics.push_str(&format!(
        "DESCRIPTION:{}\r\n",
        escape_text(&format!(
            "Time to give {} to {}!",
            plan.product_name, plan.pet_name
        ))
    ));
    ics.push_str(&format!("TRIGGER:{}\r\n", alarm_trigger(alarm_lead_minutes)));
    ics.push_str("END:VALARM\r\n");

    ics.push_str("END:VEVENT\r\n");
    ics.push_str("END:VCALENDAR\r\n");
    Ok(ics)
}

fn calendar_header(prod_id: &str) -> String {
    let mut ics = String::new();
    ics.push_str("BEGIN:VCALENDAR\r\n");
    ics.push_str("VERSION:2.0\r\n");
    ics.push_str(&format!("PRODID:{}\r\n", prod_id));
    ics.push_str("CALSCALE:GREGORIAN\r\n");
    ics
}

fn description(plan: &ReminderPlan) -> String {
    let mut text = format!(
        "Medication reminder: {}\nPet: {}",
        plan.product_name, plan.pet_name
    );
    if let Some(ref notes) = plan.notes {
        text.push('\n');
        text.push_str(notes);
    }
    text
}

/// First occurrence: today at the reminder time, pushed forward one frequency
/// stride when that moment is already past.
fn first_occurrence(plan: &ReminderPlan, now: DateTime<Local>) -> Result<DateTime<Local>> {
    let mut date = now.date_naive();
    let naive = date.and_time(plan.reminder_time);
    let candidate = Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow!("Ambiguous local time: {}", naive))?;

    if candidate >= now {
        return Ok(candidate);
    }

    date = match plan.schedule.frequency {
        Frequency::Daily => date + Duration::days(1),
        Frequency::Weekly => date + Duration::days(7),
        Frequency::Monthly => next_month(date),
        Frequency::CustomDays => {
            date + Duration::days(i64::from(plan.schedule.interval_days.unwrap_or(1)))
        }
    };

    let naive = date.and_time(plan.reminder_time);
    Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow!("Ambiguous local time: {}", naive))
}

fn rrule(frequency: &Frequency, interval_days: Option<u32>, count: u32) -> String {
    let mut rule = match frequency {
        Frequency::Daily => "FREQ=DAILY".to_string(),
        Frequency::Weekly => "FREQ=WEEKLY".to_string(),
        Frequency::Monthly => "FREQ=MONTHLY".to_string(),
        // Custom strides are expressed as daily recurrence with an interval
        Frequency::CustomDays => format!("FREQ=DAILY;INTERVAL={}", interval_days.unwrap_or(1)),
    };
    if count > 0 {
        rule.push_str(&format!(";COUNT={}", count));
    }
    rule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rrule_daily() {
        assert_eq!(rrule(&Frequency::Daily, None, 10), "FREQ=DAILY;COUNT=10");
    }

    #[test]
    fn test_rrule_custom_days() {
        assert_eq!(
            rrule(&Frequency::CustomDays, Some(30), 12),
            "FREQ=DAILY;INTERVAL=30;COUNT=12"
        );
    }

    #[test]
    fn test_rrule_without_count() {
        assert_eq!(rrule(&Frequency::Weekly, None, 0), "FREQ=WEEKLY");
    }
}
