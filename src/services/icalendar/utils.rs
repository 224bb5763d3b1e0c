use chrono::{DateTime, Local};

pub(super) fn format_datetime(dt: &DateTime<Local>) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

pub(super) fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// RFC 5545 duration for an alarm firing `minutes` before the event.
pub(super) fn alarm_trigger(minutes: u32) -> String {
    format!("-PT{}M", minutes)
}
