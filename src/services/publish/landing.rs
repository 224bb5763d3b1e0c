use crate::models::reminder::ReminderPlan;
use crate::models::schedule::OccurrenceResult;

/// Render the landing page offered behind the QR code: a short summary of the
/// reminder with a download link for the calendar file.
pub(super) fn render(
    plan: &ReminderPlan,
    occurrences: &OccurrenceResult,
    calendar_url: &str,
) -> String {
    let mut rows = vec![
        ("Pet", plan.pet_name.clone()),
        ("Product", plan.product_name.clone()),
        (
            "Reminder time",
            plan.reminder_time.format("%H:%M").to_string(),
        ),
        ("Total reminders", occurrences.count.to_string()),
        ("Duration", occurrences.duration_label.clone()),
    ];
    if let Some(ref notes) = plan.notes {
        rows.push(("Notes", notes.clone()));
    }

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n</head>\n<body>\n",
        escape_html(&plan.summary())
    ));
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&plan.summary())));
    html.push_str("<table>\n");
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            label,
            escape_html(&value)
        ));
    }
    html.push_str("</table>\n");
    html.push_str(&format!(
        "<p><a href=\"{}\" download>Add to calendar (.ics)</a></p>\n",
        escape_attr(calendar_url)
    ));
    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}
