use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

use super::export;
use crate::models::reminder::ReminderPlan;
use crate::models::settings::AppSettings;

/// Service for exporting reminder calendars as iCalendar (.ics) documents
pub struct ICalendarService {
    prod_id: String,
    alarm_lead_minutes: u32,
}

impl ICalendarService {
    pub fn new(prod_id: impl Into<String>, alarm_lead_minutes: u32) -> Self {
        Self {
            prod_id: prod_id.into(),
            alarm_lead_minutes,
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.calendar_prod_id.clone(), settings.alarm_lead_minutes)
    }

    /// Export a reminder plan as an iCalendar string with a recurring event
    /// bounded to `count` occurrences and a display alarm.
    pub fn export_reminder(
        &self,
        plan: &ReminderPlan,
        count: u32,
        now: DateTime<Local>,
    ) -> Result<String> {
        export::reminder(plan, count, now, &self.prod_id, self.alarm_lead_minutes)
    }

    /// Export a reminder plan to a .ics file on disk
    pub fn export_to_file(
        &self,
        plan: &ReminderPlan,
        count: u32,
        now: DateTime<Local>,
        path: &Path,
    ) -> Result<()> {
        let content = self.export_reminder(plan, count, now)?;
        fs::write(path, content).context(format!("Failed to write .ics file: {:?}", path))?;
        Ok(())
    }
}

impl Default for ICalendarService {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}
