// Settings module
// Form and publishing configuration, persisted as TOML

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Application settings.
///
/// Defaults: a fixed product catalog, a 19:00 reminder time, a
/// 12-occurrence cap for open-ended schedules and an alarm one hour before
/// each dose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Product catalog offered by the form; free-text entries are allowed too.
    pub products: Vec<String>,
    pub default_reminder_time: NaiveTime,
    /// Applied when a schedule carries neither an end date nor a cap.
    pub default_occurrence_cap: u32,
    pub alarm_lead_minutes: u32,
    /// PRODID emitted in generated calendars.
    pub calendar_prod_id: String,
    /// Public base URL for stored artifacts. When absent, QR payloads fall
    /// back to embedding the calendar as a data URL.
    pub landing_base_url: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            products: vec![
                "NexGard (Flea & Tick)".to_string(),
                "NexGard SPECTRA (Flea, Tick & Worm)".to_string(),
                "Heartgard Plus (Heartworm)".to_string(),
                "Metacam (Pain Relief)".to_string(),
                "Frontline Plus (Flea & Tick)".to_string(),
            ],
            default_reminder_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            default_occurrence_cap: 12,
            alarm_lead_minutes: 60,
            calendar_prod_id: "-//Pet Medication Reminder//EN".to_string(),
            landing_base_url: None,
        }
    }
}

impl AppSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.default_occurrence_cap == 0 {
            return Err("default occurrence cap must be at least 1".to_string());
        }
        if let Some(ref url) = self.landing_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("landing base URL must be http(s)".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.products.len(), 5);
        assert_eq!(settings.default_occurrence_cap, 12);
        assert_eq!(settings.alarm_lead_minutes, 60);
        assert_eq!(
            settings.default_reminder_time,
            NaiveTime::from_hms_opt(19, 0, 0).unwrap()
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let settings = AppSettings {
            default_occurrence_cap: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let settings = AppSettings {
            landing_base_url: Some("ftp://example.com".to_string()),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
