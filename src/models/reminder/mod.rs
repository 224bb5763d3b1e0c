// Reminder plan module
// One submitted medication reminder: pet, product, time of day and schedule

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schedule::{ScheduleError, ScheduleRequest};

/// Validation failures for a [`ReminderPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("pet name cannot be empty")]
    EmptyPetName,
    #[error("product name cannot be empty")]
    EmptyProductName,
    #[error("a dosing schedule is required")]
    MissingSchedule,
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// A complete reminder submission, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPlan {
    pub pet_name: String,
    pub product_name: String,
    pub schedule: ScheduleRequest,
    /// Time of day the reminder fires, e.g. 19:00.
    pub reminder_time: NaiveTime,
    pub notes: Option<String>,
}

impl ReminderPlan {
    /// Create a builder for constructing plans with optional fields
    pub fn builder() -> ReminderPlanBuilder {
        ReminderPlanBuilder::new()
    }

    /// Validate the plan, including its embedded schedule
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.pet_name.trim().is_empty() {
            return Err(PlanError::EmptyPetName);
        }
        if self.product_name.trim().is_empty() {
            return Err(PlanError::EmptyProductName);
        }
        self.schedule.validate()?;
        Ok(())
    }

    /// Event summary as it appears in the calendar, "{pet} - {product}"
    pub fn summary(&self) -> String {
        format!("{} - {}", self.pet_name, self.product_name)
    }
}

/// Builder for creating reminder plans with optional fields
pub struct ReminderPlanBuilder {
    pet_name: Option<String>,
    product_name: Option<String>,
    schedule: Option<ScheduleRequest>,
    reminder_time: NaiveTime,
    notes: Option<String>,
}

impl ReminderPlanBuilder {
    pub fn new() -> Self {
        Self {
            pet_name: None,
            product_name: None,
            schedule: None,
            // Form default
            reminder_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            notes: None,
        }
    }

    pub fn pet_name(mut self, name: impl Into<String>) -> Self {
        self.pet_name = Some(name.into());
        self
    }

    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn schedule(mut self, schedule: ScheduleRequest) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn reminder_time(mut self, time: NaiveTime) -> Self {
        self.reminder_time = time;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build and validate the plan
    pub fn build(self) -> Result<ReminderPlan, PlanError> {
        let plan = ReminderPlan {
            pet_name: self.pet_name.ok_or(PlanError::EmptyPetName)?,
            product_name: self.product_name.ok_or(PlanError::EmptyProductName)?,
            schedule: self.schedule.ok_or(PlanError::MissingSchedule)?,
            reminder_time: self.reminder_time,
            notes: self.notes,
        };
        plan.validate()?;
        Ok(plan)
    }
}

impl Default for ReminderPlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::Frequency;
    use chrono::NaiveDate;

    fn sample_schedule() -> ScheduleRequest {
        ScheduleRequest::with_occurrence_cap(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            12,
            Frequency::Monthly,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_builder_basic() {
        let plan = ReminderPlan::builder()
            .pet_name("Luna")
            .product_name("NexGard (Flea & Tick)")
            .schedule(sample_schedule())
            .build()
            .unwrap();

        assert_eq!(plan.pet_name, "Luna");
        assert_eq!(plan.reminder_time, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert!(plan.notes.is_none());
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let plan = ReminderPlan::builder()
            .pet_name("Max")
            .product_name("Heartgard Plus (Heartworm)")
            .schedule(sample_schedule())
            .reminder_time(NaiveTime::from_hms_opt(8, 30, 0).unwrap())
            .notes("Give with food")
            .build()
            .unwrap();

        assert_eq!(plan.notes, Some("Give with food".to_string()));
        assert_eq!(plan.reminder_time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn test_empty_pet_name_rejected() {
        let result = ReminderPlan::builder()
            .pet_name("   ")
            .product_name("Metacam (Pain Relief)")
            .schedule(sample_schedule())
            .build();
        assert_eq!(result.unwrap_err(), PlanError::EmptyPetName);
    }

    #[test]
    fn test_empty_product_name_rejected() {
        let result = ReminderPlan::builder()
            .pet_name("Charlie")
            .product_name("")
            .schedule(sample_schedule())
            .build();
        assert_eq!(result.unwrap_err(), PlanError::EmptyProductName);
    }

    #[test]
    fn test_invalid_schedule_propagates() {
        let schedule = ScheduleRequest {
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: None,
            frequency: Frequency::CustomDays,
            interval_days: None,
            occurrence_cap: None,
        };
        let result = ReminderPlan::builder()
            .pet_name("Charlie")
            .product_name("Frontline Plus (Flea & Tick)")
            .schedule(schedule)
            .build();
        assert_eq!(
            result.unwrap_err(),
            PlanError::Schedule(ScheduleError::InvalidFrequencyConfiguration)
        );
    }

    #[test]
    fn test_summary() {
        let plan = ReminderPlan::builder()
            .pet_name("Luna")
            .product_name("NexGard SPECTRA (Flea, Tick & Worm)")
            .schedule(sample_schedule())
            .build()
            .unwrap();
        assert_eq!(plan.summary(), "Luna - NexGard SPECTRA (Flea, Tick & Worm)");
    }
}
