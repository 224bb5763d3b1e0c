// Schedule module
// Dosing schedule request and its validation rules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How often a medication reminder repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    /// Every N days, with N carried in `ScheduleRequest::interval_days`.
    CustomDays,
}

/// Validation failures for a [`ScheduleRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("custom-days frequency requires a positive interval in days")]
    InvalidFrequencyConfiguration,
    #[error("occurrence cap must be at least 1")]
    InvalidOccurrenceCap,
    #[error("end date and occurrence cap are mutually exclusive")]
    ConflictingBounds,
}

/// A dosing schedule as submitted from the form.
///
/// The series length is bounded by `end_date` or by `occurrence_cap`, never
/// both. When neither is present the series is unbounded and the publisher
/// applies a configured default cap before encoding, since generated
/// recurrence rules always carry an explicit COUNT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
    /// Stride in days; required and positive iff `frequency` is `CustomDays`.
    pub interval_days: Option<u32>,
    pub occurrence_cap: Option<u32>,
}

impl ScheduleRequest {
    /// Create a request with a concrete date range.
    pub fn with_end_date(
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
        interval_days: Option<u32>,
    ) -> Result<Self, ScheduleError> {
        let request = Self {
            start_date,
            end_date: Some(end_date),
            frequency,
            interval_days,
            occurrence_cap: None,
        };
        request.validate()?;
        Ok(request)
    }

    /// Create a request that stops after a fixed number of occurrences.
    pub fn with_occurrence_cap(
        start_date: NaiveDate,
        occurrence_cap: u32,
        frequency: Frequency,
        interval_days: Option<u32>,
    ) -> Result<Self, ScheduleError> {
        let request = Self {
            start_date,
            end_date: None,
            frequency,
            interval_days,
            occurrence_cap: Some(occurrence_cap),
        };
        request.validate()?;
        Ok(request)
    }

    /// Create an unbounded request; the caller supplies a default cap later.
    pub fn open_ended(
        start_date: NaiveDate,
        frequency: Frequency,
        interval_days: Option<u32>,
    ) -> Result<Self, ScheduleError> {
        let request = Self {
            start_date,
            end_date: None,
            frequency,
            interval_days,
            occurrence_cap: None,
        };
        request.validate()?;
        Ok(request)
    }

    /// Validate the request.
    ///
    /// An inverted date range, a zero occurrence cap and a custom frequency
    /// without a positive interval are rejected here, before any scheduling
    /// arithmetic runs.
    /// A stale `interval_days` left over from a previous frequency choice is
    /// ignored for non-custom frequencies, matching the form behavior.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ScheduleError::InvalidRange {
                    start: self.start_date,
                    end,
                });
            }
            if self.occurrence_cap.is_some() {
                return Err(ScheduleError::ConflictingBounds);
            }
        }

        if self.occurrence_cap == Some(0) {
            return Err(ScheduleError::InvalidOccurrenceCap);
        }

        if self.frequency == Frequency::CustomDays && !matches!(self.interval_days, Some(n) if n > 0)
        {
            return Err(ScheduleError::InvalidFrequencyConfiguration);
        }

        Ok(())
    }

    /// True when the series length is determined by the request itself.
    pub fn is_bounded(&self) -> bool {
        self.end_date.is_some() || self.occurrence_cap.is_some()
    }
}

/// Derived occurrence summary shown to the user and fed to the calendar
/// encoder. Recomputed on every request change, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceResult {
    pub count: u32,
    pub duration_label: String,
}
