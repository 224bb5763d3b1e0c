//! RFC 5545 (.ics) export for medication reminders.

mod export;
mod service;
mod utils;

pub use service::ICalendarService;
