// Service module exports

pub mod counter;
pub mod icalendar;
pub mod publish;
pub mod schedule;
pub mod settings;
