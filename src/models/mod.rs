// Module exports for models

pub mod reminder;
pub mod schedule;
pub mod settings;
