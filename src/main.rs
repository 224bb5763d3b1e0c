// Pet Reminder
// Publishes a reminder plan from a TOML request file into local artifacts

mod models;
mod services;
mod utils;

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

use models::reminder::ReminderPlan;
use models::settings::AppSettings;
use services::counter::FileCounter;
use services::publish::{FilesystemStore, LogNotifier, ReminderPublisher};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let request_path = args
        .next()
        .map(PathBuf::from)
        .context("Usage: pet-reminder <request.toml> [output-dir] [recipient]")?;
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| "out".into());
    let recipient = args.next();

    let settings = match services::settings::default_path() {
        Some(path) => services::settings::load(&path)?,
        None => AppSettings::default(),
    };

    let content = fs::read_to_string(&request_path)
        .context(format!("Failed to read request file: {:?}", request_path))?;
    let plan: ReminderPlan =
        toml::from_str(&content).context(format!("Invalid request file: {:?}", request_path))?;

    let store = FilesystemStore::new(&output_dir, settings.landing_base_url.clone());
    let counter = FileCounter::open(output_dir.join("counters.json"))?;
    let notifier = LogNotifier;
    let publisher =
        ReminderPublisher::new(&store, &counter, &settings).with_notifier(&notifier);

    let published = publisher.publish(&plan, Local::now(), recipient.as_deref())?;

    log::info!("Published reminder {}", published.identifier);
    println!("Reminder:  {}", plan.summary());
    println!(
        "Schedule:  {} occurrences ({})",
        published.occurrences.count, published.occurrences.duration_label
    );
    println!("Calendar:  {}", published.calendar_url);
    println!("Landing:   {}", published.landing_url);
    Ok(())
}
