//! Reminder publishing flow.
//!
//! One configurable pipeline carries a submission end to end: validate the
//! plan, compute the occurrence schedule, render the calendar
//! file and landing page, and hand every artifact to injected capabilities
//! for storage, QR encoding and notification. Each capability is a trait so
//! the flow can run against fakes in tests; QR symbol encoding, object
//! storage transports and mail delivery live behind these seams, not here.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

use crate::models::reminder::ReminderPlan;
use crate::models::schedule::OccurrenceResult;
use crate::models::settings::AppSettings;
use crate::services::counter::SequenceCounter;
use crate::services::icalendar::ICalendarService;
use crate::services::schedule;

mod landing;

#[cfg(test)]
use mockall::automock;

/// Content-addressed artifact storage. Returns the public URL (or local
/// path) of the stored object.
#[cfg_attr(test, automock)]
pub trait ArtifactStore {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String>;
}

/// Encodes a payload string into a QR symbol as PNG bytes.
#[cfg_attr(test, automock)]
pub trait QrEncoder {
    fn encode(&self, payload: &str) -> Result<Vec<u8>>;
}

/// Delivers a published reminder to a recipient (mail, chat, anything).
#[cfg_attr(test, automock)]
pub trait Notifier {
    fn notify(&self, recipient: &str, published: &PublishedReminder) -> Result<()>;
}

/// Everything produced for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedReminder {
    /// Human-readable identifier, e.g. `luna-nexgard-0007`.
    pub identifier: String,
    pub occurrences: OccurrenceResult,
    pub calendar_url: String,
    pub landing_url: String,
    /// Absent when the publisher was built without a QR encoder.
    pub qr_url: Option<String>,
}

/// Stores artifacts under a local directory; URLs are joined against the
/// configured base when present, otherwise the filesystem path is returned.
pub struct FilesystemStore {
    root: PathBuf,
    base_url: Option<String>,
}

impl FilesystemStore {
    pub fn new(root: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            base_url,
        }
    }
}

impl ArtifactStore for FilesystemStore {
    fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<String> {
        // Keys are single path components; anything else could escape the root
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            anyhow::bail!("Invalid artifact key: {:?}", key);
        }

        fs::create_dir_all(&self.root)
            .context(format!("Failed to create artifact directory: {:?}", self.root))?;
        let path = self.root.join(key);
        fs::write(&path, bytes).context(format!("Failed to write artifact: {:?}", path))?;

        match &self.base_url {
            Some(base) => Ok(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                urlencoding::encode(key)
            )),
            None => Ok(path.display().to_string()),
        }
    }
}

/// Notifier that only logs; stands in until a real delivery channel is wired.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, recipient: &str, published: &PublishedReminder) -> Result<()> {
        log::info!(
            "Reminder {} ready for {}: {}",
            published.identifier,
            recipient,
            published.landing_url
        );
        Ok(())
    }
}

/// The publishing pipeline with its injected capabilities.
pub struct ReminderPublisher<'a> {
    store: &'a dyn ArtifactStore,
    counter: &'a dyn SequenceCounter,
    qr: Option<&'a dyn QrEncoder>,
    notifier: Option<&'a dyn Notifier>,
    settings: &'a AppSettings,
}

impl<'a> ReminderPublisher<'a> {
    pub fn new(
        store: &'a dyn ArtifactStore,
        counter: &'a dyn SequenceCounter,
        settings: &'a AppSettings,
    ) -> Self {
        Self {
            store,
            counter,
            qr: None,
            notifier: None,
            settings,
        }
    }

    pub fn with_qr_encoder(mut self, qr: &'a dyn QrEncoder) -> Self {
        self.qr = Some(qr);
        self
    }

    pub fn with_notifier(mut self, notifier: &'a dyn Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run the full flow for one submission.
    pub fn publish(
        &self,
        plan: &ReminderPlan,
        now: DateTime<Local>,
        recipient: Option<&str>,
    ) -> Result<PublishedReminder> {
        plan.validate().context("Invalid reminder plan")?;

        let occurrences = schedule::schedule(&plan.schedule, self.settings.default_occurrence_cap);
        log::info!(
            "Scheduling {}: {} occurrences ({})",
            plan.summary(),
            occurrences.count,
            occurrences.duration_label
        );

        let ics = ICalendarService::from_settings(self.settings)
            .export_reminder(plan, occurrences.count, now)?;

        let sequence = self.counter.next("reminder")?;
        let identifier = format!(
            "{}-{}-{:04}",
            slug(&plan.pet_name),
            slug(&plan.product_name),
            sequence
        );

        let calendar_url = self
            .store
            .put(&format!("{}.ics", identifier), ics.as_bytes(), "text/calendar")
            .context("Failed to store calendar file")?;

        let html = landing::render(plan, &occurrences, &calendar_url);
        let landing_url = self
            .store
            .put(&format!("{}.html", identifier), html.as_bytes(), "text/html")
            .context("Failed to store landing page")?;

        let qr_url = match self.qr {
            Some(encoder) => {
                let payload = self.qr_payload(&landing_url, &ics);
                let png = encoder.encode(&payload).context("Failed to encode QR")?;
                Some(
                    self.store
                        .put(&format!("{}.png", identifier), &png, "image/png")
                        .context("Failed to store QR image")?,
                )
            }
            None => None,
        };

        let published = PublishedReminder {
            identifier,
            occurrences,
            calendar_url,
            landing_url,
            qr_url,
        };

        if let (Some(notifier), Some(recipient)) = (self.notifier, recipient) {
            notifier
                .notify(recipient, &published)
                .context("Failed to send notification")?;
        }

        log::info!("Published reminder {}", published.identifier);
        Ok(published)
    }

    /// QR payload: the hosted landing page when a public base URL exists,
    /// else the calendar embedded as a data URL so the code works offline.
    fn qr_payload(&self, landing_url: &str, ics: &str) -> String {
        if self.settings.landing_base_url.is_some() {
            landing_url.to_string()
        } else {
            format!("data:text/calendar;base64,{}", BASE64.encode(ics.as_bytes()))
        }
    }
}

/// Lowercase alphanumeric slug; everything else collapses to single dashes.
fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut dash_pending = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if dash_pending && !out.is_empty() {
                out.push('-');
            }
            dash_pending = false;
            out.push(c.to_ascii_lowercase());
        } else {
            dash_pending = true;
        }
    }
    if out.is_empty() {
        out.push_str("reminder");
    }
    out
}
