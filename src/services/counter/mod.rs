//! Named sequence counters.
//!
//! Human-readable artifact identifiers need a monotonically increasing
//! sequence number owned outside the scheduler. The counter is exposed as an
//! increment-and-fetch interface so alternative backends can be swapped in;
//! [`FileCounter`] persists its state on every increment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[cfg(test)]
use mockall::automock;

/// Increment-and-fetch counter keyed by name. The first call for a name
/// returns 1.
#[cfg_attr(test, automock)]
pub trait SequenceCounter {
    fn next(&self, name: &str) -> Result<u64>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CounterState {
    counters: HashMap<String, u64>,
}

/// Counter persisted as a JSON document; every increment is written through
/// before the new value is returned.
pub struct FileCounter {
    path: PathBuf,
    state: Mutex<CounterState>,
}

impl FileCounter {
    /// Open a counter file, creating fresh state when the file is missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let content = fs::read_to_string(&path)
                .context(format!("Failed to read counter file: {:?}", path))?;
            serde_json::from_str(&content)
                .context(format!("Corrupt counter file: {:?}", path))?
        } else {
            CounterState::default()
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    fn persist(&self, state: &CounterState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .context(format!("Failed to create counter directory: {:?}", parent))?;
            }
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)
            .context(format!("Failed to write counter file: {:?}", self.path))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SequenceCounter for FileCounter {
    fn next(&self, name: &str) -> Result<u64> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("Counter state poisoned"))?;
        let value = state.counters.entry(name.to_string()).or_insert(0);
        *value += 1;
        let next = *value;
        self.persist(&state)?;
        Ok(next)
    }
}

/// Volatile counter for tests and previews.
#[derive(Debug, Default)]
pub struct InMemoryCounter {
    state: Mutex<HashMap<String, u64>>,
}

impl InMemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SequenceCounter for InMemoryCounter {
    fn next(&self, name: &str) -> Result<u64> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow::anyhow!("Counter state poisoned"))?;
        let value = state.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}
