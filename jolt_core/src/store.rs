//! Append-only event store.
//!
//! Events are appended to a JSONL (JSON Lines) file with file locking
//! to ensure safe concurrent access. The store only moves events in and out;
//! it does no aggregation.

use crate::{ConsumptionEvent, EventLog, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// File name of the event log inside the data directory
pub const EVENTS_FILE: &str = "events.jsonl";

/// Event sink trait for persisting consumption events
pub trait EventSink {
    fn append(&mut self, event: &ConsumptionEvent) -> Result<()>;
}

/// JSONL-based event sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl EventSink for JsonlSink {
    fn append(&mut self, event: &ConsumptionEvent) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(event)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!(
            "Appended {} at {} to {:?}",
            event.substance_name,
            event.timestamp,
            self.path
        );
        Ok(())
    }
}

/// Read every event from a JSONL file into a log snapshot
///
/// A missing file is an empty log. Lines that fail to parse are skipped with
/// a warning; a later line with an already-seen timestamp replaces the earlier one.
pub fn read_events(path: &Path) -> Result<EventLog> {
    if !path.exists() {
        return Ok(EventLog::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut log = EventLog::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ConsumptionEvent>(&line) {
            Ok(event) => {
                if let Some(previous) = log.insert(event) {
                    tracing::warn!(
                        "Event at line {} replaces earlier event with timestamp {}",
                        line_num + 1,
                        previous.timestamp
                    );
                }
            }
            Err(e) => {
                tracing::warn!("Failed to parse event at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} events from {:?}", log.len(), path);
    Ok(log)
}
