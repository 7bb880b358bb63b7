//! Destinations for calculation events.
//!
//! Recording never fails from the caller's point of view: a sink that cannot
//! write logs a warning and drops the event.

use super::event::CalculationEvent;
use chrono::Utc;
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait EventSink {
    fn record(&mut self, event: &CalculationEvent);
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: &CalculationEvent) {
        (**self).record(event)
    }
}

/// Drops every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &CalculationEvent) {}
}

/// Writes events to the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: &CalculationEvent) {
        log::info!(
            "{} {:?} {}",
            event.event.blue(),
            event.calculation_type,
            event.parameters
        );
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<CalculationEvent>,
}

impl EventSink for MemorySink {
    fn record(&mut self, event: &CalculationEvent) {
        self.events.push(event.clone());
    }
}

/// Appends one JSON document per line to a file.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> JsonlSink {
        JsonlSink { path: path.into() }
    }

    /// One file per UTC day inside `dir`, e.g. `calc_events_2024-05-01.jsonl`.
    pub fn daily<P: AsRef<Path>>(dir: P) -> JsonlSink {
        let file = format!("calc_events_{}.jsonl", Utc::now().format("%Y-%m-%d"));
        JsonlSink::new(dir.as_ref().join(file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &CalculationEvent) -> Result<(), Box<dyn std::error::Error>> {
        let line = serde_json::to_string(event)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl EventSink for JsonlSink {
    fn record(&mut self, event: &CalculationEvent) {
        if let Err(e) = self.append(event) {
            log::warn!(
                "{} to write event to {}: {e}",
                "failed".on_red(),
                self.path.display()
            );
        }
    }
}
