#![warn(missing_docs)]
//! Test fixtures and playback trace plumbing for the ino audio crates.

mod fixtures;

use anyhow::Result;
use ino_audio::ServiceSnapshot;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use fixtures::*;

/// One step of a scripted playback run.
#[derive(Debug, Serialize)]
pub struct TraceRecord<'a> {
    /// Zero-based step index.
    pub step: u64,
    /// Human-readable command label.
    pub command: &'a str,
    /// Service state after the command ran.
    pub snapshot: &'a ServiceSnapshot,
}

/// A sink that writes newline-delimited JSON trace records to disk.
pub struct TraceSink {
    file: File,
    next_step: u64,
}

impl TraceSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file, next_step: 0 })
    }

    /// Append the state reached after `command`.
    pub fn record(&mut self, command: &str, snapshot: &ServiceSnapshot) -> Result<()> {
        let record = TraceRecord {
            step: self.next_step,
            command,
            snapshot,
        };
        let line = serde_json::to_string(&record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.next_step += 1;
        Ok(())
    }
}
