//! The mission log: an append-only text record of a mission's events.
//!
//! Each event is written as a block of lines closed by a separator:
//!
//! ```text
//! Travelling to Mars...
//! Arrived at Mars
//! Temperature: -60.00, Radiation: 240.00, Magnetic Field: 0.50
//! Fuel: 95.00, Energy: 90.00, Health: 99.85
//! -------------------------------------------
//! Performing task on Mars...
//! Task: Sample Collection
//! Collected soil samples from Mars.
//! -------------------------------------------
//! ```
//!
//! The metrics line is the only line read back by [`crate::analysis`].

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::model::{Planet, PlanetReading, ProbeStatus, TaskKind, TaskSelection};

/// Prefix of the line carrying a planet's reading.
pub const METRICS_MARKER: &str = "Temperature:";

/// Closes every event block.
pub const SEPARATOR: &str = "-------------------------------------------";

/// Written in place of a task when the selection was out of range.
pub const INVALID_TASK_LINE: &str = "Invalid task selection. No task performed.";

/// Errors that can occur while writing the log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, LogError>;

/// Writes mission events to a sink, one line at a time, never rewinding.
pub struct MissionLog<W: Write> {
    sink: W,
}

impl MissionLog<BufWriter<fs::File>> {
    /// Creates the log file at `path`, replacing any previous mission's log.
    pub fn create(path: &Path) -> Result<Self> {
        let file = fs::File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> MissionLog<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Records arrival at a planet with its reading and the probe's status after the leg.
    pub fn record_travel(
        &mut self,
        planet: Planet,
        reading: &PlanetReading,
        status: &ProbeStatus,
    ) -> Result<()> {
        writeln!(self.sink, "Travelling to {planet}...")?;
        writeln!(self.sink, "Arrived at {planet}")?;
        writeln!(
            self.sink,
            "{METRICS_MARKER} {:.2}, Radiation: {:.2}, Magnetic Field: {:.2}",
            reading.temperature, reading.radiation, reading.magnetic_field
        )?;
        writeln!(
            self.sink,
            "Fuel: {:.2}, Energy: {:.2}, Health: {:.2}",
            status.fuel, status.energy, status.health
        )?;
        writeln!(self.sink, "{SEPARATOR}")?;
        Ok(())
    }

    /// Records the task performed on a planet.
    pub fn record_task(&mut self, planet: Planet, selection: TaskSelection) -> Result<()> {
        writeln!(self.sink, "Performing task on {planet}...")?;
        match selection.task() {
            Some(task) => {
                writeln!(self.sink, "Task: {}", task.title())?;
                writeln!(self.sink, "{}", describe_task(task, planet))?;
            }
            None => writeln!(self.sink, "{INVALID_TASK_LINE}")?,
        }
        writeln!(self.sink, "{SEPARATOR}")?;
        Ok(())
    }

    /// Flushes everything written so far and hands back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

fn describe_task(task: TaskKind, planet: Planet) -> String {
    match task {
        TaskKind::SampleCollection => format!("Collected soil samples from {planet}."),
        TaskKind::PhotographSurface => format!("Photographed the surface of {planet}."),
        TaskKind::AnalyzeAtmosphere => format!("Analyzed the atmosphere of {planet}."),
        TaskKind::RepairProbe => format!("Repairing space probe on {planet}."),
    }
}
