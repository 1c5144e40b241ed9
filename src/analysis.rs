//! Log analysis: re-reads a mission log and summarizes its telemetry.
//!
//! Only metrics lines (those beginning with [`METRICS_MARKER`]) are read;
//! everything else in the log is skipped. A line that carries the marker
//! but not the full metrics pattern is an error rather than a silent zero.

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::logbook::METRICS_MARKER;
use crate::model::PlanetReading;

/// Longest line the analyzer inspects, in bytes. Anything past it is dropped.
pub const MAX_LINE_LEN: usize = 255;

static METRICS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    const NUM: &str = r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?";
    Regex::new(&format!(
        r"^Temperature:\s*({NUM}),\s*Radiation:\s*({NUM}),\s*Magnetic Field:\s*({NUM})\s*$"
    ))
    .unwrap()
});

/// Errors that can occur during analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no data available for analysis")]
    Empty,

    #[error("malformed telemetry on line {line}: {content:?}")]
    MalformedMetrics { line: usize, content: String },
}

pub type Result<T> = core::result::Result<T, AnalysisError>;

/// Average, minimum, and maximum of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregate statistics over every telemetry line of a log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub count: u64,
    pub temperature: MetricStats,
    pub radiation: MetricStats,
    pub magnetic_field: MetricStats,
}

/// Running sum and extremes of one metric, seeded by its first sample.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    fn new(first: f64) -> Self {
        Self {
            sum: first,
            min: first,
            max: first,
        }
    }

    fn add(&mut self, value: f64) {
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    #[allow(clippy::cast_precision_loss)]
    fn stats(self, count: u64) -> MetricStats {
        MetricStats {
            average: self.sum / count as f64,
            min: self.min,
            max: self.max,
        }
    }
}

/// Running statistics over the samples seen so far. Never empty.
#[derive(Debug, Clone, Copy)]
struct Tally {
    count: u64,
    temperature: Accumulator,
    radiation: Accumulator,
    magnetic_field: Accumulator,
}

impl Tally {
    fn new(first: &PlanetReading) -> Self {
        Self {
            count: 1,
            temperature: Accumulator::new(first.temperature),
            radiation: Accumulator::new(first.radiation),
            magnetic_field: Accumulator::new(first.magnetic_field),
        }
    }

    fn add(&mut self, sample: &PlanetReading) {
        self.count += 1;
        self.temperature.add(sample.temperature);
        self.radiation.add(sample.radiation);
        self.magnetic_field.add(sample.magnetic_field);
    }

    /// Folds `sample` into an optional tally, starting one if needed.
    fn record(tally: &mut Option<Self>, sample: &PlanetReading) {
        if let Some(t) = tally.as_mut() {
            t.add(sample);
        } else {
            *tally = Some(Self::new(sample));
        }
    }

    fn summary(self) -> AnalysisSummary {
        AnalysisSummary {
            count: self.count,
            temperature: self.temperature.stats(self.count),
            radiation: self.radiation.stats(self.count),
            magnetic_field: self.magnetic_field.stats(self.count),
        }
    }
}

/// Analyzes the log file at `path`.
pub fn analyze_file(path: &Path) -> Result<AnalysisSummary> {
    let file = fs::File::open(path)?;
    analyze_reader(BufReader::new(file))
}

/// Analyzes a log read from `reader` in a single pass.
pub fn analyze_reader(reader: impl BufRead) -> Result<AnalysisSummary> {
    let mut tally = None;
    for sample in Samples::new(reader) {
        Tally::record(&mut tally, &sample?);
    }
    let summary = tally.map(Tally::summary).ok_or(AnalysisError::Empty)?;
    debug!(count = summary.count, "analyzed telemetry");
    Ok(summary)
}

/// The telemetry triples of a log, read one line at a time.
///
/// At most `MAX_LINE_LEN + 1` bytes of any line are held in memory.
pub struct Samples<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> Samples<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(MAX_LINE_LEN + 1),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for Samples<R> {
    type Item = Result<PlanetReading>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match read_line_bounded(&mut self.reader, &mut self.buf) {
                Ok(false) => return None,
                Ok(true) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;

            let decoded = String::from_utf8_lossy(&self.buf);
            let line = truncate_line(decoded.trim_end_matches(['\n', '\r']));
            match parse_metrics_line(line, self.line_number) {
                Ok(None) => {}
                Ok(Some(sample)) => return Some(Ok(sample)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Reads the next line into `buf`, keeping at most `MAX_LINE_LEN + 1` bytes.
///
/// The rest of an overlong line is skipped up to and including its newline.
/// Returns `false` at end of input.
fn read_line_bounded(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    let limit = MAX_LINE_LEN as u64 + 1;
    if reader.by_ref().take(limit).read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() != Some(&b'\n') {
        skip_rest_of_line(reader)?;
    }
    Ok(true)
}

fn skip_rest_of_line(reader: &mut impl BufRead) -> io::Result<()> {
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

/// Parses one log line. Lines without the metrics marker yield `None`.
fn parse_metrics_line(line: &str, line_number: usize) -> Result<Option<PlanetReading>> {
    if !line.starts_with(METRICS_MARKER) {
        return Ok(None);
    }
    let malformed = || AnalysisError::MalformedMetrics {
        line: line_number,
        content: line.to_string(),
    };
    let caps = METRICS_LINE.captures(line).ok_or_else(malformed)?;
    let field = |i: usize| caps[i].parse::<f64>().map_err(|_| malformed());
    Ok(Some(PlanetReading {
        temperature: field(1)?,
        radiation: field(2)?,
        magnetic_field: field(3)?,
    }))
}

/// Cuts `line` to at most [`MAX_LINE_LEN`] bytes without splitting a character.
fn truncate_line(line: &str) -> &str {
    if line.len() <= MAX_LINE_LEN {
        return line;
    }
    let mut end = MAX_LINE_LEN;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
