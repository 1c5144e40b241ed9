//! Output formatting for CLI display.

use std::path::Path;

use jiff::Timestamp;
use serde::Serialize;

use crate::analysis::{AnalysisError, AnalysisSummary};
use crate::mission::MissionReport;
use crate::model::{Planet, ProbeStatus, TaskSelection};

/// Render a summary the way it is shown after a mission.
pub(super) fn format_summary(summary: &AnalysisSummary) -> String {
    let rows = [
        ("Average Temperature", summary.temperature.average),
        ("Average Radiation", summary.radiation.average),
        ("Average Magnetic Field", summary.magnetic_field.average),
        ("Max Temperature", summary.temperature.max),
        ("Max Radiation", summary.radiation.max),
        ("Max Magnetic Field", summary.magnetic_field.max),
        ("Min Temperature", summary.temperature.min),
        ("Min Radiation", summary.radiation.min),
        ("Min Magnetic Field", summary.magnetic_field.min),
    ];
    let mut out = String::from("Data Analysis Results:");
    for (label, value) in rows {
        out.push_str(&format!("\n{label}: {value:.2}"));
    }
    out
}

/// One-line message for an analysis that produced no statistics.
pub(super) fn describe_analysis_error(err: &AnalysisError) -> String {
    match err {
        AnalysisError::Io(_) => "Failed to open file for analysis!".to_string(),
        AnalysisError::Empty => "No data available for analysis.".to_string(),
        AnalysisError::MalformedMetrics { .. } => format!("Analysis aborted: {err}"),
    }
}

/// Text shown once a mission is over.
pub(super) fn format_mission(report: &MissionReport) -> String {
    let mut lines = Vec::new();
    if report.flight.terminated_early {
        lines.push("Space probe malfunctioned! Mission terminated.".to_string());
    }
    lines.push(match &report.analysis {
        Ok(summary) => format_summary(summary),
        Err(e) => describe_analysis_error(e),
    });
    lines.push(format!(
        "Travel completed and data saved to {}.",
        report.log_path.display()
    ));
    lines.join("\n")
}

/// Machine-readable analysis outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalysisJson<'a> {
    log: &'a Path,
    analyzed_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a AnalysisSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> AnalysisJson<'a> {
    pub(super) fn new(
        log: &'a Path,
        analysis: &'a Result<AnalysisSummary, AnalysisError>,
    ) -> Self {
        let (summary, error) = match analysis {
            Ok(summary) => (Some(summary), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            log,
            analyzed_at: Timestamp::now(),
            summary,
            error,
        }
    }
}

/// Machine-readable mission outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MissionJson<'a> {
    task: TaskSelection,
    visited: &'a [Planet],
    status: ProbeStatus,
    terminated_early: bool,
    analysis: AnalysisJson<'a>,
}

impl<'a> MissionJson<'a> {
    pub(super) fn new(report: &'a MissionReport) -> Self {
        Self {
            task: report.flight.task,
            visited: &report.flight.visited,
            status: report.flight.status,
            terminated_early: report.flight.terminated_early,
            analysis: AnalysisJson::new(&report.log_path, &report.analysis),
        }
    }
}
