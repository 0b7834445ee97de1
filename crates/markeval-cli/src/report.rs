//! Report serialization: JSON, CSV and Markdown renderings of an
//! evaluation result.

use anyhow::{Context, Result};
use clap::ValueEnum;
use markeval_core::EvaluationResult;
use serde::Serialize;

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Pretty-printed JSON object
    Json,
    /// Single-record CSV with header row
    Csv,
    /// Two-column Markdown table
    Md,
}

impl ReportFormat {
    /// Format matching a file extension, if any.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "md" => Some(Self::Md),
            _ => None,
        }
    }
}

/// Aggregate counts in the fixed report field order.
#[derive(Debug, Serialize)]
struct ReportRow {
    gt_total: usize,
    eval_total: usize,
    correct: usize,
    misplaced: usize,
    missed: usize,
}

impl From<&EvaluationResult> for ReportRow {
    fn from(result: &EvaluationResult) -> Self {
        Self {
            gt_total: result.gt_total,
            eval_total: result.eval_total,
            correct: result.correct,
            misplaced: result.misplaced,
            missed: result.missed,
        }
    }
}

/// Render the aggregate result in the requested format.
pub fn format_report(result: &EvaluationResult, format: ReportFormat) -> Result<String> {
    let row = ReportRow::from(result);
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&row).context("serializing JSON report")
        }
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.serialize(&row).context("serializing CSV report")?;
            let bytes = writer.into_inner().context("flushing CSV report")?;
            String::from_utf8(bytes).context("CSV report is not valid UTF-8")
        }
        ReportFormat::Md => {
            let mut lines = vec!["| field | value |".to_string(), "|---|---|".to_string()];
            for (field, value) in [
                ("gt_total", row.gt_total),
                ("eval_total", row.eval_total),
                ("correct", row.correct),
                ("misplaced", row.misplaced),
                ("missed", row.missed),
            ] {
                lines.push(format!("| {field} | {value} |"));
            }
            Ok(lines.join("\n") + "\n")
        }
    }
}
