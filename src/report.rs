//! # Report Module
//!
//! Per-file results of a run and the JSON report built from them.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::header::HeaderRange;
use crate::processor::Mode;

/// Outcome for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
  /// Header present and correctly placed, nothing to do
  Ok,
  /// Header missing or not canonical (check mode)
  Missing,
  /// A patch was produced (patch mode)
  Patched,
  /// The file was rewritten (fix mode)
  Fixed,
  /// The file could not be read or written
  Error,
}

/// Location of the header found in the original file, 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderSpan {
  pub first_line: usize,
  pub last_line: usize,
}

impl From<HeaderRange> for HeaderSpan {
  fn from(range: HeaderRange) -> Self {
    Self {
      first_line: range.start + 1,
      last_line: range.header_end(),
    }
  }
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  /// Workspace-relative path
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// Comment prefix the header is written with
  pub prefix: String,
  pub status: FileStatus,
  /// Where the header sat before processing, if it was found
  #[serde(skip_serializing_if = "Option::is_none")]
  pub header: Option<HeaderSpan>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  /// Rendered patch, patch mode only
  #[serde(skip)]
  pub patch: Option<String>,
}

impl FileReport {
  pub fn failed(path: PathBuf, prefix: &str, error: &anyhow::Error) -> Self {
    Self {
      path,
      prefix: prefix.to_string(),
      status: FileStatus::Error,
      header: None,
      error: Some(format!("{error:#}")),
      patch: None,
    }
  }

  /// Whether the file needed a change.
  pub const fn is_deficient(&self) -> bool {
    matches!(self.status, FileStatus::Missing | FileStatus::Patched | FileStatus::Fixed)
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingSummary {
  /// Number of files that had to carry a header
  pub total_files: usize,
  pub ok: usize,
  /// Files whose header is missing or wrong, fixed or not
  pub deficient: usize,
  pub fixed: usize,
  pub errors: usize,
  /// Known files exempt from the header requirement
  pub skipped: usize,
  #[serde(skip)]
  pub processing_time: Duration,
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  pub fn from_reports(files: &[FileReport], skipped: usize, processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: files.len(),
      skipped,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      ..Self::default()
    };

    for file in files {
      match file.status {
        FileStatus::Ok => summary.ok += 1,
        FileStatus::Missing | FileStatus::Patched => summary.deficient += 1,
        FileStatus::Fixed => {
          summary.deficient += 1;
          summary.fixed += 1;
        }
        FileStatus::Error => summary.errors += 1,
      }
    }

    summary
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  mode: Mode,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Renders the JSON report.
pub fn render_json(mode: Mode, files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
  let report = JsonReport {
    generated_at: Local::now().to_rfc3339(),
    mode,
    summary,
    files,
  };
  serde_json::to_string_pretty(&report).with_context(|| "Failed to serialize report")
}

/// Writes the JSON report to `output_path`.
pub fn write_json(output_path: &Path, mode: Mode, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let content = render_json(mode, files, summary)?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn report(path: &str, status: FileStatus) -> FileReport {
    FileReport {
      path: PathBuf::from(path),
      prefix: "//".to_string(),
      status,
      header: None,
      error: None,
      patch: None,
    }
  }

  #[test]
  fn test_summary_counts() {
    let files = vec![
      report("a.rs", FileStatus::Ok),
      report("b.rs", FileStatus::Fixed),
      report("c.rs", FileStatus::Missing),
      report("d.rs", FileStatus::Error),
    ];

    let summary = ProcessingSummary::from_reports(&files, 3, Duration::from_millis(5));
    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.deficient, 2);
    assert_eq!(summary.fixed, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.skipped, 3);
  }

  #[test]
  fn test_header_span_from_range() {
    let span = HeaderSpan::from(HeaderRange { start: 1, end: 10 });
    assert_eq!(span, HeaderSpan { first_line: 2, last_line: 8 });
  }

  #[test]
  fn test_render_json() {
    let mut ok = report("src/lib.rs", FileStatus::Ok);
    ok.header = Some(HeaderSpan {
      first_line: 1,
      last_line: 7,
    });
    ok.patch = Some("not serialized".to_string());
    let files = vec![ok, report("README.md", FileStatus::Missing)];
    let summary = ProcessingSummary::from_reports(&files, 0, Duration::ZERO);

    let json = render_json(Mode::Check, &files, &summary).expect("render");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["mode"], "check");
    assert_eq!(value["summary"]["deficient"], 1);
    assert_eq!(value["files"][0]["path"], "src/lib.rs");
    assert_eq!(value["files"][0]["header"]["last_line"], 7);
    assert_eq!(value["files"][1]["status"], "missing");
    assert!(value["files"][0].get("patch").is_none());
    assert!(value["files"][1].get("header").is_none());
    assert!(value["generated_at"].is_string());
  }
}
