//! # Processor Module
//!
//! This module drives the header check over a set of classified files.
//!
//! The module is organized into:
//! - [`file_io`] - Reading files as lines and writing them back
//!
//! For each file the [`Processor`] reads the lines, runs
//! [`header::rewrite`](crate::header::rewrite) and compares the result with the
//! original. What happens to a file whose header differs depends on the
//! [`Mode`]: it is reported, turned into a patch, or rewritten in place.

mod file_io;

use std::path::PathBuf;

use futures::stream::{self, StreamExt};
pub use file_io::{SourceFile, split_lines, write_lines};
use serde::Serialize;
use tracing::{debug, trace};

use crate::diff::render_patch;
use crate::header::{locate, rewrite};
use crate::report::{FileReport, FileStatus, HeaderSpan};
use crate::rules::ClassifiedFile;

/// What to do with files whose header is missing or wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Report the file
  Check,
  /// Produce a unified diff, leaving the file untouched
  Patch,
  /// Rewrite the file in place
  Fix,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// Root the classified paths are relative to
  pub workspace_root: PathBuf,
  pub mode: Mode,
  /// Maximum number of files handled at once
  pub concurrency: usize,
}

impl ProcessorConfig {
  /// Creates a config with one concurrent file per CPU.
  ///
  /// ```ignore
  /// ProcessorConfig {
  ///     concurrency: 1,
  ///     ..ProcessorConfig::new(workspace_root, Mode::Check)
  /// }
  /// ```
  pub fn new(workspace_root: PathBuf, mode: Mode) -> Self {
    Self {
      workspace_root,
      mode,
      concurrency: num_cpus::get(),
    }
  }
}

/// Processor for checking and repairing headers.
///
/// Files are independent of each other, so they are processed concurrently.
/// Results come back sorted by path.
pub struct Processor {
  workspace_root: PathBuf,
  mode: Mode,
  concurrency: usize,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      workspace_root: config.workspace_root,
      mode: config.mode,
      concurrency: config.concurrency.max(1),
    }
  }

  /// Processes every file, returning one report per file.
  ///
  /// A failure on one file is recorded in its report and does not stop the
  /// others.
  pub async fn process(&self, files: Vec<ClassifiedFile>) -> Vec<FileReport> {
    debug!("Processing {} files, {} at a time", files.len(), self.concurrency);

    let mut reports: Vec<FileReport> = stream::iter(files)
      .map(|file| async move {
        match self.process_file(&file).await {
          Ok(report) => report,
          Err(e) => {
            debug!("Error processing {}: {:#}", file.path.display(), e);
            FileReport::failed(file.path.clone(), file.style.prefix(), &e)
          }
        }
      })
      .buffer_unordered(self.concurrency)
      .collect()
      .await;

    reports.sort_by(|a, b| a.path.cmp(&b.path));
    reports
  }

  /// Processes a single file.
  pub async fn process_file(&self, file: &ClassifiedFile) -> anyhow::Result<FileReport> {
    let full_path = self.workspace_root.join(&file.path);
    let source = SourceFile::read(&full_path).await?;
    let prefix = file.style.prefix();

    let header = locate(prefix, &source.lines).map(HeaderSpan::from);
    let new_lines = rewrite(prefix, &source.lines);

    let mut report = FileReport {
      path: file.path.clone(),
      prefix: prefix.to_string(),
      status: FileStatus::Ok,
      header,
      error: None,
      patch: None,
    };

    if new_lines == source.lines {
      trace!("OK: {}", file.path.display());
      return Ok(report);
    }

    match self.mode {
      Mode::Check => {
        debug!("Header missing or incorrect: {}", file.path.display());
        report.status = FileStatus::Missing;
      }
      Mode::Patch => {
        report.patch = Some(render_patch(&file.path, &source.text(), &new_lines.concat()));
        report.status = FileStatus::Patched;
      }
      Mode::Fix => {
        write_lines(&full_path, &new_lines).await?;
        debug!("Rewrote header in: {}", file.path.display());
        report.status = FileStatus::Fixed;
      }
    }

    Ok(report)
  }
}
