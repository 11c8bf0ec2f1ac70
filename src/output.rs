//! # Output Module
//!
//! This module centralizes all user-facing output for headerfix.
//!
//! Per-file lines (`Copyright missing: PATH`) are printed even in quiet mode
//! so scripts can consume them; headers, summaries and hints are not.

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::processor::Mode;
use crate::report::{FileReport, FileStatus, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print the initial "Checking N files..." message.
pub fn print_start_message(file_count: usize, mode: Mode) {
  if is_quiet() {
    return;
  }

  let verb = match mode {
    Mode::Check => "Checking",
    Mode::Patch => "Diffing",
    Mode::Fix => "Fixing",
  };
  let files_word = if file_count == 1 { "file" } else { "files" };

  eprintln!("{} {} {}...", verb, file_count, files_word);
}

/// Print one line per file whose header is missing or wrong.
pub fn print_missing_files(files: &[FileReport]) {
  for file in files.iter().filter(|f| f.status == FileStatus::Missing) {
    println!(
      "{} {}",
      "Copyright missing:".if_supports_color(Stream::Stdout, |s| s.red()),
      file.path.display()
    );
  }
}

/// Print one line per rewritten file.
pub fn print_fixed_files(files: &[FileReport]) {
  if is_quiet() {
    return;
  }

  for file in files.iter().filter(|f| f.status == FileStatus::Fixed) {
    println!(
      "{} Fixed header in: {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      file.path.display()
    );
  }
}

/// Print per-file errors to stderr.
pub fn print_errors(files: &[FileReport]) {
  for file in files.iter().filter(|f| f.status == FileStatus::Error) {
    eprintln!(
      "{} {}: {}",
      symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
      file.path.display(),
      file.error.as_deref().unwrap_or("unknown error")
    );
  }
}

/// Print the processing summary to stderr.
///
/// Format: "Summary: X OK, Y missing, Z skipped"; in verbose mode timing is
/// appended.
pub fn print_summary(summary: &ProcessingSummary, mode: Mode) {
  if is_quiet() {
    return;
  }

  let ok_str = summary.ok.if_supports_color(Stream::Stderr, |s| s.cyan()).to_string();
  let deficient_word = if mode == Mode::Fix { "fixed" } else { "missing" };
  let deficient_str = if summary.deficient > 0 && mode != Mode::Fix {
    summary
      .deficient
      .if_supports_color(Stream::Stderr, |s| s.red())
      .to_string()
  } else {
    summary
      .deficient
      .if_supports_color(Stream::Stderr, |s| s.cyan())
      .to_string()
  };
  let skipped_str = summary.skipped.if_supports_color(Stream::Stderr, |s| s.dimmed()).to_string();

  let mut summary_line = format!(
    "Summary: {} OK, {} {}, {} skipped",
    ok_str, deficient_str, deficient_word, skipped_str
  );

  if summary.errors > 0 {
    summary_line.push_str(&format!(
      ", {} {}",
      summary.errors.if_supports_color(Stream::Stderr, |s| s.red()),
      if summary.errors == 1 { "error" } else { "errors" }
    ));
  }

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  eprintln!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  eprintln!("{}", message.if_supports_color(Stream::Stderr, |s| s.yellow()));
}

/// Print the success message when every header is in place.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  eprintln!(
    "{} All files have the copyright header.",
    symbols::SUCCESS.if_supports_color(Stream::Stderr, |s| s.green())
  );
}
