//! # Run Command
//!
//! This module implements the check, patch and fix modes.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{create_classifier, load_config};
use crate::diff::DiffManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  print_all_files_ok, print_errors, print_fixed_files, print_hint, print_missing_files, print_start_message,
  print_summary,
};
use crate::processor::{Mode, Processor, ProcessorConfig};
use crate::report::{FileReport, ProcessingSummary, write_json};
use crate::rules::ClassifiedFile;
use crate::workspace::{Workspace, resolve_workspace};

/// Arguments for a run
#[derive(Args, Debug)]
pub struct RunArgs {
  /// Only process these files (paths relative to the current directory)
  #[arg(value_name = "FILE")]
  pub files: Vec<PathBuf>,

  /// Check if all files have the copyright notice
  #[arg(long)]
  pub check: bool,

  /// Print a patch that fixes the copyright notices
  #[arg(long)]
  pub patch: bool,

  /// Fix the copyright notices
  #[arg(long)]
  pub fix: bool,

  /// Also write the patch to this file (with --patch)
  #[arg(long, short = 'o', value_name = "FILE", conflicts_with_all = ["check", "fix"])]
  pub output: Option<PathBuf>,

  /// Path to config file (default: .headerfix.toml in workspace root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Walk the current directory instead of asking git for the file list
  #[arg(long)]
  pub no_git: bool,

  /// Number of files processed concurrently (default: number of CPUs)
  #[arg(long, short = 'j', value_name = "N")]
  pub jobs: Option<usize>,

  /// Write a JSON report of the run to this path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except per-file results and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl RunArgs {
  /// The selected mode. Clap guarantees exactly one flag is set.
  pub const fn mode(&self) -> Mode {
    if self.fix {
      Mode::Fix
    } else if self.patch {
      Mode::Patch
    } else {
      Mode::Check
    }
  }
}

/// Keeps the classified files named on the command line, or all of them when
/// none were named.
fn restrict_to(
  files: Vec<ClassifiedFile>,
  only: &[PathBuf],
  workspace: &Workspace,
  current_dir: &std::path::Path,
) -> Vec<ClassifiedFile> {
  if only.is_empty() {
    return files;
  }

  let wanted: HashSet<PathBuf> = only
    .iter()
    .filter_map(|path| {
      let relative = workspace.relativize(path, current_dir);
      if relative.is_none() {
        debug!("Ignoring {}: outside of {}", path.display(), workspace.root().display());
      }
      relative
    })
    .collect();

  let selected: Vec<ClassifiedFile> = files.into_iter().filter(|f| wanted.contains(&f.path)).collect();
  if selected.len() < wanted.len() {
    debug!(
      "{} of the requested files are not candidates for a header",
      wanted.len() - selected.len()
    );
  }
  selected
}

/// Run with the given arguments, returning the process exit code.
pub async fn run(args: RunArgs) -> Result<ExitCode> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let mode = args.mode();
  let workspace = resolve_workspace(args.no_git)?;
  let workspace_root = workspace.root().to_path_buf();
  debug!("Using workspace root: {}", workspace_root.display());
  if !workspace.is_git() {
    info_log!("Not in a git repository, scanning {}", workspace_root.display());
  }

  let config = load_config(args.config.as_deref(), &workspace_root, args.no_config)?;
  let classifier = create_classifier(config.as_ref())?;

  let candidates = workspace.candidate_files()?;
  let classified = classifier.classify_all(&candidates)?;
  let skipped = candidates.len() - classified.len();
  debug!(
    "{} candidate files, {} need a header, {} exempt",
    candidates.len(),
    classified.len(),
    skipped
  );

  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  let files = restrict_to(classified, &args.files, &workspace, &current_dir);

  print_start_message(files.len(), mode);

  let processor = Processor::new(ProcessorConfig {
    concurrency: args.jobs.unwrap_or_else(num_cpus::get),
    ..ProcessorConfig::new(workspace_root.clone(), mode)
  });

  let start_time = Instant::now();
  let reports = processor.process(files).await;
  let summary = ProcessingSummary::from_reports(&reports, skipped, start_time.elapsed());

  match mode {
    Mode::Check => print_missing_files(&reports),
    Mode::Patch => emit_patches(&reports, args.output)?,
    Mode::Fix => print_fixed_files(&reports),
  }
  print_errors(&reports);

  if summary.deficient == 0 && summary.errors == 0 {
    print_all_files_ok();
  }
  print_summary(&summary, mode);

  if mode == Mode::Check && summary.deficient > 0 {
    print_hint("Run with --fix to install the header, or --patch to review the changes first.");
  }

  if let Some(ref output_path) = args.report_json {
    write_json(output_path, mode, &reports, &summary)?;
    info_log!("Generated JSON report at {}", output_path.display());
  }

  let failed = summary.errors > 0 || (mode == Mode::Check && summary.deficient > 0);
  Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn emit_patches(reports: &[FileReport], output: Option<PathBuf>) -> Result<()> {
  let diff_manager = DiffManager::new(output);
  diff_manager.init()?;

  for patch in reports.iter().filter_map(|r| r.patch.as_deref()) {
    diff_manager.emit(patch)?;
  }

  Ok(())
}
