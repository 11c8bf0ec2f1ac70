#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use headerfix::header::header_block;

/// Checks if git is available on the system.
pub fn is_git_available() -> bool {
  Command::new("git").arg("--version").status().is_ok()
}

/// Runs a git command in the given directory, returning an error with stderr on
/// failure.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .output()
    .with_context(|| format!("Failed to execute git {:?}", args))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Initializes a git repository in the given directory with deterministic
/// settings.
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init", "--initial-branch=main"])?;
  run_git(dir, &["config", "user.name", "Test User"])?;
  run_git(dir, &["config", "user.email", "test@example.com"])?;
  run_git(dir, &["config", "commit.gpgsign", "false"])?;
  Ok(())
}

/// Stages everything and creates a commit.
pub fn git_commit_all(dir: &Path, message: &str) -> Result<()> {
  run_git(dir, &["add", "-A"])?;
  run_git(dir, &["commit", "-m", message])
}

/// Writes `content` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> Result<()> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Reads `dir/relative` as a string.
pub fn read_file(dir: &Path, relative: &str) -> Result<String> {
  let path = dir.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// The header block for `prefix` as a single string, trailing blank line
/// included.
pub fn header_text(prefix: &str) -> String {
  header_block(prefix).concat()
}
