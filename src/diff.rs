//! # Diff Module
//!
//! This module renders the changes a header rewrite would make as a unified
//! diff, the format `git apply` and `patch -p1` understand.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::TextDiff;

/// Lines of unchanged context around each hunk.
const CONTEXT_LINES: usize = 3;

/// Renders the patch for one file.
///
/// The output starts with a `diff a/PATH b/PATH` line followed by the unified
/// diff proper. Returns an empty string when `old` and `new` are equal.
pub fn render_patch(path: &Path, old: &str, new: &str) -> String {
  if old == new {
    return String::new();
  }

  let display = path.display();
  let from = format!("a/{display}");
  let to = format!("b/{display}");

  let diff = TextDiff::from_lines(old, new);
  let body = diff
    .unified_diff()
    .context_radius(CONTEXT_LINES)
    .missing_newline_hint(true)
    .header(&from, &to)
    .to_string();

  format!("diff {from} {to}\n{body}")
}

/// Colors a rendered patch line by line for terminal display.
fn colorize(patch: &str) -> String {
  let mut out = String::with_capacity(patch.len());
  for line in patch.split_inclusive('\n') {
    let (text, newline) = match line.strip_suffix('\n') {
      Some(text) => (text, "\n"),
      None => (line, ""),
    };
    let styled = if text.starts_with("diff ") || text.starts_with("---") || text.starts_with("+++") {
      text.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
    } else if text.starts_with("@@") {
      text.if_supports_color(Stream::Stdout, |t| t.cyan()).to_string()
    } else if text.starts_with('+') {
      text.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    } else if text.starts_with('-') {
      text.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
    } else {
      text.to_string()
    };
    out.push_str(&styled);
    out.push_str(newline);
  }
  out
}

/// Manages where rendered patches go.
///
/// Patches are always printed to stdout; with a save path they are also
/// appended to that file, giving a single patch for the whole run.
pub struct DiffManager {
  /// Path the combined patch is written to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(save_diff_path: Option<PathBuf>) -> Self {
    Self { save_diff_path }
  }

  /// Truncates the save file so a run starts from an empty patch.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Prints a rendered patch and appends it to the save file, if any.
  pub fn emit(&self, patch: &str) -> Result<()> {
    if patch.is_empty() {
      return Ok(());
    }

    println!();
    print!("{}", colorize(patch));

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(patch.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_patch_unchanged() {
    assert_eq!(render_patch(Path::new("a.rs"), "x\n", "x\n"), "");
  }

  #[test]
  fn test_render_patch_insertion() {
    let patch = render_patch(Path::new("src/lib.rs"), "fn a() {}\n", "// hi\n\nfn a() {}\n");

    assert!(patch.starts_with("diff a/src/lib.rs b/src/lib.rs\n--- a/src/lib.rs\n+++ b/src/lib.rs\n"));
    assert!(patch.contains("@@ -1"));
    assert!(patch.contains("+// hi\n"));
    assert!(patch.contains("\n+\n"));
    assert!(patch.contains(" fn a() {}\n"));
  }

  #[test]
  fn test_render_patch_context_is_limited() {
    let old: String = (0..20).map(|i| format!("line {i}\n")).collect();
    let new = format!("header\n{old}");
    let patch = render_patch(Path::new("f.md"), &old, &new);

    assert!(patch.contains(" line 2\n"));
    assert!(!patch.contains(" line 3\n"));
  }

  #[test]
  fn test_colorize_without_colors_is_identity() {
    owo_colors::set_override(false);
    let patch = render_patch(Path::new("x.py"), "a\n", "b\n");
    assert_eq!(colorize(&patch), patch);
    owo_colors::unset_override();
  }

  #[test]
  fn test_save_diff_appends() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("out.patch");
    let manager = DiffManager::new(Some(path.clone()));
    manager.init().expect("init");

    manager.emit("diff a/x b/x\n").expect("emit");
    manager.emit("diff a/y b/y\n").expect("emit");

    let saved = std::fs::read_to_string(&path).expect("read patch");
    assert_eq!(saved, "diff a/x b/x\ndiff a/y b/y\n");
  }
}
