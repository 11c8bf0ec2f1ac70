//! # File I/O Module
//!
//! Reading files as line sequences and writing them back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Splits text into lines, each keeping its `\n` terminator. The last line
/// lacks one when the text does not end with a newline.
pub fn split_lines(text: &str) -> Vec<String> {
  text.split_inclusive('\n').map(str::to_string).collect()
}

/// A file's path and its raw lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
  pub path: PathBuf,
  pub lines: Vec<String>,
}

impl SourceFile {
  pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
    Self {
      path: path.into(),
      lines: split_lines(text),
    }
  }

  /// Reads `path` as UTF-8 text.
  pub async fn read(path: &Path) -> Result<Self> {
    let text = tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(Self::from_text(path, &text))
  }

  /// Concatenates the lines back into the file content.
  pub fn text(&self) -> String {
    self.lines.concat()
  }
}

/// Replaces the content of `path`.
pub async fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
  tokio::fs::write(path, lines.concat())
    .await
    .with_context(|| format!("Failed to write file: {}", path.display()))
}
