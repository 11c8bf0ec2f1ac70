//! # Workspace Module
//!
//! This module defines the workspace root headerfix operates on and how its
//! candidate files are enumerated.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use tracing::debug;

use crate::git;

/// Workspace root selection.
#[derive(Debug)]
pub enum Workspace {
  /// Workspace rooted at a git repository.
  Git { root: PathBuf },
  /// Workspace rooted at a directory.
  Directory { root: PathBuf },
}

impl Workspace {
  pub fn root(&self) -> &Path {
    match self {
      Self::Git { root } | Self::Directory { root } => root.as_path(),
    }
  }

  pub const fn is_git(&self) -> bool {
    matches!(self, Self::Git { .. })
  }

  /// Lists candidate files, relative to the root and sorted.
  pub fn candidate_files(&self) -> Result<Vec<PathBuf>> {
    match self {
      Self::Git { root } => git::list_candidate_files(root),
      Self::Directory { root } => list_directory_files(root),
    }
  }

  /// Maps a user-supplied path to the root-relative form used by
  /// [`candidate_files`](Self::candidate_files).
  pub fn relativize(&self, path: &Path, current_dir: &Path) -> Option<PathBuf> {
    let absolute = if path.is_absolute() {
      path.to_path_buf()
    } else {
      current_dir.join(path)
    };
    let relative = pathdiff::diff_paths(normalize(&absolute), normalize(self.root()))?;
    if relative.starts_with("..") {
      return None;
    }
    Some(relative)
  }
}

/// Canonicalizes when possible so symlinked temp dirs compare equal.
fn normalize(path: &Path) -> PathBuf {
  path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve the workspace from the current directory.
///
/// A surrounding git repository is used unless `no_git` is set; otherwise the
/// current directory is the root.
pub fn resolve_workspace(no_git: bool) -> Result<Workspace> {
  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;

  if !no_git && let Some(root) = git::discover_repo_root(&current_dir)? {
    return Ok(Workspace::Git { root });
  }

  Ok(Workspace::Directory { root: current_dir })
}

/// Walks `root`, honouring ignore files, and returns relative file paths.
pub fn list_directory_files(root: &Path) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();

  for entry in WalkBuilder::new(root)
    .hidden(false)
    .git_ignore(true)
    .git_global(true)
    .git_exclude(true)
    .require_git(false)
    .filter_entry(|entry| entry.file_name() != ".git")
    .build()
  {
    let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
    if !entry.file_type().is_some_and(|ft| ft.is_file()) {
      continue;
    }
    if let Ok(relative) = entry.path().strip_prefix(root) {
      files.push(relative.to_path_buf());
    }
  }

  files.sort();
  debug!("Found {} files under {}", files.len(), root.display());
  Ok(files)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_list_directory_files_honours_gitignore() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).expect("create src");
    fs::create_dir_all(root.join("target")).expect("create target");
    fs::write(root.join(".gitignore"), "target/\n").expect("write gitignore");
    fs::write(root.join("src/lib.rs"), "").expect("write lib");
    fs::write(root.join("target/out.rs"), "").expect("write out");

    let files = list_directory_files(root).expect("walk should succeed");
    assert_eq!(files, vec![PathBuf::from(".gitignore"), PathBuf::from("src/lib.rs")]);
  }

  #[test]
  fn test_relativize() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path().to_path_buf();
    fs::create_dir_all(root.join("src")).expect("create src");
    fs::write(root.join("src/lib.rs"), "").expect("write lib");

    let workspace = Workspace::Directory { root: root.clone() };
    assert_eq!(
      workspace.relativize(Path::new("lib.rs"), &root.join("src")),
      Some(PathBuf::from("src/lib.rs"))
    );
    assert_eq!(
      workspace.relativize(&root.join("src/lib.rs"), Path::new("/")),
      Some(PathBuf::from("src/lib.rs"))
    );
    assert_eq!(workspace.relativize(Path::new("/elsewhere/x.rs"), &root), None);
  }
}
