//! # Git Module
//!
//! This module enumerates the files of a git repository that are expected to
//! carry the license header: everything in the index plus untracked files that
//! are not excluded by `.gitignore` and friends. This is the set
//! `git ls-files --cached --modified --others --exclude-standard` reports.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{Repository, StatusOptions};
use tracing::{debug, trace};

/// File mode of a submodule entry in the index.
const GITLINK_MODE: u32 = 0o160000;

/// Finds the working directory of the repository containing `path`.
///
/// Returns `None` if `path` is not inside a git repository or the repository
/// is bare.
pub fn discover_repo_root(path: &Path) -> Result<Option<PathBuf>> {
  match Repository::discover(path) {
    Ok(repo) => Ok(repo.workdir().map(Path::to_path_buf)),
    Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
    Err(e) => Err(e).with_context(|| format!("Failed to open git repository at {}", path.display())),
  }
}

/// Lists candidate files of the repository rooted at `root`.
///
/// Paths are relative to `root` and sorted. Index entries whose file has been
/// deleted from the working tree are left out, as are submodules.
pub fn list_candidate_files(root: &Path) -> Result<Vec<PathBuf>> {
  let repo = Repository::open(root).with_context(|| format!("Failed to open git repository at {}", root.display()))?;
  let mut files = BTreeSet::new();

  let index = repo.index().with_context(|| "Failed to read git index")?;
  for entry in index.iter() {
    if entry.mode == GITLINK_MODE {
      continue;
    }
    match std::str::from_utf8(&entry.path) {
      Ok(path) => {
        files.insert(PathBuf::from(path));
      }
      Err(_) => debug!("Skipping index entry with non UTF-8 path"),
    }
  }
  let tracked = files.len();

  let mut status_opts = StatusOptions::new();
  status_opts
    .include_untracked(true)
    .recurse_untracked_dirs(true)
    .include_ignored(false)
    .exclude_submodules(true);

  let statuses = repo
    .statuses(Some(&mut status_opts))
    .with_context(|| "Failed to get git status")?;

  for entry in statuses.iter() {
    if entry.status().is_wt_new()
      && let Some(path) = entry.path()
    {
      trace!("Untracked file: {}", path);
      files.insert(PathBuf::from(path));
    }
  }

  debug!(
    "Found {} tracked and {} untracked files",
    tracked,
    files.len() - tracked
  );

  let files = files
    .into_iter()
    .filter(|path| {
      let exists = root.join(path).is_file();
      if !exists {
        debug!("Skipping: {} (not present in working tree)", path.display());
      }
      exists
    })
    .collect();

  Ok(files)
}
