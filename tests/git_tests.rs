mod common;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use common::{git_commit_all, init_git_repo, is_git_available, run_git, write_file};
use headerfix::git::{discover_repo_root, list_candidate_files};
use tempfile::tempdir;

fn paths(items: &[&str]) -> Vec<PathBuf> {
  items.iter().map(PathBuf::from).collect()
}

#[test]
fn test_discover_repo_root_from_subdirectory() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;
  write_file(temp_dir.path(), "nested/deep/file.rs", "fn f() {}\n")?;

  let root = discover_repo_root(&temp_dir.path().join("nested/deep"))?.expect("inside a repository");
  assert_eq!(root.canonicalize()?, temp_dir.path().canonicalize()?);
  Ok(())
}

#[test]
fn test_list_candidate_files() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  init_git_repo(root)?;

  write_file(root, ".gitignore", "*.log\nbuild/\n")?;
  write_file(root, "src/main.rs", "fn main() {}\n")?;
  write_file(root, "gone.rs", "fn gone() {}\n")?;
  git_commit_all(root, "Initial commit")?;

  // Modified, untracked, ignored and deleted files
  write_file(root, "src/main.rs", "fn main() { run(); }\n")?;
  write_file(root, "src/extra/new.py", "print(1)\n")?;
  write_file(root, "debug.log", "noise\n")?;
  write_file(root, "build/out.rs", "fn out() {}\n")?;
  fs::remove_file(root.join("gone.rs"))?;

  let files = list_candidate_files(root)?;
  assert_eq!(files, paths(&[".gitignore", "src/extra/new.py", "src/main.rs"]));
  Ok(())
}

#[test]
fn test_list_candidate_files_includes_staged_files() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  init_git_repo(root)?;

  write_file(root, "a.rs", "fn a() {}\n")?;
  run_git(root, &["add", "a.rs"])?;

  // A tracked file stays a candidate even when it matches an ignore pattern
  write_file(root, "forced.log", "kept\n")?;
  run_git(root, &["add", "forced.log"])?;
  write_file(root, ".gitignore", "*.log\n")?;

  let files = list_candidate_files(root)?;
  assert_eq!(files, paths(&[".gitignore", "a.rs", "forced.log"]));
  Ok(())
}
