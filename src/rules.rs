//! # Rules Module
//!
//! Maps workspace-relative file paths to the comment style their header has
//! to be written in.
//!
//! Rules are an ordered list of glob patterns; the first pattern that matches
//! a path decides. A rule either names a comment prefix or marks the file as
//! exempt from the header requirement. A path that matches no rule at all is a
//! configuration gap, reported through [`ClassifyError`].

use std::fmt;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::trace;

/// Comment prefix of a single-line comment style, e.g. `//` or `#`.
///
/// The empty prefix stands for files without comment syntax (Markdown); the
/// header is then written as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentStyle(String);

impl CommentStyle {
  pub fn new(prefix: impl Into<String>) -> Self {
    Self(prefix.into())
  }

  /// The style without any comment marker.
  pub const fn none() -> Self {
    Self(String::new())
  }

  pub fn prefix(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CommentStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0.is_empty() {
      write!(f, "<plain text>")
    } else {
      write!(f, "{}", self.0)
    }
  }
}

/// What to do with a file matched by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
  /// The file must carry the header, commented with this style.
  Comment(CommentStyle),
  /// The file is known but does not need a header.
  Skip,
}

/// A single glob rule.
#[derive(Debug, Clone)]
pub struct Rule {
  pub pattern: Pattern,
  pub action: RuleAction,
}

impl Rule {
  /// Build a rule, compiling `pattern`.
  pub fn new(pattern: &str, action: RuleAction) -> Result<Self, glob::PatternError> {
    Ok(Self {
      pattern: Pattern::new(pattern)?,
      action,
    })
  }

  /// fnmatch-style match against the whole relative path: `*` crosses `/`.
  pub fn matches(&self, path: &Path) -> bool {
    let options = MatchOptions {
      case_sensitive: true,
      require_literal_separator: false,
      require_literal_leading_dot: false,
    };
    self.pattern.matches_path_with(path, options)
  }
}

/// Patterns and prefixes used when no configuration replaces them.
const BUILTIN_RULES: &[(&str, Option<&str>)] = &[
  ("*.rs", Some("//")),
  ("*.md", Some("")),
  ("*.yml", Some("#")),
  ("*.yaml", Some("#")),
  ("*.py", Some("#")),
  ("*.sh", Some("#")),
  (".gitignore", None),
  ("Cargo.toml", None),
  ("Cargo.lock", None),
  ("release.toml", None),
  ("LICENSE", None),
  ("TODO.org", None),
  (".headerfix.toml", None),
];

/// The builtin rule table.
pub fn builtin_rules() -> Result<Vec<Rule>, glob::PatternError> {
  BUILTIN_RULES
    .iter()
    .map(|(pattern, prefix)| {
      let action = match prefix {
        Some(prefix) => RuleAction::Comment(CommentStyle::new(*prefix)),
        None => RuleAction::Skip,
      };
      Rule::new(pattern, action)
    })
    .collect()
}

/// Raised when candidate files match no rule.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
  #[error("Please add rules to categorize the following files: {}", format_paths(.files))]
  Unclassified { files: Vec<PathBuf> },
}

fn format_paths(files: &[PathBuf]) -> String {
  files
    .iter()
    .map(|file| file.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}

/// A file that must carry the header, with the style to write it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
  pub path: PathBuf,
  pub style: CommentStyle,
}

/// Ordered rule table, scanned linearly.
#[derive(Debug, Clone)]
pub struct StyleClassifier {
  rules: Vec<Rule>,
}

impl StyleClassifier {
  pub const fn new(rules: Vec<Rule>) -> Self {
    Self { rules }
  }

  /// Classifier over the builtin rules only.
  pub fn builtin() -> Result<Self, glob::PatternError> {
    Ok(Self::new(builtin_rules()?))
  }

  pub fn rules(&self) -> &[Rule] {
    &self.rules
  }

  /// Action of the first rule matching `path`, if any.
  pub fn classify(&self, path: &Path) -> Option<&RuleAction> {
    let rule = self.rules.iter().find(|rule| rule.matches(path))?;
    trace!("{} matched rule '{}'", path.display(), rule.pattern);
    Some(&rule.action)
  }

  /// Classify every path, keeping the ones that need a header.
  ///
  /// Fails, listing all offenders, if any path matches no rule.
  pub fn classify_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<ClassifiedFile>, ClassifyError> {
    let mut classified = Vec::with_capacity(paths.len());
    let mut unknown = Vec::new();

    for path in paths {
      let path = path.as_ref();
      match self.classify(path) {
        Some(RuleAction::Comment(style)) => classified.push(ClassifiedFile {
          path: path.to_path_buf(),
          style: style.clone(),
        }),
        Some(RuleAction::Skip) => trace!("Skipping: {} (exempt)", path.display()),
        None => unknown.push(path.to_path_buf()),
      }
    }

    if !unknown.is_empty() {
      return Err(ClassifyError::Unclassified { files: unknown });
    }

    Ok(classified)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builtin_rules_compile() {
    let rules = builtin_rules().expect("builtin rules compile");
    assert_eq!(rules.len(), BUILTIN_RULES.len());
  }

  #[test]
  fn test_classify_rust_nested() {
    let classifier = StyleClassifier::builtin().expect("builtin rules compile");
    assert_eq!(
      classifier.classify(Path::new("src/framing/mod.rs")),
      Some(&RuleAction::Comment(CommentStyle::new("//")))
    );
  }

  #[test]
  fn test_classify_markdown_plain() {
    let classifier = StyleClassifier::builtin().expect("builtin rules compile");
    assert_eq!(
      classifier.classify(Path::new("README.md")),
      Some(&RuleAction::Comment(CommentStyle::none()))
    );
  }

  #[test]
  fn test_classify_exact_name_only_at_root() {
    let classifier = StyleClassifier::builtin().expect("builtin rules compile");
    assert_eq!(classifier.classify(Path::new("Cargo.toml")), Some(&RuleAction::Skip));
    assert_eq!(classifier.classify(Path::new("crates/a/Cargo.toml")), None);
  }

  #[test]
  fn test_first_match_wins() {
    let rules = vec![
      Rule::new("vendor/*", RuleAction::Skip).unwrap(),
      Rule::new("*.rs", RuleAction::Comment(CommentStyle::new("//"))).unwrap(),
    ];
    let classifier = StyleClassifier::new(rules);

    assert_eq!(classifier.classify(Path::new("vendor/x/lib.rs")), Some(&RuleAction::Skip));
    assert_eq!(
      classifier.classify(Path::new("src/lib.rs")),
      Some(&RuleAction::Comment(CommentStyle::new("//")))
    );
  }

  #[test]
  fn test_classify_all_filters_skipped() {
    let classifier = StyleClassifier::builtin().expect("builtin rules compile");
    let files = classifier
      .classify_all(&["src/lib.rs", "LICENSE", "ci/build.yml"])
      .expect("all files are known");

    assert_eq!(
      files,
      vec![
        ClassifiedFile {
          path: PathBuf::from("src/lib.rs"),
          style: CommentStyle::new("//"),
        },
        ClassifiedFile {
          path: PathBuf::from("ci/build.yml"),
          style: CommentStyle::new("#"),
        },
      ]
    );
  }

  #[test]
  fn test_classify_all_reports_every_unknown() {
    let classifier = StyleClassifier::builtin().expect("builtin rules compile");
    let err = classifier
      .classify_all(&["src/lib.rs", "data.bin", "notes.txt"])
      .expect_err("unknown files must fail");

    let ClassifyError::Unclassified { files } = &err;
    assert_eq!(files, &vec![PathBuf::from("data.bin"), PathBuf::from("notes.txt")]);
    assert_eq!(
      err.to_string(),
      "Please add rules to categorize the following files: data.bin, notes.txt"
    );
  }

  #[test]
  fn test_comment_style_display() {
    assert_eq!(CommentStyle::new("#").to_string(), "#");
    assert_eq!(CommentStyle::none().to_string(), "<plain text>");
  }
}
