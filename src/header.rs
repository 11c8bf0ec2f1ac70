//! # Header Module
//!
//! Locating and rewriting the canonical license header.
//!
//! Both operations work on a file's raw lines (terminators included) and the
//! comment prefix of the file's syntax family. They are pure: neither touches
//! the filesystem, and the caller decides whether the rewritten lines are
//! reported, diffed or written back.
//!
//! ## Example
//!
//! ```rust
//! use headerfix::header::{HEADER_LINES, locate, rewrite};
//!
//! let lines = vec!["fn main() {}\n".to_string()];
//! assert!(locate("//", &lines).is_none());
//!
//! let fixed = rewrite("//", &lines);
//! assert_eq!(fixed[0], "// SPDX-License-Identifier: MPL-2.0\n");
//! assert_eq!(fixed.len(), HEADER_LINES.len() + 2);
//!
//! let range = locate("//", &fixed).expect("header is present after a rewrite");
//! assert_eq!(range.start, 0);
//! ```

use std::sync::LazyLock;

/// The header every file has to carry, without comment markers.
pub const CANONICAL_HEADER: &str = "
SPDX-License-Identifier: MPL-2.0

This Source Code Form is subject to the terms of the Mozilla Public
License, v. 2.0.  If a copy of the MPL was not distributed with this
file, You can obtain one at http://mozilla.org/MPL/2.0/.

Copyright 2024 MonetDB Foundation
";

/// Lines of [`CANONICAL_HEADER`] with the leading newline removed.
pub static HEADER_LINES: LazyLock<Vec<&'static str>> =
  LazyLock::new(|| CANONICAL_HEADER.trim_start().lines().collect());

/// Marker of an interpreter directive that must stay on the first line.
const SHEBANG: &str = "#!/";

/// Half-open range of line indices holding the header block.
///
/// `end` includes any blank lines that directly follow the header text, so
/// replacing `[start, end)` leaves no stray separator behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRange {
  pub start: usize,
  pub end: usize,
}

impl HeaderRange {
  /// Index one past the last line of header text proper.
  pub fn header_end(&self) -> usize {
    (self.start + HEADER_LINES.len()).min(self.end)
  }

  /// Number of lines in the range, absorbed blank lines included.
  pub const fn len(&self) -> usize {
    self.end - self.start
  }

  pub const fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

/// Strips `prefix` and surrounding whitespace from a line. Lines that are
/// not comments in this style reduce to the empty string.
fn reduce_line<'a>(prefix: &str, line: &'a str) -> &'a str {
  line.strip_prefix(prefix).map(str::trim).unwrap_or("")
}

/// Finds the lines currently occupied by the canonical header.
///
/// Every line is reduced (prefix stripped, whitespace trimmed, non-comment
/// lines blanked) and the reduced lines are searched for the trimmed
/// canonical text. This tolerates inconsistent indentation and trailing
/// whitespace but never matches a header whose wording differs.
///
/// Returns `None` when the header is not present.
pub fn locate<S: AsRef<str>>(prefix: &str, lines: &[S]) -> Option<HeaderRange> {
  let reduced = lines
    .iter()
    .map(|line| reduce_line(prefix, line.as_ref()))
    .collect::<Vec<_>>()
    .join("\n");
  let needle = CANONICAL_HEADER.trim();

  let pos = reduced.find(needle)?;
  let start = reduced[..pos].matches('\n').count();
  let mut end = (start + HEADER_LINES.len()).min(lines.len());

  while end < lines.len() && lines[end].as_ref().trim().is_empty() {
    end += 1;
  }

  Some(HeaderRange { start, end })
}

/// Renders the canonical header for `prefix`, followed by one blank line.
pub fn header_block(prefix: &str) -> Vec<String> {
  let mut block: Vec<String> = HEADER_LINES
    .iter()
    .map(|line| {
      let commented = if prefix.is_empty() {
        (*line).to_string()
      } else {
        format!("{prefix} {line}")
      };
      format!("{}\n", commented.trim_end())
    })
    .collect();
  block.push("\n".to_string());
  block
}

/// Returns `lines` with the canonical header installed.
///
/// An existing header is replaced in place. Without one, the header goes to
/// the top of the file, or right after the first line when that line is an
/// interpreter directive (`#!/...`). All other lines are kept verbatim and in
/// order.
pub fn rewrite<S: AsRef<str>>(prefix: &str, lines: &[S]) -> Vec<String> {
  let range = locate(prefix, lines).unwrap_or_else(|| {
    let at = match lines.first() {
      Some(first) if first.as_ref().starts_with(SHEBANG) => 1,
      _ => 0,
    };
    HeaderRange { start: at, end: at }
  });

  let block = header_block(prefix);
  let mut out = Vec::with_capacity(lines.len() - range.len() + block.len());
  out.extend(lines[..range.start].iter().map(|line| line.as_ref().to_string()));
  out.extend(block);
  out.extend(lines[range.end..].iter().map(|line| line.as_ref().to_string()));
  out
}
