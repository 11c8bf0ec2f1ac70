//! # headerfix
//!
//! A tool that keeps the MPL-2.0 copyright header at the top of every source
//! file in a repository.
//!
//! The header is found by a fuzzy match that ignores the comment prefix,
//! surrounding whitespace and blank comment lines, so a header that was
//! re-wrapped or re-indented is still recognized and replaced in place. Files
//! without a header get one inserted at the top, after a `#!/` shebang line if
//! there is one.
//!
//! ## Usage as a Library
//!
//! ```rust
//! use headerfix::header::{locate, rewrite};
//!
//! let lines = vec!["fn main() {}\n"];
//! assert!(locate("//", &lines).is_none());
//!
//! let fixed = rewrite("//", &lines);
//! assert_eq!(fixed[0], "// SPDX-License-Identifier: MPL-2.0\n");
//! assert!(locate("//", &fixed).is_some());
//! ```
//!
//! ## Modules
//!
//! * [`header`] - Locating and rewriting the header in a list of lines
//! * [`rules`] - Mapping file paths to comment prefixes
//! * [`processor`] - Checking, patching and fixing files concurrently
//! * [`workspace`] - Finding the repository root and the candidate files
//!
//! [`header`]: crate::header
//! [`rules`]: crate::rules
//! [`processor`]: crate::processor
//! [`workspace`]: crate::workspace

pub mod cli;
pub mod config;
pub mod diff;
pub mod git;
pub mod header;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod rules;
pub mod workspace;
