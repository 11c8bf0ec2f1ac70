//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod run;

use clap::{ArgGroup, Parser};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version = env!("HEADERFIX_VERSION"),
  about,
  styles = CUSTOM_STYLES,
  group(ArgGroup::new("mode").required(true).args(["check", "patch", "fix"])),
  after_help = "Examples:
  # List files whose copyright header is missing or wrong
  headerfix --check

  # Show the changes that would be made, as a patch
  headerfix --patch > header.patch

  # Fix two files in place
  headerfix --fix src/lib.rs README.md
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub run_args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use clap::error::ErrorKind;

  use super::*;
  use crate::logging::ColorMode;
  use crate::processor::Mode;

  #[test]
  fn test_parse_check_defaults() {
    let cli = Cli::try_parse_from(["headerfix", "--check"]).expect("valid arguments");
    assert_eq!(cli.run_args.mode(), Mode::Check);
    assert_eq!(cli.run_args.colors, ColorMode::Auto);
    assert!(cli.run_args.files.is_empty());
    assert!(cli.run_args.output.is_none());
  }

  #[test]
  fn test_parse_patch_with_output() {
    let cli = Cli::try_parse_from(["headerfix", "--patch", "-o", "x.patch", "src/lib.rs"]).expect("valid arguments");
    assert_eq!(cli.run_args.mode(), Mode::Patch);
    assert_eq!(cli.run_args.output.as_deref(), Some(std::path::Path::new("x.patch")));
    assert_eq!(cli.run_args.files.len(), 1);
  }

  #[test]
  fn test_mode_flags_are_exclusive() {
    let err = Cli::try_parse_from(["headerfix", "--check", "--fix"]).expect_err("two modes");
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

    let err = Cli::try_parse_from(["headerfix"]).expect_err("no mode");
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
  }

  #[test]
  fn test_output_only_with_patch() {
    for mode in ["--check", "--fix"] {
      let err = Cli::try_parse_from(["headerfix", mode, "--output", "x.patch"]).expect_err("output needs --patch");
      assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
  }
}
