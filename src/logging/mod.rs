//! # Logging Module
//!
//! This module provides logging utilities for headerfix, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Initialization of the `tracing` subscriber used for diagnostics
//!
//! Both kinds of log go to stderr. Stdout is reserved for per-file results
//! and patches, so those can be piped without diagnostics mixed in.
//!
//! ## Example
//!
//! ```rust
//! use headerfix::logging::{ColorMode, set_verbose};
//! use headerfix::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! // Only printed with -v
//! verbose_log!("Checking file: {}", "src/lib.rs");
//!
//! // Printed unless -q
//! info_log!("Fixed header in: {}", "src/lib.rs");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stderr unless quiet mode is enabled.
///
/// Uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, in yellow when colors are enabled.
pub fn print_info_log(message: &str) {
  eprintln!("{}", message.if_supports_color(Stream::Stderr, |m| m.yellow()));
}
