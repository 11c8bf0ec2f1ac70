//! # headerfix
//!
//! Checks and repairs the copyright header at the top of every source file in
//! a repository.

use std::process::ExitCode;

use anyhow::Result;
use headerfix::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();
  run(cli.run_args).await
}
