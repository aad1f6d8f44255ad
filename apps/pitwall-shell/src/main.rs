//! # Pitwall Shell Entry Point
//!
//! ```text
//! pitwall-shell [--config PATH] [--script PATH] [--json]
//! ```
//!
//! The actual setup is in lib.rs so the input loop can be driven from tests.

use std::process::ExitCode;

use clap::Parser;
use pitwall_shell::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match pitwall_shell::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pitwall-shell: {}", err);
            ExitCode::FAILURE
        }
    }
}
