//! certdrift - certificate-store drift detector
//!
//! Runs the enumeration tool, compares its output against the approved
//! baseline, and alerts on any difference.

use colored::Colorize;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match certdrift_cli::run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".bright_red().bold());
            ExitCode::from(certdrift_cli::exit::FAILURE)
        }
    }
}
