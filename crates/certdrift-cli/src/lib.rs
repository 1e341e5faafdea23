//! # certdrift-cli
//!
//! Command-line front end for `certdrift-core`.
//!
//! ## Features
//!
//! - **check**: one detection run, suitable for a task scheduler
//! - **Interactive alert**: persistent banner with "open folder" / "exit" menu on drift
//! - **Headless mode**: `--headless` for unattended runs, verdict via exit code
//! - **fingerprint**: SHA-256 of arbitrary files, for inspecting baselines
//! - **Output formats**: pretty or JSON

pub mod alert;
pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;

/// Process exit statuses.
pub mod exit {
    /// Inventory matches the baseline
    pub const MATCH: u8 = 0;
    /// Drift detected; returned after the alert is dismissed
    pub const DRIFT: u8 = 1;
    /// Fatal error, no verdict reached
    pub const FAILURE: u8 = 2;
}
