//! # certdrift-core
//!
//! Certificate-store drift detection.
//!
//! Captures the full certificate inventory of a host with an external
//! enumeration tool (Sysinternals `sigcheck -t * -c` by default), fingerprints
//! it, and compares the fingerprint against an operator-approved baseline.
//! Any byte-level difference is drift. What changed is deliberately not
//! analysed.
//!
//! ## Data Flow
//!
//! ```text
//! LogManager::prepare()          rotate sigcheckWrapper.log -> .log.bak
//!   -> InventoryCollector        spawn tool, bounded wait, capture stdout/stderr
//!   -> write_results()           results.csv, only after a normal exit
//!   -> compare()                 SHA-256(results.csv) vs SHA-256(ref.csv)
//!   -> Notifier::notify()        only on drift, after the log is closed
//! ```
//!
//! ## Working directory layout
//!
//! | File | Role |
//! |------|------|
//! | `ref.csv` | baseline, read-only |
//! | `results.csv` | latest inventory, replaced each run |
//! | `sigcheckWrapper.log` | current run log |
//! | `sigcheckWrapper.log.bak` | previous run log |

pub mod collect;
pub mod compare;
pub mod config;
pub mod error;
pub mod hash;
pub mod log;
pub mod notify;
pub mod run;
pub mod types;

pub use config::{DriftConfig, ToolConfig};
pub use error::{DriftError, Result};
pub use notify::{DriftAlert, NoopNotifier, Notifier};
pub use run::{Orchestrator, RunState};
pub use types::*;
