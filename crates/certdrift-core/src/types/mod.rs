//! Core types for the drift detector.

pub mod fingerprint;
pub mod layout;
pub mod report;
pub mod snapshot;

pub use fingerprint::{Comparison, Fingerprint, Verdict};
pub use layout::ArtifactLayout;
pub use report::RunReport;
pub use snapshot::InventorySnapshot;
