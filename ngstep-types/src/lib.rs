//! Shared DTOs for the ngstep workspace.
//!
//! # Design constraints
//! - Everything here is plain data: no I/O, no filesystem access.
//! - Values are produced once and read afterwards; mutation happens only
//!   while a scan or a step is being assembled.

pub mod dispatch;
pub mod edit;
pub mod fix;
pub mod report;
pub mod scan;
pub mod transition;

pub use dispatch::{FixEntry, FixRun, FixStatus};
pub use edit::{EditBatch, EditOutcome, FileEdit};
pub use fix::{FixKind, FixTarget, UnknownFixTarget};
pub use report::MigrationStepReport;
pub use scan::{Finding, ScanResult};
pub use transition::VersionTransition;

/// Marker prefixes used in finding messages.
pub mod marks {
    /// Prefix of informational findings (optional suggestions).
    pub const INFO: &str = "ℹ";
    /// Prefix of warnings that are not tied to a file.
    pub const WARN: &str = "⚠";
}
