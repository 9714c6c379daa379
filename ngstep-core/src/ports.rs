//! Port traits for I/O abstraction.
//!
//! The pipeline never touches stdin, child processes, or the report directory
//! directly. Default implementations live in [`crate::adapters`].

use camino::Utf8Path;
use ngstep_types::{MigrationStepReport, VersionTransition};

/// Runs the package-manager upgrade for one step.
pub trait UpgradeTool {
    /// Human-readable command line for `target`, used in progress output.
    fn describe(&self, target: u32) -> String;

    /// Run the upgrade to `target` in `repo_root`. Returns the process exit
    /// code, or `None` if it was terminated without one.
    fn run(&self, repo_root: &Utf8Path, target: u32) -> anyhow::Result<Option<i32>>;
}

/// Yes/no decisions taken between steps.
pub trait StepGate {
    /// Whether to run the upgrade for `step` under [`UpgradePolicy::Ask`](crate::settings::UpgradePolicy::Ask).
    fn confirm_upgrade(&self, step: VersionTransition) -> anyhow::Result<bool>;

    /// Whether to continue after `finished` when pausing between steps.
    fn confirm_continue(&self, finished: VersionTransition) -> anyhow::Result<bool>;
}

pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}

/// Progress callbacks. Every method defaults to doing nothing.
pub trait StepObserver {
    fn step_started(&self, _step: VersionTransition) {}

    fn upgrade_started(&self, _step: VersionTransition, _command: &str) {}

    fn upgrade_skipped(&self, _step: VersionTransition) {}

    /// Called once the step's report has been written to `report_path`.
    fn step_finished(&self, _report: &MigrationStepReport, _report_path: &Utf8Path) {}
}
