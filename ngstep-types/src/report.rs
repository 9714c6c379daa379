use crate::dispatch::FixRun;
use crate::fix::FixTarget;
use crate::scan::{Finding, ScanResult};
use crate::transition::VersionTransition;
use serde::{Deserialize, Serialize};

/// Record of one completed migration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStepReport {
    pub transition: VersionTransition,
    pub findings: Vec<Finding>,
    pub fix_targets: Vec<FixTarget>,

    /// Dispatcher results; `None` when fixing was not enabled for this step.
    pub fixes: Option<FixRun>,
    /// Files changed by counting fixes; always 0 when fixes were not enabled.
    pub fixes_applied: usize,
}

impl MigrationStepReport {
    pub fn new(transition: VersionTransition, scan: ScanResult, fixes: Option<FixRun>) -> Self {
        let fixes_applied = fixes.as_ref().map_or(0, FixRun::total_changed);
        Self {
            transition,
            findings: scan.findings,
            fix_targets: scan.fix_targets,
            fixes,
            fixes_applied,
        }
    }

    pub fn fixes_enabled(&self) -> bool {
        self.fixes.is_some()
    }

    pub fn required(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_optional())
    }

    pub fn optional(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_optional())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::FixStatus;
    use crate::edit::EditBatch;
    use camino::Utf8Path;
    use pretty_assertions::assert_eq;

    fn scan() -> ScanResult {
        let mut scan = ScanResult::new();
        scan.push(Finding::at("HttpModule removed", "src/app/app.module.ts"));
        scan.push(Finding::note("ℹ standalone is optional"));
        scan.request(FixTarget::HttpModuleFix);
        scan
    }

    #[test]
    fn report_without_fixes_counts_zero() {
        let report = MigrationStepReport::new(VersionTransition::new(10), scan(), None);
        assert!(!report.fixes_enabled());
        assert_eq!(report.fixes_applied, 0);
        assert_eq!(report.required().count(), 1);
        assert_eq!(report.optional().count(), 1);
    }

    #[test]
    fn report_takes_total_from_fix_run() {
        let mut batch = EditBatch::new();
        batch.changed(Utf8Path::new("src/app/app.module.ts"));
        let mut run = FixRun::new();
        run.push("httpModuleFix", FixStatus::Applied { batch });

        let report = MigrationStepReport::new(VersionTransition::new(10), scan(), Some(run));
        assert!(report.fixes_enabled());
        assert_eq!(report.fixes_applied, 1);
    }
}
