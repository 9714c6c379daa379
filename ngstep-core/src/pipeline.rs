//! The version-by-version migration loop, extracted from the CLI.
//!
//! All process, prompt, and report-file I/O goes through the port traits.
//! Rules and fixes read and edit the project tree directly.

use crate::error::MigrationError;
use crate::ports::{StepGate, StepObserver, UpgradeTool, WritePort};
use crate::settings::{MigrateSettings, UpgradePolicy};
use crate::version::detect_current_major;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use ngstep_fixers::Dispatcher;
use ngstep_render::render_step_md;
use ngstep_rules::{FsRepoView, RuleRegistry};
use ngstep_types::{MigrationStepReport, VersionTransition};
use tracing::{debug, info, warn};

/// Ports used by [`run_migration`].
#[derive(Clone, Copy)]
pub struct MigrationPorts<'a> {
    pub upgrade: &'a dyn UpgradeTool,
    pub gate: &'a dyn StepGate,
    pub writer: &'a dyn WritePort,
    pub observer: &'a dyn StepObserver,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunStatus {
    /// Every step up to the target finished.
    Completed,
    /// The gate declined to continue after `after`.
    Stopped { after: VersionTransition },
    /// A step failed. Its report was not written; earlier reports were.
    Failed(MigrationError),
}

/// Outcome of [`run_migration`].
#[derive(Debug)]
pub struct MigrationOutcome {
    pub from: u32,
    pub to: u32,
    pub reports: Vec<MigrationStepReport>,
    /// Report files, in step order.
    pub written: Vec<Utf8PathBuf>,
    pub status: RunStatus,
}

impl MigrationOutcome {
    pub fn total_fixes_applied(&self) -> usize {
        self.reports.iter().map(|r| r.fixes_applied).sum()
    }
}

/// Walk the project from its current major up to `settings.to`, one step at
/// a time.
///
/// Returns `Err` only when the run cannot start: a bad version range or an
/// undetectable current version. Nothing is written in that case. Failures
/// inside a step end the run with [`RunStatus::Failed`] and keep the reports
/// already written.
pub fn run_migration(
    settings: &MigrateSettings,
    registry: &RuleRegistry,
    ports: MigrationPorts<'_>,
) -> Result<MigrationOutcome, MigrationError> {
    let from = match settings.from {
        Some(from) => from,
        None => detect_current_major(&settings.repo_root)?,
    };
    let to = settings.to;
    if to <= from {
        return Err(MigrationError::InvalidRange { from, to });
    }

    let logs_dir = settings.logs_path();
    ports
        .writer
        .create_dir_all(&logs_dir)
        .context("prepare report directory")?;

    info!(from, to, fixes = settings.apply_fixes, "starting migration");
    let dispatcher = Dispatcher::with_denied(settings.deny.iter().copied());
    let mut outcome = MigrationOutcome {
        from,
        to,
        reports: Vec::new(),
        written: Vec::new(),
        status: RunStatus::Completed,
    };

    for step in VersionTransition::steps(from, to) {
        ports.observer.step_started(step);

        if let Err(err) = upgrade_step(settings, ports, step) {
            warn!(step = %step, error = %err, "upgrade failed");
            outcome.status = RunStatus::Failed(err);
            return Ok(outcome);
        }

        let fixes = settings.apply_fixes.then_some(&dispatcher);
        let written =
            scan_step(&settings.repo_root, registry, step, fixes).and_then(|report| {
                let path = logs_dir.join(step.report_file_name());
                let markdown = render_step_md(&report, Utc::now());
                ports.writer.write_file(&path, markdown.as_bytes())?;
                Ok((report, path))
            });
        let (report, path) = match written {
            Ok(done) => done,
            Err(source) => {
                warn!(step = %step, error = %source, "step failed");
                outcome.status = RunStatus::Failed(MigrationError::StepFailed { step, source });
                return Ok(outcome);
            }
        };
        info!(step = %step, report = %path, fixes_applied = report.fixes_applied, "step finished");
        ports.observer.step_finished(&report, &path);
        outcome.reports.push(report);
        outcome.written.push(path);

        if settings.pause && step.to() < to {
            match ports.gate.confirm_continue(step) {
                Ok(true) => {}
                Ok(false) => {
                    info!(after = %step, "migration stopped by user");
                    outcome.status = RunStatus::Stopped { after: step };
                    return Ok(outcome);
                }
                Err(source) => {
                    outcome.status = RunStatus::Failed(MigrationError::StepFailed { step, source });
                    return Ok(outcome);
                }
            }
        }
    }

    Ok(outcome)
}

fn upgrade_step(
    settings: &MigrateSettings,
    ports: MigrationPorts<'_>,
    step: VersionTransition,
) -> Result<(), MigrationError> {
    let wanted = match settings.upgrade {
        UpgradePolicy::Never => false,
        UpgradePolicy::Always => true,
        UpgradePolicy::Ask => ports
            .gate
            .confirm_upgrade(step)
            .map_err(|source| MigrationError::StepFailed { step, source })?,
    };
    if !wanted {
        debug!(step = %step, "upgrade skipped");
        if settings.upgrade == UpgradePolicy::Ask {
            ports.observer.upgrade_skipped(step);
        }
        return Ok(());
    }

    ports
        .observer
        .upgrade_started(step, &ports.upgrade.describe(step.to()));
    let code = ports
        .upgrade
        .run(&settings.repo_root, step.to())
        .map_err(|source| MigrationError::StepFailed { step, source })?;
    if code != Some(0) {
        return Err(MigrationError::UpgradeFailed { step, code });
    }
    Ok(())
}

/// Scan one step and, with a dispatcher, apply the fixes it requests.
///
/// The rule is resolved fresh, so scanning the same step again after fixes
/// sees the edited tree.
pub fn scan_step(
    repo_root: &Utf8Path,
    registry: &RuleRegistry,
    step: VersionTransition,
    dispatcher: Option<&Dispatcher>,
) -> anyhow::Result<MigrationStepReport> {
    let rule = registry.resolve(step.from(), step.to());
    let repo = FsRepoView::new(repo_root.to_path_buf());
    let scan = rule
        .scan(&repo)
        .with_context(|| format!("scan with {}", rule.name()))?;
    debug!(
        rule = %rule.name(),
        findings = scan.findings.len(),
        fix_targets = scan.fix_targets.len(),
        "scan finished"
    );

    let fixes = match dispatcher {
        Some(dispatcher) => Some(
            dispatcher
                .apply(repo_root, &scan.fix_targets)
                .with_context(|| format!("apply fixes for {step}"))?,
        ),
        None => None,
    };
    Ok(MigrationStepReport::new(step, scan, fixes))
}
