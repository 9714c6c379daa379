//! Default port implementations.

use crate::ports::{StepGate, StepObserver, UpgradeTool, WritePort};
use anyhow::Context;
use camino::Utf8Path;
use ngstep_types::VersionTransition;
use std::process::Command;
use tracing::{debug, info};

/// Arguments passed to `npx` to upgrade the Angular packages to `target`.
pub fn ng_update_args(target: u32) -> Vec<String> {
    vec![
        "ng".to_string(),
        "update".to_string(),
        format!("@angular/core@{target}"),
        format!("@angular/cli@{target}"),
        "--force".to_string(),
        "--allow-dirty".to_string(),
    ]
}

/// Runs `npx ng update ...` with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpxUpgradeTool;

impl NpxUpgradeTool {
    fn command() -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "npx"]);
            cmd
        } else {
            Command::new("npx")
        }
    }
}

impl UpgradeTool for NpxUpgradeTool {
    fn describe(&self, target: u32) -> String {
        format!("npx {}", ng_update_args(target).join(" "))
    }

    fn run(&self, repo_root: &Utf8Path, target: u32) -> anyhow::Result<Option<i32>> {
        info!(target, root = %repo_root, "running ng update");
        let status = Self::command()
            .args(ng_update_args(target))
            .current_dir(repo_root)
            .status()
            .with_context(|| format!("spawn npx in {}", repo_root))?;
        debug!(?status, "ng update exited");
        Ok(status.code())
    }
}

/// Gate that answers yes to everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoGate;

impl StepGate for AutoGate {
    fn confirm_upgrade(&self, _step: VersionTransition) -> anyhow::Result<bool> {
        Ok(true)
    }

    fn confirm_continue(&self, _finished: VersionTransition) -> anyhow::Result<bool> {
        Ok(true)
    }
}

/// Observer that ignores progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl StepObserver for SilentObserver {}

/// Writes files to the real filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent).with_context(|| format!("create dir {}", parent))?;
        }
        fs_err::write(path, contents).with_context(|| format!("write {}", path))?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs_err::create_dir_all(path).with_context(|| format!("create dir {}", path))?;
        Ok(())
    }
}
