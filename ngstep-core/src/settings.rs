//! Clap-free settings for the migration pipeline.

use camino::Utf8PathBuf;
use ngstep_types::FixTarget;

/// Default directory, relative to the repo root, for step reports.
pub const DEFAULT_LOGS_DIR: &str = "migration-logs";

/// When the package upgrade runs before a step is scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpgradePolicy {
    Always,
    #[default]
    Never,
    /// Ask through the step gate; declining skips the upgrade for that step only.
    Ask,
}

#[derive(Debug, Clone)]
pub struct MigrateSettings {
    pub repo_root: Utf8PathBuf,
    /// Start version; detected from the project when `None`.
    pub from: Option<u32>,
    pub to: u32,

    pub apply_fixes: bool,
    pub deny: Vec<FixTarget>,
    pub upgrade: UpgradePolicy,
    /// Ask before moving on to the next step.
    pub pause: bool,

    /// Where reports go; relative paths are resolved against `repo_root`.
    pub logs_dir: Utf8PathBuf,
}

impl MigrateSettings {
    /// Analysis only: no fixes, no upgrades, no pauses.
    pub fn logs_only(repo_root: Utf8PathBuf, to: u32) -> Self {
        Self {
            repo_root,
            to,
            ..Self::default()
        }
    }

    pub fn logs_path(&self) -> Utf8PathBuf {
        if self.logs_dir.is_absolute() {
            self.logs_dir.clone()
        } else {
            self.repo_root.join(&self.logs_dir)
        }
    }
}

impl Default for MigrateSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            from: None,
            to: 0,
            apply_fixes: false,
            deny: Vec::new(),
            upgrade: UpgradePolicy::default(),
            pause: false,
            logs_dir: Utf8PathBuf::from(DEFAULT_LOGS_DIR),
        }
    }
}
