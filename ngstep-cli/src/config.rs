//! Configuration file loading for ngstep.
//!
//! Discovers and loads `ngstep.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use ngstep_core::settings::{DEFAULT_LOGS_DIR, UpgradePolicy};
use ngstep_types::FixTarget;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "ngstep.toml";

/// Top-level configuration from ngstep.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NgstepConfig {
    pub migrate: MigrateConfig,
    pub fixes: FixesConfig,
}

/// `[migrate]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// Run fixes after each scan.
    pub fix: bool,

    /// Ask before moving to the next step.
    pub pause: bool,

    pub upgrade: UpgradeMode,

    /// Report directory, relative to the repo root.
    pub logs_dir: Option<Utf8PathBuf>,
}

/// `[fixes]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FixesConfig {
    /// Fix names that are never dispatched.
    pub deny: Vec<String>,
}

/// Upgrade policy as written in config and on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeMode {
    Always,
    #[default]
    Never,
    Ask,
}

impl From<UpgradeMode> for UpgradePolicy {
    fn from(mode: UpgradeMode) -> Self {
        match mode {
            UpgradeMode::Always => UpgradePolicy::Always,
            UpgradeMode::Never => UpgradePolicy::Never,
            UpgradeMode::Ask => UpgradePolicy::Ask,
        }
    }
}

/// Discover the ngstep.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an ngstep.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<NgstepConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<NgstepConfig> {
    let config: NgstepConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<NgstepConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(NgstepConfig::default()),
    }
}

/// Migrate flags given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct MigrateOverrides {
    pub fix: Option<bool>,
    pub pause: Option<bool>,
    pub upgrade: Option<UpgradeMode>,
    pub logs_dir: Option<Utf8PathBuf>,
    pub deny: Vec<String>,
}

/// Config file and CLI arguments combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub fix: bool,
    pub pause: bool,
    pub upgrade: UpgradePolicy,
    pub logs_dir: Utf8PathBuf,
    pub deny: Vec<FixTarget>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: NgstepConfig,
}

impl ConfigMerger {
    pub fn new(config: NgstepConfig) -> Self {
        Self { config }
    }

    /// Merge with migrate command arguments.
    ///
    /// Flags given on the CLI override the file. The CLI deny list extends
    /// the file's. Unknown fix names are an error.
    pub fn merge_migrate_args(self, cli: MigrateOverrides) -> anyhow::Result<MergedConfig> {
        let mut names = self.config.fixes.deny;
        for name in cli.deny {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        let deny = names
            .iter()
            .map(|name| {
                name.parse::<FixTarget>()
                    .context("invalid entry in fix deny list")
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(MergedConfig {
            fix: cli.fix.unwrap_or(self.config.migrate.fix),
            pause: cli.pause.unwrap_or(self.config.migrate.pause),
            upgrade: cli.upgrade.unwrap_or(self.config.migrate.upgrade).into(),
            logs_dir: cli
                .logs_dir
                .or(self.config.migrate.logs_dir)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LOGS_DIR)),
            deny,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
[migrate]
fix = true
pause = true
upgrade = "ask"
logs_dir = "reports/ng"

[fixes]
deny = ["tsTargetModernize", "httpModuleFix"]
"#,
        )
        .unwrap();

        assert!(config.migrate.fix);
        assert!(config.migrate.pause);
        assert_eq!(config.migrate.upgrade, UpgradeMode::Ask);
        assert_eq!(config.migrate.logs_dir.as_deref(), Some(Utf8Path::new("reports/ng")));
        assert_eq!(config.fixes.deny.len(), 2);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(!config.migrate.fix);
        assert_eq!(config.migrate.upgrade, UpgradeMode::Never);
        assert!(config.fixes.deny.is_empty());
    }

    #[test]
    fn test_rejects_unknown_upgrade_mode() {
        assert!(parse_config("[migrate]\nupgrade = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let config = parse_config("[migrate]\nfix = true\nupgrade = \"always\"\n").unwrap();
        let merged = ConfigMerger::new(config)
            .merge_migrate_args(MigrateOverrides {
                fix: Some(false),
                upgrade: Some(UpgradeMode::Never),
                ..MigrateOverrides::default()
            })
            .unwrap();

        assert!(!merged.fix);
        assert_eq!(merged.upgrade, UpgradePolicy::Never);
        assert_eq!(merged.logs_dir, Utf8PathBuf::from("migration-logs"));
    }

    #[test]
    fn test_file_used_when_cli_silent() {
        let config = parse_config("[migrate]\npause = true\nlogs_dir = \"out\"\n").unwrap();
        let merged = ConfigMerger::new(config)
            .merge_migrate_args(MigrateOverrides::default())
            .unwrap();

        assert!(merged.pause);
        assert_eq!(merged.logs_dir, Utf8PathBuf::from("out"));
    }

    #[test]
    fn test_deny_lists_are_combined() {
        let config = parse_config("[fixes]\ndeny = [\"httpModuleFix\"]\n").unwrap();
        let merged = ConfigMerger::new(config)
            .merge_migrate_args(MigrateOverrides {
                deny: vec!["httpModuleFix".to_string(), "forceIvyFix".to_string()],
                ..MigrateOverrides::default()
            })
            .unwrap();

        assert_eq!(
            merged.deny,
            vec![FixTarget::HttpModuleFix, FixTarget::ForceIvyFix]
        );
    }

    #[test]
    fn test_unknown_deny_entry_is_an_error() {
        let config = parse_config("[fixes]\ndeny = [\"noSuchFix\"]\n").unwrap();
        let err = ConfigMerger::new(config)
            .merge_migrate_args(MigrateOverrides::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("noSuchFix"));
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        assert!(discover_config(&root).is_none());

        fs::write(root.join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(discover_config(&root), Some(root.join(CONFIG_FILE_NAME)));
    }
}
