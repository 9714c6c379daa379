mod config;
mod explain;
mod prompt;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MigrateOverrides, UpgradeMode};
use ngstep_core::adapters::{AutoGate, FsWritePort, NpxUpgradeTool};
use ngstep_core::pipeline::{MigrationPorts, RunStatus, run_migration, scan_step};
use ngstep_core::ports::{StepGate, StepObserver};
use ngstep_core::settings::MigrateSettings;
use ngstep_core::version::{detect_current_major, parse_target};
use ngstep_core::{MigrationError, RuleRegistry};
use ngstep_render::{render_fix_run, render_terminal_summary};
use ngstep_types::{MigrationStepReport, VersionTransition};
use prompt::PromptGate;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ngstep",
    version,
    about = "Step-by-step Angular major-version migration assistant."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan version steps and print findings without changing anything.
    Scan(ScanArgs),
    /// Migrate one major version at a time, writing a report per step.
    Migrate(MigrateArgs),
    /// Write analysis reports for every step; no fixes, no upgrades.
    Logs(LogsArgs),
    /// Explain what a fix does and how to remediate by hand.
    Explain(ExplainArgs),
    /// List all fix targets with how they are handled.
    ListFixes(ListFixesArgs),
}

#[derive(Debug, Parser)]
struct ScanArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Version to scan from (default: detected from package.json).
    #[arg(long)]
    from: Option<u32>,

    /// Version to scan up to (default: one above `--from`).
    #[arg(long)]
    to: Option<u32>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct MigrateArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Current Angular major (default: detected from package.json).
    #[arg(long)]
    from: Option<u32>,

    /// Target Angular major version.
    #[arg(long)]
    to: String,

    /// Apply fixes after each scan.
    #[arg(long, overrides_with = "no_fix")]
    fix: bool,

    /// Only scan and report, even if ngstep.toml enables fixes.
    #[arg(long, overrides_with = "fix")]
    no_fix: bool,

    /// Ask before moving on to the next step.
    #[arg(long, overrides_with = "no_pause")]
    pause: bool,

    /// Run every step without asking.
    #[arg(long, overrides_with = "pause")]
    no_pause: bool,

    /// When to run `ng update` before each step.
    #[arg(long, value_enum)]
    upgrade: Option<UpgradeMode>,

    /// Report directory (default: <repo_root>/migration-logs).
    #[arg(long)]
    logs_dir: Option<Utf8PathBuf>,

    /// Fix names that must not run (repeatable).
    #[arg(long)]
    deny: Vec<String>,

    /// Answer yes to every prompt.
    #[arg(long, short = 'y')]
    yes: bool,
}

#[derive(Debug, Parser)]
struct LogsArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Current Angular major (default: detected from package.json).
    #[arg(long)]
    from: Option<u32>,

    /// Target Angular major version.
    #[arg(long)]
    to: String,

    /// Report directory (default: <repo_root>/migration-logs).
    #[arg(long)]
    logs_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Fix name to explain (e.g., "httpModuleFix").
    fix_key: String,
}

#[derive(Debug, Parser)]
struct ListFixesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<MigrationError>()
                .map_or(1, MigrationError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Scan(args) => cmd_scan(args),
        Command::Migrate(args) => cmd_migrate(args),
        Command::Logs(args) => cmd_logs(args),
        Command::Explain(args) => cmd_explain(args),
        Command::ListFixes(args) => cmd_list_fixes(args),
    }
}

fn cmd_scan(args: ScanArgs) -> anyhow::Result<ExitCode> {
    let from = match args.from {
        Some(from) => from,
        None => detect_current_major(&args.repo_root)?,
    };
    let to = args.to.unwrap_or(from + 1);
    if to <= from {
        return Err(MigrationError::InvalidRange { from, to }.into());
    }

    let registry = RuleRegistry::builtin();
    let reports = VersionTransition::steps(from, to)
        .map(|step| scan_step(&args.repo_root, &registry, step, None))
        .collect::<anyhow::Result<Vec<_>>>()?;

    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                print!("{}", render_terminal_summary(report));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_migrate(args: MigrateArgs) -> anyhow::Result<ExitCode> {
    let to = parse_target(&args.to)?;
    let file_config =
        config::load_or_default(&args.repo_root).context("load ngstep.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_migrate_args(MigrateOverrides {
        fix: flag_pair(args.fix, args.no_fix),
        pause: flag_pair(args.pause, args.no_pause),
        upgrade: args.upgrade,
        logs_dir: args.logs_dir,
        deny: args.deny,
    })?;
    debug!(?merged, "merged config");

    let settings = MigrateSettings {
        repo_root: args.repo_root,
        from: args.from,
        to,
        apply_fixes: merged.fix,
        deny: merged.deny,
        upgrade: merged.upgrade,
        pause: merged.pause,
        logs_dir: merged.logs_dir,
    };
    let gate: &dyn StepGate = if args.yes { &AutoGate } else { &PromptGate };
    run_steps(&settings, Mode::Migrate, gate)
}

fn cmd_logs(args: LogsArgs) -> anyhow::Result<ExitCode> {
    let to = parse_target(&args.to)?;
    let file_config =
        config::load_or_default(&args.repo_root).context("load ngstep.toml config")?;
    let logs_dir = args
        .logs_dir
        .or(file_config.migrate.logs_dir)
        .unwrap_or_else(|| MigrateSettings::default().logs_dir);

    let settings = MigrateSettings {
        from: args.from,
        logs_dir,
        ..MigrateSettings::logs_only(args.repo_root, to)
    };
    run_steps(&settings, Mode::Logs, &AutoGate)
}

/// `--flag` / `--no-flag` pair; `None` when neither was given.
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Migrate,
    Logs,
}

impl Mode {
    fn noun(self) -> &'static str {
        match self {
            Mode::Migrate => "Migration",
            Mode::Logs => "Analysis",
        }
    }
}

/// Prints step progress to stdout.
struct ConsoleObserver {
    mode: Mode,
}

impl StepObserver for ConsoleObserver {
    fn step_started(&self, step: VersionTransition) {
        match self.mode {
            Mode::Migrate => println!("\n🚀 Migrating Angular {step}"),
            Mode::Logs => println!("\n🔍 Analyzing Angular {step}"),
        }
    }

    fn upgrade_started(&self, _step: VersionTransition, command: &str) {
        println!("⚙ Running Angular CLI: {command}");
    }

    fn upgrade_skipped(&self, step: VersionTransition) {
        println!("⏭ Skipping ng update for {step}");
    }

    fn step_finished(&self, report: &MigrationStepReport, report_path: &Utf8Path) {
        match &report.fixes {
            Some(run) => print!("{}", render_fix_run(run)),
            None if self.mode == Mode::Migrate => {
                println!("⚠ Autofixer disabled — no code changes will be made for this step.");
            }
            None => {}
        }
        print!("{}", render_terminal_summary(report));
        println!("📄 Log saved: {report_path}");
    }
}

fn run_steps(
    settings: &MigrateSettings,
    mode: Mode,
    gate: &dyn StepGate,
) -> anyhow::Result<ExitCode> {
    let registry = RuleRegistry::builtin();
    let observer = ConsoleObserver { mode };
    let upgrade = NpxUpgradeTool;
    let writer = FsWritePort;

    let outcome = run_migration(
        settings,
        &registry,
        MigrationPorts {
            upgrade: &upgrade,
            gate,
            writer: &writer,
            observer: &observer,
        },
    )?;

    match outcome.status {
        RunStatus::Completed => {
            println!(
                "\n✅ {} complete: Angular {} → {}",
                mode.noun(),
                outcome.from,
                outcome.to
            );
            if settings.apply_fixes {
                println!("🔧 Total fixes applied: {}", outcome.total_fixes_applied());
            }
            println!("📁 Reports saved in {}", settings.logs_path());
            Ok(ExitCode::SUCCESS)
        }
        RunStatus::Stopped { after } => {
            debug!(after = %after, "stopped");
            println!("\n🛑 Migration stopped by user.");
            Ok(ExitCode::SUCCESS)
        }
        RunStatus::Failed(err) => {
            if let Some(step) = err.step() {
                eprintln!("\n💥 {} failed at step {}", mode.noun(), step);
            }
            Err(err.into())
        }
    }
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<ExitCode> {
    use explain::{format_kind, kind_meaning, list_fix_keys, lookup_fix};

    let Some(fix) = lookup_fix(&args.fix_key) else {
        let available = list_fix_keys().join(", ");
        anyhow::bail!(
            "Unknown fix key: '{}'\n\nAvailable fixes: {}",
            args.fix_key,
            available
        );
    };

    println!("================================================================================");
    println!("FIX: {}", fix.title);
    println!("================================================================================");
    println!();
    println!("Key:     {}", fix.key());
    println!("Kind:    {}", format_kind(fix.kind()));
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", fix.description);
    println!();

    println!("KIND: {}", format_kind(fix.kind()));
    println!("--------------------------------------------------------------------------------");
    println!("{}", kind_meaning(fix.kind()));
    println!();

    println!("REMEDIATION GUIDANCE");
    println!("--------------------------------------------------------------------------------");
    println!("{}", fix.remediation);
    println!();

    Ok(ExitCode::SUCCESS)
}

fn cmd_list_fixes(args: ListFixesArgs) -> anyhow::Result<ExitCode> {
    use explain::{FIX_REGISTRY, format_kind};

    match args.format {
        OutputFormat::Text => {
            println!("Available fixes:\n");
            println!("  {:<34} {:<8} TITLE", "KEY", "KIND");
            println!("  {:<34} {:<8} -----", "---", "----");
            for fix in FIX_REGISTRY {
                println!(
                    "  {:<34} {:<8} {}",
                    fix.key(),
                    format_kind(fix.kind()),
                    fix.title
                );
            }
            println!();
            println!("Use 'ngstep explain <key>' for details.");
        }
        OutputFormat::Json => {
            let fixes: Vec<_> = FIX_REGISTRY
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "key": f.key(),
                        "title": f.title,
                        "kind": f.kind(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&fixes)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
