//! Rendering helpers (markdown and terminal) for migration steps.

use chrono::{DateTime, SecondsFormat, Utc};
use ngstep_types::{EditOutcome, Finding, FixRun, FixStatus, MigrationStepReport};

const REQUIRED_PREVIEW: usize = 5;
const OPTIONAL_PREVIEW: usize = 3;

/// Full markdown report for one step, written whole to the logs directory.
pub fn render_step_md(report: &MigrationStepReport, generated_at: DateTime<Utc>) -> String {
    let required: Vec<&Finding> = report.required().collect();
    let optional: Vec<&Finding> = report.optional().collect();

    let mut out = String::new();
    out.push_str(&format!(
        "# Angular {} → {} migration report\n\n",
        report.transition.from(),
        report.transition.to()
    ));
    out.push_str(&format!(
        "- Generated: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str(&format!("- Required issues: {}\n", required.len()));
    out.push_str(&format!("- Suggestions: {}\n", optional.len()));
    out.push_str(&format!("- Fix targets: {}\n\n", report.fix_targets.len()));

    out.push_str("## Findings\n\n");
    if report.findings.is_empty() {
        out.push_str("_No deprecated or risky usage found._\n\n");
    } else {
        push_findings(&mut out, "### Required", &required);
        push_findings(&mut out, "### Optional", &optional);
    }

    out.push_str("## Fix targets\n\n");
    if report.fix_targets.is_empty() {
        out.push_str("_None requested._\n\n");
    } else {
        for target in &report.fix_targets {
            out.push_str(&format!("- `{}`\n", target));
        }
        out.push('\n');
    }

    out.push_str("## Fixes applied\n\n");
    match &report.fixes {
        None => out.push_str("_Not run: fixes were disabled for this step._\n"),
        Some(run) => {
            out.push_str(&format!("- Files changed: {}\n", report.fixes_applied));
            if !run.entries.is_empty() {
                out.push('\n');
            }
            for entry in &run.entries {
                match &entry.status {
                    FixStatus::Applied { batch } => {
                        out.push_str(&format!(
                            "### `{}`\n\n- Status: `applied`\n- Files changed: {}\n",
                            entry.name,
                            batch.changed_count()
                        ));
                        for file in &batch.files {
                            match &file.outcome {
                                EditOutcome::Changed => {
                                    out.push_str(&format!("  - `{}` changed\n", file.path));
                                }
                                EditOutcome::Skipped { reason } => {
                                    out.push_str(&format!(
                                        "  - `{}` skipped: {}\n",
                                        file.path, reason
                                    ));
                                }
                                EditOutcome::Unchanged => {}
                            }
                        }
                    }
                    FixStatus::Reviewed { guidance } => {
                        out.push_str(&format!(
                            "### `{}`\n\n- Status: `review`\n\n{}\n",
                            entry.name, guidance
                        ));
                    }
                    FixStatus::Unhandled => {
                        out.push_str(&format!(
                            "### `{}`\n\n- Status: `no handler`\n",
                            entry.name
                        ));
                    }
                    FixStatus::Denied => {
                        out.push_str(&format!("### `{}`\n\n- Status: `denied`\n", entry.name));
                    }
                }
                out.push('\n');
            }
        }
    }

    out
}

fn push_findings(out: &mut String, heading: &str, findings: &[&Finding]) {
    if findings.is_empty() {
        return;
    }
    out.push_str(&format!("{heading}\n\n"));
    for f in findings {
        match &f.locator {
            Some(loc) => out.push_str(&format!("- {} → `{}`\n", f.message, loc)),
            None => out.push_str(&format!("- {}\n", f.message)),
        }
    }
    out.push('\n');
}

/// Short per-step summary for the terminal.
pub fn render_terminal_summary(report: &MigrationStepReport) -> String {
    let required: Vec<String> = report.required().map(ToString::to_string).collect();
    let optional: Vec<String> = report.optional().map(ToString::to_string).collect();

    let mut out = String::new();
    out.push_str(&format!("\n📌 Summary for {}\n", report.transition));
    out.push_str(&format!(
        "  🔧 Autofixes applied: {}\n",
        report.fixes_applied
    ));
    out.push_str(&format!("  🚨 Required issues: {}\n", required.len()));
    out.push_str(&format!("  💡 Suggestions: {}\n", optional.len()));
    push_preview(&mut out, "\n🚨 Required:\n", &required, REQUIRED_PREVIEW);
    push_preview(&mut out, "\n💡 Optional:\n", &optional, OPTIONAL_PREVIEW);
    out
}

fn push_preview(out: &mut String, heading: &str, items: &[String], limit: usize) {
    if items.is_empty() {
        return;
    }
    out.push_str(heading);
    for item in items.iter().take(limit) {
        out.push_str(&format!("  - {}\n", item));
    }
    if items.len() > limit {
        out.push_str(&format!("  ...and {} more\n", items.len() - limit));
    }
}

/// Dispatcher log: what was requested, what each fix did, and the total.
pub fn render_fix_run(run: &FixRun) -> String {
    if run.entries.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = run.entries.iter().map(|e| e.name.as_str()).collect();
    let mut out = format!("\n🛠 Autofixer requested for: {}\n", names.join(", "));
    for entry in &run.entries {
        match &entry.status {
            FixStatus::Applied { batch } => {
                for path in batch.changed_paths() {
                    out.push_str(&format!("🔧 Auto-fix {}: updated {}\n", entry.name, path));
                }
                for (path, reason) in batch.skipped_files() {
                    out.push_str(&format!("⚠ {}: skipped {} ({})\n", entry.name, path, reason));
                }
            }
            FixStatus::Reviewed { guidance } => {
                out.push_str(guidance);
                out.push('\n');
            }
            FixStatus::Unhandled => out.push_str(&format!(
                "⚠ No autofix handler implemented yet for \"{}\".\n",
                entry.name
            )),
            FixStatus::Denied => {
                out.push_str(&format!("⏭ {} disabled by configuration.\n", entry.name));
            }
        }
    }
    match run.total_changed() {
        0 => out.push_str("\nℹ Autofixer executed, but no file changes were required.\n"),
        n => out.push_str(&format!("\n✨ Total real changes applied: {n}\n")),
    }
    out
}
