use crate::fixes;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use ngstep_types::{EditBatch, FixRun, FixStatus, FixTarget};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Routine behind a fix target.
#[derive(Clone, Copy)]
pub enum Handler {
    /// Rewrites files under the root and reports what changed.
    Counting(fn(&Utf8Path) -> anyhow::Result<EditBatch>),
    /// Never touches files; the guidance is shown to the user instead.
    ReviewOnly(&'static str),
}

const COMMONJS_GUIDANCE: &str = "ℹ commonJsUsageReview: Detected require() usage. Manual review is recommended; automatic conversion is not implemented yet.";
const PROTRACTOR_GUIDANCE: &str = "ℹ protractorBuilderReview: Angular 19 removed the Protractor builder. Migrate your e2e tests to a supported runner (e.g. Cypress, Playwright, Web Test Runner) and remove the Protractor configuration from angular.json.";

/// The handler for `target`, or `None` for informational targets.
pub fn handler_for(target: FixTarget) -> Option<Handler> {
    use Handler::{Counting, ReviewOnly};
    match target {
        FixTarget::ForceIvyFix => Some(Counting(fixes::ivy::apply)),
        FixTarget::HttpModuleFix => Some(Counting(fixes::http_module::apply)),
        FixTarget::EntryComponentsFix => Some(Counting(fixes::entry_components::apply)),
        FixTarget::Ie11BrowserslistCleanup => Some(Counting(fixes::browserslist::apply)),
        FixTarget::TsTargetModernize => Some(Counting(fixes::ts_target::apply)),
        FixTarget::AnimationModuleFix => Some(Counting(fixes::animation::apply)),
        FixTarget::RxjsCompatRemovalFix => Some(Counting(fixes::rxjs_compat::apply)),
        FixTarget::ModuleWithProvidersGenericFix => {
            Some(Counting(fixes::module_with_providers::apply))
        }
        FixTarget::Typescript56Upgrade => Some(Counting(fixes::typescript::apply)),
        FixTarget::CommonJsUsageReview => Some(ReviewOnly(COMMONJS_GUIDANCE)),
        FixTarget::ProtractorBuilderReview => Some(ReviewOnly(PROTRACTOR_GUIDANCE)),
        FixTarget::RendererFix
        | FixTarget::WebpackConfigReview
        | FixTarget::CvaSignatureReview
        | FixTarget::I18nIdReview
        | FixTarget::AnimationModuleReview
        | FixTarget::RouterStrictOptionsReview
        | FixTarget::RxjsCompatRemovalReview
        | FixTarget::ModuleWithProvidersGenericReview => None,
    }
}

/// Runs requested fixes in order against one project root.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    deny: BTreeSet<FixTarget>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that records `deny`ed targets without running them.
    pub fn with_denied(deny: impl IntoIterator<Item = FixTarget>) -> Self {
        Self {
            deny: deny.into_iter().collect(),
        }
    }

    /// Run each target's handler in request order. File paths in the result
    /// are relative to `root`.
    ///
    /// Per-file problems are recorded in the returned batches. An error from a
    /// handler itself stops the run.
    pub fn apply(&self, root: &Utf8Path, targets: &[FixTarget]) -> anyhow::Result<FixRun> {
        let mut run = FixRun::new();
        if targets.is_empty() {
            return Ok(run);
        }
        info!(
            requested = %targets.iter().map(FixTarget::as_str).collect::<Vec<_>>().join(", "),
            "running fixes"
        );
        for target in targets {
            let status = self.run_one(root, *target)?;
            run.push(target.as_str(), status);
        }
        info!(changed = run.total_changed(), "fixes finished");
        Ok(run)
    }

    /// Like [`apply`](Self::apply) for names that may not be known targets.
    /// Unknown names are recorded as unhandled.
    pub fn apply_named(&self, root: &Utf8Path, names: &[String]) -> anyhow::Result<FixRun> {
        let mut run = FixRun::new();
        for name in names {
            let status = match name.parse::<FixTarget>() {
                Ok(target) => self.run_one(root, target)?,
                Err(_) => {
                    debug!(fix = %name, "unknown fix name");
                    FixStatus::Unhandled
                }
            };
            run.push(name.clone(), status);
        }
        Ok(run)
    }

    fn run_one(&self, root: &Utf8Path, target: FixTarget) -> anyhow::Result<FixStatus> {
        if self.deny.contains(&target) {
            info!(fix = %target, "fix denied by configuration");
            return Ok(FixStatus::Denied);
        }
        match handler_for(target) {
            Some(Handler::Counting(fix)) => {
                let mut batch = fix(root).with_context(|| format!("fix {target}"))?;
                for file in &mut batch.files {
                    file.path = Utf8PathBuf::from(ngstep_scan::relative_to(root, &file.path));
                }
                for (path, reason) in batch.skipped_files() {
                    info!(fix = %target, path = %path, reason, "file skipped");
                }
                info!(fix = %target, changed = batch.changed_count(), "fix applied");
                Ok(FixStatus::Applied { batch })
            }
            Some(Handler::ReviewOnly(guidance)) => {
                info!(fix = %target, "review only");
                Ok(FixStatus::Reviewed {
                    guidance: guidance.to_string(),
                })
            }
            None => {
                debug!(fix = %target, "no handler");
                Ok(FixStatus::Unhandled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_temp_repo;
    use ngstep_types::FixKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn handler_shape_agrees_with_fix_kind() {
        for target in FixTarget::ALL {
            let shape = match handler_for(*target) {
                Some(Handler::Counting(_)) => FixKind::Counting,
                Some(Handler::ReviewOnly(_)) => FixKind::ReviewOnly,
                None => FixKind::Informational,
            };
            assert_eq!(shape, target.kind(), "{target}");
        }
    }

    #[test]
    fn review_and_informational_targets_change_nothing() {
        let (_temp, root) = create_temp_repo(&[("src/main.ts", "const fs = require('fs');\n")]);
        let run = Dispatcher::new()
            .apply(
                &root,
                &[FixTarget::CommonJsUsageReview, FixTarget::RendererFix],
            )
            .expect("dispatch");

        assert_eq!(run.total_changed(), 0);
        assert!(matches!(run.entries[0].status, FixStatus::Reviewed { .. }));
        assert_eq!(run.entries[1].status, FixStatus::Unhandled);
    }

    #[test]
    fn denied_targets_do_not_run() {
        let (_temp, root) = create_temp_repo(&[(
            "tsconfig.json",
            "{\"compilerOptions\": {\"target\": \"es5\"}}",
        )]);
        let run = Dispatcher::with_denied([FixTarget::TsTargetModernize])
            .apply(&root, &[FixTarget::TsTargetModernize])
            .expect("dispatch");

        assert_eq!(run.entries[0].status, FixStatus::Denied);
        assert_eq!(run.total_changed(), 0);
    }

    #[test]
    fn unknown_names_are_unhandled() {
        let (_temp, root) = create_temp_repo(&[]);
        let run = Dispatcher::new()
            .apply_named(&root, &["rxjsOperatorFix".to_string()])
            .expect("dispatch");
        assert_eq!(run.entries[0].name, "rxjsOperatorFix");
        assert_eq!(run.entries[0].status, FixStatus::Unhandled);
    }
}
