use super::flag;
use crate::checks::{self, TS_HTML_JSON};
use crate::ports::RepoView;
use crate::registry::Rule;
use ngstep_types::{Finding, FixTarget, ScanResult};

pub struct Angular14To15;

impl Rule for Angular14To15 {
    fn name(&self) -> String {
        "angular-14-to-15".to_string()
    }

    fn scan(&self, repo: &dyn RepoView) -> anyhow::Result<ScanResult> {
        let mut out = ScanResult::new();
        flag(
            &mut out,
            checks::scan(repo, checks::ENTRY_COMPONENTS, TS_HTML_JSON)?,
            "entryComponents still used",
            Some(FixTarget::EntryComponentsFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::HTTP_MODULE, TS_HTML_JSON)?,
            "HttpModule detected (use HttpClientModule)",
            Some(FixTarget::HttpModuleFix),
        );
        flag(
            &mut out,
            checks::legacy_ts_targets(repo),
            "tsconfig target \"es5\" — prefer \"es2015\" or later",
            Some(FixTarget::TsTargetModernize),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::ANIMATION_FOR_ROOT, TS_HTML_JSON)?,
            "AnimationModule.forRoot is not supported → use provideAnimations() instead",
            Some(FixTarget::AnimationModuleReview),
        );
        flag(
            &mut out,
            checks::scan(repo, r"\bBrowserAnimationsModule\b", TS_HTML_JSON)?,
            "ℹ BrowserAnimationsModule detected — consider `provideAnimations()` (optional)",
            None,
        );
        flag(
            &mut out,
            checks::scan(repo, r"RouterModule\.forRoot", TS_HTML_JSON)?,
            "RouterModule.forRoot: review strict options for Angular 15 (optional)",
            Some(FixTarget::RouterStrictOptionsReview),
        );
        out.push(Finding::note(
            "ℹ Angular 15 supports standalone apps — conversion is optional (no breaking change).",
        ));
        Ok(out)
    }
}
