use super::flag;
use crate::checks::{self, TS_HTML_JSON};
use crate::ports::RepoView;
use crate::registry::Rule;
use camino::Utf8Path;
use ngstep_types::{Finding, FixTarget, ScanResult};

pub struct Angular17To18;

impl Rule for Angular17To18 {
    fn name(&self) -> String {
        "angular-17-to-18".to_string()
    }

    fn scan(&self, repo: &dyn RepoView) -> anyhow::Result<ScanResult> {
        let mut out = ScanResult::new();
        flag(
            &mut out,
            checks::scan(repo, checks::ENTRY_COMPONENTS, TS_HTML_JSON)?,
            "entryComponents still present",
            Some(FixTarget::EntryComponentsFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::HTTP_MODULE, TS_HTML_JSON)?,
            "HttpModule detected (must use HttpClientModule)",
            Some(FixTarget::HttpModuleFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::RXJS_COMPAT, TS_HTML_JSON)?,
            "rxjs-compat still used",
            Some(FixTarget::RxjsCompatRemovalFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::BARE_MODULE_WITH_PROVIDERS, &[".ts"])?,
            "ModuleWithProviders without generic type",
            Some(FixTarget::ModuleWithProvidersGenericFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::ANIMATION_FOR_ROOT, &[".ts"])?,
            "AnimationModule.forRoot detected → use provideAnimations() instead",
            Some(FixTarget::AnimationModuleFix),
        );
        flag(
            &mut out,
            checks::legacy_ts_targets(repo),
            "tsconfig target \"es5\" — update recommended",
            Some(FixTarget::TsTargetModernize),
        );
        if repo.exists(Utf8Path::new("src/app/app.module.ts")) {
            out.push(Finding::note(
                "ℹ Angular 18 recommends standalone bootstrap (NgModule bootstrap is still supported but discouraged).",
            ));
        }
        if checks::scan(repo, r"provideHttpClient\s*\(", &[".ts"])?.is_empty() {
            out.push(Finding::note(
                "ℹ Angular 18 recommends provideHttpClient() for bootstrap (optional).",
            ));
        }
        flag(
            &mut out,
            checks::scan(repo, checks::ZONE_JS, TS_HTML_JSON)?,
            "ℹ zone.js detected → Angular supports zoneless mode (optional)",
            None,
        );
        Ok(out)
    }
}
