use super::flag;
use crate::checks::{self, TS_HTML_JSON};
use crate::ports::RepoView;
use crate::registry::Rule;
use ngstep_types::{Finding, FixTarget, ScanResult};

pub struct Angular15To16;

impl Rule for Angular15To16 {
    fn name(&self) -> String {
        "angular-15-to-16".to_string()
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
            "tsconfig target \"es5\" — prefer \"es2015\" or later for Angular 16",
            Some(FixTarget::TsTargetModernize),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::RXJS_COMPAT, TS_HTML_JSON)?,
            "rxjs-compat usage detected (RxJS 7+ recommended)",
            Some(FixTarget::RxjsCompatRemovalFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::BARE_MODULE_WITH_PROVIDERS, &[".ts"])?,
            "ModuleWithProviders without generic type detected",
            Some(FixTarget::ModuleWithProvidersGenericFix),
        );
        if checks::has_module_bootstrap(repo) {
            out.push(Finding::note(
                "ℹ Angular 16: Standalone bootstrap is recommended but optional. Consider migrating from NgModule-based bootstrap to standalone.",
            ));
        }
        flag(
            &mut out,
            checks::scan(repo, checks::ZONE_JS, TS_HTML_JSON)?,
            "ℹ zone.js detected → Angular 16 supports zoneless apps (optional). Review if you want to migrate",
            None,
        );
        Ok(out)
    }
}
