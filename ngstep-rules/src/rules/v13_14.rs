use super::flag;
use crate::checks::{self, TS_JSON};
use crate::ports::RepoView;
use crate::registry::Rule;
use ngstep_types::{FixTarget, ScanResult};

pub struct Angular13To14;

impl Rule for Angular13To14 {
    fn name(&self) -> String {
        "angular-13-to-14".to_string()
    }

    fn scan(&self, repo: &dyn RepoView) -> anyhow::Result<ScanResult> {
        let mut out = ScanResult::new();
        flag(
            &mut out,
            checks::scan(repo, checks::ENTRY_COMPONENTS, TS_JSON)?,
            "entryComponents still used",
            Some(FixTarget::EntryComponentsFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::ENABLE_IVY_FALSE, TS_JSON)?,
            "ViewEngine / enableIvy:false still present",
            Some(FixTarget::ForceIvyFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::RXJS_COMPAT, TS_JSON)?,
            "rxjs-compat usage detected (RxJS 7 recommended, remove compat)",
            Some(FixTarget::RxjsCompatRemovalReview),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::BARE_MODULE_WITH_PROVIDERS, &[".ts"])?,
            "ModuleWithProviders without generic type detected (consider typing)",
            Some(FixTarget::ModuleWithProvidersGenericReview),
        );
        flag(
            &mut out,
            checks::legacy_ts_targets(repo),
            "tsconfig target \"es5\" → modernize recommended",
            Some(FixTarget::TsTargetModernize),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::HTTP_MODULE, TS_JSON)?,
            "HttpModule detected (use HttpClientModule instead)",
            Some(FixTarget::HttpModuleFix),
        );
        Ok(out)
    }
}
