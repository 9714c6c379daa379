use super::flag;
use crate::checks::{self, TS_HTML_JSON};
use crate::ports::RepoView;
use crate::registry::Rule;
use ngstep_types::{Finding, FixTarget, ScanResult};

pub struct Angular16To17;

impl Rule for Angular16To17 {
    fn name(&self) -> String {
        "angular-16-to-17".to_string()
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
            "HttpModule still used (blocking future upgrades)",
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
            checks::scan(repo, r"\bBrowserAnimationsModule\b", &[".ts"])?,
            "ℹ BrowserAnimationsModule detected — consider provideAnimations()",
            None,
        );
        if checks::has_module_bootstrap(repo) {
            out.push(Finding::note(
                "ℹ Angular 17: standalone bootstrap (no NgModule) is recommended — optional migration.",
            ));
        }
        flag(
            &mut out,
            checks::scan(repo, checks::ZONE_JS, TS_HTML_JSON)?,
            "ℹ zone.js detected — Angular 17 supports \"zoneless\" mode. Optional migration",
            None,
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_repo::{TestRepo, lines};
    use pretty_assertions::assert_eq;

    #[test]
    fn legacy_http_and_entry_components_are_fixable() {
        let repo = TestRepo::new(&[(
            "src/app/app.module.ts",
            "import { HttpModule } from '@angular/http';\n@NgModule({ imports: [HttpModule], entryComponents: [Dialog] })\nexport class AppModule {}\n",
        )]);

        let scan = Angular16To17.scan(&repo).expect("scan");
        assert_eq!(
            lines(&scan),
            vec![
                "entryComponents still present → src/app/app.module.ts",
                "HttpModule still used (blocking future upgrades) → src/app/app.module.ts",
            ]
        );
        assert_eq!(
            scan.fix_targets,
            vec![FixTarget::EntryComponentsFix, FixTarget::HttpModuleFix]
        );
    }
}
