use super::flag;
use crate::checks;
use crate::ports::RepoView;
use crate::registry::Rule;
use ngstep_types::{Finding, FixTarget, ScanResult};

pub struct Angular18To19;

impl Rule for Angular18To19 {
    fn name(&self) -> String {
        "angular-18-to-19".to_string()
    }

    fn scan(&self, repo: &dyn RepoView) -> anyhow::Result<ScanResult> {
        let mut out = ScanResult::new();
        if let Some(raw) = checks::declared_typescript(repo)
            && checks::typescript_needs_upgrade(&raw)
        {
            out.push(Finding::at(
                format!(
                    "TypeScript version appears to be \"{raw}\". Angular 19 expects TypeScript 5.6+."
                ),
                "package.json",
            ));
            out.request(FixTarget::Typescript56Upgrade);
        }
        if checks::read_raw(repo, "angular.json")
            .is_some_and(|text| text.contains(checks::PROTRACTOR_BUILDER))
        {
            out.push(Finding::at(
                "Protractor builder detected in angular.json (removed in Angular 19). Migrate e2e tests to a supported runner.",
                "angular.json",
            ));
            out.request(FixTarget::ProtractorBuilderReview);
        }
        flag(
            &mut out,
            checks::legacy_ts_targets(repo),
            "tsconfig target \"es5\" detected → modernize recommended",
            Some(FixTarget::TsTargetModernize),
        );
        Ok(out)
    }
}
