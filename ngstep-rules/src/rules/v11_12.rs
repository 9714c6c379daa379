use super::flag;
use crate::checks::{self, TS_JSON};
use crate::ports::RepoView;
use crate::registry::Rule;
use ngstep_types::{FixTarget, ScanResult};

pub struct Angular11To12;

impl Rule for Angular11To12 {
    fn name(&self) -> String {
        "angular-11-to-12".to_string()
    }

    fn scan(&self, repo: &dyn RepoView) -> anyhow::Result<ScanResult> {
        let mut out = ScanResult::new();
        flag(
            &mut out,
            checks::ie11_locations(repo),
            "IE11 is still targeted in browserslist",
            Some(FixTarget::Ie11BrowserslistCleanup),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::ENABLE_IVY_FALSE, TS_JSON)?,
            "ViewEngine / enableIvy:false usage detected",
            Some(FixTarget::ForceIvyFix),
        );
        flag(
            &mut out,
            checks::legacy_ts_targets(repo),
            "TypeScript target \"es5\" detected (consider modern target)",
            Some(FixTarget::TsTargetModernize),
        );
        flag(
            &mut out,
            checks::scan(repo, r"\brequire\(", &[".ts"])?,
            "CommonJS-style \"require()\" detected (may cause Angular CLI warnings)",
            Some(FixTarget::CommonJsUsageReview),
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
    fn flags_ie11_in_every_browserslist_location() {
        let repo = TestRepo::new(&[
            (".browserslistrc", "last 2 Chrome versions\nIE 11\n"),
            (
                "package.json",
                r#"{"browserslist": {"production": ["> 0.5%", "ie 11"], "development": ["last 1 chrome version"]}}"#,
            ),
        ]);

        let scan = Angular11To12.scan(&repo).expect("scan");
        assert_eq!(
            lines(&scan),
            vec![
                "IE11 is still targeted in browserslist → .browserslistrc",
                "IE11 is still targeted in browserslist → package.json → browserslist.production[]",
            ]
        );
        assert_eq!(scan.fix_targets, vec![FixTarget::Ie11BrowserslistCleanup]);
    }

    #[test]
    fn flags_es5_tsconfig_with_comments_and_require() {
        let repo = TestRepo::new(&[
            (
                "tsconfig.json",
                "/* To learn more about this file see: https://angular.io/config/tsconfig. */\n{\n  \"compilerOptions\": { \"target\": \"es5\" }\n}\n",
            ),
            ("src/polyfills.ts", "const x = require('x');\n"),
        ]);

        let scan = Angular11To12.scan(&repo).expect("scan");
        assert_eq!(
            scan.fix_targets,
            vec![FixTarget::TsTargetModernize, FixTarget::CommonJsUsageReview]
        );
        assert_eq!(scan.findings[0].locator.as_deref(), Some("tsconfig.json"));
    }
}
