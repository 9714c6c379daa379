use super::flag;
use crate::checks::{self, TS_HTML_JSON};
use crate::ports::RepoView;
use crate::registry::Rule;
use camino::Utf8Path;
use ngstep_types::{Finding, FixTarget, ScanResult};

pub struct Angular12To13;

const WEBPACK_CONFIGS: &[&str] = &["webpack.config.js", "extra-webpack.config.js"];

impl Rule for Angular12To13 {
    fn name(&self) -> String {
        "angular-12-to-13".to_string()
    }

    fn scan(&self, repo: &dyn RepoView) -> anyhow::Result<ScanResult> {
        let mut out = ScanResult::new();
        flag(
            &mut out,
            checks::scan(repo, checks::ENABLE_IVY_FALSE, TS_HTML_JSON)?,
            "ViewEngine / enableIvy:false still present",
            Some(FixTarget::ForceIvyFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::ENTRY_COMPONENTS, TS_HTML_JSON)?,
            "entryComponents still used",
            Some(FixTarget::EntryComponentsFix),
        );
        if WEBPACK_CONFIGS
            .iter()
            .any(|f| repo.exists(Utf8Path::new(f)))
        {
            out.push(Finding::note(
                "⚠ Custom Webpack config detected — verify Webpack 5 compatibility manually",
            ));
            out.request(FixTarget::WebpackConfigReview);
        }
        flag(
            &mut out,
            checks::scan(repo, r"writeValue\s*\(\s*value\?\s*:\s*any", TS_HTML_JSON)?,
            "ControlValueAccessor \"writeValue?\" signature deprecated",
            Some(FixTarget::CvaSignatureReview),
        );
        flag(
            &mut out,
            checks::scan(repo, r"<ph\s+name=", TS_HTML_JSON)?,
            "Legacy i18n message identifier format detected",
            Some(FixTarget::I18nIdReview),
        );
        flag(
            &mut out,
            checks::legacy_ts_targets(repo),
            "tsconfig target \"es5\" → modernize recommended",
            Some(FixTarget::TsTargetModernize),
        );
        Ok(out)
    }
}
