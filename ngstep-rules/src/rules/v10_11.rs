use super::flag;
use crate::checks::{self, TS_JSON};
use crate::ports::RepoView;
use crate::registry::Rule;
use ngstep_types::{FixTarget, ScanResult};

pub struct Angular10To11;

impl Rule for Angular10To11 {
    fn name(&self) -> String {
        "angular-10-to-11".to_string()
    }

    fn scan(&self, repo: &dyn RepoView) -> anyhow::Result<ScanResult> {
        let mut out = ScanResult::new();
        flag(
            &mut out,
            checks::scan(repo, r"\bRenderer\s*:", TS_JSON)?,
            "Renderer deprecated (use Renderer2)",
            Some(FixTarget::RendererFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::HTTP_MODULE, TS_JSON)?,
            "HttpModule removed",
            Some(FixTarget::HttpModuleFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::ENTRY_COMPONENTS, TS_JSON)?,
            "entryComponents deprecated",
            Some(FixTarget::EntryComponentsFix),
        );
        flag(
            &mut out,
            checks::scan(repo, checks::ENABLE_IVY_FALSE, TS_JSON)?,
            "ViewEngine removed",
            Some(FixTarget::ForceIvyFix),
        );
        Ok(out)
    }
}
