use crate::fix::FixTarget;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One observed deprecated or risky usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub message: String,

    /// Where the pattern was observed (repo-relative path or a key path such
    /// as `package.json → browserslist[]`). `None` for project-wide notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
}

impl Finding {
    pub fn at(message: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locator: Some(locator.into()),
        }
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locator: None,
        }
    }

    /// Informational findings are suggestions; everything else is required work.
    pub fn is_optional(&self) -> bool {
        self.message.starts_with(crate::marks::INFO)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locator {
            Some(loc) => write!(f, "{} → {}", self.message, loc),
            None => f.write_str(&self.message),
        }
    }
}

/// Output of a single rule scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub fix_targets: Vec<FixTarget>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Record one finding per locator with a shared message.
    pub fn push_all<I, S>(&mut self, message: &str, locators: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.findings
            .extend(locators.into_iter().map(|loc| Finding::at(message, loc)));
    }

    /// Adds a fix target unless the scan already requested it.
    pub fn request(&mut self, target: FixTarget) {
        if !self.fix_targets.contains(&target) {
            self.fix_targets.push(target);
        }
    }

    pub fn required(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_optional())
    }

    pub fn optional(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_optional())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_joins_message_and_locator() {
        let f = Finding::at("HttpModule removed", "src/app/app.module.ts");
        assert_eq!(f.to_string(), "HttpModule removed → src/app/app.module.ts");
        assert_eq!(Finding::note("⚠ No scanning performed.").to_string(), "⚠ No scanning performed.");
    }

    #[test]
    fn request_keeps_first_occurrence_only() {
        let mut scan = ScanResult::new();
        scan.request(FixTarget::ForceIvyFix);
        scan.request(FixTarget::HttpModuleFix);
        scan.request(FixTarget::ForceIvyFix);
        assert_eq!(
            scan.fix_targets,
            vec![FixTarget::ForceIvyFix, FixTarget::HttpModuleFix]
        );
    }

    #[test]
    fn optional_split_uses_info_marker() {
        let mut scan = ScanResult::new();
        scan.push_all("entryComponents still used", ["a.ts", "b.ts"]);
        scan.push(Finding::note("ℹ Angular 15 supports standalone apps."));
        assert_eq!(scan.required().count(), 2);
        assert_eq!(scan.optional().count(), 1);
    }
}
