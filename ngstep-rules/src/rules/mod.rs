//! One rule per Angular major-version step.

mod v10_11;
mod v11_12;
mod v12_13;
mod v13_14;
mod v14_15;
mod v15_16;
mod v16_17;
mod v17_18;
mod v18_19;

pub use v10_11::Angular10To11;
pub use v11_12::Angular11To12;
pub use v12_13::Angular12To13;
pub use v13_14::Angular13To14;
pub use v14_15::Angular14To15;
pub use v15_16::Angular15To16;
pub use v16_17::Angular16To17;
pub use v17_18::Angular17To18;
pub use v18_19::Angular18To19;

use ngstep_types::{FixTarget, ScanResult};

/// Record `hits` under `message` and request `target` when there are any.
fn flag(out: &mut ScanResult, hits: Vec<String>, message: &str, target: Option<FixTarget>) {
    if hits.is_empty() {
        return;
    }
    out.push_all(message, hits);
    if let Some(target) = target {
        out.request(target);
    }
}

#[cfg(test)]
pub(crate) mod test_repo {
    use crate::ports::RepoView;
    use camino::{Utf8Path, Utf8PathBuf};
    use ngstep_scan::Pattern;
    use std::collections::BTreeMap;

    /// In-memory project keyed by forward-slash relative path.
    pub struct TestRepo {
        root: Utf8PathBuf,
        files: BTreeMap<String, String>,
    }

    impl TestRepo {
        pub fn new(files: &[(&str, &str)]) -> Self {
            Self {
                root: Utf8PathBuf::from("."),
                files: files
                    .iter()
                    .map(|(p, c)| (p.to_string(), c.to_string()))
                    .collect(),
            }
        }
    }

    impl RepoView for TestRepo {
        fn root(&self) -> &Utf8Path {
            &self.root
        }

        fn read_to_string(&self, rel: &Utf8Path) -> anyhow::Result<String> {
            self.files
                .get(rel.as_str())
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("missing {}", rel))
        }

        fn exists(&self, rel: &Utf8Path) -> bool {
            self.files.contains_key(rel.as_str())
        }

        fn find(&self, pattern: &dyn Pattern, extensions: &[&str]) -> Vec<Utf8PathBuf> {
            self.files
                .iter()
                .filter(|(path, _)| {
                    !path
                        .split('/')
                        .any(|seg| ngstep_scan::EXCLUDED_DIRS.contains(&seg))
                })
                .filter(|(path, _)| ngstep_scan::has_extension(Utf8Path::new(path), extensions))
                .filter(|(_, text)| pattern.is_match(text))
                .map(|(path, _)| Utf8PathBuf::from(path))
                .collect()
        }
    }

    /// Rendered findings, for compact assertions.
    pub fn lines(scan: &ngstep_types::ScanResult) -> Vec<String> {
        scan.findings.iter().map(|f| f.to_string()).collect()
    }
}
