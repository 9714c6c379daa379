use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// What happened to one file during a batch edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EditOutcome {
    Changed,
    Unchanged,
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEdit {
    pub path: Utf8PathBuf,
    #[serde(flatten)]
    pub outcome: EditOutcome,
}

/// Per-file results of one fix routine. A skipped file never undoes the
/// files that were changed before or after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBatch {
    pub files: Vec<FileEdit>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: &Utf8Path, outcome: EditOutcome) {
        self.files.push(FileEdit {
            path: path.to_path_buf(),
            outcome,
        });
    }

    pub fn changed(&mut self, path: &Utf8Path) {
        self.record(path, EditOutcome::Changed);
    }

    pub fn unchanged(&mut self, path: &Utf8Path) {
        self.record(path, EditOutcome::Unchanged);
    }

    pub fn skipped(&mut self, path: &Utf8Path, reason: impl Into<String>) {
        self.record(
            path,
            EditOutcome::Skipped {
                reason: reason.into(),
            },
        );
    }

    pub fn merge(&mut self, other: EditBatch) {
        self.files.extend(other.files);
    }

    pub fn changed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == EditOutcome::Changed)
            .count()
    }

    pub fn changed_paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.files
            .iter()
            .filter(|f| f.outcome == EditOutcome::Changed)
            .map(|f| f.path.as_path())
    }

    pub fn skipped_files(&self) -> impl Iterator<Item = (&Utf8Path, &str)> {
        self.files.iter().filter_map(|f| match &f.outcome {
            EditOutcome::Skipped { reason } => Some((f.path.as_path(), reason.as_str())),
            _ => None,
        })
    }
}
