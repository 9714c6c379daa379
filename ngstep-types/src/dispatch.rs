use crate::edit::EditBatch;
use serde::{Deserialize, Serialize};

/// How the dispatcher handled one requested fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixStatus {
    /// A counting fix ran; `batch` lists what happened to each file.
    Applied { batch: EditBatch },
    /// A review-only fix printed its guidance.
    Reviewed { guidance: String },
    /// No routine exists for this name.
    Unhandled,
    /// Disabled by configuration.
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixEntry {
    /// The requested fix name, which may not be a known target.
    pub name: String,
    #[serde(flatten)]
    pub status: FixStatus,
}

impl FixEntry {
    /// Files changed by this entry; non-zero only for applied counting fixes.
    pub fn changed_count(&self) -> usize {
        match &self.status {
            FixStatus::Applied { batch } => batch.changed_count(),
            _ => 0,
        }
    }
}

/// Everything one dispatcher call did, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRun {
    pub entries: Vec<FixEntry>,
}

impl FixRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, status: FixStatus) {
        self.entries.push(FixEntry {
            name: name.into(),
            status,
        });
    }

    /// Sum of files changed by counting fixes.
    pub fn total_changed(&self) -> usize {
        self.entries.iter().map(FixEntry::changed_count).sum()
    }
}
