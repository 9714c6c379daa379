use serde::{Deserialize, Serialize};
use std::fmt;

/// A single major-version step. `to` is always `from + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionTransition {
    from: u32,
    to: u32,
}

impl VersionTransition {
    pub fn new(from: u32) -> Self {
        Self { from, to: from + 1 }
    }

    pub fn from(&self) -> u32 {
        self.from
    }

    pub fn to(&self) -> u32 {
        self.to
    }

    /// Every single step from `from` up to `to`, in ascending order.
    ///
    /// Empty when `to <= from`.
    pub fn steps(from: u32, to: u32) -> impl Iterator<Item = VersionTransition> {
        (from..to).map(VersionTransition::new)
    }

    /// File name of the markdown report for this step, e.g. `10-to-11-report.md`.
    pub fn report_file_name(&self) -> String {
        format!("{}-to-{}-report.md", self.from, self.to)
    }
}

impl fmt::Display for VersionTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}
