//! Error types for ngstep-edit.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// The file selector is not a valid glob.
    #[error("invalid file selector: {0}")]
    Selector(#[from] glob::PatternError),

    /// The TypeScript grammar could not be loaded into the parser.
    #[error("parser setup failed: {0}")]
    Language(String),

    /// The parser gave up without producing a tree.
    #[error("parser produced no tree")]
    ParseAborted,

    /// An edit produced text that no longer parses; the file was left as loaded.
    #[error("edit would break syntax of {0}")]
    BrokenEdit(Utf8PathBuf),

    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

pub type EditResult<T> = Result<T, EditError>;
