//! Syntax-aware edits for ngstep fixes.
//!
//! [`Project`] loads a glob-selected subset of TypeScript files into parsed
//! [`SourceFile`]s. Node-level operations on a file compute byte-span edits
//! from the tree, apply them back to front and reparse. Nothing reaches disk
//! until [`Project::save`], which writes only touched files and returns an
//! [`EditBatch`](ngstep_types::EditBatch) with a result per file.
//!
//! Every operation reports whether it changed anything and is a no-op on a
//! file that is already in the fixed state.
//!
//! [`json`] holds the plain-text and JSON counterparts used for config files.

mod error;
pub mod json;
mod ops;
mod project;
mod syntax;

pub use error::{EditError, EditResult};
pub use project::{Project, SourceFile};
pub use syntax::parse;
