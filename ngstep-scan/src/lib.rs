//! Pattern matching over a project tree.
//!
//! Traversal is depth-first in lexical order. Directories named in
//! [`EXCLUDED_DIRS`] are pruned before they are entered, so nothing below
//! them is ever read. Matching is done on file content, not syntax.

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use regex::Regex;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directory names whose subtrees are never visited.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "build", "out-tsc", ".git"];

/// A detection predicate over the full text of a file.
pub trait Pattern {
    fn is_match(&self, text: &str) -> bool;
}

impl Pattern for Regex {
    fn is_match(&self, text: &str) -> bool {
        Regex::is_match(self, text)
    }
}

/// Plain substring test.
impl Pattern for str {
    fn is_match(&self, text: &str) -> bool {
        text.contains(self)
    }
}

impl<T: Pattern + ?Sized> Pattern for &T {
    fn is_match(&self, text: &str) -> bool {
        (**self).is_match(text)
    }
}

/// Files below `root` whose name ends with one of `extensions` and whose
/// content satisfies `pattern`.
///
/// Unreadable files are skipped. Paths are absolute when `root` is.
pub fn find<P: Pattern + ?Sized>(
    root: &Utf8Path,
    pattern: &P,
    extensions: &[&str],
) -> Vec<Utf8PathBuf> {
    walk(root)
        .filter(|path| has_extension(path, extensions))
        .filter(|path| match fs::read_to_string(path) {
            Ok(text) => pattern.is_match(&text),
            Err(err) => {
                debug!(path = %path, error = %err, "skipping unreadable file");
                false
            }
        })
        .collect()
}

/// Every regular file below `root`, excluded directories pruned.
pub fn walk(root: &Utf8Path) -> impl Iterator<Item = Utf8PathBuf> + use<> {
    WalkDir::new(root.as_std_path())
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| Utf8PathBuf::from_path_buf(entry.into_path()).ok())
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

/// Case-sensitive suffix match on the file name.
pub fn has_extension(path: &Utf8Path, extensions: &[&str]) -> bool {
    path.file_name()
        .is_some_and(|name| extensions.iter().any(|ext| name.ends_with(ext)))
}

/// Forward-slash path of `path` relative to `root`, used as a finding locator.
pub fn relative_to(root: &Utf8Path, path: &Utf8Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .as_str()
        .replace('\\', "/")
}
