use crate::error::{EditError, EditResult};
use crate::syntax::{self, TextEdit};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::{MatchOptions, Pattern};
use ngstep_types::EditBatch;
use tracing::debug;
use tree_sitter::Tree;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One parsed TypeScript file held in memory.
pub struct SourceFile {
    path: Utf8PathBuf,
    loaded: String,
    pub(crate) text: String,
    pub(crate) tree: Tree,
    dirty: bool,
    skip_reason: Option<String>,
}

impl SourceFile {
    /// Parse `text` as the content of `path`. Fails on syntax errors.
    pub fn parse(path: Utf8PathBuf, text: String) -> Result<Self, String> {
        let tree = syntax::parse(&text).map_err(|e| e.to_string())?;
        if let Some(line) = syntax::first_error_line(tree.root_node()) {
            return Err(format!("syntax error at line {line}"));
        }
        Ok(Self {
            path,
            loaded: text.clone(),
            text,
            tree,
            dirty: false,
            skip_reason: None,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True once an operation has changed the text since load (or last save).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }

    /// Drop all pending edits to this file and exclude it from saving.
    pub fn skip(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        debug!(path = %self.path, reason = %reason, "skipping file");
        self.text = self.loaded.clone();
        self.dirty = false;
        self.skip_reason = Some(reason);
    }

    /// Apply a set of span edits and reparse. Returns whether the text changed.
    pub(crate) fn apply(&mut self, edits: Vec<TextEdit>) -> EditResult<bool> {
        if edits.is_empty() || self.is_skipped() {
            return Ok(false);
        }
        let next = syntax::apply_edits(&self.text, edits);
        if next == self.text {
            return Ok(false);
        }
        let tree = syntax::parse(&next)?;
        if tree.root_node().has_error() {
            return Err(EditError::BrokenEdit(self.path.clone()));
        }
        self.text = next;
        self.tree = tree;
        self.dirty = true;
        Ok(true)
    }
}

/// A glob-selected set of TypeScript files under a root.
pub struct Project {
    root: Utf8PathBuf,
    files: Vec<SourceFile>,
    unloaded: Vec<(Utf8PathBuf, String)>,
}

impl Project {
    /// Load every file under `root` whose root-relative path matches
    /// `selector` (e.g. `**/*.module.ts`). Excluded build and dependency
    /// directories are never entered.
    ///
    /// Files that cannot be read or parsed are kept aside and reported as
    /// skipped by [`Project::save`].
    pub fn load(root: &Utf8Path, selector: &str) -> EditResult<Self> {
        let pattern = Pattern::new(selector)?;
        let mut files = Vec::new();
        let mut unloaded = Vec::new();

        for path in ngstep_scan::walk(root) {
            let rel = ngstep_scan::relative_to(root, &path);
            if !pattern.matches_with(&rel, MATCH_OPTIONS) {
                continue;
            }
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    debug!(path = %path, error = %err, "unreadable source file");
                    unloaded.push((path, format!("unreadable: {err}")));
                    continue;
                }
            };
            match SourceFile::parse(path.clone(), text) {
                Ok(file) => files.push(file),
                Err(reason) => {
                    debug!(path = %path, reason = %reason, "unparsable source file");
                    unloaded.push((path, reason));
                }
            }
        }

        debug!(
            root = %root,
            selector,
            loaded = files.len(),
            skipped = unloaded.len(),
            "loaded project"
        );
        Ok(Self {
            root: root.to_path_buf(),
            files,
            unloaded,
        })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn files_mut(&mut self) -> impl Iterator<Item = &mut SourceFile> {
        self.files.iter_mut()
    }

    /// Write every touched file in place. Untouched files are not rewritten.
    ///
    /// A write failure marks only that file as skipped.
    pub fn save(&mut self) -> EditBatch {
        let mut batch = EditBatch::new();
        for (path, reason) in &self.unloaded {
            batch.skipped(path, reason.clone());
        }
        for file in &mut self.files {
            if let Some(reason) = &file.skip_reason {
                batch.skipped(&file.path, reason.clone());
                continue;
            }
            if !file.dirty {
                batch.unchanged(&file.path);
                continue;
            }
            match write_file(&file.path, &file.text) {
                Ok(()) => {
                    debug!(path = %file.path, "saved");
                    file.loaded = file.text.clone();
                    file.dirty = false;
                    batch.changed(&file.path);
                }
                Err(err) => batch.skipped(&file.path, format!("{err:#}")),
            }
        }
        batch.files.sort_by(|a, b| a.path.cmp(&b.path));
        batch
    }
}

fn write_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    fs::write(path, text).with_context(|| format!("write {}", path))
}
