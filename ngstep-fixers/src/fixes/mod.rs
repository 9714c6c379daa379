//! Fix routines. Each takes the project root and returns what happened to
//! every file it considered.

pub(crate) mod animation;
pub(crate) mod browserslist;
pub(crate) mod entry_components;
pub(crate) mod http_module;
pub(crate) mod ivy;
pub(crate) mod module_with_providers;
pub(crate) mod rxjs_compat;
pub(crate) mod ts_target;
pub(crate) mod typescript;

use camino::Utf8Path;
use ngstep_edit::{EditResult, Project, SourceFile};
use ngstep_types::EditBatch;
use tracing::debug;

/// Run `edit` on each of the named root-level files that exist.
///
/// An error on one file marks it skipped and moves on to the next.
pub(crate) fn each_root_file<F>(root: &Utf8Path, names: &[&str], mut edit: F) -> EditBatch
where
    F: FnMut(&Utf8Path) -> anyhow::Result<bool>,
{
    let mut batch = EditBatch::new();
    for name in names {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        match edit(&path) {
            Ok(true) => batch.changed(&path),
            Ok(false) => batch.unchanged(&path),
            Err(err) => {
                debug!(path = %path, error = %format!("{err:#}"), "file left as is");
                batch.skipped(&path, format!("{err:#}"));
            }
        }
    }
    batch
}

/// Load the TypeScript files matching `selector`, run `edit` on each and
/// save the result.
///
/// A failed edit reverts that file only; every other file is still saved.
pub(crate) fn edit_sources<F>(root: &Utf8Path, selector: &str, mut edit: F) -> anyhow::Result<EditBatch>
where
    F: FnMut(&mut SourceFile) -> EditResult<()>,
{
    let mut project = Project::load(root, selector)?;
    for file in project.files_mut() {
        if let Err(err) = edit(file) {
            file.skip(err.to_string());
        }
    }
    Ok(project.save())
}
