//! Remove `entryComponents` metadata, which Ivy ignores.

use super::edit_sources;
use camino::Utf8Path;
use ngstep_edit::{EditResult, SourceFile};
use ngstep_types::EditBatch;

const KEY: &str = "entryComponents";

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    edit_sources(root, "**/*.ts", fix_file)
}

fn fix_file(file: &mut SourceFile) -> EditResult<()> {
    if !file.text().contains(KEY) {
        return Ok(());
    }
    for decorator in ["NgModule", "Component"] {
        file.remove_decorator_property(decorator, KEY)?;
    }
    Ok(())
}
