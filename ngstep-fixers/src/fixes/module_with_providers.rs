//! Give bare `ModuleWithProviders` annotations a type argument.

use super::edit_sources;
use camino::Utf8Path;
use ngstep_edit::{EditResult, SourceFile};
use ngstep_types::EditBatch;

const TYPE_NAME: &str = "ModuleWithProviders";
/// Argument used when the file declares no class to name.
const FALLBACK_ARGUMENT: &str = "unknown";

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    edit_sources(root, "**/*.ts", fix_file)
}

fn fix_file(file: &mut SourceFile) -> EditResult<()> {
    if !file.text().contains(TYPE_NAME) {
        return Ok(());
    }
    let argument = file
        .first_class_name()
        .unwrap_or_else(|| FALLBACK_ARGUMENT.to_string());
    file.add_generic_argument(TYPE_NAME, &argument)?;
    Ok(())
}
