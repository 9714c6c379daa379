//! Replace the removed `HttpModule` with `HttpClientModule` in NgModules.

use super::edit_sources;
use camino::Utf8Path;
use ngstep_edit::{EditResult, SourceFile};
use ngstep_types::EditBatch;

const LEGACY_MODULE: &str = "@angular/http";
const LEGACY_NAME: &str = "HttpModule";
const CLIENT_MODULE: &str = "@angular/common/http";
const CLIENT_NAME: &str = "HttpClientModule";

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    edit_sources(root, "**/*.module.ts", fix_file)
}

fn fix_file(file: &mut SourceFile) -> EditResult<()> {
    if !file.has_named_import(LEGACY_MODULE, LEGACY_NAME) && file.references(LEGACY_NAME) == 0 {
        return Ok(());
    }
    file.remove_named_import(LEGACY_MODULE, LEGACY_NAME)?;
    file.remove_from_decorator_array("NgModule", "imports", LEGACY_NAME)?;
    file.ensure_named_import(CLIENT_MODULE, CLIENT_NAME)?;
    file.add_to_decorator_array("NgModule", "imports", CLIENT_NAME)?;
    Ok(())
}
