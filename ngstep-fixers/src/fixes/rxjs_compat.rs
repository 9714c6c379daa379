//! Remove the `rxjs-compat` shim package and its side-effect imports.

use super::{each_root_file, edit_sources};
use camino::Utf8Path;
use ngstep_edit::json;
use ngstep_rules::checks::RXJS_COMPAT;
use ngstep_types::EditBatch;
use serde_json::Value;

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    let mut batch = each_root_file(root, &["package.json"], |path| {
        json::edit_json(path, drop_dependency)
    });
    batch.merge(edit_sources(root, "**/*.ts", |file| {
        if file.text().contains(RXJS_COMPAT) {
            file.remove_side_effect_import(RXJS_COMPAT)?;
        }
        Ok(())
    })?);
    Ok(batch)
}

fn drop_dependency(pkg: &mut Value) -> bool {
    ["dependencies", "devDependencies"]
        .iter()
        .fold(false, |changed, section| {
            let removed = pkg
                .get_mut(*section)
                .and_then(Value::as_object_mut)
                .and_then(|deps| deps.shift_remove(RXJS_COMPAT))
                .is_some();
            removed | changed
        })
}
