//! Stop targeting IE 11 in browserslist configuration.

use super::each_root_file;
use camino::Utf8Path;
use ngstep_edit::json;
use ngstep_rules::checks::{BROWSERSLIST_FILES, is_ie11_query};
use ngstep_types::EditBatch;
use serde_json::Value;

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    let mut batch = each_root_file(root, BROWSERSLIST_FILES, |path| {
        json::edit_text(path, |text| Some(drop_ie11_lines(text)))
    });
    batch.merge(each_root_file(root, &["package.json"], |path| {
        json::edit_json(path, drop_ie11_queries)
    }));
    Ok(batch)
}

fn drop_ie11_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !is_ie11_query(line.trim()))
        .collect()
}

/// Filter `browserslist` in package.json, as a plain array or per environment.
fn drop_ie11_queries(pkg: &mut Value) -> bool {
    fn filter(list: &mut Vec<Value>) -> bool {
        let before = list.len();
        list.retain(|q| !q.as_str().is_some_and(is_ie11_query));
        list.len() != before
    }

    match pkg.get_mut("browserslist") {
        Some(Value::Array(list)) => filter(list),
        Some(Value::Object(envs)) => envs.values_mut().fold(false, |changed, env| match env {
            Value::Array(list) => filter(list) | changed,
            _ => changed,
        }),
        _ => false,
    }
}
