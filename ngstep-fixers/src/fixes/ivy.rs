//! Drop `enableIvy: false`; the ViewEngine it selects no longer exists.

use super::each_root_file;
use anyhow::Context;
use camino::Utf8Path;
use ngstep_edit::json;
use ngstep_rules::checks::{ENABLE_IVY_FALSE, TSCONFIGS};
use ngstep_types::EditBatch;
use regex::Regex;
use serde_json::Value;

const KEY: &str = "enableIvy";

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    let detect = Regex::new(ENABLE_IVY_FALSE).context("compile enableIvy pattern")?;
    let files: Vec<&str> = TSCONFIGS.iter().copied().chain(["angular.json"]).collect();
    Ok(each_root_file(root, &files, |path| {
        let text = fs_err::read_to_string(path).with_context(|| format!("read {}", path))?;
        if !detect.is_match(&text) {
            return Ok(false);
        }
        match json::edit_json(path, drop_disabled_ivy) {
            Ok(changed) => Ok(changed),
            // tsconfig files usually carry comments; edit those as text.
            Err(_) => json::edit_text(path, |text| Some(strip_text(text))),
        }
    }))
}

/// Remove every `"enableIvy": false` entry, at any depth.
fn drop_disabled_ivy(value: &mut Value) -> bool {
    match value {
        Value::Object(map) => {
            let mut changed = false;
            if map.get(KEY) == Some(&Value::Bool(false)) {
                map.shift_remove(KEY);
                changed = true;
            }
            for child in map.values_mut() {
                changed |= drop_disabled_ivy(child);
            }
            changed
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |changed, item| drop_disabled_ivy(item) | changed),
        _ => false,
    }
}

/// Text fallback: take the entry out together with one adjacent comma.
fn strip_text(text: &str) -> String {
    let entry = r#"["']?enableIvy["']?\s*:\s*false"#;
    let passes = [
        format!(r"{entry}\s*,\s*"),
        format!(r",\s*{entry}"),
        format!(r"\s*{entry}"),
    ];
    passes.iter().fold(text.to_string(), |acc, pattern| {
        match Regex::new(pattern) {
            Ok(re) => re.replace_all(&acc, "").into_owned(),
            Err(_) => acc,
        }
    })
}
