//! Move `compilerOptions.target` off ES5.

use super::each_root_file;
use anyhow::Context;
use camino::Utf8Path;
use ngstep_edit::json;
use ngstep_rules::checks::{TSCONFIGS, is_es5_target};
use ngstep_types::EditBatch;
use regex::Regex;
use serde_json::Value;

pub(crate) const MODERN_TARGET: &str = "es2015";

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    let target_entry =
        Regex::new(r#"(?i)("target"\s*:\s*)"es5""#).context("compile target pattern")?;
    Ok(each_root_file(root, TSCONFIGS, |path| {
        if !is_es5_target(&json::read_lenient(path)?) {
            return Ok(false);
        }
        match json::edit_json(path, set_modern_target) {
            Ok(changed) => Ok(changed),
            Err(_) => json::edit_text(path, |text| {
                Some(
                    target_entry
                        .replace_all(text, format!("${{1}}\"{MODERN_TARGET}\""))
                        .into_owned(),
                )
            }),
        }
    }))
}

fn set_modern_target(value: &mut Value) -> bool {
    if !is_es5_target(value) {
        return false;
    }
    match value.get_mut("compilerOptions").and_then(Value::as_object_mut) {
        Some(options) => {
            options.insert("target".to_string(), Value::from(MODERN_TARGET));
            true
        }
        None => false,
    }
}
