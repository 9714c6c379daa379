//! Raise the declared TypeScript range to one Angular 19 accepts.

use super::each_root_file;
use camino::Utf8Path;
use ngstep_edit::json;
use ngstep_rules::checks::{TYPESCRIPT_MIN, parse_version};
use ngstep_types::EditBatch;
use serde_json::Value;

pub(crate) const TYPESCRIPT_RANGE: &str = "^5.6.0";

pub(crate) fn apply(root: &Utf8Path) -> anyhow::Result<EditBatch> {
    Ok(each_root_file(root, &["package.json"], |path| {
        json::edit_json(path, bump_typescript)
    }))
}

fn bump_typescript(pkg: &mut Value) -> bool {
    ["dependencies", "devDependencies"]
        .iter()
        .fold(false, |changed, section| {
            let Some(entry) = pkg.get_mut(*section).and_then(|s| s.get_mut("typescript")) else {
                return changed;
            };
            // Ranges without a full version ("^5", "latest") are left for a human.
            let outdated = entry
                .as_str()
                .and_then(parse_version)
                .is_some_and(|(major, minor, _)| (major, minor) < TYPESCRIPT_MIN);
            if outdated {
                *entry = Value::from(TYPESCRIPT_RANGE);
            }
            outdated | changed
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_temp_repo, read};
    use pretty_assertions::assert_eq;

    #[test]
    fn bumps_old_typescript_in_both_sections() {
        let (_temp, root) = create_temp_repo(&[(
            "package.json",
            r#"{"dependencies": {"typescript": "4.9.5"}, "devDependencies": {"typescript": "~5.4.2", "jest": "^29.0.0"}}"#,
        )]);

        assert_eq!(apply(&root).expect("fix").changed_count(), 1);
        let pkg: Value = serde_json::from_str(&read(&root, "package.json")).expect("json");
        assert_eq!(pkg["dependencies"]["typescript"], TYPESCRIPT_RANGE);
        assert_eq!(pkg["devDependencies"]["typescript"], TYPESCRIPT_RANGE);
        assert_eq!(pkg["devDependencies"]["jest"], "^29.0.0");
    }

    #[test]
    fn current_and_unparsable_ranges_stay() {
        let original = r#"{"devDependencies": {"typescript": "^5"}, "dependencies": {"typescript": "5.7.2"}}"#;
        let (_temp, root) = create_temp_repo(&[("package.json", original)]);
        assert_eq!(apply(&root).expect("fix").changed_count(), 0);
        assert_eq!(read(&root, "package.json"), original);
    }
}
