//! Version detection and target parsing.

use crate::error::MigrationError;
use camino::Utf8Path;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Major version from a loose version or range string such as `^12.2.0`.
pub fn coerce_major(raw: &str) -> Option<u32> {
    let re = Regex::new(r"(\d+)").ok()?;
    re.captures(raw)?[1].parse().ok()
}

/// Parse a user-supplied target major version. Only plain digits are accepted.
pub fn parse_target(raw: &str) -> Result<u32, MigrationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MigrationError::InvalidTarget(raw.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| MigrationError::InvalidTarget(raw.to_string()))
}

/// The Angular major the project is on.
///
/// Looks at `@angular/core` in `package.json` (dependencies, then
/// devDependencies) and falls back to the installed package in
/// `node_modules`.
pub fn detect_current_major(repo_root: &Utf8Path) -> Result<u32, MigrationError> {
    let declared = read_json(&repo_root.join("package.json")).and_then(|pkg| {
        ["dependencies", "devDependencies"]
            .iter()
            .find_map(|section| pkg.get(section)?.get("@angular/core")?.as_str().map(str::to_string))
    });
    if let Some(range) = declared {
        debug!(range = %range, "found @angular/core in package.json");
        return coerce_major(&range).ok_or_else(|| {
            MigrationError::VersionDetection(format!("unrecognized @angular/core version '{range}'"))
        });
    }

    let installed = repo_root.join("node_modules/@angular/core/package.json");
    let version = read_json(&installed)
        .and_then(|pkg| pkg.get("version")?.as_str().map(str::to_string))
        .ok_or_else(|| {
            MigrationError::VersionDetection(
                "@angular/core not found in package.json or node_modules".to_string(),
            )
        })?;
    debug!(version = %version, "found installed @angular/core");
    coerce_major(&version).ok_or_else(|| {
        MigrationError::VersionDetection(format!("unrecognized @angular/core version '{version}'"))
    })
}

fn read_json(path: &Utf8Path) -> Option<Value> {
    let text = fs_err::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        (temp, root)
    }

    #[test]
    fn coerces_ranges() {
        assert_eq!(coerce_major("^12.2.0"), Some(12));
        assert_eq!(coerce_major("~11.0.0-next.1"), Some(11));
        assert_eq!(coerce_major("17"), Some(17));
        assert_eq!(coerce_major("latest"), None);
    }

    #[test]
    fn target_must_be_digits() {
        assert_eq!(parse_target("15").unwrap(), 15);
        assert_eq!(parse_target(" 16 ").unwrap(), 16);
        assert!(matches!(parse_target("v15"), Err(MigrationError::InvalidTarget(_))));
        assert!(matches!(parse_target("15.1"), Err(MigrationError::InvalidTarget(_))));
        assert!(matches!(parse_target(""), Err(MigrationError::InvalidTarget(_))));
    }

    #[test]
    fn detects_from_dependencies() {
        let (_temp, root) = temp_root();
        fs_err::write(
            root.join("package.json"),
            r#"{"devDependencies":{"@angular/core":"^11.0.0"},"dependencies":{"@angular/core":"~12.1.3"}}"#,
        )
        .unwrap();
        assert_eq!(detect_current_major(&root).unwrap(), 12);
    }

    #[test]
    fn falls_back_to_node_modules() {
        let (_temp, root) = temp_root();
        fs_err::write(root.join("package.json"), r#"{"dependencies":{}}"#).unwrap();
        let installed = root.join("node_modules/@angular/core");
        fs_err::create_dir_all(&installed).unwrap();
        fs_err::write(installed.join("package.json"), r#"{"version":"13.3.11"}"#).unwrap();
        assert_eq!(detect_current_major(&root).unwrap(), 13);
    }

    #[test]
    fn missing_angular_is_a_detection_error() {
        let (_temp, root) = temp_root();
        let err = detect_current_major(&root).unwrap_err();
        assert!(matches!(err, MigrationError::VersionDetection(_)));
    }

    proptest! {
        #[test]
        fn any_digit_string_within_range_parses(n in 0u32..10_000) {
            prop_assert_eq!(parse_target(&n.to_string()).unwrap(), n);
        }
    }
}
