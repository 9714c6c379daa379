//! Detection helpers shared by several rules (and by the fixes that must
//! agree with them on what "still needs fixing" means).

use crate::ports::RepoView;
use anyhow::Context;
use camino::Utf8Path;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Extensions scanned by most rules.
pub const TS_JSON: &[&str] = &[".ts", ".json"];
/// Extensions scanned by rules that also look at templates.
pub const TS_HTML_JSON: &[&str] = &[".ts", ".html", ".json"];

/// Root tsconfig files whose compile target is checked.
pub const TSCONFIGS: &[&str] = &["tsconfig.json", "tsconfig.app.json", "tsconfig.browser.json"];

pub const BROWSERSLIST_FILES: &[&str] = &[".browserslistrc", "browserslist"];

pub const ENABLE_IVY_FALSE: &str = r#"enableIvy["']?\s*:\s*false"#;
pub const ENTRY_COMPONENTS: &str = r"entryComponents\s*:";
pub const HTTP_MODULE: &str = r"\bHttpModule\b";
pub const RXJS_COMPAT: &str = r"rxjs-compat";
pub const ANIMATION_FOR_ROOT: &str = r"AnimationModule\.forRoot";
pub const ZONE_JS: &str = r"zone\.js";
/// A `ModuleWithProviders` type annotation without type arguments.
pub const BARE_MODULE_WITH_PROVIDERS: &str = r":\s*ModuleWithProviders\b\s*(?:[^\s<]|$)";
pub const PROTRACTOR_BUILDER: &str = "@angular-devkit/build-angular:protractor";
pub const TYPESCRIPT_MIN: (u64, u64) = (5, 6);

/// Root-relative locators of files matching `pattern`.
pub fn scan(repo: &dyn RepoView, pattern: &str, extensions: &[&str]) -> anyhow::Result<Vec<String>> {
    let re = Regex::new(pattern).with_context(|| format!("compile pattern {pattern}"))?;
    Ok(repo
        .find(&re, extensions)
        .into_iter()
        .map(|p| p.into_string())
        .collect())
}

/// File contents, or `None` when absent or unreadable.
pub fn read_raw(repo: &dyn RepoView, rel: &str) -> Option<String> {
    let rel = Utf8Path::new(rel);
    if !repo.exists(rel) {
        return None;
    }
    repo.read_to_string(rel).ok()
}

/// Parse JSON that may carry comments; `None` when absent or malformed.
pub fn read_json(repo: &dyn RepoView, rel: &str) -> Option<Value> {
    let text = read_raw(repo, rel)?;
    match serde_json::from_str(&ngstep_edit::json::strip_comments(&text)) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(path = %rel, error = %err, "ignoring malformed JSON");
            None
        }
    }
}

pub fn is_es5_target(tsconfig: &Value) -> bool {
    tsconfig
        .get("compilerOptions")
        .and_then(|c| c.get("target"))
        .and_then(Value::as_str)
        .is_some_and(|t| t.eq_ignore_ascii_case("es5"))
}

/// Root tsconfig files that still compile to ES5.
pub fn legacy_ts_targets(repo: &dyn RepoView) -> Vec<String> {
    TSCONFIGS
        .iter()
        .filter(|f| read_json(repo, f).is_some_and(|v| is_es5_target(&v)))
        .map(|f| f.to_string())
        .collect()
}

/// `ie 11`, `IE11`, `not ie 11`... any browserslist query naming IE 11.
pub fn is_ie11_query(query: &str) -> bool {
    let lower = query.to_ascii_lowercase();
    lower
        .match_indices("ie")
        .any(|(i, _)| lower[i + 2..].trim_start().starts_with("11"))
}

/// Places where browserslist still targets IE 11.
pub fn ie11_locations(repo: &dyn RepoView) -> Vec<String> {
    let mut out = Vec::new();
    for file in BROWSERSLIST_FILES {
        let rel = Utf8Path::new(file);
        if repo.exists(rel)
            && let Ok(text) = repo.read_to_string(rel)
            && text.lines().any(is_ie11_query)
        {
            out.push(file.to_string());
        }
    }
    let Some(pkg) = read_json(repo, "package.json") else {
        return out;
    };
    match pkg.get("browserslist") {
        Some(Value::Array(list)) => {
            if list.iter().filter_map(Value::as_str).any(is_ie11_query) {
                out.push("package.json → browserslist[]".to_string());
            }
        }
        Some(Value::Object(envs)) => {
            for (env, list) in envs {
                if let Value::Array(list) = list
                    && list.iter().filter_map(Value::as_str).any(is_ie11_query)
                {
                    out.push(format!("package.json → browserslist.{env}[]"));
                }
            }
        }
        _ => {}
    }
    out
}

/// `major.minor.patch` found anywhere in a version range such as `~5.4.2`.
pub fn parse_version(raw: &str) -> Option<(u64, u64, u64)> {
    let re = Regex::new(r"(\d+)\.(\d+)\.(\d+)").ok()?;
    let caps = re.captures(raw)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());
    Some((num(1)?, num(2)?, num(3)?))
}

/// True when `raw` is below TypeScript 5.6, or unreadable as a version.
pub fn typescript_needs_upgrade(raw: &str) -> bool {
    match parse_version(raw) {
        Some((major, minor, _)) => (major, minor) < TYPESCRIPT_MIN,
        None => true,
    }
}

/// The TypeScript version range declared in package.json, if any.
pub fn declared_typescript(repo: &dyn RepoView) -> Option<String> {
    let pkg = read_json(repo, "package.json")?;
    ["devDependencies", "dependencies"]
        .iter()
        .find_map(|section| pkg.get(section)?.get("typescript")?.as_str())
        .map(str::to_string)
}

/// An NgModule-bootstrapped layout: `src/app/app.module.ts` next to `src/main.ts`.
pub fn has_module_bootstrap(repo: &dyn RepoView) -> bool {
    repo.exists(Utf8Path::new("src/app/app.module.ts")) && repo.exists(Utf8Path::new("src/main.ts"))
}
