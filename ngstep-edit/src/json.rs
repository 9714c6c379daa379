//! JSON and plain-text file edits.
//!
//! JSON is rewritten with two-space indentation, key order preserved and a
//! trailing newline. Files are written only when the content changes.

use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use serde_json::Value;
use tracing::debug;

/// Parse a JSON file, tolerating `//` and `/* */` comments (tsconfig style).
pub fn read_lenient(path: &Utf8Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    serde_json::from_str(&strip_comments(&text)).with_context(|| format!("parse {}", path))
}

/// Parse `path` as strict JSON, let `edit` mutate it, and write it back
/// when `edit` reports a change.
pub fn edit_json<F>(path: &Utf8Path, edit: F) -> anyhow::Result<bool>
where
    F: FnOnce(&mut Value) -> bool,
{
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let mut value: Value =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path))?;
    if !edit(&mut value) {
        return Ok(false);
    }
    let mut out = serde_json::to_string_pretty(&value).context("serialize JSON")?;
    out.push('\n');
    if out == text {
        return Ok(false);
    }
    fs::write(path, out).with_context(|| format!("write {}", path))?;
    debug!(path = %path, "rewrote JSON");
    Ok(true)
}

/// Let `edit` return a replacement for the text of `path`; `None` or
/// identical text leaves the file untouched.
pub fn edit_text<F>(path: &Utf8Path, edit: F) -> anyhow::Result<bool>
where
    F: FnOnce(&str) -> Option<String>,
{
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    match edit(&text) {
        Some(next) if next != text => {
            fs::write(path, next).with_context(|| format!("write {}", path))?;
            debug!(path = %path, "rewrote text");
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Remove comments outside string literals.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }
    out
}
