use crate::error::{EditError, EditResult};
use std::ops::Range;
use tree_sitter::{Node, Parser, Tree};

/// Parse TypeScript source into a tree.
///
/// Syntax errors do not fail the parse; check `root_node().has_error()`.
pub fn parse(text: &str) -> EditResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| EditError::Language(e.to_string()))?;
    parser
        .parse(text, None)
        .ok_or(EditError::ParseAborted)
}

/// A byte-span replacement in a file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, "")
    }
}

/// Apply edits back to front. An edit overlapping one already applied is
/// dropped, so the first edit (by position from the end) wins.
pub(crate) fn apply_edits(text: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then(b.range.end.cmp(&a.range.end))
    });
    let mut out = text.to_string();
    let mut floor = usize::MAX;
    for edit in edits {
        if edit.range.end > floor {
            tracing::debug!(start = edit.range.start, "dropping overlapping edit");
            continue;
        }
        out.replace_range(edit.range.clone(), &edit.replacement);
        floor = edit.range.start;
    }
    out
}

/// All nodes of `kind` under `node` (inclusive), in document order.
pub(crate) fn nodes_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    collect(node, kind, &mut out);
    out
}

fn collect<'t>(node: Node<'t>, kind: &str, out: &mut Vec<Node<'t>>) {
    if node.kind() == kind {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, kind, out);
    }
}

/// 1-based line of the first error or missing node, if any.
pub(crate) fn first_error_line(node: Node<'_>) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error_line)
        .or(Some(node.start_position().row + 1))
}

pub(crate) fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// Named children, comments excluded.
pub(crate) fn elements(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

pub(crate) fn unquote(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

/// Span that removes `node` from a comma-separated list (object members,
/// array elements, import specifiers) together with one adjacent comma.
pub(crate) fn list_removal_range(node: Node<'_>, source: &str) -> Range<usize> {
    if let Some(prev) = node.prev_sibling()
        && prev.kind() == ","
        && let Some(prev_elem) = prev.prev_named_sibling()
    {
        return prev_elem.end_byte()..node.end_byte();
    }
    if let Some(next) = node.next_sibling()
        && next.kind() == ","
    {
        return match next.next_named_sibling() {
            Some(next_elem) => node.start_byte()..next_elem.start_byte(),
            None => node.start_byte()..next.end_byte(),
        };
    }
    // Sole element: also take the whitespace in front of it.
    let head = &source[..node.start_byte()];
    let start = head.trim_end().len();
    start..node.end_byte()
}

/// Span of a whole statement plus its line break.
pub(crate) fn statement_removal_range(node: Node<'_>, source: &str) -> Range<usize> {
    let rest = &source[node.end_byte()..];
    let end = if rest.starts_with("\r\n") {
        node.end_byte() + 2
    } else if rest.starts_with('\n') {
        node.end_byte() + 1
    } else {
        node.end_byte()
    };
    node.start_byte()..end
}

/// Leading whitespace of the line containing byte `pos`.
pub(crate) fn line_indent(source: &str, pos: usize) -> &str {
    let line_start = source[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &source[line_start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

pub(crate) fn newline_of(source: &str) -> &'static str {
    if source.contains("\r\n") { "\r\n" } else { "\n" }
}
