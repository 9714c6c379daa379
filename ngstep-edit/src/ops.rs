//! Node-level operations on a [`SourceFile`].

use crate::error::EditResult;
use crate::project::SourceFile;
use crate::syntax::{
    TextEdit, elements, line_indent, list_removal_range, newline_of, node_text, nodes_of_kind,
    statement_removal_range, unquote,
};
use tracing::debug;
use tree_sitter::Node;

/// A top-level `import` statement, broken into the parts the edits need.
struct ImportDecl<'t> {
    statement: Node<'t>,
    module: String,
    quote: char,
    has_clause: bool,
    default: Option<Node<'t>>,
    namespace: bool,
    named: Option<Node<'t>>,
    specifiers: Vec<Node<'t>>,
}

fn imports<'t>(root: Node<'t>, text: &str) -> Vec<ImportDecl<'t>> {
    let mut cursor = root.walk();
    root.children(&mut cursor)
        .filter(|n| n.kind() == "import_statement")
        .filter_map(|statement| {
            let source = statement.child_by_field_name("source")?;
            let raw = node_text(source, text);
            let mut decl = ImportDecl {
                statement,
                module: unquote(raw).to_string(),
                quote: raw.chars().next().unwrap_or('\''),
                has_clause: false,
                default: None,
                namespace: false,
                named: None,
                specifiers: Vec::new(),
            };
            let mut c = statement.walk();
            let clause = statement
                .children(&mut c)
                .find(|n| n.kind() == "import_clause");
            if let Some(clause) = clause {
                decl.has_clause = true;
                let mut cc = clause.walk();
                for part in clause.named_children(&mut cc) {
                    match part.kind() {
                        "identifier" => decl.default = Some(part),
                        "namespace_import" => decl.namespace = true,
                        "named_imports" => {
                            decl.named = Some(part);
                            decl.specifiers = elements(part)
                                .into_iter()
                                .filter(|s| s.kind() == "import_specifier")
                                .collect();
                        }
                        _ => {}
                    }
                }
            }
            Some(decl)
        })
        .collect()
}

fn specifier_name<'s>(spec: Node<'_>, text: &'s str) -> &'s str {
    spec.child_by_field_name("name")
        .map(|n| unquote(node_text(n, text)))
        .unwrap_or("")
}

/// Object literal arguments of every `@<decorator>(...)` in the file.
fn decorator_objects<'t>(root: Node<'t>, text: &str, decorator: &str) -> Vec<Node<'t>> {
    nodes_of_kind(root, "decorator")
        .into_iter()
        .filter_map(|d| {
            let call = elements(d).into_iter().next()?;
            if call.kind() != "call_expression" {
                return None;
            }
            let callee = call.child_by_field_name("function")?;
            if node_text(callee, text) != decorator {
                return None;
            }
            let args = call.child_by_field_name("arguments")?;
            elements(args).into_iter().find(|a| a.kind() == "object")
        })
        .collect()
}

fn pairs_with_key<'t>(object: Node<'t>, text: &str, key: &str) -> Vec<Node<'t>> {
    elements(object)
        .into_iter()
        .filter(|m| m.kind() == "pair")
        .filter(|p| {
            p.child_by_field_name("key")
                .is_some_and(|k| unquote(node_text(k, text)) == key)
        })
        .collect()
}

fn compact(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Text to insert after `last` to append `item` to the list `container`,
/// following the list's single-line or one-per-line layout.
fn append_after(container: Node<'_>, last: Node<'_>, text: &str, item: &str) -> TextEdit {
    let sep = if node_text(container, text).contains('\n') {
        format!(",{}{}", newline_of(text), line_indent(text, last.start_byte()))
    } else {
        ", ".to_string()
    };
    TextEdit::insert(last.end_byte(), format!("{sep}{item}"))
}

impl SourceFile {
    /// True when `name` is imported by name from `module`.
    pub fn has_named_import(&self, module: &str, name: &str) -> bool {
        imports(self.tree.root_node(), &self.text)
            .iter()
            .filter(|d| d.module == module)
            .flat_map(|d| d.specifiers.iter())
            .any(|s| specifier_name(*s, &self.text) == name)
    }

    /// Module a named import of `name` comes from, if any.
    pub fn import_source(&self, name: &str) -> Option<String> {
        imports(self.tree.root_node(), &self.text)
            .into_iter()
            .find(|d| {
                d.specifiers
                    .iter()
                    .any(|s| specifier_name(*s, &self.text) == name)
            })
            .map(|d| d.module)
    }

    /// Identifier uses of `name` outside import statements.
    pub fn references(&self, name: &str) -> usize {
        let root = self.tree.root_node();
        ["identifier", "type_identifier"]
            .iter()
            .flat_map(|kind| nodes_of_kind(root, kind))
            .filter(|n| node_text(*n, &self.text) == name)
            .filter(|n| !has_ancestor(*n, "import_statement"))
            .count()
    }

    /// Name of the first class declared in the file.
    pub fn first_class_name(&self) -> Option<String> {
        let root = self.tree.root_node();
        let mut classes = nodes_of_kind(root, "class_declaration");
        classes.extend(nodes_of_kind(root, "abstract_class_declaration"));
        classes.sort_by_key(|n| n.start_byte());
        classes
            .first()
            .and_then(|c| c.child_by_field_name("name"))
            .map(|n| node_text(n, &self.text).to_string())
    }

    /// Remove `name` from `import { ... } from '<module>'`. The whole
    /// statement goes when nothing else is imported by it.
    pub fn remove_named_import(&mut self, module: &str, name: &str) -> EditResult<bool> {
        let edits = {
            let decls = imports(self.tree.root_node(), &self.text);
            let mut edits = Vec::new();
            for decl in decls.iter().filter(|d| d.module == module) {
                let hits: Vec<_> = decl
                    .specifiers
                    .iter()
                    .copied()
                    .filter(|s| specifier_name(*s, &self.text) == name)
                    .collect();
                if hits.is_empty() {
                    continue;
                }
                let remaining = decl.specifiers.len() - hits.len();
                if remaining > 0 {
                    edits.extend(
                        hits.iter()
                            .map(|s| TextEdit::delete(list_removal_range(*s, &self.text))),
                    );
                } else if decl.default.is_some() || decl.namespace {
                    // `import A, { X } from 'm'` keeps `import A from 'm'`.
                    if let Some(named) = decl.named
                        && let Some(prev) = named.prev_named_sibling()
                    {
                        edits.push(TextEdit::delete(prev.end_byte()..named.end_byte()));
                    }
                } else {
                    edits.push(TextEdit::delete(statement_removal_range(
                        decl.statement,
                        &self.text,
                    )));
                }
            }
            edits
        };
        self.apply(edits)
    }

    /// Make sure `name` is imported from `module`, extending an existing
    /// import of that module or adding a new statement after the last import.
    pub fn ensure_named_import(&mut self, module: &str, name: &str) -> EditResult<bool> {
        if self.has_named_import(module, name) {
            return Ok(false);
        }
        let edit = {
            let text = self.text.as_str();
            let decls = imports(self.tree.root_node(), text);
            let same_module: Vec<&ImportDecl> = decls
                .iter()
                .filter(|d| d.module == module && !d.namespace)
                .collect();

            if let Some(decl) = same_module.iter().find(|d| d.named.is_some()) {
                match (decl.specifiers.last(), decl.named) {
                    (Some(last), Some(named)) => append_after(named, *last, text, name),
                    (None, Some(named)) => {
                        TextEdit::replace(named.byte_range(), format!("{{ {name} }}"))
                    }
                    _ => return Ok(false),
                }
            } else if let Some(default) = same_module.iter().find_map(|d| d.default) {
                TextEdit::insert(default.end_byte(), format!(", {{ {name} }}"))
            } else if let Some(last) = decls.last() {
                let semi = if node_text(last.statement, text).ends_with(';') {
                    ";"
                } else {
                    ""
                };
                let q = last.quote;
                TextEdit::insert(
                    last.statement.end_byte(),
                    format!(
                        "{}import {{ {name} }} from {q}{module}{q}{semi}",
                        newline_of(text)
                    ),
                )
            } else {
                TextEdit::insert(
                    0,
                    format!("import {{ {name} }} from '{module}';{}", newline_of(text)),
                )
            }
        };
        self.apply(vec![edit])
    }

    /// Remove side-effect imports (`import 'm';`) of `module` or any of its
    /// subpaths.
    pub fn remove_side_effect_import(&mut self, module: &str) -> EditResult<bool> {
        let edits: Vec<_> = {
            let prefix = format!("{module}/");
            imports(self.tree.root_node(), &self.text)
                .into_iter()
                .filter(|d| !d.has_clause)
                .filter(|d| d.module == module || d.module.starts_with(&prefix))
                .map(|d| TextEdit::delete(statement_removal_range(d.statement, &self.text)))
                .collect()
        };
        self.apply(edits)
    }

    /// Remove the `key` entry from every `@<decorator>({...})` argument.
    pub fn remove_decorator_property(&mut self, decorator: &str, key: &str) -> EditResult<bool> {
        let edits: Vec<_> = {
            let text = self.text.as_str();
            decorator_objects(self.tree.root_node(), text, decorator)
                .into_iter()
                .flat_map(|obj| pairs_with_key(obj, text, key))
                .map(|pair| TextEdit::delete(list_removal_range(pair, text)))
                .collect()
        };
        self.apply(edits)
    }

    /// Append `element` to the `key: [...]` array of every
    /// `@<decorator>({...})`, creating the entry when missing. Arrays that
    /// already hold `element` are left alone.
    pub fn add_to_decorator_array(
        &mut self,
        decorator: &str,
        key: &str,
        element: &str,
    ) -> EditResult<bool> {
        let edits: Vec<_> = {
            let text = self.text.as_str();
            let mut edits = Vec::new();
            for obj in decorator_objects(self.tree.root_node(), text, decorator) {
                let pairs = pairs_with_key(obj, text, key);
                if pairs.is_empty() {
                    let entry = format!("{key}: [{element}]");
                    match elements(obj).last() {
                        Some(last) => edits.push(append_after(obj, *last, text, &entry)),
                        None => {
                            edits.push(TextEdit::replace(obj.byte_range(), format!("{{ {entry} }}")))
                        }
                    }
                    continue;
                }
                for pair in pairs {
                    let Some(array) = pair.child_by_field_name("value") else {
                        continue;
                    };
                    if array.kind() != "array" {
                        debug!(path = %self.path(), key, "decorator value is not an array literal");
                        continue;
                    }
                    let items = elements(array);
                    if items
                        .iter()
                        .any(|i| compact(node_text(*i, text)) == compact(element))
                    {
                        continue;
                    }
                    match items.last() {
                        Some(last) => edits.push(append_after(array, *last, text, element)),
                        None => edits.push(TextEdit::replace(
                            array.byte_range(),
                            format!("[{element}]"),
                        )),
                    }
                }
            }
            edits
        };
        self.apply(edits)
    }

    /// Drop `element` from the `key: [...]` array of every `@<decorator>({...})`.
    pub fn remove_from_decorator_array(
        &mut self,
        decorator: &str,
        key: &str,
        element: &str,
    ) -> EditResult<bool> {
        let edits: Vec<_> = {
            let text = self.text.as_str();
            decorator_objects(self.tree.root_node(), text, decorator)
                .into_iter()
                .flat_map(|obj| pairs_with_key(obj, text, key))
                .filter_map(|pair| pair.child_by_field_name("value"))
                .filter(|v| v.kind() == "array")
                .flat_map(elements)
                .filter(|i| compact(node_text(*i, text)) == compact(element))
                .map(|i| TextEdit::delete(list_removal_range(i, text)))
                .collect()
        };
        self.apply(edits)
    }

    /// Replace every call whose callee reads `callee` (e.g.
    /// `AnimationModule.forRoot`) with `replacement`. Nested matches inside a
    /// replaced call are covered by the outer replacement. Returns the
    /// number of calls replaced.
    pub fn replace_calls(&mut self, callee: &str, replacement: &str) -> EditResult<usize> {
        let edits: Vec<_> = {
            let text = self.text.as_str();
            let wanted = compact(callee);
            let mut last_end = 0;
            let mut edits = Vec::new();
            for call in nodes_of_kind(self.tree.root_node(), "call_expression") {
                if call.start_byte() < last_end {
                    continue;
                }
                let Some(function) = call.child_by_field_name("function") else {
                    continue;
                };
                if compact(node_text(function, text)) == wanted {
                    edits.push(TextEdit::replace(call.byte_range(), replacement));
                    last_end = call.end_byte();
                }
            }
            edits
        };
        let count = edits.len();
        if self.apply(edits)? { Ok(count) } else { Ok(0) }
    }

    /// Rewrite bare type references `type_name` to `type_name<argument>`.
    /// References that already carry type arguments are left alone.
    pub fn add_generic_argument(&mut self, type_name: &str, argument: &str) -> EditResult<bool> {
        let edits: Vec<_> = nodes_of_kind(self.tree.root_node(), "type_identifier")
            .into_iter()
            .filter(|n| node_text(*n, &self.text) == type_name)
            .filter(|n| {
                !n.parent().is_some_and(|p| {
                    matches!(
                        p.kind(),
                        "generic_type"
                            | "nested_type_identifier"
                            | "class_declaration"
                            | "abstract_class_declaration"
                            | "interface_declaration"
                            | "type_alias_declaration"
                            | "type_parameter"
                    )
                })
            })
            .map(|n| TextEdit::insert(n.end_byte(), format!("<{argument}>")))
            .collect();
        self.apply(edits)
    }
}

fn has_ancestor(node: Node<'_>, kind: &str) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == kind {
            return true;
        }
        current = n.parent();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;

    fn file(src: &str) -> SourceFile {
        SourceFile::parse(Utf8PathBuf::from("app.module.ts"), src.to_string()).expect("parses")
    }

    #[test]
    fn removes_only_specifier_and_statement() {
        let mut f = file("import { HttpModule } from '@angular/http';\nimport { NgModule } from '@angular/core';\n");
        assert!(f.remove_named_import("@angular/http", "HttpModule").expect("edit"));
        assert_eq!(f.text(), "import { NgModule } from '@angular/core';\n");
        assert!(!f.remove_named_import("@angular/http", "HttpModule").expect("edit"));
    }

    #[test]
    fn removes_one_of_several_specifiers() {
        let mut f = file("import { Http, HttpModule, Headers } from '@angular/http';\n");
        assert!(f.remove_named_import("@angular/http", "HttpModule").expect("edit"));
        assert_eq!(f.text(), "import { Http, Headers } from '@angular/http';\n");
    }

    #[test]
    fn keeps_default_import_when_named_list_empties() {
        let mut f = file("import Http, { HttpModule } from 'legacy-http';\n");
        assert!(f.remove_named_import("legacy-http", "HttpModule").expect("edit"));
        assert_eq!(f.text(), "import Http from 'legacy-http';\n");
    }

    #[test]
    fn ensure_import_extends_existing_statement() {
        let mut f = file("import { HttpClient } from '@angular/common/http';\n");
        assert!(f.ensure_named_import("@angular/common/http", "HttpClientModule").expect("edit"));
        assert_eq!(
            f.text(),
            "import { HttpClient, HttpClientModule } from '@angular/common/http';\n"
        );
        assert!(!f.ensure_named_import("@angular/common/http", "HttpClientModule").expect("edit"));
    }

    #[test]
    fn ensure_import_adds_statement_with_matching_quotes() {
        let mut f = file("import { NgModule } from \"@angular/core\";\n\nexport class AppModule {}\n");
        assert!(f.ensure_named_import("@angular/common/http", "HttpClientModule").expect("edit"));
        assert_eq!(
            f.text(),
            "import { NgModule } from \"@angular/core\";\nimport { HttpClientModule } from \"@angular/common/http\";\n\nexport class AppModule {}\n"
        );
    }

    #[test]
    fn ensure_import_in_file_without_imports() {
        let mut f = file("export const x = 1;\n");
        assert!(f.ensure_named_import("@angular/core", "NgModule").expect("edit"));
        assert_eq!(f.text(), "import { NgModule } from '@angular/core';\nexport const x = 1;\n");
    }

    #[test]
    fn removes_decorator_property_in_multiline_object() {
        let src = "@NgModule({\n  declarations: [AppComponent],\n  entryComponents: [DialogComponent],\n  imports: [BrowserModule],\n})\nexport class AppModule {}\n";
        let mut f = file(src);
        assert!(f.remove_decorator_property("NgModule", "entryComponents").expect("edit"));
        assert_eq!(
            f.text(),
            "@NgModule({\n  declarations: [AppComponent],\n  imports: [BrowserModule],\n})\nexport class AppModule {}\n"
        );
        assert!(!f.remove_decorator_property("NgModule", "entryComponents").expect("edit"));
    }

    #[test]
    fn removes_last_and_first_decorator_properties() {
        let mut last = file("@NgModule({ imports: [A], entryComponents: [B] })\nclass M {}\n");
        assert!(last.remove_decorator_property("NgModule", "entryComponents").expect("edit"));
        assert_eq!(last.text(), "@NgModule({ imports: [A] })\nclass M {}\n");

        let mut first = file("@NgModule({ entryComponents: [B], imports: [A] })\nclass M {}\n");
        assert!(first.remove_decorator_property("NgModule", "entryComponents").expect("edit"));
        assert_eq!(first.text(), "@NgModule({ imports: [A] })\nclass M {}\n");

        let mut sole = file("@NgModule({\n  entryComponents: [B]\n})\nclass M {}\n");
        assert!(sole.remove_decorator_property("NgModule", "entryComponents").expect("edit"));
        assert_eq!(sole.text(), "@NgModule({\n})\nclass M {}\n");
    }

    #[test]
    fn other_decorators_are_untouched() {
        let mut f = file("@Component({ entryComponents: [B] })\nclass C {}\n");
        assert!(!f.remove_decorator_property("NgModule", "entryComponents").expect("edit"));
    }

    #[test]
    fn adds_to_decorator_array_once() {
        let src = "@NgModule({\n  imports: [\n    BrowserModule,\n  ],\n})\nexport class AppModule {}\n";
        let mut f = file(src);
        assert!(f.add_to_decorator_array("NgModule", "imports", "HttpClientModule").expect("edit"));
        assert_eq!(
            f.text(),
            "@NgModule({\n  imports: [\n    BrowserModule,\n    HttpClientModule,\n  ],\n})\nexport class AppModule {}\n"
        );
        assert!(!f.add_to_decorator_array("NgModule", "imports", "HttpClientModule").expect("edit"));
    }

    #[test]
    fn creates_missing_decorator_array() {
        let mut f = file("@NgModule({ declarations: [A] })\nclass M {}\n");
        assert!(f.add_to_decorator_array("NgModule", "imports", "HttpClientModule").expect("edit"));
        assert_eq!(
            f.text(),
            "@NgModule({ declarations: [A], imports: [HttpClientModule] })\nclass M {}\n"
        );

        let mut empty = file("@NgModule({})\nclass M {}\n");
        assert!(empty.add_to_decorator_array("NgModule", "imports", "X").expect("edit"));
        assert_eq!(empty.text(), "@NgModule({ imports: [X] })\nclass M {}\n");
    }

    #[test]
    fn removes_array_element() {
        let mut f = file("@NgModule({ imports: [BrowserModule, HttpModule] })\nclass M {}\n");
        assert!(f.remove_from_decorator_array("NgModule", "imports", "HttpModule").expect("edit"));
        assert_eq!(f.text(), "@NgModule({ imports: [BrowserModule] })\nclass M {}\n");
    }

    #[test]
    fn replaces_qualified_calls() {
        let mut f = file("const p = [AnimationModule.forRoot({ x: AnimationModule.forRoot() }), other()];\n");
        assert_eq!(f.replace_calls("AnimationModule.forRoot", "provideAnimations()").expect("edit"), 1);
        assert_eq!(f.text(), "const p = [provideAnimations(), other()];\n");
        assert_eq!(f.replace_calls("AnimationModule.forRoot", "provideAnimations()").expect("edit"), 0);
    }

    #[test]
    fn adds_generic_argument_to_bare_type_only() {
        let src = "export class SharedModule {\n  static forRoot(): ModuleWithProviders {\n    return { ngModule: SharedModule };\n  }\n  static forChild(): ModuleWithProviders<SharedModule> {\n    return { ngModule: SharedModule };\n  }\n}\n";
        let mut f = file(src);
        let name = f.first_class_name().expect("class");
        assert_eq!(name, "SharedModule");
        assert!(f.add_generic_argument("ModuleWithProviders", &name).expect("edit"));
        assert!(f.text().contains("static forRoot(): ModuleWithProviders<SharedModule> {"));
        assert_eq!(f.text().matches("ModuleWithProviders<SharedModule>").count(), 2);
        assert!(!f.add_generic_argument("ModuleWithProviders", &name).expect("edit"));
    }

    #[test]
    fn removes_side_effect_imports_and_subpaths() {
        let mut f = file("import 'rxjs-compat';\nimport 'rxjs-compat/add/operator/map';\nimport { of } from 'rxjs';\n");
        assert!(f.remove_side_effect_import("rxjs-compat").expect("edit"));
        assert_eq!(f.text(), "import { of } from 'rxjs';\n");
    }

    #[test]
    fn references_ignore_import_statements() {
        let f = file("import { AnimationModule } from 'x';\nconst a = provideAnimations();\n");
        assert_eq!(f.references("AnimationModule"), 0);
        assert_eq!(f.import_source("AnimationModule").as_deref(), Some("x"));
    }

    #[test]
    fn skipped_file_ignores_edits() {
        let mut f = file("import { HttpModule } from '@angular/http';\n");
        f.skip("test");
        assert!(!f.remove_named_import("@angular/http", "HttpModule").expect("edit"));
        assert!(f.is_skipped());
    }
}
