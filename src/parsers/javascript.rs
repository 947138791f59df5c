//! JavaScript structural extractor backed by tree-sitter-javascript

use crate::core::{
    ClassInfo, Error, FunctionInfo, ImportInfo, Language, ModuleInfo, Result, CONSTRUCTOR_NAME,
};
use crate::parsers::{first_error_position, node_text, normalize_indent, statement_lines, Parser};
use tree_sitter::Node;

pub struct JavaScriptParser;

impl JavaScriptParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JavaScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for JavaScriptParser {
    fn parse(&self, source: &str, module_name: &str) -> Result<ModuleInfo> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| Error::Config(format!("failed to load JavaScript grammar: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(0, 0, "JavaScript parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error_position(root);
            return Err(Error::parse(line, column, "source is not valid JavaScript"));
        }

        let mut module = ModuleInfo::new(module_name);

        let mut pending_comment: Option<Node> = None;
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "comment" {
                pending_comment = Some(child);
                continue;
            }
            let docstring = take_docstring(&mut pending_comment, child, source);
            if module.docstring.is_none()
                && module.classes.is_empty()
                && module.functions.is_empty()
                && docstring.is_some()
                && !is_declaration(child)
            {
                module.docstring = docstring;
                collect_top_level(child, source, None, &mut module);
            } else {
                collect_top_level(child, source, docstring, &mut module);
            }
        }

        Ok(module)
    }

    fn language(&self) -> Language {
        Language::JavaScript
    }
}

fn is_declaration(node: Node) -> bool {
    matches!(
        node.kind(),
        "class_declaration" | "function_declaration" | "generator_function_declaration"
    )
}

fn collect_top_level(
    node: Node,
    source: &str,
    docstring: Option<String>,
    module: &mut ModuleInfo,
) {
    match node.kind() {
        "class_declaration" => {
            module.classes.push(extract_class(node, source, docstring));
        }
        "function_declaration" | "generator_function_declaration" => {
            module
                .functions
                .push(extract_function(node, source, docstring, false));
        }
        "import_statement" => extract_import(node, source, module),
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = node.walk();
            for declarator in node.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name) = declarator
                    .child_by_field_name("name")
                    .filter(|n| n.kind() == "identifier")
                {
                    let name = node_text(name, source).to_string();
                    if !module.globals.contains(&name) {
                        module.globals.push(name);
                    }
                }
            }
        }
        "export_statement" => {
            if let Some(declaration) = node.child_by_field_name("declaration") {
                collect_top_level(declaration, source, docstring, module);
            }
        }
        _ => {}
    }
}

fn extract_class(node: Node, source: &str, docstring: Option<String>) -> ClassInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    let mut class_info = ClassInfo::new(name);
    class_info.docstring = docstring;

    // extends clause: single base, kept as an ordered list for model parity
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "class_heritage" {
            let mut heritage_cursor = child.walk();
            for base in child.named_children(&mut heritage_cursor) {
                if matches!(base.kind(), "identifier" | "member_expression") {
                    class_info.bases.push(simple_member_name(node_text(base, source)));
                }
            }
        }
        if child.kind() == "decorator" {
            class_info
                .decorators
                .push(simple_member_name(node_text(child, source).trim_start_matches('@')));
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        let mut pending_comment: Option<Node> = None;
        let mut body_cursor = body.walk();
        for member in body.named_children(&mut body_cursor) {
            match member.kind() {
                "comment" => pending_comment = Some(member),
                "method_definition" => {
                    let method_doc = take_docstring(&mut pending_comment, member, source);
                    class_info
                        .methods
                        .push(extract_function(member, source, method_doc, true));
                }
                _ => pending_comment = None,
            }
        }
    }

    class_info
}

fn extract_function(
    node: Node,
    source: &str,
    docstring: Option<String>,
    is_method: bool,
) -> FunctionInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    let mut func = FunctionInfo::new(name);
    func.docstring = docstring;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "async" => func.is_async = true,
            // Modifier keywords map onto the neutral decorator names so the
            // model round-trips through the Python side unchanged
            "static" => func.decorators.push("staticmethod".to_string()),
            "get" => func.decorators.push("property".to_string()),
            _ => {}
        }
    }

    if let Some(params) = node.child_by_field_name("parameters") {
        let mut params_cursor = params.walk();
        for param in params.named_children(&mut params_cursor) {
            let name = match param.kind() {
                "identifier" => Some(node_text(param, source).to_string()),
                "assignment_pattern" => param
                    .child_by_field_name("left")
                    .map(|n| node_text(n, source).to_string()),
                "rest_pattern" => Some(node_text(param, source).to_string()),
                _ => None,
            };
            if let Some(name) = name {
                func.args.push(name);
            }
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        let mut lines = Vec::new();
        let mut body_cursor = body.walk();
        for stmt in body.named_children(&mut body_cursor) {
            lines.extend(statement_lines(stmt, source));
        }
        func.body = normalize_indent(lines);
    }

    if is_method && func.name == "constructor" {
        func.name = CONSTRUCTOR_NAME.to_string();
    }

    func
}

fn extract_import(node: Node, source: &str, module: &mut ModuleInfo) {
    let Some(source_node) = node.child_by_field_name("source") else {
        return;
    };
    let module_path = node_text(source_node, source)
        .trim_matches(['\'', '"', '`'])
        .to_string();

    let mut names = Vec::new();
    let mut alias = None;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "import_clause" {
            continue;
        }
        let mut clause_cursor = child.walk();
        for clause in child.named_children(&mut clause_cursor) {
            match clause.kind() {
                "identifier" => alias = Some(node_text(clause, source).to_string()),
                "namespace_import" => {
                    if let Some(name) = clause
                        .named_child(0)
                        .filter(|n| n.kind() == "identifier")
                    {
                        alias = Some(node_text(name, source).to_string());
                    }
                }
                "named_imports" => {
                    let mut names_cursor = clause.walk();
                    for spec in clause.named_children(&mut names_cursor) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        let bound = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(bound) = bound {
                            names.push(node_text(bound, source).to_string());
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let mut import = ImportInfo::named(module_path, names);
    import.alias = alias;
    module.imports.push(import);
}

/// Consume a pending block comment as a docstring when it sits directly
/// above the declaration
fn take_docstring(
    pending: &mut Option<Node>,
    declaration: Node,
    source: &str,
) -> Option<String> {
    let comment = (*pending)?;
    *pending = None;
    let text = node_text(comment, source);
    if !text.starts_with("/*") {
        return None;
    }
    if comment.end_position().row + 1 < declaration.start_position().row {
        return None;
    }
    Some(strip_block_comment(text))
}

fn strip_block_comment(text: &str) -> String {
    let inner = text
        .trim_start_matches("/**")
        .trim_start_matches("/*")
        .trim_end_matches("*/");
    inner
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn simple_member_name(text: &str) -> String {
    let text = text.split('(').next().unwrap_or(text);
    text.rsplit('.').next().unwrap_or(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ModuleInfo {
        JavaScriptParser::new().parse(source, "test").unwrap()
    }

    #[test]
    fn test_parse_class_with_constructor() {
        let source = r#"
/** A simple counter. */
class Counter {
    constructor(start) {
        this.count = start;
    }

    value() {
        return this.count;
    }
}
"#;
        let module = parse(source);
        let class = module.class("Counter").unwrap();
        assert_eq!(class.docstring.as_deref(), Some("A simple counter."));
        assert_eq!(class.methods.len(), 2);

        let ctor = class.method(CONSTRUCTOR_NAME).unwrap();
        assert_eq!(ctor.args, vec!["start"]);
        assert_eq!(ctor.body, vec!["this.count = start;"]);
    }

    #[test]
    fn test_parse_function_and_modifiers() {
        let source = r#"
class Store {
    static fromJson(data) {
        return new Store(data);
    }

    get size() {
        return this.items.length;
    }
}

async function fetchAll(urls) {
    return urls;
}
"#;
        let module = parse(source);
        let class = module.class("Store").unwrap();
        assert_eq!(
            class.method("fromJson").unwrap().decorators,
            vec!["staticmethod"]
        );
        assert_eq!(class.method("size").unwrap().decorators, vec!["property"]);
        assert!(module.function("fetchAll").unwrap().is_async);
    }

    #[test]
    fn test_parse_extends_and_empty_class() {
        let source = "class Child extends Base {}\nclass Empty {}\n";
        let module = parse(source);
        assert_eq!(module.class("Child").unwrap().bases, vec!["Base"]);
        assert!(module.class("Empty").unwrap().methods.is_empty());
    }

    #[test]
    fn test_parse_imports() {
        let source = r#"
import fs from 'fs';
import { join, resolve } from 'path';
import * as utils from './utils';
"#;
        let module = parse(source);
        assert_eq!(module.imports.len(), 3);
        assert_eq!(module.imports[0].alias.as_deref(), Some("fs"));
        assert_eq!(module.imports[1].names, vec!["join", "resolve"]);
        assert_eq!(module.imports[2].module, "./utils");
        assert_eq!(module.imports[2].alias.as_deref(), Some("utils"));
    }

    #[test]
    fn test_parse_globals() {
        let source = "const LIMIT = 10;\nlet current = 0;\nvar legacy = true;\n";
        let module = parse(source);
        assert_eq!(module.globals, vec!["LIMIT", "current", "legacy"]);
    }

    #[test]
    fn test_parse_error_is_typed() {
        let result = JavaScriptParser::new().parse("class {{{", "test");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_default_parameter_names() {
        let source = "function greet(name, punct = '!') { return name + punct; }\n";
        let module = parse(source);
        assert_eq!(module.function("greet").unwrap().args, vec!["name", "punct"]);
    }
}
