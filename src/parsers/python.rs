//! Python structural extractor backed by tree-sitter-python

use crate::core::{
    ClassInfo, Error, FunctionInfo, ImportInfo, Language, ModuleInfo, Result, CONSTRUCTOR_NAME,
};
use crate::parsers::{first_error_position, node_text, normalize_indent, statement_lines, Parser};
use tree_sitter::Node;

pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PythonParser {
    fn parse(&self, source: &str, module_name: &str) -> Result<ModuleInfo> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| Error::Config(format!("failed to load Python grammar: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(0, 0, "Python parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error_position(root);
            return Err(Error::parse(line, column, "source is not valid Python"));
        }

        let mut module = ModuleInfo::new(module_name);
        module.docstring = block_docstring(root, source);

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            collect_top_level(child, source, &mut module);
        }

        Ok(module)
    }

    fn language(&self) -> Language {
        Language::Python
    }
}

fn collect_top_level(node: Node, source: &str, module: &mut ModuleInfo) {
    match node.kind() {
        "class_definition" => {
            module.classes.push(extract_class(node, source, &[]));
        }
        "function_definition" => {
            module
                .functions
                .push(extract_function(node, source, &[], false));
        }
        "decorated_definition" => {
            let decorators = extract_decorators(node, source);
            if let Some(def) = node.child_by_field_name("definition") {
                match def.kind() {
                    "class_definition" => {
                        module.classes.push(extract_class(def, source, &decorators));
                    }
                    "function_definition" => {
                        module
                            .functions
                            .push(extract_function(def, source, &decorators, false));
                    }
                    _ => {}
                }
            }
        }
        "import_statement" => extract_import(node, source, module),
        "import_from_statement" => extract_import_from(node, source, module),
        "expression_statement" => {
            // Direct assignment at module scope binds a global
            if let Some(assign) = node.named_child(0).filter(|c| c.kind() == "assignment") {
                if let Some(left) = assign.child_by_field_name("left") {
                    if left.kind() == "identifier" {
                        let name = node_text(left, source).to_string();
                        if !module.globals.contains(&name) {
                            module.globals.push(name);
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

fn extract_class(node: Node, source: &str, decorators: &[String]) -> ClassInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    let mut class_info = ClassInfo::new(name);
    class_info.decorators = decorators.to_vec();

    if let Some(superclasses) = node.child_by_field_name("superclasses") {
        let mut cursor = superclasses.walk();
        for base in superclasses.named_children(&mut cursor) {
            if matches!(base.kind(), "identifier" | "attribute") {
                class_info.bases.push(simple_name(node_text(base, source)));
            }
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        class_info.docstring = block_docstring(body, source);
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "function_definition" => {
                    class_info.methods.push(extract_function(child, source, &[], true));
                }
                "decorated_definition" => {
                    let method_decorators = extract_decorators(child, source);
                    if let Some(def) = child
                        .child_by_field_name("definition")
                        .filter(|d| d.kind() == "function_definition")
                    {
                        class_info
                            .methods
                            .push(extract_function(def, source, &method_decorators, true));
                    }
                }
                _ => {}
            }
        }
    }

    class_info
}

fn extract_function(
    node: Node,
    source: &str,
    decorators: &[String],
    is_method: bool,
) -> FunctionInfo {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    let mut func = FunctionInfo::new(name);
    func.decorators = decorators.to_vec();
    func.is_async = has_async_keyword(node);

    if let Some(params) = node.child_by_field_name("parameters") {
        func.args = extract_args(params, source, is_method);
    }

    if let Some(return_type) = node.child_by_field_name("return_type") {
        func.returns = Some(simple_type_name(node_text(return_type, source)));
    }

    if let Some(body) = node.child_by_field_name("body") {
        func.docstring = block_docstring(body, source);
        let mut lines = Vec::new();
        let mut cursor = body.walk();
        for (i, stmt) in body.named_children(&mut cursor).enumerate() {
            if i == 0 && func.docstring.is_some() {
                continue;
            }
            if stmt.kind() == "comment" {
                continue;
            }
            lines.extend(statement_lines(stmt, source));
        }
        func.body = normalize_indent(lines);
    }

    if is_method && func.name == "__init__" {
        func.name = CONSTRUCTOR_NAME.to_string();
    }

    func
}

fn extract_args(params: Node, source: &str, is_method: bool) -> Vec<String> {
    let mut args = Vec::new();
    let mut cursor = params.walk();
    for (i, param) in params.named_children(&mut cursor).enumerate() {
        let name = match param.kind() {
            "identifier" => Some(node_text(param, source).to_string()),
            "typed_parameter" => param
                .named_child(0)
                .filter(|n| n.kind() == "identifier")
                .map(|n| node_text(n, source).to_string()),
            "default_parameter" | "typed_default_parameter" => param
                .child_by_field_name("name")
                .map(|n| node_text(n, source).to_string()),
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                Some(node_text(param, source).to_string())
            }
            _ => None,
        };
        if let Some(name) = name {
            if is_method && i == 0 && (name == "self" || name == "cls") {
                continue;
            }
            args.push(name);
        }
    }
    args
}

fn extract_decorators(node: Node, source: &str) -> Vec<String> {
    let mut decorators = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "decorator" {
            decorators.push(simple_name(node_text(child, source)));
        }
    }
    decorators
}

fn extract_import(node: Node, source: &str, module: &mut ModuleInfo) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                module
                    .imports
                    .push(ImportInfo::module(node_text(child, source)));
            }
            "aliased_import" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source).to_string())
                    .unwrap_or_default();
                let alias = child
                    .child_by_field_name("alias")
                    .map(|n| node_text(n, source).to_string());
                let mut import = ImportInfo::module(name);
                import.alias = alias;
                module.imports.push(import);
            }
            _ => {}
        }
    }
}

fn extract_import_from(node: Node, source: &str, module: &mut ModuleInfo) {
    let Some(module_name) = node.child_by_field_name("module_name") else {
        return;
    };
    let module_path = node_text(module_name, source).to_string();

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.id() == module_name.id() {
            continue;
        }
        match child.kind() {
            "dotted_name" | "identifier" => {
                names.push(node_text(child, source).to_string());
            }
            "aliased_import" => {
                if let Some(alias) = child.child_by_field_name("alias") {
                    names.push(node_text(alias, source).to_string());
                } else if let Some(name) = child.child_by_field_name("name") {
                    names.push(node_text(name, source).to_string());
                }
            }
            "wildcard_import" => names.push("*".to_string()),
            _ => {}
        }
    }

    module.imports.push(ImportInfo::named(module_path, names));
}

fn has_async_keyword(node: Node) -> bool {
    let mut cursor = node.walk();
    // bound to a local so the iterator's borrow of the cursor ends
    // before the cursor is dropped
    let is_async = node.children(&mut cursor).any(|c| c.kind() == "async");
    is_async
}

/// First string-expression statement of a block, with delimiters stripped
fn block_docstring(block: Node, source: &str) -> Option<String> {
    let first = block.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let string = first.named_child(0).filter(|n| n.kind() == "string")?;
    Some(strip_string_delimiters(node_text(string, source)))
}

fn strip_string_delimiters(text: &str) -> String {
    let text = text.trim_start_matches(['r', 'b', 'f', 'u', 'R', 'B', 'F', 'U']);
    for delim in ["\"\"\"", "'''", "\"", "'"] {
        if text.starts_with(delim) && text.ends_with(delim) && text.len() >= 2 * delim.len() {
            return text[delim.len()..text.len() - delim.len()].trim().to_string();
        }
    }
    text.to_string()
}

fn simple_name(text: &str) -> String {
    let text = text.trim_start_matches('@').trim();
    let text = text.split('(').next().unwrap_or(text);
    text.rsplit('.').next().unwrap_or(text).trim().to_string()
}

fn simple_type_name(text: &str) -> String {
    text.split('[').next().unwrap_or(text).trim().to_string()
}
