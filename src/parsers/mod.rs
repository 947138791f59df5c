//! Structural extractors for the supported languages
//!
//! Both languages are parsed with a real tree-sitter grammar behind the
//! same [`Parser`] trait; the factory [`get_parser`] selects the
//! implementation by language.

pub mod javascript;
pub mod python;

use crate::core::{Language, ModuleInfo, Result};
use tree_sitter::Node;

/// A structural extractor: source text in, language-neutral model out
pub trait Parser {
    fn parse(&self, source: &str, module_name: &str) -> Result<ModuleInfo>;
    fn language(&self) -> Language;
}

/// Select the parser implementation for a language
pub fn get_parser(language: Language) -> Box<dyn Parser> {
    match language {
        Language::Python => Box::new(python::PythonParser::new()),
        Language::JavaScript => Box::new(javascript::JavaScriptParser::new()),
    }
}

/// Get text for a tree-sitter node
pub(crate) fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Source lines of a statement node, dedented to the node's own column
/// so nested lines keep only their relative indentation
pub(crate) fn statement_lines(node: Node, source: &str) -> Vec<String> {
    let col = node.start_position().column;
    node_text(node, source)
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.trim_end().to_string()
            } else {
                dedent_by(line, col).trim_end().to_string()
            }
        })
        .collect()
}

fn dedent_by(line: &str, columns: usize) -> &str {
    let mut remaining = columns;
    let mut idx = 0;
    for (i, ch) in line.char_indices() {
        if remaining == 0 || !ch.is_whitespace() {
            break;
        }
        remaining -= 1;
        idx = i + ch.len_utf8();
    }
    &line[idx..]
}

/// Re-emit body lines with indentation normalized to four spaces per
/// nesting level, deriving the original unit from the smallest positive
/// leading-space count seen in the block
pub(crate) fn normalize_indent(lines: Vec<String>) -> Vec<String> {
    let unit = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_spaces(l))
        .filter(|&n| n > 0)
        .min()
        .unwrap_or(4)
        .max(1);

    lines
        .into_iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                let level = leading_spaces(&line) / unit;
                format!("{}{}", "    ".repeat(level), line.trim())
            }
        })
        .collect()
}

pub(crate) fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ').count()
}

/// 1-indexed position of the first error or missing node in a tree
pub(crate) fn first_error_position(root: Node) -> (usize, usize) {
    let mut cursor = root.walk();
    let mut position = (
        root.start_position().row + 1,
        root.start_position().column + 1,
    );
    'walk: loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            position = (
                node.start_position().row + 1,
                node.start_position().column + 1,
            );
            break;
        }
        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_parser_languages() {
        assert_eq!(get_parser(Language::Python).language(), Language::Python);
        assert_eq!(
            get_parser(Language::JavaScript).language(),
            Language::JavaScript
        );
    }

    #[test]
    fn test_normalize_indent_reunits() {
        let lines = vec![
            "if x:".to_string(),
            "  y = 1".to_string(),
            "    z = 2".to_string(),
        ];
        let normalized = normalize_indent(lines);
        assert_eq!(normalized[0], "if x:");
        assert_eq!(normalized[1], "    y = 1");
        assert_eq!(normalized[2], "        z = 2");
    }

    #[test]
    fn test_normalize_indent_blank_lines() {
        let lines = vec!["a = 1".to_string(), "   ".to_string()];
        let normalized = normalize_indent(lines);
        assert_eq!(normalized[1], "");
    }
}
