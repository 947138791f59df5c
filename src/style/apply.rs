//! Style application: re-indent, re-quote, and re-case rendered text
//!
//! Works on plain text and makes no structural assumptions, so it can run
//! standalone over output produced by an external translation engine.

use crate::style::casing::{self, NamingConvention};
use crate::style::profile::{QuoteStyle, StyleProfile, VOTE_EXCLUDED};
use once_cell::sync::Lazy;
use regex::Regex;

/// Reformat text to match a style profile
pub fn apply(text: &str, profile: &StyleProfile) -> String {
    let text = apply_indentation(text, profile.indent_size);
    let text = apply_quote_style(&text, profile.quote_style);
    apply_naming_convention(&text, profile.naming_convention)
}

/// Re-derive each line's nesting level from the text's current indent unit
/// and re-emit it at the profile's indent size
pub fn apply_indentation(text: &str, indent_size: usize) -> String {
    let unit = current_indent_unit(text);
    let mut out = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        let leading = line.len() - line.trim_start_matches(' ').len();
        let level = leading / unit;
        out.push(format!(
            "{}{}",
            " ".repeat(indent_size * level),
            line.trim_start_matches(' ')
        ));
    }
    let mut result = out.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Smallest positive leading-space count in the text. The minimum stays
/// one level deep even when deeper lines outnumber shallower ones.
fn current_indent_unit(text: &str) -> usize {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .filter(|&leading| leading > 0)
        .min()
        .unwrap_or(4)
        .max(1)
}

/// Rewrite string-literal delimiters, escaping interior occurrences of the
/// new quote and unescaping the old one. Template literals pass through
/// untouched.
pub fn apply_quote_style(text: &str, quote_style: QuoteStyle) -> String {
    let target = quote_style.delimiter();
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '`' {
            // template literal: copy verbatim through the closing backtick
            out.push(c);
            i += 1;
            let mut escaped = false;
            while i < chars.len() {
                let t = chars[i];
                out.push(t);
                i += 1;
                if escaped {
                    escaped = false;
                } else if t == '\\' {
                    escaped = true;
                } else if t == '`' {
                    break;
                }
            }
        } else if (c == '\'' || c == '"') && is_triple(&chars, i, c) {
            // triple-quoted block (docstring): copy verbatim, delimiters
            // included, so it is never mistaken for an empty literal plus
            // a stray quote
            let end = scan_triple_end(&chars, i, c);
            out.extend(&chars[i..end]);
            i = end;
        } else if c == '\'' || c == '"' {
            match scan_literal(&chars, i, c) {
                Some(end) => {
                    out.push(target);
                    out.push_str(&requote(&chars[i + 1..end], c, target));
                    out.push(target);
                    i = end + 1;
                }
                None => {
                    out.push(c);
                    i += 1;
                }
            }
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

/// Three consecutive copies of `delim` starting at `i`
fn is_triple(chars: &[char], i: usize, delim: char) -> bool {
    chars.len() >= i + 3 && chars[i + 1] == delim && chars[i + 2] == delim
}

/// Exclusive end index of a triple-quoted block opening at `start`. An
/// unterminated block runs to end of input.
fn scan_triple_end(chars: &[char], start: usize, delim: char) -> usize {
    let mut i = start + 3;
    while i + 3 <= chars.len() {
        if chars[i] == delim && chars[i + 1] == delim && chars[i + 2] == delim {
            return i + 3;
        }
        i += 1;
    }
    chars.len()
}

/// Index of the closing delimiter for a literal opening at `start`, if it
/// closes before end of line
fn scan_literal(chars: &[char], start: usize, delim: char) -> Option<usize> {
    let mut escaped = false;
    for (offset, &c) in chars[start + 1..].iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == delim {
            return Some(start + 1 + offset);
        } else if c == '\n' {
            return None;
        }
    }
    None
}

fn requote(content: &[char], old: char, new: char) -> String {
    if old == new {
        return content.iter().collect();
    }
    let mut out = String::with_capacity(content.len());
    let mut escaped = false;
    for &c in content {
        if escaped {
            if c == old {
                out.push(old);
            } else {
                out.push('\\');
                out.push(c);
            }
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == new {
            out.push('\\');
            out.push(new);
        } else {
            out.push(c);
        }
    }
    if escaped {
        out.push('\\');
    }
    out
}

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier regex"));

/// Re-case identifiers outside string literals. Names already in
/// PascalCase are declared types and stay untouched when the target is
/// snake_case or camelCase.
pub fn apply_naming_convention(text: &str, convention: NamingConvention) -> String {
    segments(text)
        .into_iter()
        .map(|(is_code, part)| {
            if is_code {
                recase_code(&part, convention)
            } else {
                part
            }
        })
        .collect()
}

fn recase_code(code: &str, convention: NamingConvention) -> String {
    IDENTIFIER
        .replace_all(code, |caps: &regex::Captures| {
            let name = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            if VOTE_EXCLUDED.contains(&name) || name.starts_with("__") {
                return name.to_string();
            }
            if casing::is_pascal_case(name) && convention != NamingConvention::PascalCase {
                return name.to_string();
            }
            casing::convert(name, convention)
        })
        .into_owned()
}

/// Split text into alternating code and string-literal segments
fn segments(text: &str) -> Vec<(bool, String)> {
    let chars: Vec<char> = text.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' || c == '"' || c == '`' {
            let end = if c == '`' {
                scan_backtick(&chars, i)
            } else if is_triple(&chars, i, c) {
                Some(scan_triple_end(&chars, i, c) - 1)
            } else {
                scan_literal(&chars, i, c)
            };
            if let Some(end) = end {
                if !current.is_empty() {
                    parts.push((true, std::mem::take(&mut current)));
                }
                parts.push((false, chars[i..=end].iter().collect()));
                i = end + 1;
                continue;
            }
        }
        current.push(c);
        i += 1;
    }
    if !current.is_empty() {
        parts.push((true, current));
    }
    parts
}

fn scan_backtick(chars: &[char], start: usize) -> Option<usize> {
    let mut escaped = false;
    for (offset, &c) in chars[start + 1..].iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '`' {
            return Some(start + 1 + offset);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_indentation() {
        let text = "def f():\n  a = 1\n  if a:\n    b = 2\n";
        let result = apply_indentation(text, 4);
        assert_eq!(result, "def f():\n    a = 1\n    if a:\n        b = 2\n");
    }

    #[test]
    fn test_indentation_multiples_of_unit() {
        let text = "class A {\n   up() {\n      return 1;\n   }\n}\n";
        let result = apply_indentation(text, 2);
        for line in result.lines() {
            let leading = line.len() - line.trim_start().len();
            assert_eq!(leading % 2, 0, "line {line:?} not a multiple of 2");
        }
    }

    #[test]
    fn test_indent_unit_from_minimum_not_mode() {
        // deeper lines outnumber the shallower ones; the unit must still
        // be one level, not two
        let text = "class Counter {\n    constructor(start) {\n        this.a = 1;\n        this.b = 2;\n        this.c = 3;\n    }\n}\n";
        assert_eq!(apply_indentation(text, 4), text);
    }

    #[test]
    fn test_apply_quote_style_rewrites_and_escapes() {
        assert_eq!(
            apply_quote_style("x = \"hello\"", QuoteStyle::Single),
            "x = 'hello'"
        );
        assert_eq!(
            apply_quote_style("x = \"it's\"", QuoteStyle::Single),
            r"x = 'it\'s'"
        );
        assert_eq!(
            apply_quote_style(r"x = 'say \'hi\''", QuoteStyle::Double),
            "x = \"say 'hi'\""
        );
    }

    #[test]
    fn test_quote_style_leaves_triple_quoted_blocks_alone() {
        let text = "def f():\n    \"\"\"\n    Summary line.\n    \"\"\"\n    x = \"plain\"\n";
        let result = apply_quote_style(text, QuoteStyle::Single);
        assert!(result.contains("\"\"\"\n    Summary line.\n    \"\"\""));
        assert!(result.contains("x = 'plain'"));
        assert!(!result.contains("''\""));
    }

    #[test]
    fn test_naming_convention_skips_triple_quoted_blocks() {
        let text = "def f():\n    \"\"\"uses snake_case words\"\"\"\n    my_value = 1\n";
        let result = apply_naming_convention(text, NamingConvention::CamelCase);
        assert!(result.contains("\"\"\"uses snake_case words\"\"\""));
        assert!(result.contains("myValue = 1"));
    }

    #[test]
    fn test_quote_style_leaves_templates_alone() {
        let text = "const s = `hello ${name}`;";
        assert_eq!(apply_quote_style(text, QuoteStyle::Single), text);
    }

    #[test]
    fn test_apply_naming_convention_skips_strings_and_types() {
        let text = "myValue = MyClass('literalName')";
        let result = apply_naming_convention(text, NamingConvention::SnakeCase);
        assert_eq!(result, "my_value = MyClass('literalName')");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let profile = StyleProfile {
            indent_size: 2,
            quote_style: QuoteStyle::Single,
            naming_convention: NamingConvention::CamelCase,
            ..StyleProfile::default()
        };
        let text = "def my_func():\n    msg = \"it's here\"\n    return msg\n";
        let once = apply(text, &profile);
        let twice = apply(&once, &profile);
        assert_eq!(once, twice);
    }
}
