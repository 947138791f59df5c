//! Style inference from source text

use crate::style::casing::NamingConvention;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    pub fn delimiter(&self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStyle {
    SameLine,
    NewLine,
}

/// Inferred surface-formatting preferences from a source sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub indent_size: usize,
    pub quote_style: QuoteStyle,
    pub naming_convention: NamingConvention,
    pub max_line_length: usize,
    pub bracket_style: BracketStyle,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            indent_size: 4,
            quote_style: QuoteStyle::Double,
            naming_convention: NamingConvention::SnakeCase,
            max_line_length: 80,
            bracket_style: BracketStyle::SameLine,
        }
    }
}

impl StyleProfile {
    /// Infer a profile from source text; ambiguous characteristics resolve
    /// to the defaults, never to an error
    pub fn detect(source: &str) -> Self {
        let defaults = Self::default();
        let profile = Self {
            indent_size: detect_indent_size(source).unwrap_or(defaults.indent_size),
            quote_style: detect_quote_style(source).unwrap_or(defaults.quote_style),
            naming_convention: detect_naming_convention(source)
                .unwrap_or(defaults.naming_convention),
            max_line_length: detect_max_line_length(source).unwrap_or(defaults.max_line_length),
            bracket_style: detect_bracket_style(source),
        };
        log::debug!(
            "detected style: indent={} quotes={:?} naming={} width={} brackets={:?}",
            profile.indent_size,
            profile.quote_style,
            profile.naming_convention,
            profile.max_line_length,
            profile.bracket_style
        );
        profile
    }
}

/// Modal positive leading-space count across non-blank lines
fn detect_indent_size(source: &str) -> Option<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for line in source.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 0 {
            *counts.entry(indent).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .max_by_key(|&(indent, count)| (count, std::cmp::Reverse(indent)))
        .map(|(indent, _)| indent)
}

/// Escape-aware count of single- vs double-quoted string literals; a
/// strictly greater count wins, ties fall back to the default
fn detect_quote_style(source: &str) -> Option<QuoteStyle> {
    let (mut single, mut double) = (0usize, 0usize);
    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\'' && ch != '"' {
            continue;
        }
        let delim = ch;
        let mut escaped = false;
        let mut closed = false;
        for inner in chars.by_ref() {
            if escaped {
                escaped = false;
            } else if inner == '\\' {
                escaped = true;
            } else if inner == delim {
                closed = true;
                break;
            } else if inner == '\n' {
                break;
            }
        }
        if closed {
            match delim {
                '\'' => single += 1,
                _ => double += 1,
            }
        }
    }
    match single.cmp(&double) {
        std::cmp::Ordering::Greater => Some(QuoteStyle::Single),
        std::cmp::Ordering::Less => Some(QuoteStyle::Double),
        std::cmp::Ordering::Equal => None,
    }
}

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("identifier regex"));

/// Keywords and builtins excluded from the naming vote, across both
/// supported languages
pub(crate) const VOTE_EXCLUDED: &[&str] = &[
    "def", "class", "if", "else", "elif", "while", "for", "in", "try", "except", "finally",
    "return", "import", "from", "as", "pass", "raise", "with", "lambda", "yield", "async",
    "await", "not", "and", "or", "is", "None", "True", "False", "self", "cls", "print", "len",
    "range", "function", "var", "let", "const", "new", "this", "super", "extends", "constructor",
    "typeof", "instanceof", "null", "undefined", "true", "false", "catch", "throw", "switch",
    "case", "break", "continue", "default", "export", "static", "get", "set", "of",
];

/// Majority vote over identifier-like tokens. camelCase matches count
/// double, matching the original detector's weighting.
fn detect_naming_convention(source: &str) -> Option<NamingConvention> {
    let mut snake = 0usize;
    let mut camel = 0usize;
    let mut pascal = 0usize;

    for token in IDENTIFIER.find_iter(source) {
        let name = token.as_str();
        if VOTE_EXCLUDED.contains(&name) || name.starts_with("__") {
            continue;
        }
        let first_upper = name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
        let has_underscore = name.contains('_');
        let all_lower = name.chars().all(|c| !c.is_ascii_uppercase());
        let all_upper = name.chars().all(|c| !c.is_ascii_lowercase());

        if has_underscore && all_lower {
            snake += 1;
        } else if all_upper {
            // SCREAMING_CASE constants vote with snake
            snake += 1;
        } else if first_upper && !has_underscore {
            pascal += 1;
        } else if !first_upper
            && !has_underscore
            && name.chars().skip(1).any(|c| c.is_ascii_uppercase())
        {
            camel += 2;
        } else if all_lower {
            snake += 1;
        }
    }

    let max = snake.max(camel).max(pascal);
    if max == 0 {
        return None;
    }
    let winners = [snake, camel, pascal].iter().filter(|&&c| c == max).count();
    if winners > 1 {
        return None;
    }
    if max == snake {
        Some(NamingConvention::SnakeCase)
    } else if max == camel {
        Some(NamingConvention::CamelCase)
    } else {
        Some(NamingConvention::PascalCase)
    }
}

/// 90th-percentile line length over non-blank lines, so one long outlier
/// does not set the wrap width
fn detect_max_line_length(source: &str) -> Option<usize> {
    let mut lengths: Vec<usize> = source
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().count())
        .collect();
    if lengths.is_empty() {
        return None;
    }
    lengths.sort_unstable();
    let idx = (lengths.len() * 9) / 10;
    let idx = idx.min(lengths.len() - 1);
    Some(lengths[idx].max(1))
}

static SAME_LINE_BRACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\)[ \t]*\{").expect("same-line brace regex"));
static NEW_LINE_BRACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\)[ \t]*\r?\n[ \t]*\{").expect("new-line brace regex"));

/// Same-line wins ties
fn detect_bracket_style(source: &str) -> BracketStyle {
    let same_line = SAME_LINE_BRACE.find_iter(source).count();
    let new_line = NEW_LINE_BRACE.find_iter(source).count();
    if same_line >= new_line {
        BracketStyle::SameLine
    } else {
        BracketStyle::NewLine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_indent_size_modal() {
        let source = "def f():\n  a = 1\n  b = 2\n  if a:\n    c = 3\n";
        assert_eq!(StyleProfile::detect(source).indent_size, 2);
    }

    #[test]
    fn test_detect_indent_default_when_flat() {
        let source = "a = 1\nb = 2\n";
        assert_eq!(StyleProfile::detect(source).indent_size, 4);
    }

    #[test]
    fn test_detect_quote_style() {
        assert_eq!(
            StyleProfile::detect("x = 'a'\ny = 'b'\nz = \"c\"\n").quote_style,
            QuoteStyle::Single
        );
        // Tie falls back to the default
        assert_eq!(
            StyleProfile::detect("x = 'a'\ny = \"b\"\n").quote_style,
            QuoteStyle::Double
        );
    }

    #[test]
    fn test_quote_scan_handles_escapes() {
        // The escaped quote does not terminate the literal
        let source = r#"msg = 'it\'s fine'
other = 'ok'
"#;
        assert_eq!(
            StyleProfile::detect(source).quote_style,
            QuoteStyle::Single
        );
    }

    #[test]
    fn test_detect_naming_snake() {
        let source = "my_value = compute_total(first_item, second_item)\n";
        assert_eq!(
            StyleProfile::detect(source).naming_convention,
            NamingConvention::SnakeCase
        );
    }

    #[test]
    fn test_detect_naming_camel_weighted() {
        // Two camelCase identifiers outvote two snake words because
        // camel matches count double
        let source = "myValue = someTotal\nplain = other\n";
        assert_eq!(
            StyleProfile::detect(source).naming_convention,
            NamingConvention::CamelCase
        );
    }

    #[test]
    fn test_detect_max_line_length_percentile() {
        let mut source = String::new();
        for _ in 0..19 {
            source.push_str("short = 1\n");
        }
        source.push_str(&format!("{} = 2\n", "x".repeat(200)));
        let profile = StyleProfile::detect(&source);
        // The single 200-column outlier sits above the 90th percentile
        assert!(profile.max_line_length < 200);
    }

    #[test]
    fn test_detect_bracket_style() {
        let same = "function f() {\n}\nfunction g() {\n}\n";
        assert_eq!(
            StyleProfile::detect(same).bracket_style,
            BracketStyle::SameLine
        );
        let newline = "function f()\n{\n}\nfunction g()\n{\n}\n";
        assert_eq!(
            StyleProfile::detect(newline).bracket_style,
            BracketStyle::NewLine
        );
    }
}
