//! Identifier casing classification and conversion
//!
//! The tokenizer splits on underscores and on a capital letter preceded by
//! a lowercase letter or digit. All conversions are idempotent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic identifier-casing classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingConvention {
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NamingConvention::SnakeCase => "snake_case",
            NamingConvention::CamelCase => "camelCase",
            NamingConvention::PascalCase => "PascalCase",
        };
        f.write_str(name)
    }
}

/// Split an identifier into lowercase word tokens
pub fn split_words(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in identifier.chars() {
        if ch == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            let boundary = ch.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(ch.to_ascii_lowercase());
        }
        prev = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn to_snake_case(identifier: &str) -> String {
    split_words(identifier).join("_")
}

pub fn to_camel_case(identifier: &str) -> String {
    let words = split_words(identifier);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

pub fn to_pascal_case(identifier: &str) -> String {
    split_words(identifier)
        .iter()
        .map(|w| capitalize(w))
        .collect()
}

/// Convert an identifier to the given convention
pub fn convert(identifier: &str, convention: NamingConvention) -> String {
    match convention {
        NamingConvention::SnakeCase => to_snake_case(identifier),
        NamingConvention::CamelCase => to_camel_case(identifier),
        NamingConvention::PascalCase => to_pascal_case(identifier),
    }
}

/// True for identifiers shaped like a type name: leading capital, a later
/// lowercase letter, and no underscores
pub fn is_pascal_case(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_uppercase()
        && !identifier.contains('_')
        && identifier.chars().any(|c| c.is_ascii_lowercase())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("my_var_name"), vec!["my", "var", "name"]);
        assert_eq!(split_words("myVarName"), vec!["my", "var", "name"]);
        assert_eq!(split_words("MyVarName"), vec!["my", "var", "name"]);
        assert_eq!(split_words("value2Go"), vec!["value2", "go"]);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(to_snake_case("myVarName"), "my_var_name");
        assert_eq!(to_camel_case("my_var_name"), "myVarName");
        assert_eq!(to_pascal_case("my_var_name"), "MyVarName");
        assert_eq!(to_camel_case("MyVarName"), "myVarName");
    }

    #[test]
    fn test_idempotence() {
        for ident in ["my_var", "myVar", "MyVar", "x", "a2b"] {
            for convention in [
                NamingConvention::SnakeCase,
                NamingConvention::CamelCase,
                NamingConvention::PascalCase,
            ] {
                let once = convert(ident, convention);
                let twice = convert(&once, convention);
                assert_eq!(once, twice, "{ident} not idempotent under {convention}");
            }
        }
    }

    #[test]
    fn test_round_trip_preserves_boundaries() {
        let original = "parse_source_file";
        let camel = convert(original, NamingConvention::CamelCase);
        let pascal = convert(&camel, NamingConvention::PascalCase);
        let back = convert(&pascal, NamingConvention::SnakeCase);
        assert_eq!(back, original);
    }

    #[test]
    fn test_is_pascal_case() {
        assert!(is_pascal_case("ClassName"));
        assert!(!is_pascal_case("snake_name"));
        assert!(!is_pascal_case("camelName"));
        assert!(!is_pascal_case("UPPER"));
        assert!(!is_pascal_case(""));
    }
}
