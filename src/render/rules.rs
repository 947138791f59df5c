//! Rewrite-rule tables for the supported language pairs
//!
//! Each pair gets one immutable table constructed once: per-construct
//! syntax rules consumed by the renderer, plus an ordered expression-level
//! token-substitution table applied over statement text. Token rules are
//! ordered most-specific first (the filtered comprehension sits above the
//! plain one) so a generic rule never shadows a specific one; later rules
//! see text already rewritten by earlier rules.
//!
//! Known coverage limit: token rules match a fixed call shape. Code that
//! is syntactically similar but semantically different (for example a
//! user-defined `push` method, or `Array(n).fill(v)` where `n` is itself a
//! call) is rewritten anyway. Rules translate idioms, not programs.

use crate::core::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// A single ordered expression-level substitution
pub struct TokenRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl TokenRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap_or_else(|e| panic!("rule {name}: {e}")),
            replacement,
        }
    }
}

/// Per-construct syntax of a translation direction
pub struct SyntaxRules {
    /// Line-comment marker of the target language
    pub line_comment: &'static str,
    /// Docstring delimiters of the target: open, per-line prefix, close
    pub doc_open: &'static str,
    pub doc_line: &'static str,
    pub doc_close: &'static str,
    /// Statement terminator appended to plain statements ("" or ";")
    pub terminator: &'static str,
    /// Member-access prefix rewrite, source form to target form
    pub member_prefix: (&'static str, &'static str),
    /// Target spelling of the neutral constructor name
    pub constructor_name: &'static str,
    /// End-of-iteration idiom, source form to target form
    pub stop_iteration: (&'static str, &'static str),
    /// Whether target blocks close with a brace
    pub braces: bool,
    /// Whether target methods take an explicit self receiver
    pub explicit_self: bool,
}

/// Complete rewrite table for one `(source, target)` pair
pub struct PairRules {
    pub source: Language,
    pub target: Language,
    pub syntax: SyntaxRules,
    pub tokens: Vec<TokenRule>,
}

impl PairRules {
    /// Apply the ordered token table over one line of statement text
    pub fn apply_tokens(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.tokens {
            let rewritten = rule.pattern.replace_all(&current, rule.replacement);
            if rewritten != current {
                log::debug!("token rule '{}' fired on: {}", rule.name, current.trim());
                current = rewritten.into_owned();
            }
        }
        current
    }
}

static PYTHON_TO_JAVASCRIPT: Lazy<PairRules> = Lazy::new(|| PairRules {
    source: Language::Python,
    target: Language::JavaScript,
    syntax: SyntaxRules {
        line_comment: "//",
        doc_open: "/**",
        doc_line: " * ",
        doc_close: " */",
        terminator: ";",
        member_prefix: ("self.", "this."),
        constructor_name: "constructor",
        stop_iteration: ("raise StopIteration", "return undefined;"),
        braces: true,
        explicit_self: false,
    },
    tokens: vec![
        TokenRule::new(
            "filtered-comprehension",
            r"\[(.+?) for (\w+) in (.+?) if (.+?)\]",
            "${3}.filter(${2} => ${4}).map(${2} => ${1})",
        ),
        TokenRule::new(
            "comprehension",
            r"\[(.+?) for (\w+) in (.+?)\]",
            "${3}.map(${2} => ${1})",
        ),
        TokenRule::new(
            "range-two",
            r"\brange\(([^,()]+),\s*([^()]+)\)",
            "Array.from({length: ${2} - ${1}}, (_, i) => i + ${1})",
        ),
        TokenRule::new(
            "range-one",
            r"\brange\(([^()]+)\)",
            "Array.from({length: ${1}}, (_, i) => i)",
        ),
        TokenRule::new("append", r"(\w+)\.append\((.*)\)", "${1}.push(${2})"),
        TokenRule::new("extend", r"(\w+)\.extend\((.*)\)", "${1}.push(...${2})"),
        TokenRule::new("dict-keys", r"(\w+)\.keys\(\)", "Object.keys(${1})"),
        TokenRule::new("dict-values", r"(\w+)\.values\(\)", "Object.values(${1})"),
        TokenRule::new("dict-items", r"(\w+)\.items\(\)", "Object.entries(${1})"),
        TokenRule::new(
            "len",
            r"\blen\(([\w.\[\]]+)\)",
            "${1}.length",
        ),
        TokenRule::new("join", r"(\w+)\.join\(([^()]+)\)", "${2}.join(${1})"),
        TokenRule::new("strip", r"\.strip\(\)", ".trim()"),
        TokenRule::new("lower", r"\.lower\(\)", ".toLowerCase()"),
        TokenRule::new("upper", r"\.upper\(\)", ".toUpperCase()"),
        TokenRule::new("set-new", r"\bset\(([^()]*)\)", "new Set(${1})"),
        TokenRule::new("not-equal", r"(\s)is not(\s)", "${1}!==${2}"),
        TokenRule::new("identity", r"(\s)is(\s)", "${1}===${2}"),
        TokenRule::new("bool-true", r"\bTrue\b", "true"),
        TokenRule::new("bool-false", r"\bFalse\b", "false"),
        TokenRule::new("none", r"\bNone\b", "null"),
        TokenRule::new("logic-and", r"\band\b", "&&"),
        TokenRule::new("logic-or", r"\bor\b", "||"),
        TokenRule::new("logic-not", r"\bnot\s+", "!"),
    ],
});

static JAVASCRIPT_TO_PYTHON: Lazy<PairRules> = Lazy::new(|| PairRules {
    source: Language::JavaScript,
    target: Language::Python,
    syntax: SyntaxRules {
        line_comment: "#",
        doc_open: "\"\"\"",
        doc_line: "",
        doc_close: "\"\"\"",
        terminator: "",
        member_prefix: ("this.", "self."),
        constructor_name: "__init__",
        stop_iteration: ("return undefined", "raise StopIteration"),
        braces: false,
        explicit_self: true,
    },
    tokens: vec![
        TokenRule::new(
            "push-spread",
            r"(\w+)\.push\(\.\.\.(.*)\)",
            "${1}.extend(${2})",
        ),
        TokenRule::new("push", r"(\w+)\.push\((.*)\)", "${1}.append(${2})"),
        TokenRule::new(
            "splice-remove-one",
            r"(\w+)\.splice\(([^,()]+),\s*1\)",
            "${1}.pop(${2})",
        ),
        TokenRule::new("object-keys", r"Object\.keys\(([^()]+)\)", "${1}.keys()"),
        TokenRule::new("object-values", r"Object\.values\(([^()]+)\)", "${1}.values()"),
        TokenRule::new("object-entries", r"Object\.entries\(([^()]+)\)", "${1}.items()"),
        TokenRule::new(
            "array-from-range",
            r"Array\.from\(\{\s*length:\s*([^{}]+?)\s*\},\s*\(_,\s*i\)\s*=>\s*i\)",
            "range(${1})",
        ),
        TokenRule::new(
            "array-fill",
            r"Array\(([^()]+)\)\.fill\(([^()]+)\)",
            "[${2}] * ${1}",
        ),
        TokenRule::new(
            "filter-map",
            r"(\w+)\.filter\((\w+) => ([^()]+?)\)\.map\((\w+) => ([^()]+?)\)",
            "[${5} for ${4} in ${1} if ${3}]",
        ),
        TokenRule::new(
            "map",
            r"(\w+)\.map\((\w+) => ([^()]+?)\)",
            "[${3} for ${2} in ${1}]",
        ),
        TokenRule::new("length", r"([\w.\[\]]+)\.length\b", "len(${1})"),
        TokenRule::new("trim", r"\.trim\(\)", ".strip()"),
        TokenRule::new("to-lower", r"\.toLowerCase\(\)", ".lower()"),
        TokenRule::new("to-upper", r"\.toUpperCase\(\)", ".upper()"),
        TokenRule::new("set-ctor", r"\bnew Set\(([^()]*)\)", "set(${1})"),
        TokenRule::new("new-instance", r"\bnew (\w+)\(", "${1}("),
        TokenRule::new("strict-ne", r"\s!==\s", " is not "),
        TokenRule::new("strict-eq", r"\s===\s", " is "),
        TokenRule::new("bool-true", r"\btrue\b", "True"),
        TokenRule::new("bool-false", r"\bfalse\b", "False"),
        TokenRule::new("null", r"\bnull\b", "None"),
        TokenRule::new("undefined", r"\bundefined\b", "None"),
        TokenRule::new("logic-and", r"\s&&\s", " and "),
        TokenRule::new("logic-or", r"\s\|\|\s", " or "),
    ],
});

/// Look up the rewrite table for a language pair; `None` means the pair
/// is unsupported
pub fn rules_for(source: Language, target: Language) -> Option<&'static PairRules> {
    match (source, target) {
        (Language::Python, Language::JavaScript) => Some(&PYTHON_TO_JAVASCRIPT),
        (Language::JavaScript, Language::Python) => Some(&JAVASCRIPT_TO_PYTHON),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_lookup() {
        assert!(rules_for(Language::Python, Language::JavaScript).is_some());
        assert!(rules_for(Language::JavaScript, Language::Python).is_some());
        assert!(rules_for(Language::Python, Language::Python).is_none());
    }

    #[test]
    fn test_token_rules_python_to_javascript() {
        let rules = rules_for(Language::Python, Language::JavaScript).unwrap();
        assert_eq!(rules.apply_tokens("result.append(i * 2)"), "result.push(i * 2)");
        assert_eq!(rules.apply_tokens("n = len(items)"), "n = items.length");
        assert_eq!(
            rules.apply_tokens("range(5)"),
            "Array.from({length: 5}, (_, i) => i)"
        );
        assert_eq!(rules.apply_tokens("d.items()"), "Object.entries(d)");
    }

    #[test]
    fn test_specific_rule_wins_over_generic() {
        let rules = rules_for(Language::Python, Language::JavaScript).unwrap();
        // The filtered form must not be consumed by the plain
        // comprehension rule
        assert_eq!(
            rules.apply_tokens("[x * 2 for x in xs if x > 0]"),
            "xs.filter(x => x > 0).map(x => x * 2)"
        );
        assert_eq!(rules.apply_tokens("[x * 2 for x in xs]"), "xs.map(x => x * 2)");
    }

    #[test]
    fn test_token_rules_javascript_to_python() {
        let rules = rules_for(Language::JavaScript, Language::Python).unwrap();
        assert_eq!(rules.apply_tokens("result.push(x)"), "result.append(x)");
        assert_eq!(rules.apply_tokens("items.length"), "len(items)");
        assert_eq!(rules.apply_tokens("new Counter(3)"), "Counter(3)");
        assert_eq!(
            rules.apply_tokens("xs.map(x => x * 2)"),
            "[x * 2 for x in xs]"
        );
    }

    #[test]
    fn test_literal_rewrites() {
        let py_js = rules_for(Language::Python, Language::JavaScript).unwrap();
        assert_eq!(py_js.apply_tokens("return None"), "return null");
        let js_py = rules_for(Language::JavaScript, Language::Python).unwrap();
        assert_eq!(js_py.apply_tokens("return null"), "return None");
    }
}
