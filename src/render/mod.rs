//! Structural renderer: walks a [`ModuleInfo`] and a rewrite-rule table
//! to emit target-language syntax

pub mod rules;

use crate::core::{ClassInfo, Error, FunctionInfo, ModuleInfo, Language, Result, CONSTRUCTOR_NAME};
use crate::imports::{self, ImportClassification};
use crate::parsers::leading_spaces;
use once_cell::sync::Lazy;
use regex::Regex;
use self::rules::{rules_for, PairRules};
use serde::Serialize;

/// A structural element had no matching rule and was emitted verbatim
/// behind an inline marker comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderWarning {
    pub construct: String,
    pub message: String,
}

/// Successful render output: translated text plus any incompleteness
/// warnings
#[derive(Debug, Clone)]
pub struct Rendered {
    pub text: String,
    pub warnings: Vec<RenderWarning>,
}

const INDENT_UNIT: &str = "    ";

fn indent(level: usize) -> String {
    INDENT_UNIT.repeat(level)
}

/// Rule-based translator for one language pair. Deterministic: identical
/// inputs produce byte-identical output.
pub struct Renderer {
    rules: &'static PairRules,
}

impl Renderer {
    /// Fails with [`Error::UnsupportedPair`] when no rewrite table covers
    /// the pair
    pub fn new(source: Language, target: Language) -> Result<Self> {
        match rules_for(source, target) {
            Some(rules) => Ok(Self { rules }),
            None => Err(Error::UnsupportedPair {
                from: source,
                to: target,
            }),
        }
    }

    pub fn source_language(&self) -> Language {
        self.rules.source
    }

    pub fn target_language(&self) -> Language {
        self.rules.target
    }

    pub fn render(&self, module: &ModuleInfo) -> Rendered {
        self.render_with_imports(module, None)
    }

    /// Render with an import classification: unknown modules keep their
    /// source-language import form
    pub fn render_with_imports(
        &self,
        module: &ModuleInfo,
        classification: Option<&ImportClassification>,
    ) -> Rendered {
        let mut out: Vec<String> = Vec::new();
        let mut warnings = Vec::new();

        if let Some(doc) = &module.docstring {
            self.push_doc_comment(doc, 0, &mut out);
        }

        if !module.imports.is_empty() {
            out.extend(imports::rewrite(
                &module.imports,
                self.rules.source,
                self.rules.target,
                classification,
            ));
            out.push(String::new());
        }

        for func in &module.functions {
            self.render_function(func, 0, false, &mut out, &mut warnings);
            out.push(String::new());
        }

        for class in &module.classes {
            self.render_class(class, &mut out, &mut warnings);
            out.push(String::new());
        }

        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }

        let mut text = out.join("\n");
        text.push('\n');
        for warning in &warnings {
            log::warn!("render incomplete: {}: {}", warning.construct, warning.message);
        }
        Rendered { text, warnings }
    }

    fn render_class(
        &self,
        class: &ClassInfo,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) {
        let syntax = &self.rules.syntax;

        if syntax.braces {
            if let Some(doc) = &class.docstring {
                self.push_doc_comment(doc, 0, out);
            }
            for decorator in &class.decorators {
                self.push_unmatched(&format!("@{decorator}"), 0, "class decorator", out, warnings);
            }
            let mut header = format!("class {}", class.name);
            if let Some(first) = class.bases.first() {
                header.push_str(&format!(" extends {first}"));
            }
            if class.bases.len() > 1 {
                warnings.push(RenderWarning {
                    construct: format!("class {}", class.name),
                    message: "multiple bases reduced to the first; target supports single inheritance".to_string(),
                });
            }
            header.push_str(" {");
            out.push(header);
            for (i, method) in class.methods.iter().enumerate() {
                if i > 0 {
                    out.push(String::new());
                }
                self.render_function(method, 1, true, out, warnings);
            }
            out.push("}".to_string());
        } else {
            for decorator in &class.decorators {
                out.push(format!("@{decorator}"));
            }
            let mut header = format!("class {}", class.name);
            if !class.bases.is_empty() {
                header.push_str(&format!("({})", class.bases.join(", ")));
            }
            header.push(':');
            out.push(header);
            if let Some(doc) = &class.docstring {
                self.push_doc_comment(doc, 1, out);
            }
            if class.methods.is_empty() {
                if class.docstring.is_none() {
                    out.push(format!("{}pass", indent(1)));
                }
            } else {
                for (i, method) in class.methods.iter().enumerate() {
                    if i > 0 {
                        out.push(String::new());
                    }
                    self.render_function(method, 1, true, out, warnings);
                }
            }
        }
    }

    fn render_function(
        &self,
        func: &FunctionInfo,
        level: usize,
        is_method: bool,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) {
        if self.rules.syntax.braces {
            self.render_function_braced(func, level, is_method, out, warnings);
        } else {
            self.render_function_indented(func, level, is_method, out, warnings);
        }
    }

    fn render_function_braced(
        &self,
        func: &FunctionInfo,
        level: usize,
        is_method: bool,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) {
        if let Some(doc) = &func.docstring {
            self.push_doc_comment(doc, level, out);
        }

        let mut prefix = String::new();
        for decorator in &func.decorators {
            match decorator.as_str() {
                "staticmethod" | "classmethod" => prefix.push_str("static "),
                "property" => prefix.push_str("get "),
                other => {
                    self.push_unmatched(&format!("@{other}"), level, "decorator", out, warnings);
                }
            }
        }
        if func.is_async {
            prefix.push_str("async ");
        }

        let name = if is_method && func.name == CONSTRUCTOR_NAME {
            self.rules.syntax.constructor_name
        } else {
            &func.name
        };
        let args = func.args.join(", ");
        let header = if is_method {
            format!("{}{}{}({}) {{", indent(level), prefix, name, args)
        } else {
            format!("{}{}function {}({}) {{", indent(level), prefix, name, args)
        };
        out.push(header);

        self.render_body_braced(&func.body, level + 1, out, warnings);
        out.push(format!("{}}}", indent(level)));
    }

    fn render_function_indented(
        &self,
        func: &FunctionInfo,
        level: usize,
        is_method: bool,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) {
        for decorator in &func.decorators {
            out.push(format!("{}@{}", indent(level), decorator));
        }

        let takes_self = is_method
            && self.rules.syntax.explicit_self
            && !func.decorators.iter().any(|d| d == "staticmethod");
        let receiver = if takes_self { "self" } else { "" };
        let args = if func.args.is_empty() {
            receiver.to_string()
        } else if receiver.is_empty() {
            func.args.join(", ")
        } else {
            format!("{}, {}", receiver, func.args.join(", "))
        };

        let name = if is_method && func.name == CONSTRUCTOR_NAME {
            self.rules.syntax.constructor_name
        } else {
            &func.name
        };
        let async_kw = if func.is_async { "async " } else { "" };
        let returns = func
            .returns
            .as_ref()
            .map(|r| format!(" -> {r}"))
            .unwrap_or_default();
        out.push(format!(
            "{}{}def {}({}){}:",
            indent(level),
            async_kw,
            name,
            args,
            returns
        ));

        if let Some(doc) = &func.docstring {
            self.push_doc_comment(doc, level + 1, out);
        }

        let body_start = out.len();
        self.render_body_indented(&func.body, level + 1, out, warnings);
        if out.len() == body_start && func.docstring.is_none() {
            out.push(format!("{}pass", indent(level + 1)));
        }
    }

    /// Emit a body into a brace-delimited target, deriving nesting from
    /// the normalized indentation and balancing braces with an explicit
    /// open-block stack
    fn render_body_braced(
        &self,
        body: &[String],
        base: usize,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) {
        let mut open_blocks: Vec<usize> = Vec::new();

        for raw in body {
            if raw.trim().is_empty() {
                out.push(String::new());
                continue;
            }
            let inner = leading_spaces(raw) / 4;
            let text = raw.trim();

            while let Some(&top) = open_blocks.last() {
                if inner <= top {
                    open_blocks.pop();
                    out.push(format!("{}}}", indent(base + top)));
                } else {
                    break;
                }
            }

            match self.translate_to_braced(text, base + inner, out, warnings) {
                Emitted::Opens(line) => {
                    out.push(format!("{}{}", indent(base + inner), line));
                    open_blocks.push(inner);
                }
                Emitted::Plain(line) => {
                    out.push(format!("{}{}", indent(base + inner), line));
                }
                Emitted::Nothing => {}
            }
        }

        while let Some(top) = open_blocks.pop() {
            out.push(format!("{}}}", indent(base + top)));
        }
    }

    /// Emit a body into an indentation-delimited target; brace-only
    /// lines disappear, nesting comes from the normalized indentation
    fn render_body_indented(
        &self,
        body: &[String],
        base: usize,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) {
        for raw in body {
            if raw.trim().is_empty() {
                out.push(String::new());
                continue;
            }
            let inner = leading_spaces(raw) / 4;
            let text = raw.trim();
            if let Some(line) = self.translate_to_indented(text, base + inner, out, warnings) {
                out.push(format!("{}{}", indent(base + inner), line));
            }
        }
    }

    /// Translate one statement of an indentation-structured source into
    /// the braced target
    fn translate_to_braced(
        &self,
        text: &str,
        level: usize,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) -> Emitted {
        let syntax = &self.rules.syntax;

        if let Some(rest) = text.strip_prefix('#') {
            return Emitted::Plain(format!("{}{}", syntax.line_comment, rest));
        }
        // braces already delimit the block, so the placeholder vanishes
        if text == "pass" {
            return Emitted::Nothing;
        }

        if let Some(caps) = PY_HEADER.captures(text) {
            let keyword = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let condition = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            let inline = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();

            if let Some(header) = self.braced_header(keyword, condition) {
                if inline.is_empty() {
                    return Emitted::Opens(header);
                }
                // single-line compound statement keeps its single line
                let stmt = self.plain_to_braced(inline);
                return Emitted::Plain(format!("{header} {stmt} }}"));
            }

            warnings.push(RenderWarning {
                construct: keyword.to_string(),
                message: format!("no rewrite rule for '{text}'; emitted verbatim"),
            });
            out.push(format!(
                "{}{} no rule for '{}' construct, kept verbatim",
                indent(level),
                syntax.line_comment,
                keyword
            ));
            return Emitted::Plain(text.to_string());
        }

        Emitted::Plain(self.plain_to_braced(text))
    }

    fn braced_header(&self, keyword: &str, condition: &str) -> Option<String> {
        let condition = self.rewrite_expression(condition);
        match keyword {
            "if" => Some(format!("if ({condition}) {{")),
            "elif" => Some(format!("else if ({condition}) {{")),
            "else" => Some("else {".to_string()),
            "while" => Some(format!("while ({condition}) {{")),
            "for" => {
                let caps = PY_FOR.captures(&condition)?;
                let vars = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let iterable = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                Some(format!("for (const {vars} of {iterable}) {{"))
            }
            "try" => Some("try {".to_string()),
            "except" => Some("catch (err) {".to_string()),
            "finally" => Some("finally {".to_string()),
            _ => None,
        }
    }

    fn plain_to_braced(&self, text: &str) -> String {
        let syntax = &self.rules.syntax;
        if text.starts_with(syntax.stop_iteration.0) {
            return syntax.stop_iteration.1.to_string();
        }
        let mut line = self.rewrite_expression(text);
        let needs_terminator = !line.is_empty()
            && !line.ends_with(['{', '}', ';', ':'])
            && !line.starts_with(syntax.line_comment);
        if needs_terminator {
            line.push_str(syntax.terminator);
        }
        line
    }

    /// Translate one statement of a brace-structured source into the
    /// indentation-delimited target; `None` drops the line entirely
    fn translate_to_indented(
        &self,
        text: &str,
        level: usize,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) -> Option<String> {
        let syntax = &self.rules.syntax;

        if matches!(text, "{" | "}" | "};") {
            return None;
        }
        if let Some(rest) = text.strip_prefix("//") {
            return Some(format!("{}{}", syntax.line_comment, rest));
        }

        let header = text.strip_prefix("}").map(str::trim).unwrap_or(text);
        for (pattern, build) in JS_HEADERS.iter() {
            if let Some(caps) = pattern.captures(header) {
                return Some(build(self, &caps));
            }
        }

        if JS_UNMATCHED.is_match(header) {
            warnings.push(RenderWarning {
                construct: header.split_whitespace().next().unwrap_or(header).to_string(),
                message: format!("no rewrite rule for '{header}'; emitted verbatim"),
            });
            out.push(format!(
                "{}{} no rule for this construct, kept verbatim",
                indent(level),
                syntax.line_comment
            ));
            return Some(text.to_string());
        }

        if text.starts_with('}') && header.is_empty() {
            return None;
        }

        let stripped = text.trim_end_matches(';');
        if stripped.starts_with(syntax.stop_iteration.0) {
            return Some(syntax.stop_iteration.1.to_string());
        }
        Some(self.rewrite_expression(stripped))
    }

    /// Member-prefix rewrite plus the ordered token table
    fn rewrite_expression(&self, text: &str) -> String {
        let syntax = &self.rules.syntax;
        let replaced = text.replace(syntax.member_prefix.0, syntax.member_prefix.1);
        self.rules.apply_tokens(&replaced)
    }

    fn push_doc_comment(&self, doc: &str, level: usize, out: &mut Vec<String>) {
        let syntax = &self.rules.syntax;
        let lines: Vec<&str> = doc.lines().collect();
        if !syntax.braces && lines.len() == 1 {
            out.push(format!(
                "{}{}{}{}",
                indent(level),
                syntax.doc_open,
                lines[0],
                syntax.doc_close
            ));
            return;
        }
        out.push(format!("{}{}", indent(level), syntax.doc_open));
        for line in &lines {
            out.push(
                format!("{}{}{}", indent(level), syntax.doc_line, line)
                    .trim_end()
                    .to_string(),
            );
        }
        out.push(format!("{}{}", indent(level), syntax.doc_close));
    }

    fn push_unmatched(
        &self,
        construct: &str,
        level: usize,
        kind: &str,
        out: &mut Vec<String>,
        warnings: &mut Vec<RenderWarning>,
    ) {
        warnings.push(RenderWarning {
            construct: construct.to_string(),
            message: format!("no rewrite rule for {kind} '{construct}'; emitted as comment"),
        });
        out.push(format!(
            "{}{} no rule for {} '{}', kept verbatim",
            indent(level),
            self.rules.syntax.line_comment,
            kind,
            construct
        ));
    }
}

enum Emitted {
    Opens(String),
    Plain(String),
    Nothing,
}

static PY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(if|elif|else|for|while|try|except|finally|with|match|case)\b([^:]*):\s*(.*)$")
        .expect("python header regex")
});

static PY_FOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+(?:\s*,\s*\w+)*)\s+in\s+(.+)$").expect("python for regex")
});

type HeaderBuilder = fn(&Renderer, &regex::Captures) -> String;

static JS_HEADERS: Lazy<Vec<(Regex, HeaderBuilder)>> = Lazy::new(|| {
    fn cond(renderer: &Renderer, caps: &regex::Captures, idx: usize) -> String {
        renderer.rewrite_expression(caps.get(idx).map(|m| m.as_str()).unwrap_or_default())
    }
    vec![
        (
            Regex::new(r"^else if \((.*)\)\s*\{$").expect("else-if regex"),
            (|r, c| format!("elif {}:", cond(r, c, 1))) as HeaderBuilder,
        ),
        (
            Regex::new(r"^else\s*\{$").expect("else regex"),
            (|_, _| "else:".to_string()) as HeaderBuilder,
        ),
        (
            Regex::new(r"^if \((.*)\)\s*\{$").expect("if regex"),
            (|r, c| format!("if {}:", cond(r, c, 1))) as HeaderBuilder,
        ),
        (
            Regex::new(r"^while \((.*)\)\s*\{$").expect("while regex"),
            (|r, c| format!("while {}:", cond(r, c, 1))) as HeaderBuilder,
        ),
        (
            Regex::new(r"^for \(\s*(?:const |let |var )?(\w+) of (.*)\)\s*\{$")
                .expect("for-of regex"),
            (|r, c| {
                format!(
                    "for {} in {}:",
                    c.get(1).map(|m| m.as_str()).unwrap_or_default(),
                    cond(r, c, 2)
                )
            }) as HeaderBuilder,
        ),
        (
            Regex::new(r"^for \(\s*(?:let |var )?(\w+) = (\d+);\s*\w+\s*<\s*([^;]+);\s*\w+\+\+\s*\)\s*\{$")
                .expect("c-style for regex"),
            (|r, c| {
                let var = c.get(1).map(|m| m.as_str()).unwrap_or_default();
                let start = c.get(2).map(|m| m.as_str()).unwrap_or_default();
                let bound = cond(r, c, 3);
                if start == "0" {
                    format!("for {var} in range({bound}):")
                } else {
                    format!("for {var} in range({start}, {bound}):")
                }
            }) as HeaderBuilder,
        ),
        (
            Regex::new(r"^try\s*\{$").expect("try regex"),
            (|_, _| "try:".to_string()) as HeaderBuilder,
        ),
        (
            Regex::new(r"^catch\s*(?:\([^)]*\))?\s*\{$").expect("catch regex"),
            (|_, _| "except Exception:".to_string()) as HeaderBuilder,
        ),
        (
            Regex::new(r"^finally\s*\{$").expect("finally regex"),
            (|_, _| "finally:".to_string()) as HeaderBuilder,
        ),
    ]
});

static JS_UNMATCHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(switch\b|do\s*\{|label\s)").expect("unmatched js regex"));
