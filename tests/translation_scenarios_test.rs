use codemorph::core::Error;
use codemorph::{Language, Translator};

fn translate(source: Language, target: Language, text: &str) -> codemorph::Translation {
    Translator::new(source, target)
        .unwrap()
        .translate(text, "module_under_test")
        .unwrap()
}

#[test]
fn test_class_with_constructor_and_accessor() {
    let source = r#"
class Counter:
    def __init__(self, start):
        self.count = start

    def value(self):
        return self.count
"#;
    let result = translate(Language::Python, Language::JavaScript, source);
    let text = &result.text;

    assert!(text.contains("class Counter {"), "missing class header:\n{text}");
    assert!(
        text.contains("constructor(start) {"),
        "constructor arity not preserved:\n{text}"
    );
    assert!(text.contains("this.count = start;"));
    assert!(
        text.contains("return this.count;"),
        "field reference not renamed or terminator missing:\n{text}"
    );
    assert_eq!(
        text.matches('{').count(),
        text.matches('}').count(),
        "braces unbalanced:\n{text}"
    );
}

#[test]
fn test_range_loop_becomes_array_idiom() {
    let source = r#"
def doubles():
    result = []
    for i in range(5):
        result.append(i * 2)
    return result
"#;
    let result = translate(Language::Python, Language::JavaScript, source);
    let text = &result.text;

    assert!(
        text.contains("Array.from({length: 5}"),
        "literal bound lost:\n{text}"
    );
    assert!(text.contains("i * 2"), "multiplier lost:\n{text}");
    assert!(text.contains("result.push(i * 2);"));
    assert_eq!(text.matches('{').count(), text.matches('}').count());
}

#[test]
fn test_detected_style_is_applied_to_output() {
    // 2-space indents and single quotes throughout
    let source = "class Greeter:\n  def __init__(self, name):\n    self.name = name\n\n  def greet(self):\n    return 'hi ' + self.name\n";
    let result = translate(Language::Python, Language::JavaScript, source);

    assert_eq!(result.profile.indent_size, 2);
    for line in result.text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let leading = line.len() - line.trim_start().len();
        assert_eq!(
            leading % 2,
            0,
            "indent not a multiple of 2 in line: {line:?}"
        );
    }
    assert!(result.text.contains("'hi '"), "quotes not preserved:\n{}", result.text);
    assert!(!result.text.contains('"'));
}

#[test]
fn test_unsupported_pair_never_guesses() {
    match Translator::new(Language::JavaScript, Language::JavaScript) {
        Err(Error::UnsupportedPair { from, to }) => {
            assert_eq!(from, Language::JavaScript);
            assert_eq!(to, Language::JavaScript);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected UnsupportedPair"),
    }
}

#[test]
fn test_empty_class_renders_valid_target() {
    let py = translate(Language::Python, Language::JavaScript, "class Empty:\n    pass\n");
    assert!(py.text.contains("class Empty {"));
    assert_eq!(py.text.matches('{').count(), py.text.matches('}').count());

    let js = translate(Language::JavaScript, Language::Python, "class Empty {\n}\n");
    assert!(js.text.contains("class Empty:"));
    assert!(js.text.contains("pass"));
}

#[test]
fn test_javascript_class_round_to_python() {
    let source = r#"
class Store {
    constructor(capacity) {
        this.capacity = capacity;
        this.items = [];
    }

    add(item) {
        if (this.items.length < this.capacity) {
            this.items.push(item);
            return true;
        }
        return false;
    }
}
"#;
    let result = translate(Language::JavaScript, Language::Python, source);
    let text = &result.text;

    assert!(text.contains("class Store:"));
    assert!(text.contains("def __init__(self, capacity):"));
    assert!(text.contains("self.capacity = capacity"));
    assert!(text.contains("if len(self.items) < self.capacity:"));
    assert!(text.contains("self.items.append(item)"));
    assert!(text.contains("return True"));
    assert!(text.contains("return False"));
    assert!(!text.contains('{'), "braces leaked into output:\n{text}");
    assert!(!text.contains(';'), "terminators leaked into output:\n{text}");
}

#[test]
fn test_getter_becomes_property() {
    let source = r#"
class Circle {
    constructor(radius) {
        this.radius = radius;
    }

    get diameter() {
        return this.radius * 2;
    }
}
"#;
    let result = translate(Language::JavaScript, Language::Python, source);
    assert!(result.text.contains("@property"));
    assert!(result.text.contains("def diameter(self):"));
}

#[test]
fn test_unmatched_construct_survives_with_warning() {
    let source = r#"
def reader(path):
    with open(path) as fh:
        return fh.read()
"#;
    let result = translate(Language::Python, Language::JavaScript, source);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].construct, "with");
    assert!(result.text.contains("with open(path) as fh:"));
    assert!(result.text.contains("return fh.read();"));
}

#[test]
fn test_output_is_deterministic_across_runs() {
    let source = "class A:\n    def go(self):\n        return [x * x for x in range(3)]\n";
    let first = translate(Language::Python, Language::JavaScript, source);
    let second = translate(Language::Python, Language::JavaScript, source);
    assert_eq!(first.text, second.text);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_multiline_doc_comment_becomes_docstring() {
    let source = r#"/**
 * Greets people.
 * Politely.
 */
class Greeter {
    constructor(name) {
        this.name = name;
        this.tone = 'warm';
    }
}
"#;
    let result = translate(Language::JavaScript, Language::Python, source);
    let text = &result.text;

    assert!(
        text.contains("    \"\"\"\n    Greets people.\n    Politely.\n    \"\"\""),
        "docstring block mangled:\n{text}"
    );
    assert!(text.contains("self.tone = 'warm'"), "quote profile lost:\n{text}");
    assert!(!text.contains("''\""), "docstring delimiters rewritten:\n{text}");
}
