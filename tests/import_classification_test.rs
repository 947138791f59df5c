use codemorph::core::ImportInfo;
use codemorph::imports::ImportClassifier;
use codemorph::{Language, Translator};
use std::fs;
use tempfile::TempDir;

fn import(module: &str) -> ImportInfo {
    ImportInfo::module(module)
}

#[test]
fn test_four_way_classification() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("requirements.txt"), "requests==2.31.0\n").unwrap();
    fs::write(dir.path().join("utils.py"), "def helper():\n    pass\n").unwrap();

    let classifier =
        ImportClassifier::new(Language::Python).with_project_root(dir.path().to_path_buf());
    let classification = classifier.classify(&[
        import("os"),
        import("requests"),
        import("utils"),
        import("mysterylib"),
    ]);

    assert_eq!(classification.standard_library, vec!["os"]);
    assert_eq!(classification.third_party, vec!["requests"]);
    assert_eq!(classification.local, vec!["utils"]);
    assert_eq!(classification.unknown, vec!["mysterylib"]);
}

#[test]
fn test_manifest_versions_are_surfaced() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("requirements.txt"),
        "requests==2.31.0\nflask>=2.0\n",
    )
    .unwrap();

    let classifier =
        ImportClassifier::new(Language::Python).with_project_root(dir.path().to_path_buf());
    assert_eq!(
        classifier.known_versions().get("requests").map(String::as_str),
        Some("2.31.0")
    );
}

#[test]
fn test_node_builtin_with_prefix() {
    let classifier = ImportClassifier::new(Language::JavaScript);
    let classification = classifier.classify(&[import("node:fs"), import("path")]);
    assert_eq!(classification.standard_library.len(), 2);
    assert!(classification.unknown.is_empty());
}

#[test]
fn test_unknown_imports_keep_source_form() {
    let dir = TempDir::new().unwrap();
    let source = "import os\nimport mysterylib\n\ndef noop():\n    pass\n";
    let translator = Translator::new(Language::Python, Language::JavaScript)
        .unwrap()
        .with_project_root(dir.path().to_path_buf());
    let result = translator.translate(source, "deps").unwrap();

    // resolved module rewritten into target syntax; the detected quote
    // style (double, by default) applies to the rewritten import too
    assert!(result.text.contains("import os from \"os\";"));
    // unresolved module kept as written for human review
    assert!(result.text.contains("import mysterylib\n"));
}
