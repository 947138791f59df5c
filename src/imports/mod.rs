//! Import classification and target-language import rewriting
//!
//! The classifier is the only I/O-touching component: it checks the
//! project directory for local modules and a dependency manifest. Each
//! module is resolved once per call and memoized for the lifetime of the
//! classification.

use crate::core::{ImportInfo, Language};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

mod stdlib;

pub use stdlib::is_builtin_module;

/// Four-way partition of a module's imports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportClassification {
    pub standard_library: Vec<String>,
    pub third_party: Vec<String>,
    pub local: Vec<String>,
    pub unknown: Vec<String>,
}

impl ImportClassification {
    pub fn is_unknown(&self, module: &str) -> bool {
        self.unknown.iter().any(|m| m == module)
    }

    /// Requirements-manifest lines for the third-party bucket,
    /// `name>=version` where a version is known
    pub fn requirements_manifest(&self, versions: &HashMap<String, String>) -> String {
        self.third_party
            .iter()
            .map(|pkg| match versions.get(pkg.split('.').next().unwrap_or(pkg)) {
                Some(version) => format!("{}>={}", pkg.split('.').next().unwrap_or(pkg), version),
                None => pkg.split('.').next().unwrap_or(pkg).to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    StandardLibrary,
    ThirdParty,
    Local,
    Unknown,
}

/// Partitions referenced modules into standard/third-party/local/unknown
pub struct ImportClassifier {
    language: Language,
    project_root: Option<PathBuf>,
    third_party: HashSet<String>,
    versions: HashMap<String, String>,
}

impl ImportClassifier {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            project_root: None,
            third_party: HashSet::new(),
            versions: HashMap::new(),
        }
    }

    /// Enable local-module probing and seed the third-party set from a
    /// dependency manifest found at the root
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let (packages, versions) = read_manifest(&root, self.language);
        self.third_party.extend(packages);
        self.versions.extend(versions);
        self.project_root = Some(root);
        self
    }

    /// Add caller-known third-party package names
    pub fn with_third_party(mut self, packages: impl IntoIterator<Item = String>) -> Self {
        self.third_party.extend(packages);
        self
    }

    pub fn known_versions(&self) -> &HashMap<String, String> {
        &self.versions
    }

    /// Classify each import's root module, in resolution order: built-in
    /// module set, installed third-party packages, same-named local source
    /// file, else unknown
    pub fn classify(&self, imports: &[ImportInfo]) -> ImportClassification {
        let mut result = ImportClassification::default();
        let mut memo: HashMap<String, Category> = HashMap::new();

        for import in imports {
            let root = import.root().to_string();
            let category = *memo
                .entry(root.clone())
                .or_insert_with(|| self.categorize(&root, import.is_relative()));
            match category {
                Category::StandardLibrary => result.standard_library.push(import.module.clone()),
                Category::ThirdParty => result.third_party.push(import.module.clone()),
                Category::Local => result.local.push(import.module.clone()),
                Category::Unknown => result.unknown.push(import.module.clone()),
            }
        }

        result
    }

    fn categorize(&self, root: &str, is_relative: bool) -> Category {
        if !is_relative && is_builtin_module(self.language, root) {
            return Category::StandardLibrary;
        }
        if !is_relative && self.third_party.contains(root) {
            return Category::ThirdParty;
        }
        if self.local_file_exists(root) {
            return Category::Local;
        }
        log::debug!("module '{root}' not resolved; classifying as unknown");
        Category::Unknown
    }

    fn local_file_exists(&self, root: &str) -> bool {
        let Some(project_root) = &self.project_root else {
            return false;
        };
        self.language.extensions().iter().any(|ext| {
            let candidate = project_root.join(format!("{root}.{ext}"));
            candidate.exists()
        })
    }
}

/// Parse third-party package names (and versions where present) from a
/// `requirements.txt` or `package.json` at the project root
fn read_manifest(root: &Path, language: Language) -> (HashSet<String>, HashMap<String, String>) {
    let mut packages = HashSet::new();
    let mut versions = HashMap::new();

    match language {
        Language::Python => {
            let path = root.join("requirements.txt");
            if let Ok(contents) = std::fs::read_to_string(&path) {
                for line in contents.lines() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    let name_end = line
                        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
                        .unwrap_or(line.len());
                    let name = line[..name_end].to_string();
                    if name.is_empty() {
                        continue;
                    }
                    let spec = &line[name_end..];
                    if let Some(version) = spec
                        .trim_start_matches(['>', '=', '<', '~', '!'])
                        .split(&[',', ';'][..])
                        .next()
                        .map(str::trim)
                        .filter(|v| !v.is_empty() && spec.starts_with(['>', '=', '~']))
                    {
                        versions.insert(name.clone(), version.to_string());
                    }
                    packages.insert(name);
                }
            }
        }
        Language::JavaScript => {
            let path = root.join("package.json");
            if let Ok(contents) = std::fs::read_to_string(&path) {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(&contents) {
                    for key in ["dependencies", "devDependencies"] {
                        if let Some(deps) = value.get(key).and_then(|d| d.as_object()) {
                            for (name, version) in deps {
                                if let Some(version) = version.as_str() {
                                    versions.insert(
                                        name.clone(),
                                        version.trim_start_matches(['^', '~']).to_string(),
                                    );
                                }
                                packages.insert(name.clone());
                            }
                        }
                    }
                }
            }
        }
    }

    (packages, versions)
}

/// Render import statements in the target language using its fixed
/// per-form templates. Imports classified as unknown are emitted in their
/// source-language form instead, so nothing is dropped.
pub fn rewrite(
    imports: &[ImportInfo],
    source: Language,
    target: Language,
    classification: Option<&ImportClassification>,
) -> Vec<String> {
    imports
        .iter()
        .map(|import| {
            let unresolved = classification.is_some_and(|c| c.is_unknown(&import.module));
            if unresolved {
                import_statement(import, source)
            } else {
                import_statement(import, target)
            }
        })
        .collect()
}

fn import_statement(import: &ImportInfo, language: Language) -> String {
    match language {
        Language::Python => {
            let module = import
                .module
                .trim_start_matches("./")
                .replace('/', ".");
            if import.names.iter().any(|n| n == "*") {
                format!("from {module} import *")
            } else if !import.names.is_empty() {
                format!("from {} import {}", module, import.names.join(", "))
            } else if let Some(alias) = &import.alias {
                format!("import {module} as {alias}")
            } else {
                format!("import {module}")
            }
        }
        Language::JavaScript => {
            let module = &import.module;
            if !import.names.is_empty() {
                format!("import {{ {} }} from '{}';", import.names.join(", "), module)
            } else if let Some(alias) = &import.alias {
                format!("import * as {alias} from '{module}';")
            } else {
                format!("import {module} from '{module}';")
            }
        }
    }
}
