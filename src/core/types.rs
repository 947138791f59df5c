//! Common type definitions used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language enumeration for the supported translation languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
}

impl Language {
    /// Get file extensions for this language
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Python => &["py", "pyw"],
            Language::JavaScript => &["js", "mjs", "cjs"],
        }
    }

    /// Detect a language from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        [Language::Python, Language::JavaScript]
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext))
    }

    /// Get the display name for this language
    pub fn display_name(&self) -> &str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
        }
    }

    /// Lowercase identifier as used in CLI arguments and config files
    pub fn as_str(&self) -> &str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = crate::core::errors::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            other => Err(crate::core::errors::Error::UnknownLanguage(
                other.to_string(),
            )),
        }
    }
}

/// A single import statement, language-neutral
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportInfo {
    /// Module path as written in the source (`os.path`, `./utils`)
    pub module: String,
    /// Names bound from the module; empty for a whole-module import
    pub names: Vec<String>,
    /// Alias for a whole-module import (`import numpy as np`)
    pub alias: Option<String>,
}

impl ImportInfo {
    pub fn module(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            names: Vec::new(),
            alias: None,
        }
    }

    pub fn named(module: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            module: module.into(),
            names,
            alias: None,
        }
    }

    /// Root segment used for dependency classification (`os.path` -> `os`)
    pub fn root(&self) -> &str {
        let trimmed = self.module.trim_start_matches("./");
        trimmed
            .split(['.', '/'])
            .find(|s| !s.is_empty())
            .unwrap_or(&self.module)
    }

    /// Whether the module path is written as a relative one (`./utils`)
    pub fn is_relative(&self) -> bool {
        self.module.starts_with('.')
    }
}

/// Function or method metadata: name, arguments, and normalized body lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Argument names in declaration order, without `self`/`cls`
    pub args: Vec<String>,
    /// Simple name of the return-type hint, when present
    pub returns: Option<String>,
    pub docstring: Option<String>,
    /// Decorator simple names, in source order
    pub decorators: Vec<String>,
    pub is_async: bool,
    /// Body statements, indentation normalized to one unit per nesting level
    pub body: Vec<String>,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            returns: None,
            docstring: None,
            decorators: Vec::new(),
            is_async: false,
            body: Vec::new(),
        }
    }
}

/// Class metadata: methods in declaration order, base classes in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    /// Methods in declaration order; names unique within the class.
    /// Constructors are stored under the neutral key `__init__`.
    pub methods: Vec<FunctionInfo>,
    pub bases: Vec<String>,
    pub decorators: Vec<String>,
    pub docstring: Option<String>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            bases: Vec::new(),
            decorators: Vec::new(),
            docstring: None,
        }
    }

    pub fn method(&self, name: &str) -> Option<&FunctionInfo> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Structural model of one source file, independent of surface syntax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    /// Classes in declaration order; names unique within the module
    pub classes: Vec<ClassInfo>,
    /// Module-level functions in declaration order
    pub functions: Vec<FunctionInfo>,
    pub imports: Vec<ImportInfo>,
    /// Module-scope bound names, direct assignment only
    pub globals: Vec<String>,
    pub docstring: Option<String>,
}

impl ModuleInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            functions: Vec::new(),
            imports: Vec::new(),
            globals: Vec::new(),
            docstring: None,
        }
    }

    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Neutral constructor key used in the structural model
pub const CONSTRUCTOR_NAME: &str = "__init__";
