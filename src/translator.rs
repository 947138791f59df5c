//! End-to-end translation pipeline: infer style, parse, render, restyle

use crate::config::StyleConfig;
use crate::core::{ModuleInfo, Language, Result};
use crate::imports::ImportClassifier;
use crate::parsers::get_parser;
use crate::render::{RenderWarning, Renderer};
use crate::style::{self, StyleProfile};
use std::path::PathBuf;

/// Result of translating one module
#[derive(Debug, Clone)]
pub struct Translation {
    /// Translated source text, restyled to the effective profile
    pub text: String,
    /// Profile that was applied: detected from the input, then overridden
    /// by any configured values
    pub profile: StyleProfile,
    /// Constructs that rendered verbatim for human review
    pub warnings: Vec<RenderWarning>,
    /// The language-neutral model extracted from the input
    pub model: ModuleInfo,
}

/// Translator for one `(source, target)` pair
pub struct Translator {
    source: Language,
    target: Language,
    config: StyleConfig,
    project_root: Option<PathBuf>,
}

impl Translator {
    /// Fails early when the pair has no rewrite table
    pub fn new(source: Language, target: Language) -> Result<Self> {
        // surfaces UnsupportedPair before any parsing happens
        Renderer::new(source, target)?;
        Ok(Self {
            source,
            target,
            config: StyleConfig::default(),
            project_root: None,
        })
    }

    pub fn with_config(mut self, config: StyleConfig) -> Self {
        self.config = config;
        self
    }

    /// Project root used to resolve local imports and dependency manifests
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn source_language(&self) -> Language {
        self.source
    }

    pub fn target_language(&self) -> Language {
        self.target
    }

    /// Translate one module of source text
    pub fn translate(&self, source_text: &str, module_name: &str) -> Result<Translation> {
        let mut profile = StyleProfile::detect(source_text);
        self.config.apply_to(&mut profile)?;

        let parser = get_parser(self.source);
        let model = parser.parse(source_text, module_name)?;
        log::info!(
            "parsed module '{}': {} classes, {} functions, {} imports",
            model.name,
            model.classes.len(),
            model.functions.len(),
            model.imports.len()
        );

        let mut classifier = ImportClassifier::new(self.source);
        if let Some(root) = &self.project_root {
            classifier = classifier.with_project_root(root.clone());
        }
        let classification = classifier.classify(&model.imports);

        let renderer = Renderer::new(self.source, self.target)?;
        let rendered = renderer.render_with_imports(&model, Some(&classification));

        let text = style::apply(&rendered.text, &profile);
        Ok(Translation {
            text,
            profile,
            warnings: rendered.warnings,
            model,
        })
    }
}
