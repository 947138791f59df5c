use anyhow::{Context, Result};
use clap::Parser;
use codemorph::cli::Cli;
use codemorph::{Language, StyleConfig, Translator};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            // translation errors (bad input, unsupported pair) exit with 2
            // to distinguish them from I/O and environment failures
            match err.downcast_ref::<codemorph::Error>() {
                Some(e) if e.is_terminal() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match cli.source {
        Some(language) => language,
        None => infer_language(&cli.input)?,
    };

    let source_text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let mut translator = Translator::new(source, cli.target)?;
    if let Some(path) = &cli.config {
        let overrides = StyleConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        if overrides.is_empty() {
            log::warn!("style config {} sets no overrides", path.display());
        }
        translator = translator.with_config(overrides);
    }
    if let Some(root) = cli.input.parent().filter(|p| !p.as_os_str().is_empty()) {
        translator = translator.with_project_root(root);
    }

    let module_name = cli
        .input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("module");
    let translation = translator.translate(&source_text, module_name)?;

    for warning in &translation.warnings {
        eprintln!("warning: {}: {}", warning.construct, warning.message);
    }

    let payload = if cli.emit_model {
        let mut json = serde_json::to_string_pretty(&translation.model)?;
        json.push('\n');
        json
    } else {
        translation.text
    };

    match &cli.output {
        Some(path) => fs::write(path, payload)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout().write_all(payload.as_bytes())?,
    }

    Ok(())
}

fn infer_language(path: &Path) -> Result<Language> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    Language::from_extension(ext).with_context(|| {
        format!(
            "cannot infer a source language from '{}'; pass --source",
            path.display()
        )
    })
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
