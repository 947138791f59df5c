use crate::core::Language;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codemorph")]
#[command(about = "Structural source-to-source translator with style preservation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source file to translate
    pub input: PathBuf,

    /// Target language (python or javascript)
    #[arg(short, long)]
    pub target: Language,

    /// Source language (inferred from the input extension when omitted)
    #[arg(short, long)]
    pub source: Option<Language>,

    /// TOML file with style overrides
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the extracted module model as JSON instead of translated code
    #[arg(long)]
    pub emit_model: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_invocation() {
        let cli = Cli::parse_from(["codemorph", "counter.py", "--target", "javascript"]);
        assert_eq!(cli.input, PathBuf::from("counter.py"));
        assert_eq!(cli.target, Language::JavaScript);
        assert!(cli.source.is_none());
        assert!(!cli.emit_model);
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::parse_from([
            "codemorph",
            "app.js",
            "--target",
            "python",
            "--source",
            "javascript",
            "--config",
            "style.toml",
            "--output",
            "app.py",
            "-vv",
        ]);
        assert_eq!(cli.source, Some(Language::JavaScript));
        assert_eq!(cli.output, Some(PathBuf::from("app.py")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_language_aliases() {
        let cli = Cli::parse_from(["codemorph", "a.py", "--target", "js"]);
        assert_eq!(cli.target, Language::JavaScript);
    }
}
