//! Shared error types for the application

use crate::core::types::Language;
use thiserror::Error;

/// Main error type for codemorph operations
#[derive(Debug, Error)]
pub enum Error {
    /// Source text could not be structurally recognized by its grammar
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// No rewrite table exists for the requested language pair. The
    /// fields avoid the name `source`, which thiserror reserves for
    /// error chaining.
    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedPair { from: Language, to: Language },

    /// Language identifier outside the closed supported set
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a parse error with location
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// True for errors that reflect a property of the input or
    /// configuration rather than a transient condition
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. } | Error::UnsupportedPair { .. } | Error::UnknownLanguage(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
