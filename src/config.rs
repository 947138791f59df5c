//! Optional style overrides layered on top of the detected profile

use crate::core::{Error, Result};
use crate::style::{BracketStyle, NamingConvention, QuoteStyle, StyleProfile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-supplied style overrides. Every field is optional; unset fields
/// leave the detected profile value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    pub indent_size: Option<usize>,
    pub quote_style: Option<QuoteStyle>,
    pub naming_convention: Option<NamingConvention>,
    pub max_line_length: Option<usize>,
    pub bracket_style: Option<BracketStyle>,
}

impl StyleConfig {
    /// Load overrides from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Validate the overrides and fold them into a detected profile
    pub fn apply_to(&self, profile: &mut StyleProfile) -> Result<()> {
        if let Some(indent) = self.indent_size {
            if !(1..=8).contains(&indent) {
                return Err(Error::Config(format!(
                    "indent_size must be between 1 and 8, got {indent}"
                )));
            }
            profile.indent_size = indent;
        }
        if let Some(width) = self.max_line_length {
            if width < 40 {
                return Err(Error::Config(format!(
                    "max_line_length must be at least 40, got {width}"
                )));
            }
            profile.max_line_length = width;
        }
        if let Some(quotes) = self.quote_style {
            profile.quote_style = quotes;
        }
        if let Some(naming) = self.naming_convention {
            profile.naming_convention = naming;
        }
        if let Some(brackets) = self.bracket_style {
            profile.bracket_style = brackets;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_leaves_profile_unchanged() {
        let config = StyleConfig::default();
        let mut profile = StyleProfile::default();
        let before = profile.clone();
        config.apply_to(&mut profile).unwrap();
        assert_eq!(profile, before);
    }

    #[test]
    fn test_overrides_replace_detected_values() {
        let config = StyleConfig {
            indent_size: Some(2),
            quote_style: Some(QuoteStyle::Single),
            ..Default::default()
        };
        let mut profile = StyleProfile::default();
        config.apply_to(&mut profile).unwrap();
        assert_eq!(profile.indent_size, 2);
        assert_eq!(profile.quote_style, QuoteStyle::Single);
        assert_eq!(profile.naming_convention, NamingConvention::SnakeCase);
    }

    #[test]
    fn test_invalid_indent_rejected() {
        let config = StyleConfig {
            indent_size: Some(0),
            ..Default::default()
        };
        let mut profile = StyleProfile::default();
        assert!(matches!(
            config.apply_to(&mut profile),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_toml_overrides() {
        let config: StyleConfig = toml::from_str(
            r#"
            indent_size = 2
            quote_style = "single"
            naming_convention = "camelCase"
            "#,
        )
        .unwrap();
        assert_eq!(config.indent_size, Some(2));
        assert_eq!(config.quote_style, Some(QuoteStyle::Single));
        assert_eq!(config.naming_convention, Some(NamingConvention::CamelCase));
    }

    #[test]
    fn test_is_empty_tracks_overrides() {
        assert!(StyleConfig::default().is_empty());
        let config = StyleConfig {
            indent_size: Some(2),
            ..Default::default()
        };
        assert!(!config.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let parsed: std::result::Result<StyleConfig, _> = toml::from_str("tabs = true");
        assert!(parsed.is_err());
    }
}
