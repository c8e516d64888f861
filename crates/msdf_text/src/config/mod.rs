//! Configuration system
//!
//! Layout and geometry settings can be kept in TOML or RON files. Missing
//! fields fall back to their defaults.

pub use serde::{Serialize, Deserialize};

use crate::text::{GeometryOptions, LayoutOptions};

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML
    Toml,
    /// Rusty Object Notation
    Ron,
}

impl ConfigFormat {
    /// Pick a format from a file path's extension
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            Ok(Self::Toml)
        } else if path.ends_with(".ron") {
            Ok(Self::Ron)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse configuration from a string
    fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Serialize configuration to a string
    fn to_string(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string())),
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;
        log::debug!("Loading configuration from {}", path);
        Self::parse(&contents, format)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = self.to_string(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Text settings file: layout and geometry options together
///
/// ```toml
/// [layout]
/// width = 320.0
/// align = "center"
/// mode = "nowrap"
///
/// [geometry]
/// flip_v = false
/// winding = "counter_clockwise"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Layout options
    pub layout: LayoutOptions,
    /// Buffer generation options
    pub geometry: GeometryOptions,
}

impl Config for TextConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Align, Winding, WrapMode};

    #[test]
    fn test_parse_toml() {
        let contents = r#"
            [layout]
            width = 320.0
            align = "center"
            mode = "nowrap"
            letter_spacing = 1.5

            [geometry]
            flip_v = false
            winding = "counter_clockwise"
        "#;
        let config = TextConfig::parse(contents, ConfigFormat::Toml).unwrap();
        assert_eq!(config.layout.width, Some(320.0));
        assert_eq!(config.layout.align, Align::Center);
        assert_eq!(config.layout.mode, WrapMode::NoWrap);
        assert_eq!(config.layout.letter_spacing, 1.5);
        assert_eq!(config.layout.tab_size, 4.0);
        assert!(!config.geometry.flip_v);
        assert_eq!(config.geometry.winding, Winding::CounterClockwise);
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config = TextConfig::parse("", ConfigFormat::Toml).unwrap();
        assert_eq!(config, TextConfig::default());
        assert!(config.geometry.flip_v);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = TextConfig {
            layout: LayoutOptions::default().with_align(Align::Right).with_mode(WrapMode::Pre),
            geometry: GeometryOptions::default(),
        };
        let text = config.to_string(ConfigFormat::Ron).unwrap();
        assert_eq!(TextConfig::parse(&text, ConfigFormat::Ron).unwrap(), config);
    }

    #[test]
    fn test_parse_error() {
        let result = TextConfig::parse("[layout]\nalign = \"diagonal\"", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path("text.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("text.ron").unwrap(), ConfigFormat::Ron);
        assert!(matches!(
            ConfigFormat::from_path("text.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
