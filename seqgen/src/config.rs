//! Generator configuration.
//!
//! Loaded from TOML:
//! ```toml
//! [render]
//! long_format = false
//! line_separator = "\n"
//! ```
//! Every key is optional. `SEQGEN_LONG_FORMAT=1` in the environment forces
//! long format on regardless of the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const LONG_FORMAT_ENV: &str = "SEQGEN_LONG_FORMAT";

/// Source rendering policy, threaded explicitly into every render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// When false, literal inputs may be written inline instead of through
    /// the variable that holds them.
    pub long_format: bool,
    /// Appended after every rendered statement
    pub line_separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            long_format: false,
            line_separator: "\n".to_string(),
        }
    }
}

impl RenderOptions {
    /// Options that never inline literals
    pub fn long_format() -> Self {
        Self {
            long_format: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub render: RenderOptions,
}

impl GeneratorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read a config file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml_str(&source)?.with_env_overrides())
    }

    pub fn with_env_overrides(self) -> Self {
        self.apply_long_format_override(std::env::var(LONG_FORMAT_ENV).ok().as_deref())
    }

    fn apply_long_format_override(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            match value.trim() {
                "1" | "true" | "yes" => self.render.long_format = true,
                "0" | "false" | "no" => self.render.long_format = false,
                _ => {}
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(!config.render.long_format);
        assert_eq!(config.render.line_separator, "\n");
    }

    #[test]
    fn test_partial_render_table() {
        let config = GeneratorConfig::from_toml_str("[render]\nlong_format = true\n").unwrap();
        assert_eq!(
            config.render,
            RenderOptions {
                long_format: true,
                line_separator: "\n".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = GeneratorConfig::from_toml_str("[render]\nlong_format = \"maybe\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nline_separator = \"\\r\\n\"").unwrap();
        let config = GeneratorConfig::from_toml_str(
            &std::fs::read_to_string(file.path()).unwrap(),
        )
        .unwrap();
        assert_eq!(config.render.line_separator, "\r\n");
        assert!(GeneratorConfig::load(file.path()).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GeneratorConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_long_format_override() {
        let config = GeneratorConfig::default();
        assert!(config.clone().apply_long_format_override(Some("1")).render.long_format);
        assert!(!config.clone().apply_long_format_override(Some("bogus")).render.long_format);
        assert!(!config.apply_long_format_override(None).render.long_format);
    }
}
