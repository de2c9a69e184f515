//! SciKG Configuration Management
//!
//! Handles configuration from environment variables and TOML files
//! with defaults matching the reference pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shortest accepted entity id, in characters
pub const MIN_ENTITY_LEN: usize = 3;

/// Most underscore-separated tokens an entity id may have
pub const MAX_ENTITY_TOKENS: usize = 6;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Relation extraction settings
    pub extractor: ExtractorConfig,

    /// Top-K subgraph selection
    pub selection: SelectionConfig,

    /// Output artifacts
    pub export: ExportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Merge with environment variables (env takes precedence)
    ///
    /// Every variable that is set wins, even when it repeats a default.
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        if let Ok(top_k) = std::env::var("SCIKG_TOP_K") {
            self.selection.top_k = top_k.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SCIKG_TOP_K".to_string(),
                value: top_k,
            })?;
        }

        if let Ok(path) = std::env::var("SCIKG_JSON_PATH") {
            self.export.json_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("SCIKG_DOT_PATH") {
            self.export.dot_path = Some(PathBuf::from(path));
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Reject entity bounds looser than the graph accepts.
    ///
    /// Configuration may tighten the entity filters, never relax them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extractor = &self.extractor;
        if extractor.min_entity_len < MIN_ENTITY_LEN {
            return Err(ConfigError::InvalidValue {
                key: "extractor.min_entity_len".to_string(),
                value: extractor.min_entity_len.to_string(),
            });
        }
        if !(1..=MAX_ENTITY_TOKENS).contains(&extractor.max_entity_tokens) {
            return Err(ConfigError::InvalidValue {
                key: "extractor.max_entity_tokens".to_string(),
                value: extractor.max_entity_tokens.to_string(),
            });
        }
        Ok(())
    }
}

/// Relation extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Generic referents never accepted as a subject or object head
    pub stop_words: Vec<String>,

    /// Root lemmas that carry no informative relation
    pub skip_lemmas: Vec<String>,

    /// Minimum length (in characters) of a normalized entity
    pub min_entity_len: usize,

    /// Maximum number of underscore-separated tokens in an entity
    pub max_entity_tokens: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let stop_words = [
            "we", "i", "you", "they", "it", "he", "she", "study", "paper", "article", "result",
            "author", "research",
        ];
        Self {
            stop_words: stop_words.iter().map(|s| s.to_string()).collect(),
            skip_lemmas: vec!["be".to_string(), "have".to_string(), "do".to_string()],
            min_entity_len: MIN_ENTITY_LEN,
            max_entity_tokens: MAX_ENTITY_TOKENS,
        }
    }
}

/// Subgraph selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Maximum number of nodes kept in the exported subgraph
    pub top_k: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { top_k: 75 }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where the web UI graph JSON is written
    pub json_path: PathBuf,

    /// Optional Graphviz DOT output for the static renderer
    pub dot_path: Option<PathBuf>,

    /// Pretty-print the JSON
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            json_path: PathBuf::from("public/knowledge_graph.json"),
            dot_path: None,
            pretty: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.selection.top_k, 75);
        assert_eq!(config.extractor.min_entity_len, 3);
        assert_eq!(config.extractor.max_entity_tokens, 6);
        assert!(config.extractor.stop_words.iter().any(|w| w == "we"));
        assert_eq!(config.extractor.skip_lemmas, vec!["be", "have", "do"]);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[selection]
top_k = 10

[export]
json_path = "out/graph.json"
pretty = true
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.selection.top_k, 10);
        assert_eq!(config.export.json_path, PathBuf::from("out/graph.json"));
        assert!(config.export.pretty);
        // Untouched sections keep their defaults
        assert_eq!(config.extractor.min_entity_len, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file("/nonexistent/scikg.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError { .. }));
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[selection]\ntop_k = \"many\"").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_tokens() {
        let mut config = AppConfig::default();
        config.extractor.max_entity_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_min_len() {
        let mut config = AppConfig::default();
        config.extractor.min_entity_len = 0;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "extractor.min_entity_len")
        );

        config.extractor.min_entity_len = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_too_many_tokens() {
        let mut config = AppConfig::default();
        config.extractor.max_entity_tokens = 7;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "extractor.max_entity_tokens")
        );
    }

    #[test]
    fn test_validate_accepts_tighter_bounds() {
        let mut config = AppConfig::default();
        config.extractor.min_entity_len = 5;
        config.extractor.max_entity_tokens = 3;
        assert!(config.validate().is_ok());
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_file_rejects_loose_entity_bounds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[extractor]\nmin_entity_len = 0\nmax_entity_tokens = 20").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    // The only test touching the process environment
    #[test]
    fn test_env_override_wins_with_default_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[selection]\ntop_k = 10\n\n[export]\njson_path = \"out/graph.json\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        std::env::set_var("SCIKG_TOP_K", "75");
        std::env::set_var("SCIKG_JSON_PATH", "public/knowledge_graph.json");
        std::env::set_var("LOG_LEVEL", "info");
        let result = AppConfig::from_file(file.path()).and_then(AppConfig::with_env_override);
        std::env::remove_var("SCIKG_TOP_K");
        std::env::remove_var("SCIKG_JSON_PATH");
        std::env::remove_var("LOG_LEVEL");

        let config = result.unwrap();
        assert_eq!(config.selection.top_k, 75);
        assert_eq!(config.export.json_path, PathBuf::from("public/knowledge_graph.json"));
        assert_eq!(config.logging.level, "info");
    }
}
