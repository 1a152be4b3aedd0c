//! Runtime configuration
//!
//! Resolved in three layers: an optional JSON file, then `MEDGLOSS_*` environment
//! variables, then whatever the command line sets explicitly.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::LanguageTag;
use crate::error::ConfigError;

pub const ENV_DATA_DIR: &str = "MEDGLOSS_DATA_DIR";
pub const ENV_DELAY_MS: &str = "MEDGLOSS_DELAY_MS";
pub const ENV_GLOSSARY: &str = "MEDGLOSS_GLOSSARY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source_language: String,
    pub target_language: String,
    /// Simulated translation latency
    pub delay_ms: u64,
    /// Where history, favorites and counters are kept
    pub data_dir: PathBuf,
    /// Extra glossary entries merged over the built-in table
    pub glossary_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: "en".to_string(),
            target_language: "ar".to_string(),
            delay_ms: 1000,
            data_dir: PathBuf::from(".medgloss"),
            glossary_path: None,
        }
    }
}

impl Config {
    /// Load from `path` if given, then apply the process environment
    ///
    /// # Errors
    ///
    /// `ConfigError` when the file cannot be read or parsed, or an environment
    /// variable holds a value of the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `MEDGLOSS_*` values found through `lookup`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(delay) = lookup(ENV_DELAY_MS) {
            self.delay_ms = delay.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_DELAY_MS.to_string(),
                value: delay.clone(),
            })?;
        }
        if let Some(path) = lookup(ENV_GLOSSARY) {
            self.glossary_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Both language tags, validated
    pub fn languages(&self) -> Result<(LanguageTag, LanguageTag), ConfigError> {
        let parse = |key: &str, value: &str| {
            LanguageTag::parse(value).map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            })
        };
        Ok((
            parse("source_language", &self.source_language)?,
            parse("target_language", &self.target_language)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.data_dir, PathBuf::from(".medgloss"));
        let (source, target) = config.languages().unwrap();
        assert_eq!(source.as_str(), "en");
        assert!(target.is_arabic());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_json(r#"{ "delay_ms": 0, "target_language": "ar-SA" }"#).unwrap();
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.target_language, "ar-SA");
        assert_eq!(config.source_language, "en");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(matches!(
            Config::from_json(r#"{ "delay": 5 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "delay_ms": 250, "data_dir": "/from/file" }}"#).unwrap();

        let mut config = Config::from_file(file.path()).unwrap();
        config
            .apply_overrides(env(&[(ENV_DATA_DIR, "/from/env"), (ENV_GLOSSARY, "extra.json")]))
            .unwrap();
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.data_dir, PathBuf::from("/from/env"));
        assert_eq!(config.glossary_path, Some(PathBuf::from("extra.json")));
    }

    #[test]
    fn test_bad_delay_value() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(env(&[(ENV_DELAY_MS, "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_DELAY_MS.to_string(),
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_language() {
        let config = Config {
            target_language: "???".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.languages(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::from_file(Path::new("/nonexistent/medgloss.json")),
            Err(ConfigError::Read(_))
        ));
    }
}
