//! Runtime settings with file and environment layering.
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! `SWAPGUARD_*` environment variables. Later layers win.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currencies::CurrencyTable;
use crate::dialogue::DialogueConfig;
use crate::exemplars::ExemplarSet;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid environment variable {name}: {reason}")]
    Env { name: String, reason: String },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Escalation model connection settings. `endpoint = None` disables
/// escalation entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationSettings {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EscalationSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_max_tokens() -> u32 {
    256
}

fn default_timeout_secs() -> u64 {
    15
}

/// Top-level settings for the dialogue engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub escalation: EscalationSettings,
    #[serde(default)]
    pub dialogue: DialogueConfig,
    #[serde(default)]
    pub currencies: CurrencyTable,
    #[serde(default)]
    pub exemplars: ExemplarSet,
}

impl Settings {
    /// Load settings, layering an optional TOML file and environment
    /// overrides on top of the defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(endpoint) = env_string("SWAPGUARD_ESCALATION_ENDPOINT") {
            self.escalation.endpoint = Some(endpoint);
        }
        if let Some(max_tokens) = env_parsed("SWAPGUARD_ESCALATION_MAX_TOKENS")? {
            self.escalation.max_tokens = max_tokens;
        }
        if let Some(timeout_secs) = env_parsed("SWAPGUARD_ESCALATION_TIMEOUT_SECS")? {
            self.escalation.timeout_secs = timeout_secs;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.escalation.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "escalation.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.escalation.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "escalation.max_tokens must be greater than zero".to_string(),
            ));
        }
        if let Some(endpoint) = &self.escalation.endpoint {
            if endpoint.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "escalation.endpoint must not be empty when set".to_string(),
                ));
            }
        }
        if self.exemplars.exemplars.is_empty() {
            tracing::warn!("exemplar set is empty, similarity fallback disabled");
        }
        Ok(())
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Env {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_load_without_file() {
        let settings = Settings::load(None).unwrap();
        assert!(settings.escalation.endpoint.is_none());
        assert_eq!(settings.escalation.timeout_secs, 15);
        assert_eq!(settings.exemplars.exemplars.len(), 10);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[escalation]\nendpoint = \"http://localhost:9000/complete\"\ntimeout_secs = 5"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(
            settings.escalation.endpoint.as_deref(),
            Some("http://localhost:9000/complete")
        );
        assert_eq!(settings.escalation.timeout_secs, 5);
        // untouched sections keep their defaults
        assert_eq!(settings.escalation.max_tokens, 256);
        assert!(settings.dialogue.is_trigger("stop order please"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[escalation]\ntimeout_secs = 0").unwrap();
        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/swapguard.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
