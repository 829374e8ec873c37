use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::DEFAULT_MAX_SUGGESTIONS;
use crate::error::{SuggestError, SuggestResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Filter vocabulary file (TOML). `~` is expanded.
    pub vocabulary_file: Option<String>,
    /// Description catalog file (TOML key/value pairs).
    pub catalog_file: Option<String>,
    /// Search history snapshot (JSON array). `~` is expanded.
    pub history_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Ranked suggestions shown before the help entry. Can lower the
    /// default cap, never raise it.
    pub max_suggestions: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS as u32,
        }
    }
}

impl GeneralConfig {
    pub fn vocabulary_path(&self) -> Option<PathBuf> {
        self.vocabulary_file.as_deref().map(expand_path)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_file.as_deref().map(expand_path)
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file.as_deref().map(expand_path)
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("querycomplete")
            .join("config.toml")
    }

    /// Load config from the default location, or return defaults if missing
    /// or unreadable.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> SuggestResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.behavior.max_suggestions = self
            .behavior
            .max_suggestions
            .clamp(1, DEFAULT_MAX_SUGGESTIONS as u32);
    }

    /// Save config to the default location
    pub fn save(&self) -> SuggestResult<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> SuggestResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SuggestError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.behavior.max_suggestions, 7);
        assert!(config.general.vocabulary_path().is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nhistory_file = \"/tmp/history.json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.behavior.max_suggestions, 7);
        assert_eq!(
            config.general.history_path(),
            Some(PathBuf::from("/tmp/history.json"))
        );
    }

    #[test]
    fn test_max_suggestions_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[behavior]\nmax_suggestions = 0\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().behavior.max_suggestions, 1);

        fs::write(&path, "[behavior]\nmax_suggestions = 4\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().behavior.max_suggestions, 4);

        fs::write(&path, "[behavior]\nmax_suggestions = 500\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().behavior.max_suggestions, 7);
    }

    #[test]
    fn test_tilde_expanded() {
        let general = GeneralConfig {
            vocabulary_file: Some("~/vocab.toml".into()),
            ..GeneralConfig::default()
        };
        let path = general.vocabulary_path().unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("vocab.toml"));
        }
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[behavior\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(SuggestError::TomlParse(_))
        ));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.behavior.max_suggestions = 5;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap().behavior.max_suggestions, 5);
    }
}
