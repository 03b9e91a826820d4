use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calendar::OwnerId;
use crate::view_model::ViewMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub calendar: CalendarConfig,
    pub user: UserConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub database: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    pub locale: String,
    pub default_view: ViewMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<OwnerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mandarina")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: config_dir().join("tasks.db"),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            locale: "en_US".to_string(),
            default_view: ViewMode::Month,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_uses_month_view() {
        let config = Config::default();
        assert_eq!(config.calendar.default_view, ViewMode::Month);
    }

    #[test]
    fn default_config_is_signed_out() {
        let config = Config::default();
        assert_eq!(config.user.owner_id, None);
    }

    #[test]
    fn default_database_lives_next_to_config() {
        let config = Config::default();
        assert_eq!(config.storage.database.file_name().unwrap(), "tasks.db");
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [storage]
            database = "/tmp/tasks.db"

            [calendar]
            locale = "fr_FR"
            default_view = "Week"

            [user]
            owner_id = 4

            [ui]
            theme = "dark"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.storage.database, PathBuf::from("/tmp/tasks.db"));
        assert_eq!(config.calendar.locale, "fr_FR");
        assert_eq!(config.calendar.default_view, ViewMode::Week);
        assert_eq!(config.user.owner_id, Some(4));
        assert_eq!(config.ui.theme, "dark");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = Config::from_toml("[user]\nowner_id = 2\n").unwrap();

        assert_eq!(config.user.owner_id, Some(2));
        assert_eq!(config.calendar, CalendarConfig::default());
        assert_eq!(config.ui.theme, "light");
    }

    #[test]
    fn unknown_view_is_rejected() {
        let result = Config::from_toml("[calendar]\ndefault_view = \"Year\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn load_or_create_writes_defaults_then_reads_them_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = Config::load_or_create_at(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_or_create_at(&path).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn saved_owner_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.user.owner_id = Some(9);

        config.save_to(&path).unwrap();

        assert_eq!(Config::load_or_create_at(&path).unwrap().user.owner_id, Some(9));
    }
}
