use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::models::{FlameLevel, LevelLadder, ValidationCriteria, default_levels};

fn default_completion_rate() -> u32 {
    60
}
fn default_min_tasks() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Percent of the day's items that must be completed.
    #[serde(default = "default_completion_rate")]
    pub required_completion_rate: u32,
    #[serde(default = "default_min_tasks")]
    pub required_min_tasks: u32,
    /// Leave unset to ignore focus sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_focus_sessions: Option<u32>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required_completion_rate: default_completion_rate(),
            required_min_tasks: default_min_tasks(),
            required_focus_sessions: None,
        }
    }
}

impl ValidationConfig {
    pub fn criteria(&self) -> ValidationCriteria {
        ValidationCriteria {
            required_completion_rate: self.required_completion_rate,
            required_min_tasks: self.required_min_tasks,
            required_focus_sessions: self.required_focus_sessions,
        }
    }
}

/// One `[[levels]]` entry. Keys are snake_case like the rest of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    pub name: String,
    pub icon: String,
    #[serde(alias = "daysRequired")]
    pub days_required: u32,
}

impl From<&FlameLevel> for LevelConfig {
    fn from(level: &FlameLevel) -> Self {
        Self {
            level: level.level,
            name: level.name.clone(),
            icon: level.icon.clone(),
            days_required: level.days_required,
        }
    }
}

impl From<&LevelConfig> for FlameLevel {
    fn from(level: &LevelConfig) -> Self {
        FlameLevel::new(level.level, &level.name, &level.icon, level.days_required)
    }
}

fn default_level_configs() -> Vec<LevelConfig> {
    default_levels().iter().map(LevelConfig::from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default = "default_level_configs")]
    pub levels: Vec<LevelConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig::default(),
            levels: default_level_configs(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "kindle").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("kindle.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Reads and validates a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        config
            .validate()
            .with_context(|| format!("Validating {:?}", path))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.required_completion_rate > 100 {
            return Err(ConfigError::CompletionRateOutOfRange(
                self.validation.required_completion_rate,
            ));
        }
        self.ladder()?;
        Ok(())
    }

    pub fn ladder(&self) -> Result<LevelLadder, ConfigError> {
        Ok(LevelLadder::new(self.levels.iter().map(FlameLevel::from).collect())?)
    }
}
