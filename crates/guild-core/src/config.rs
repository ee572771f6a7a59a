use crate::error::{GuildError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// SessionDefaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDefaults {
    #[serde(default = "default_max_players")]
    pub max_players: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

fn default_max_players() -> u8 {
    4
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            max_players: default_max_players(),
            venue: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub club: ClubInfo,
    #[serde(default)]
    pub sessions: SessionDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(club_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            club: ClubInfo {
                name: club_name.into(),
                description: None,
            },
            sessions: SessionDefaults::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(GuildError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Sanity-check the configuration without failing the load.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.club.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "club.name is empty".to_string(),
            });
        }
        if self.sessions.max_players == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "sessions.max_players must be at least 1".to_string(),
            });
        } else if self.sessions.max_players > 12 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "sessions.max_players = {} is unusually large for a playtest table",
                    self.sessions.max_players
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
