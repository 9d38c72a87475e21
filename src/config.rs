use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{DidError, Result};

pub const TOKEN_ENV_VAR: &str = "IDONETHIS_API_TOKEN";

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(rename = "apiToken", skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(rename = "defaultTeam", skip_serializing_if = "Option::is_none")]
    pub default_team: Option<String>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Keys recognized by the config store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiToken,
    DefaultTeam,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKey::ApiToken => f.write_str("apiToken"),
            ConfigKey::DefaultTeam => f.write_str("defaultTeam"),
        }
    }
}

/// Bearer token resolved once per invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(****)")
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config {
                path: Some(path.to_path_buf()),
                ..Config::default()
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| DidError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: Config = toml::from_str(&contents).map_err(|e| DidError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "did")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(DidError::NoConfigDir)
    }

    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::ApiToken => self.api_token.as_deref(),
            ConfigKey::DefaultTeam => self.default_team.as_deref(),
        }
    }

    /// Set a key; an empty value clears it.
    pub fn set(&mut self, key: ConfigKey, value: &str) {
        let value = Some(value.trim())
            .filter(|v| !v.is_empty())
            .map(String::from);
        match key {
            ConfigKey::ApiToken => self.api_token = value,
            ConfigKey::DefaultTeam => self.default_team = value,
        }
    }

    /// Write the config back to the file it was loaded from.
    pub fn save(&self) -> Result<PathBuf> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::config_path()?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DidError::ConfigWrite {
                path: path.clone(),
                source: e,
            })?;
        }

        let contents = toml::to_string(self)?;
        std::fs::write(&path, contents).map_err(|e| DidError::ConfigWrite {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }

    /// Resolve the API token: explicit flag, then config file, then env var.
    pub fn credentials(&self, explicit: Option<&str>) -> Result<Credentials> {
        let env = std::env::var(TOKEN_ENV_VAR).ok();
        pick_token(explicit, self.api_token.as_deref(), env.as_deref())
    }

    /// Get team, preferring explicit argument over default
    pub fn resolve_team(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(String::from)
            .or_else(|| self.default_team.clone())
    }
}

fn pick_token(
    explicit: Option<&str>,
    configured: Option<&str>,
    env: Option<&str>,
) -> Result<Credentials> {
    [explicit, configured, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(|t| Credentials(t.to_string()))
        .ok_or(DidError::MissingToken)
}
