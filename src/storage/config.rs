//! Configuration handling
//!
//! Settings are read from the first file found among:
//! an explicit `--config` path, `<repo>/.erc-finality.toml`, and
//! `~/.config/erc-finality/config.toml` (global). Without any file the
//! built-in ERC defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Name of the repository-local settings file
pub const LOCAL_CONFIG_FILE: &str = ".erc-finality.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory under the repository root holding the documents
    pub documents_dir: String,

    /// File extension of documents (without the dot)
    pub extension: String,

    /// Required `category` value (case-insensitive)
    pub category: String,

    /// Front matter field holding the document identifier
    pub id_field: String,

    /// Status whose first appearance is searched for
    pub terminal_status: String,

    /// Git executable
    pub git_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            documents_dir: "ERCS".to_string(),
            extension: "md".to_string(),
            category: "erc".to_string(),
            id_field: "eip".to_string(),
            terminal_status: "Final".to_string(),
            git_program: "git".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration for the repository at `repo_root`.
    ///
    /// An `explicit` path must exist; the other locations are optional.
    pub fn load(repo_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Self::from_file(path);
        }

        let local = repo_root.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.is_file() {
                return Self::from_file(&global);
            }
        }

        debug!("using default configuration");
        Ok(Self::default())
    }

    /// Returns the global config file location
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "erc-finality", "erc-finality")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads and validates a settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading configuration");

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses and validates settings from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("documents_dir", &self.documents_dir),
            ("extension", &self.extension),
            ("category", &self.category),
            ("terminal_status", &self.terminal_status),
            ("git_program", &self.git_program),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("'{}' must not be empty", name)));
            }
        }

        if self.extension.starts_with('.') {
            return Err(ConfigError::Invalid(
                "'extension' must not start with a dot".to_string(),
            ));
        }

        Ok(())
    }
}
