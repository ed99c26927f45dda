//! Tool Configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Command line flags
//! 2. Environment variables: `PERSPECTIVE_SCHEMA`, `PERSPECTIVE_WORLD_NAME`
//! 3. Config file: `--config <path>`, `$PERSPECTIVE_CONFIG`, or
//!    `perspective.toml` in the working directory
//! 4. Defaults
//!
//! # Example Config File
//!
//! ```toml
//! schema = "auto"        # auto, basic, extended
//! world_name = "Tutorial"
//! log_level = "info"
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use perspective_format::{Puzzle, Schema};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "perspective.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid TOML for this tool
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Schema used when writing puzzles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemaChoice {
    /// Pick the schema each puzzle needs
    #[default]
    Auto,
    Basic,
    Extended,
}

impl SchemaChoice {
    /// Resolve to a concrete schema for `puzzle`
    pub fn resolve(self, puzzle: &Puzzle) -> Schema {
        match self {
            Self::Auto => puzzle.schema(),
            Self::Basic => Schema::Basic,
            Self::Extended => Schema::Extended,
        }
    }
}

impl std::str::FromStr for SchemaChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            other => other.parse::<Schema>().map(|schema| match schema {
                Schema::Basic => Self::Basic,
                Schema::Extended => Self::Extended,
            }),
        }
    }
}

/// Complete tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Output schema for `fmt`
    pub schema: SchemaChoice,
    /// World name used by `pack` when none is given
    pub world_name: Option<String>,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: Option<String>,
    /// Where the config was loaded from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
    /// Rejected settings, reported once logging is up
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl ToolConfig {
    /// Load configuration from file and environment
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os("PERSPECTIVE_CONFIG")
                .map(PathBuf::from)
                .or_else(|| {
                    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                    local.exists().then_some(local)
                }),
        };

        let mut config = match path {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(schema) = var("PERSPECTIVE_SCHEMA") {
            match schema.parse() {
                Ok(choice) => self.schema = choice,
                Err(e) => self.warnings.push(format!("Ignoring PERSPECTIVE_SCHEMA: {}", e)),
            }
        }

        if let Some(name) = var("PERSPECTIVE_WORLD_NAME") {
            if !name.is_empty() {
                self.world_name = Some(name);
            }
        }
    }
}
