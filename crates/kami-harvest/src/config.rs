//! Configuration loading and typed config structures for the farming
//! calculator.
//!
//! Every field has a default, so an empty document is a valid config. The
//! shape mirrors `kami-harvest.yaml`:
//!
//! ```yaml
//! harvest:
//!   default_duration_secs: 3600
//! regeneration:
//!   max_stamina: 100
//!   current_stamina: 100
//! skills:
//!   catalog_path: null
//!   strict: false
//! nodes:
//!   - { index: 1, name: "Misty Riverside" }
//! logging:
//!   level: info
//!   json: false
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use kami_types::{NodeIndex, StaminaSnapshot};
use serde::Deserialize;

/// Environment variable overriding `skills.catalog_path`.
pub const ENV_SKILL_CATALOG: &str = "KAMI_SKILL_CATALOG";

/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "KAMI_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The same node index appears twice under `nodes`.
    #[error("duplicate node index in config: {0}")]
    DuplicateNode(NodeIndex),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level farming calculator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HarvestConfig {
    /// Harvest projection settings.
    #[serde(default)]
    pub harvest: YieldConfig,

    /// Regeneration settings.
    #[serde(default)]
    pub regeneration: RegenerationConfig,

    /// Skill catalog source.
    #[serde(default)]
    pub skills: SkillsConfig,

    /// Extra or overriding harvest nodes, merged over the built-in table.
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarvestConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `KAMI_SKILL_CATALOG` overrides `skills.catalog_path`
    /// - `KAMI_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error from [`HarvestConfig::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides and validating the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error from [`HarvestConfig::validate`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse and validate without consulting the environment.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as a mapping.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `KAMI_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup(ENV_SKILL_CATALOG) {
            self.skills.catalog_path = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = val;
        }
    }

    /// Check values serde cannot: non-zero duration and stamina capacity,
    /// current stamina within capacity, unique node indices.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.harvest.default_duration_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "harvest.default_duration_secs",
                reason: String::from("must be greater than zero"),
            });
        }
        if self.regeneration.max_stamina == 0 {
            return Err(ConfigError::Invalid {
                field: "regeneration.max_stamina",
                reason: String::from("must be greater than zero"),
            });
        }
        if self.regeneration.current_stamina > self.regeneration.max_stamina {
            return Err(ConfigError::Invalid {
                field: "regeneration.current_stamina",
                reason: format!(
                    "{} exceeds max_stamina {}",
                    self.regeneration.current_stamina, self.regeneration.max_stamina
                ),
            });
        }

        let mut seen = BTreeSet::new();
        for node in &self.nodes {
            if !seen.insert(node.index) {
                return Err(ConfigError::DuplicateNode(node.index));
            }
        }
        Ok(())
    }
}

/// Harvest projection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YieldConfig {
    /// Duration used when a request does not name one.
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: u64,
}

impl Default for YieldConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: default_duration_secs(),
        }
    }
}

/// Placeholder stamina used when neither the request nor the snapshot
/// carries a live reading.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegenerationConfig {
    /// Stamina capacity.
    #[serde(default = "default_stamina")]
    pub max_stamina: u32,

    /// Current stamina.
    #[serde(default = "default_stamina")]
    pub current_stamina: u32,
}

impl RegenerationConfig {
    /// The placeholder as a stamina reading.
    pub const fn stamina(&self) -> StaminaSnapshot {
        StaminaSnapshot {
            max: self.max_stamina,
            current: self.current_stamina,
        }
    }
}

impl Default for RegenerationConfig {
    fn default() -> Self {
        Self {
            max_stamina: default_stamina(),
            current_stamina: default_stamina(),
        }
    }
}

/// Skill catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkillsConfig {
    /// Path to a catalog YAML; `None` uses the built-in table.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Treat an unparseable descriptor as a build error.
    #[serde(default)]
    pub strict: bool,
}

/// One configured harvest node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeConfig {
    /// Node index.
    pub index: NodeIndex,

    /// Display name.
    pub name: String,

    /// Explicit affinity name; classified from `name` when absent.
    #[serde(default)]
    pub affinity: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_duration_secs() -> u64 {
    3600
}

const fn default_stamina() -> u32 {
    100
}

fn default_log_level() -> String {
    String::from("info")
}
