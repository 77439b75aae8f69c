//! Configuration system for SquadForge.
//!
//! Load the constraint set, allocation options and repair policy from TOML
//! or YAML files without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use squadforge_config::{HintScope, SquadConfig};
//!
//! let config = SquadConfig::from_toml_str(r#"
//!     [constraints]
//!     budget = 83.5
//!     max_per_group = 2
//!
//!     [constraints.quotas]
//!     GK = 1
//!     DEF = 4
//!
//!     [allocation]
//!     hint_scope = "open_categories"
//! "#).unwrap();
//!
//! let constraints = config.constraint_set().unwrap();
//! assert_eq!(constraints.target_size(), 5);
//! assert_eq!(config.allocation.hint_scope, HintScope::OpenCategories);
//! assert!(config.repair.revalidate);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use squadforge_config::SquadConfig;
//!
//! let config = SquadConfig::load("squad.toml").unwrap_or_default();
//! // Proceeds with the standard 15-player squad if the file doesn't exist
//! assert_eq!(config.constraint_set().unwrap().target_size(), 15);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use squadforge_core::{Category, ConstraintSet, SquadForgeError};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<SquadForgeError> for ConfigError {
    fn from(err: SquadForgeError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Main SquadForge configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SquadConfig {
    /// Constraint set every squad is validated against.
    #[serde(default)]
    pub constraints: ConstraintsConfig,

    /// Allocator behaviour.
    #[serde(default)]
    pub allocation: AllocationConfig,

    /// Repair controller behaviour.
    #[serde(default)]
    pub repair: RepairConfig,
}

impl SquadConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Loads configuration from a file, picking the format by extension.
    ///
    /// `.yaml` and `.yml` are read as YAML, anything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Sets the budget ceiling.
    pub fn with_budget(mut self, budget: Decimal) -> Self {
        self.constraints.budget = budget;
        self
    }

    /// Sets whether allocation prefers score over price.
    pub fn with_prefer_score(mut self, prefer_score: bool) -> Self {
        self.allocation.prefer_score = prefer_score;
        self
    }

    /// Sets the hint matching scope.
    pub fn with_hint_scope(mut self, hint_scope: HintScope) -> Self {
        self.allocation.hint_scope = hint_scope;
        self
    }

    /// Sets whether the repaired squad is validated again.
    pub fn with_revalidate(mut self, revalidate: bool) -> Self {
        self.repair.revalidate = revalidate;
        self
    }

    /// Builds the validated constraint set.
    ///
    /// Convenience method that delegates to `constraints.to_constraint_set()`.
    pub fn constraint_set(&self) -> Result<ConstraintSet, ConfigError> {
        self.constraints.to_constraint_set()
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Constraint configuration.
///
/// Kept untyped so that a negative budget or an unknown category label is
/// reported as a configuration error rather than a parse failure deep in a
/// TOML table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstraintsConfig {
    /// Total budget ceiling.
    #[serde(default = "default_budget")]
    pub budget: Decimal,

    /// Maximum number of items from one group.
    #[serde(default = "default_max_per_group", alias = "max_per_club")]
    pub max_per_group: u32,

    /// Required count per category label.
    #[serde(default = "default_quotas", alias = "positions")]
    pub quotas: BTreeMap<String, u32>,
}

impl Default for ConstraintsConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            max_per_group: default_max_per_group(),
            quotas: default_quotas(),
        }
    }
}

impl ConstraintsConfig {
    /// Converts into a typed constraint set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on a negative budget, an unknown
    /// category label, or a label listed twice under different spellings.
    pub fn to_constraint_set(&self) -> Result<ConstraintSet, ConfigError> {
        let quotas = self
            .quotas
            .iter()
            .map(|(label, &count)| (label.as_str(), count));
        Ok(ConstraintSet::from_labels(
            self.budget,
            quotas,
            self.max_per_group,
        )?)
    }
}

fn default_budget() -> Decimal {
    ConstraintSet::default().budget.amount()
}

fn default_max_per_group() -> u32 {
    ConstraintSet::default().max_per_group
}

fn default_quotas() -> BTreeMap<String, u32> {
    ConstraintSet::default()
        .quotas
        .into_iter()
        .map(|(category, count): (Category, u32)| (category.label().to_string(), count))
        .collect()
}

/// Allocation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AllocationConfig {
    /// Order buckets by score first (true) or by price first (false).
    #[serde(default = "default_true", alias = "prefer_points")]
    pub prefer_score: bool,

    /// Which items a hint may match.
    #[serde(default)]
    pub hint_scope: HintScope,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            prefer_score: true,
            hint_scope: HintScope::default(),
        }
    }
}

/// Scope of hint matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintScope {
    /// Hints match against the whole pool, even categories already filled.
    #[default]
    WholePool,

    /// Hints only match items whose category still has an open slot.
    OpenCategories,
}

/// Repair controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RepairConfig {
    /// Validate the repaired squad instead of clearing violations blindly.
    #[serde(default = "default_true")]
    pub revalidate: bool,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self { revalidate: true }
    }
}

fn default_true() -> bool {
    true
}
