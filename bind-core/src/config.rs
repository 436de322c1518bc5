//! Resolver Configuration
//!
//! Selects which resolution rules run. Loaded from TOML:
//!
//! ```toml
//! [rules]
//! unsigned_naming = true
//! scalar_regression = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::resolve::Rules;
use crate::{BindError, BindResult};

/// Configuration for overload resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Rule toggles.
    pub rules: RuleConfig,
}

/// Per-rule toggles. Every rule is enabled unless switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Prefer the overload whose name agrees with its parameter signedness.
    pub unsigned_naming: bool,

    /// Prefer a scalar candidate over an array entry for a same-named parameter.
    pub scalar_regression: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            unsigned_naming: true,
            scalar_regression: true,
        }
    }
}

impl ResolverConfig {
    /// Parses a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> BindResult<Self> {
        toml::from_str(source).map_err(|e| BindError::Config(e.to_string()))
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> BindResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> BindResult<String> {
        toml::to_string_pretty(self).map_err(|e| BindError::Config(e.to_string()))
    }

    /// The enabled rules as a set.
    pub fn rules(&self) -> Rules {
        let mut rules = Rules::empty();
        rules.set(Rules::UNSIGNED_NAMING, self.rules.unsigned_naming);
        rules.set(Rules::SCALAR_REGRESSION, self.rules.scalar_regression);
        rules
    }
}
