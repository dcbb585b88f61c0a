//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a payroll
//! rule table from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionsConfig, PremiumsConfig, RegimeMetadata, RuleTable, TaxBracketsConfig,
};

/// Loads and provides access to a payroll rule table.
///
/// # Directory Structure
///
/// ```text
/// config/sv/
/// ├── regime.yaml         # Regime metadata
/// ├── contributions.yaml  # Withholding and employer rates, cap, levy threshold
/// ├── tax_brackets.yaml   # Progressive income tax brackets
/// └── premiums.yaml       # Overtime, night premium, standard period, attendance
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sv").unwrap();
/// println!("Loaded regime: {}", loader.regime().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: RuleTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The assembled rule table fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;
        let contributions =
            Self::load_yaml::<ContributionsConfig>(&path.join("contributions.yaml"))?;
        let brackets = Self::load_yaml::<TaxBracketsConfig>(&path.join("tax_brackets.yaml"))?;
        let premiums = Self::load_yaml::<PremiumsConfig>(&path.join("premiums.yaml"))?;

        let rules = RuleTable::new(metadata, contributions, brackets.brackets, premiums)?;

        Ok(Self { rules })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the validated rule table.
    pub fn rule_table(&self) -> &RuleTable {
        &self.rules
    }

    /// Consumes the loader, returning the rule table.
    pub fn into_rule_table(self) -> RuleTable {
        self.rules
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.rules.metadata()
    }
}
