//! File-based configuration: translation tables and filter defaults.
//!
//! ```toml
//! [filter]
//! unknown_keys = "ignore"
//! check_bounds = true
//!
//! [translations.users]
//! fallback = "snake_case"
//! columns = { firstName = "first_name", isAdmin = "is_admin" }
//!
//! [translations.companies.columns]
//! numEmployees = "num_employees"
//! logoUrl = "logo_url"
//! ```

use crate::error::{FragError, FragResult};
use crate::filter::{FilterOptions, UnknownKeys};
use crate::translation::{Fallback, NameTranslation};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FragConfig {
    #[serde(default)]
    pub filter: FilterConfig,
    /// Translation tables keyed by table name.
    #[serde(default)]
    pub translations: BTreeMap<String, TranslationConfig>,
}

/// `[filter]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    pub unknown_keys: UnknownKeys,
    #[serde(default = "default_true")]
    pub check_bounds: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            unknown_keys: UnknownKeys::default(),
            check_bounds: true,
        }
    }
}

/// `[translations.<table>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationConfig {
    #[serde(default)]
    pub fallback: Fallback,
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl FragConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> FragResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> FragResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FragError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&raw).map_err(|e| match e {
            FragError::Config(msg) => {
                FragError::config(format!("failed to parse config file {}: {msg}", path.display()))
            }
            other => other,
        })?;
        tracing::debug!(
            path = %path.display(),
            tables = config.translations.len(),
            "loaded config"
        );
        Ok(config)
    }

    fn validate(&self) -> FragResult<()> {
        for (table, t) in &self.translations {
            if let Some((field, _)) = t.columns.iter().find(|(_, col)| col.is_empty()) {
                return Err(FragError::config(format!(
                    "translations.{table}: empty column name for field '{field}'"
                )));
            }
        }
        Ok(())
    }

    /// Translation table for `table` (empty if not configured).
    pub fn translation(&self, table: &str) -> NameTranslation {
        match self.translations.get(table) {
            Some(t) => t
                .columns
                .iter()
                .map(|(f, c)| (f.as_str(), c.as_str()))
                .collect::<NameTranslation>()
                .with_fallback(t.fallback),
            None => NameTranslation::new(),
        }
    }

    /// Filter options from the `[filter]` section.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::new()
            .unknown_keys(self.filter.unknown_keys)
            .check_bounds(self.filter.check_bounds)
    }
}
