//! Top-level configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::extraction_config::is_identifier;
use super::{ExtractionConfig, RulesConfig, SchemaConfig};
use crate::errors::ConfigError;

/// Top-level configuration for a fielddrift run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FieldDriftConfig {
    pub extraction: ExtractionConfig,
    pub rules: RulesConfig,
    pub schema: SchemaConfig,
}

impl FieldDriftConfig {
    /// Config file looked up under the project root.
    pub const FILE_NAME: &'static str = "fielddrift.toml";

    /// Parse and validate a TOML string. Environment overrides are not applied.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            message: e.to_string(),
        })
    }

    /// Load `fielddrift.toml` from `root` if present, then apply `FIELDDRIFT_*`
    /// environment overrides.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(Self::FILE_NAME);
        let mut config = if path.is_file() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            Self::from_toml(&content)?
        } else {
            ::tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FIELDDRIFT_PAYLOAD_VARS`, `FIELDDRIFT_MIN_VARIANTS` and
    /// `FIELDDRIFT_DEFAULT_METHOD`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(vars) = std::env::var("FIELDDRIFT_PAYLOAD_VARS") {
            let vars: Vec<String> = vars
                .split(',')
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect();
            if !vars.is_empty() {
                self.extraction.payload_vars = Some(vars);
            }
        }

        if let Ok(raw) = std::env::var("FIELDDRIFT_MIN_VARIANTS") {
            let parsed = raw.trim().parse::<usize>().map_err(|e| ConfigError::InvalidValue {
                field: "FIELDDRIFT_MIN_VARIANTS".to_string(),
                message: e.to_string(),
            })?;
            self.rules.min_variants = Some(parsed);
        }

        if let Ok(method) = std::env::var("FIELDDRIFT_DEFAULT_METHOD") {
            let method = method.trim();
            if !method.is_empty() {
                self.schema.default_method = Some(method.to_string());
            }
        }

        Ok(())
    }

    /// Reject values the engines cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.min_variants == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "rules.min_variants".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if let Some(vars) = &self.extraction.payload_vars {
            if let Some(bad) = vars.iter().find(|v| !is_identifier(v)) {
                return Err(ConfigError::InvalidValue {
                    field: "extraction.payload_vars".to_string(),
                    message: format!("'{bad}' is not an identifier"),
                });
            }
        }

        if let Some(markers) = &self.rules.log_markers {
            if markers.iter().any(|m| m.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    field: "rules.log_markers".to_string(),
                    message: "markers must not be empty".to_string(),
                });
            }
        }

        let families = self.rules.effective_families();
        for (i, family) in families.iter().enumerate() {
            if family.needle.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("rules.families[{}].needle", family.label),
                    message: "must not be empty".to_string(),
                });
            }
            if families[..i].iter().any(|f| f.label == family.label) {
                return Err(ConfigError::InvalidValue {
                    field: "rules.families".to_string(),
                    message: format!("duplicate family label '{}'", family.label),
                });
            }
        }

        Ok(())
    }
}
