//! Diagnostic rule configuration.

use serde::{Deserialize, Serialize};

/// A domain-critical class of field names.
///
/// A field belongs to the family when its lowercased name contains `needle`.
/// `canonical` and `alias` are the two spellings a well-behaved handler is
/// expected to accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingFamily {
    pub label: String,
    pub needle: String,
    pub canonical: String,
    pub alias: String,
}

impl NamingFamily {
    pub fn new(label: &str, needle: &str, canonical: &str, alias: &str) -> Self {
        Self {
            label: label.to_string(),
            needle: needle.to_lowercase(),
            canonical: canonical.to_string(),
            alias: alias.to_string(),
        }
    }

    /// The appointment-date family: `fechaTurno` / `fecha`.
    pub fn date() -> Self {
        Self::new("date", "fecha", "fechaTurno", "fecha")
    }

    /// The appointment-time family: `horaTurno` / `hora`.
    pub fn time() -> Self {
        Self::new("time", "hora", "horaTurno", "hora")
    }

    /// Case-insensitive substring membership.
    pub fn matches(&self, field: &str) -> bool {
        field.to_lowercase().contains(&self.needle.to_lowercase())
    }

    /// Members of `fields` that belong to this family.
    pub fn members<'a, I>(&self, fields: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut out: Vec<String> = fields
            .into_iter()
            .filter(|f| self.matches(f))
            .cloned()
            .collect();
        out.sort();
        out
    }
}

/// Configuration for the diagnostic rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Minimum number of distinct processed variants per family before the
    /// "only one variant" warning is suppressed. Default: 2.
    pub min_variants: Option<usize>,
    /// Substrings that count as a logging call. Default: `print(`,
    /// `console.log(`, `logger.`.
    pub log_markers: Option<Vec<String>>,
    /// Domain-critical naming families. Default: date and time.
    pub families: Option<Vec<NamingFamily>>,
}

impl RulesConfig {
    pub fn effective_min_variants(&self) -> usize {
        self.min_variants.unwrap_or(2)
    }

    /// Blank markers are dropped; an empty result falls back to the defaults.
    pub fn effective_log_markers(&self) -> Vec<String> {
        let markers: Vec<String> = self
            .log_markers
            .iter()
            .flatten()
            .filter(|m| !m.trim().is_empty())
            .cloned()
            .collect();
        if !markers.is_empty() {
            return markers;
        }
        vec![
            "print(".to_string(),
            "console.log(".to_string(),
            "logger.".to_string(),
        ]
    }

    pub fn effective_families(&self) -> Vec<NamingFamily> {
        match &self.families {
            Some(families) => families.clone(),
            None => vec![NamingFamily::date(), NamingFamily::time()],
        }
    }
}
