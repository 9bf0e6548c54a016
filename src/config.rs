use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use crate::core::matcher::{MatchLimits, DEFAULT_MATCH_LIMIT, QUICK_MATCH_LIMIT};
use crate::core::taxonomy::{
    default_emergency_rules, default_specialization_rules, EmergencyRule, SpecializationRule,
    Taxonomy,
};
use crate::services::DirectoryLimits;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub taxonomy: TaxonomySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_quick_limit")]
    pub quick_limit: usize,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_nearby_limit")]
    pub nearby_limit: usize,
    #[serde(default = "default_nearby_radius_m")]
    pub nearby_radius_m: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            quick_limit: default_quick_limit(),
            search_limit: default_search_limit(),
            nearby_limit: default_nearby_limit(),
            nearby_radius_m: default_nearby_radius_m(),
        }
    }
}

fn default_limit() -> usize { DEFAULT_MATCH_LIMIT }
fn default_quick_limit() -> usize { QUICK_MATCH_LIMIT }
fn default_search_limit() -> usize { 50 }
fn default_nearby_limit() -> usize { 10 }
fn default_nearby_radius_m() -> f64 { crate::models::requests::default_radius_m() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Keyword table overrides; an absent table keeps the built-in one
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomySettings {
    #[serde(default)]
    pub specializations: Option<Vec<SpecializationRule>>,
    #[serde(default)]
    pub emergencies: Option<Vec<EmergencyRule>>,
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CURASYN__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CURASYN__MATCHING__DEFAULT_LIMIT -> matching.default_limit
            .add_source(
                Environment::with_prefix("CURASYN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CURASYN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn match_limits(&self) -> MatchLimits {
        MatchLimits {
            default_limit: self.matching.default_limit,
            quick_limit: self.matching.quick_limit,
        }
    }

    pub fn directory_limits(&self) -> DirectoryLimits {
        DirectoryLimits {
            search_limit: self.matching.search_limit,
            nearby_limit: self.matching.nearby_limit,
        }
    }

    /// Keyword tables, built once and shared by every classifier
    pub fn taxonomy(&self) -> Arc<Taxonomy> {
        let specializations = self
            .taxonomy
            .specializations
            .clone()
            .unwrap_or_else(default_specialization_rules);
        let emergencies = self
            .taxonomy
            .emergencies
            .clone()
            .unwrap_or_else(default_emergency_rules);

        if specializations.is_empty() {
            tracing::warn!("Specialization taxonomy is empty, every report will route to general practice");
        }

        Arc::new(Taxonomy::new(specializations, emergencies))
    }
}
