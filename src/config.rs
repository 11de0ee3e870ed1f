use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::core::{builtin_presets, Matcher, PresetError, PresetRegistry, DEFAULT_LOCALITY_PENALTY};
use crate::models::{PodExclusivity, Preset, ThemeSet, DEFAULT_THEMES};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_pair_limit")]
    pub default_pair_limit: u16,
    #[serde(default = "default_pod_limit")]
    pub default_pod_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default)]
    pub pod_exclusivity: PodExclusivity,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_pair_limit: default_pair_limit(),
            default_pod_limit: default_pod_limit(),
            max_limit: default_max_limit(),
            pod_exclusivity: PodExclusivity::default(),
        }
    }
}

impl MatchingSettings {
    /// Resolve a requested limit, falling back to `default` and capping at `max_limit`
    pub fn resolve_limit(&self, requested: Option<u16>, default: u16) -> usize {
        requested.unwrap_or(default).min(self.max_limit) as usize
    }
}

fn default_pair_limit() -> u16 { 8 }
fn default_pod_limit() -> u16 { 5 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_themes")]
    pub themes: Vec<String>,
    #[serde(default = "default_locality_penalty")]
    pub locality_penalty: f64,
    #[serde(default = "builtin_presets")]
    pub presets: Vec<Preset>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            themes: default_themes(),
            locality_penalty: default_locality_penalty(),
            presets: builtin_presets(),
        }
    }
}

fn default_themes() -> Vec<String> {
    DEFAULT_THEMES.iter().map(|t| t.to_string()).collect()
}
fn default_locality_penalty() -> f64 { DEFAULT_LOCALITY_PENALTY }

#[derive(Debug, Clone, Serialize, Deserialize)]
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

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LMW_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LMW__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("LMW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("LMW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn theme_set(&self) -> ThemeSet {
        ThemeSet::new(self.scoring.themes.iter().cloned())
    }

    /// Validate configured presets against the theme set
    pub fn preset_registry(&self) -> Result<PresetRegistry, PresetError> {
        PresetRegistry::new(self.scoring.presets.clone(), &self.theme_set())
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.theme_set(), self.scoring.locality_penalty)
            .with_pod_exclusivity(self.matching.pod_exclusivity)
    }
}
