use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Hard upper bound on orchestrator rounds regardless of roster size
pub const MAX_ITERATION_CEILING: usize = 30;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingOptions,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Diagnostic verbosity of the engine. Never changes matching behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Minimal,
    Detailed,
    Verbose,
}

/// Options recognized by the team formation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MatchingOptions {
    #[serde(rename = "strictEducationSeparation", alias = "strict_education_separation", default = "default_true")]
    pub strict_education_separation: bool,
    #[serde(rename = "strictTeamSizeMatching", alias = "strict_team_size_matching", default = "default_true")]
    pub strict_team_size_matching: bool,
    #[serde(rename = "strictAvailabilityMatching", alias = "strict_availability_matching", default = "default_true")]
    pub strict_availability_matching: bool,
    #[serde(rename = "useIterativeMatching", alias = "use_iterative_matching", default = "default_true")]
    pub use_iterative_matching: bool,
    #[validate(range(min = 1))]
    #[serde(rename = "maxIterations", alias = "max_iterations", default)]
    pub max_iterations: Option<usize>,
    #[validate(range(min = 2))]
    #[serde(rename = "minParticipantsPerIteration", alias = "min_participants_per_iteration", default = "default_min_participants")]
    pub min_participants_per_iteration: usize,
    #[serde(rename = "logLevel", alias = "log_level", default)]
    pub log_level: LogLevel,
}

fn default_true() -> bool { true }
fn default_min_participants() -> usize { 2 }

impl Default for MatchingOptions {
    fn default() -> Self {
        Self {
            strict_education_separation: true,
            strict_team_size_matching: true,
            strict_availability_matching: true,
            use_iterative_matching: true,
            max_iterations: None,
            min_participants_per_iteration: default_min_participants(),
            log_level: LogLevel::default(),
        }
    }
}

impl MatchingOptions {
    /// Round limit for a roster of `participant_count`, clamped to the ceiling
    pub fn effective_max_iterations(&self, participant_count: usize) -> usize {
        self.max_iterations
            .unwrap_or_else(|| participant_count.max(10))
            .min(MAX_ITERATION_CEILING)
    }

    /// Parse a standalone `[matching]`-style TOML table
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

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

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TEAM_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TEAM__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TEAM")
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
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TEAM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
