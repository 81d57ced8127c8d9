//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use interrupt_guard_pipeline::InterruptPolicyConfig;
use interrupt_guard_text_processing::LexiconConfig;

use crate::{ConfigError, LegacyOverrides, LexiconFile};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Filler and stop vocabulary
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Interruption policy timings and thresholds
    #[serde(default)]
    pub interruption: InterruptPolicyConfig,

    /// Optional lexicon file (YAML, TOML or JSON) merged into `lexicon`
    #[serde(default)]
    pub lexicon_path: Option<String>,
}

impl Settings {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.interruption.validate()?;
        self.validate_lexicon()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_lexicon(&self) -> Result<(), ConfigError> {
        if self.lexicon.languages.is_empty() && self.lexicon.ignored_words.is_none() {
            // Filler matching with an empty vocabulary makes every fragment meaningful
            if self.environment.is_strict() {
                return Err(ConfigError::InvalidValue {
                    field: "lexicon.languages".to_string(),
                    message: "No languages and no ignored_words configured".to_string(),
                });
            }
            tracing::warn!("Lexicon has no languages and no ignored_words; fillers will interrupt");
        }

        if self.lexicon.stop_entries().is_empty() {
            tracing::warn!("No stop words configured");
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

        // Full EnvFilter directives ("info,interrupt_guard=debug") are accepted as-is
        let level = self.observability.log_level.to_ascii_lowercase();
        if !level.contains('=') && !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown log level {:?}", self.observability.log_level),
            });
        }

        Ok(())
    }

    /// Apply the legacy variables and the lexicon file, if any
    pub fn resolve_lexicon(&mut self, legacy: &LegacyOverrides) -> Result<(), ConfigError> {
        legacy.apply(&mut self.lexicon);

        if let Some(path) = &self.lexicon_path {
            let file = LexiconFile::from_file(path)?;
            tracing::info!(path = %path, "Loaded lexicon file");
            file.merge_into(&mut self.lexicon);
        }

        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level or EnvFilter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from files and environment
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("INTERRUPT_GUARD")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let mut settings: Settings = config.try_deserialize()?;

    settings.resolve_lexicon(&LegacyOverrides::from_env())?;

    // Validate
    settings.validate()?;

    Ok(settings)
}
