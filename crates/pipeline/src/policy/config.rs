//! Interruption policy configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use interrupt_guard_core::{Error, Result};

/// Interruption policy configuration
///
/// Durations are plain seconds so they read naturally in YAML/TOML and
/// environment overrides; `validate` rejects negative, non-finite and over-ceiling values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterruptPolicyConfig {
    /// Let user speech interrupt the agent at all (stop commands always do)
    #[serde(default = "default_true")]
    pub allow_interruptions: bool,

    /// Minimum spoken duration (seconds) for meaningful speech to interrupt outright
    #[serde(default = "default_min_duration")]
    pub min_interruption_duration: f64,

    /// Minimum meaningful word count to interrupt outright
    #[serde(default = "default_min_words")]
    pub min_interruption_words: u32,

    /// How long (seconds) a tentative interruption waits for a disambiguating fragment
    #[serde(default = "default_false_interruption_timeout")]
    pub false_interruption_timeout: f64,

    /// Agent utterances dropped right after a stop command
    #[serde(default = "default_acknowledgments")]
    pub acknowledgments: Vec<String>,

    /// How long (seconds) acknowledgment suppression stays armed
    #[serde(default = "default_ack_window")]
    pub ack_suppression_window: f64,
}

fn default_true() -> bool {
    true
}
fn default_min_duration() -> f64 {
    0.5
}
fn default_min_words() -> u32 {
    1
}
fn default_false_interruption_timeout() -> f64 {
    2.0
}
fn default_ack_window() -> f64 {
    5.0
}

fn default_acknowledgments() -> Vec<String> {
    [
        "ok",
        "okay",
        "sure",
        "alright",
        "all right",
        "got it",
        "stopping",
        "ok stopping",
        "okay stopping",
        "sure stopping",
        "alright stopping",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for InterruptPolicyConfig {
    fn default() -> Self {
        Self {
            allow_interruptions: true,
            min_interruption_duration: default_min_duration(),
            min_interruption_words: default_min_words(),
            false_interruption_timeout: default_false_interruption_timeout(),
            acknowledgments: default_acknowledgments(),
            ack_suppression_window: default_ack_window(),
        }
    }
}

impl InterruptPolicyConfig {
    /// Validate values; errors are fatal to startup
    pub fn validate(&self) -> Result<()> {
        bounded_secs("interruption.min_interruption_duration", self.min_interruption_duration)?;
        bounded_secs("interruption.ack_suppression_window", self.ack_suppression_window)?;
        bounded_secs("interruption.false_interruption_timeout", self.false_interruption_timeout)?;

        if self.false_interruption_timeout == 0.0 {
            return Err(Error::invalid_config(
                "interruption.false_interruption_timeout",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    pub fn min_duration(&self) -> Duration {
        secs(self.min_interruption_duration)
    }

    pub fn resume_timeout(&self) -> Duration {
        secs(self.false_interruption_timeout)
    }

    pub fn ack_window(&self) -> Duration {
        secs(self.ack_suppression_window)
    }
}

/// Upper bound for every duration setting (one hour)
pub const MAX_DURATION_SECS: f64 = 3600.0;

fn bounded_secs(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid_config(field, format!("must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(Error::invalid_config(field, format!("must not be negative, got {value}")));
    }
    if value > MAX_DURATION_SECS {
        return Err(Error::invalid_config(
            field,
            format!("must be at most {MAX_DURATION_SECS} seconds, got {value}"),
        ));
    }
    Ok(())
}

/// Clamps into `0..=MAX_DURATION_SECS`; NaN maps to zero
///
/// Validated values pass through unchanged.
fn secs(value: f64) -> Duration {
    if value.is_nan() {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(value.clamp(0.0, MAX_DURATION_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InterruptPolicyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_duration(), Duration::from_millis(500));
        assert_eq!(config.min_interruption_words, 1);
        assert_eq!(config.resume_timeout(), Duration::from_secs(2));
        assert!(config.acknowledgments.contains(&"okay stopping".to_string()));
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let config = InterruptPolicyConfig {
            false_interruption_timeout: -1.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration { ref field, .. } if field == "interruption.false_interruption_timeout"
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = InterruptPolicyConfig {
            false_interruption_timeout: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_duration_rejected() {
        let config = InterruptPolicyConfig {
            min_interruption_duration: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: InterruptPolicyConfig =
            serde_json::from_str(r#"{"min_interruption_words": 3}"#).unwrap();
        assert_eq!(config.min_interruption_words, 3);
        assert_eq!(config.false_interruption_timeout, 2.0);
        assert!(config.allow_interruptions);
    }

    #[test]
    fn test_oversized_durations_rejected() {
        let cases = [
            (1e19, 5.0, 0.5),
            (1e30, 5.0, 0.5),
            (2.0, 1e30, 0.5),
            (2.0, 5.0, 1e30),
        ];
        for (timeout, window, min_duration) in cases {
            let config = InterruptPolicyConfig {
                false_interruption_timeout: timeout,
                ack_suppression_window: window,
                min_interruption_duration: min_duration,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfiguration { .. })),
                "timeout={timeout} window={window} min={min_duration}"
            );
        }
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        let config = InterruptPolicyConfig {
            false_interruption_timeout: MAX_DURATION_SECS,
            ack_suppression_window: MAX_DURATION_SECS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.resume_timeout(), Duration::from_secs(3600));
    }

    #[test]
    fn test_unvalidated_values_clamp() {
        let config = InterruptPolicyConfig {
            false_interruption_timeout: 1e30,
            min_interruption_duration: -1.0,
            ack_suppression_window: f64::NAN,
            ..Default::default()
        };
        assert_eq!(config.resume_timeout(), Duration::from_secs(3600));
        assert_eq!(config.min_duration(), Duration::ZERO);
        assert_eq!(config.ack_window(), Duration::ZERO);
    }
}
