//! Desk configuration.
//!
//! Defaults number identifiers `EV001`, `P001` onwards and treat
//! any event whose name contains `Secret` as secret. Every setting can be
//! overridden from the environment:
//!
//! | Variable                           | Setting                 | Default   |
//! |------------------------------------|-------------------------|-----------|
//! | `EVENTDESK_EVENT_ID_PREFIX`        | `event_id_prefix`       | `EV`      |
//! | `EVENTDESK_PARTICIPANT_ID_PREFIX`  | `participant_id_prefix` | `P`       |
//! | `EVENTDESK_ID_WIDTH`               | `id_width`              | `3`       |
//! | `EVENTDESK_SECRET_MARKER`          | secret marker text      | `Secret`  |
//! | `EVENTDESK_SECRET_MATCH`           | `contains` or `exact`   | `contains`|
//!
//! # Example
//!
//! ```no_run
//! use eventdesk_core::config::DeskConfig;
//!
//! # fn main() -> Result<(), eventdesk_core::config::ConfigError> {
//! let config = DeskConfig::from_env()?;
//! println!("events are numbered {}001 onwards", config.event_id_prefix);
//! # Ok(())
//! # }
//! ```

use crate::access::SecretMarker;
use crate::ids::IdSequence;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENV_EVENT_PREFIX: &str = "EVENTDESK_EVENT_ID_PREFIX";
const ENV_PARTICIPANT_PREFIX: &str = "EVENTDESK_PARTICIPANT_ID_PREFIX";
const ENV_ID_WIDTH: &str = "EVENTDESK_ID_WIDTH";
const ENV_SECRET_MARKER: &str = "EVENTDESK_SECRET_MARKER";
const ENV_SECRET_MATCH: &str = "EVENTDESK_SECRET_MATCH";

/// Largest accepted identifier padding.
pub const MAX_ID_WIDTH: usize = 9;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("Failed to parse {variable}: {reason}")]
    ParseError {
        /// Environment variable name
        variable: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The resulting configuration is unusable.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Settings for an event desk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Prefix of event identifiers
    pub event_id_prefix: String,
    /// Prefix of participant identifiers
    pub participant_id_prefix: String,
    /// Zero-padding width of identifier sequence numbers
    pub id_width: usize,
    /// How secret events are recognised
    pub secret_marker: SecretMarker,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            event_id_prefix: "EV".to_string(),
            participant_id_prefix: "P".to_string(),
            id_width: 3,
            secret_marker: SecretMarker::default(),
        }
    }
}

impl DeskConfig {
    /// Defaults overridden by whatever `EVENTDESK_*` variables are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable cannot be parsed or the result
    /// fails [`validate`](Self::validate).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    ///
    /// `lookup` is called with each `EVENTDESK_*` variable name; `None` keeps
    /// the default.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(prefix) = lookup(ENV_EVENT_PREFIX) {
            config.event_id_prefix = prefix;
        }
        if let Some(prefix) = lookup(ENV_PARTICIPANT_PREFIX) {
            config.participant_id_prefix = prefix;
        }
        if let Some(width) = lookup(ENV_ID_WIDTH) {
            config.id_width = width.trim().parse().map_err(|err: std::num::ParseIntError| {
                ConfigError::ParseError {
                    variable: ENV_ID_WIDTH,
                    reason: err.to_string(),
                }
            })?;
        }

        let marker = lookup(ENV_SECRET_MARKER);
        let mode = lookup(ENV_SECRET_MATCH);
        if marker.is_some() || mode.is_some() {
            let text = marker.unwrap_or_else(|| "Secret".to_string());
            config.secret_marker = match mode.as_deref().map(str::to_ascii_lowercase).as_deref() {
                None | Some("contains") => SecretMarker::Contains(text),
                Some("exact") => SecretMarker::Exact(text),
                Some(other) => {
                    return Err(ConfigError::ParseError {
                        variable: ENV_SECRET_MATCH,
                        reason: format!("expected 'contains' or 'exact', got '{other}'"),
                    });
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for empty prefixes, a padding
    /// width outside `1..=9`, or an empty secret marker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_id_prefix.is_empty() {
            return Err(ConfigError::ValidationError(
                "event_id_prefix must not be empty".to_string(),
            ));
        }
        if self.participant_id_prefix.is_empty() {
            return Err(ConfigError::ValidationError(
                "participant_id_prefix must not be empty".to_string(),
            ));
        }
        if self.event_id_prefix == self.participant_id_prefix {
            return Err(ConfigError::ValidationError(
                "event and participant prefixes must differ".to_string(),
            ));
        }
        if !(1..=MAX_ID_WIDTH).contains(&self.id_width) {
            return Err(ConfigError::ValidationError(format!(
                "id_width must be between 1 and {MAX_ID_WIDTH}, got {}",
                self.id_width
            )));
        }
        let marker = match &self.secret_marker {
            SecretMarker::Contains(text) | SecretMarker::Exact(text) => text,
        };
        if marker.is_empty() {
            return Err(ConfigError::ValidationError(
                "secret marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Fresh allocator for event identifiers.
    #[must_use]
    pub fn event_ids(&self) -> IdSequence {
        IdSequence::new(self.event_id_prefix.clone(), self.id_width)
    }

    /// Fresh allocator for participant identifiers.
    #[must_use]
    pub fn participant_ids(&self) -> IdSequence {
        IdSequence::new(self.participant_id_prefix.clone(), self.id_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = DeskConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.event_ids().next_id(), "EV001");
        assert_eq!(config.participant_ids().next_id(), "P001");
    }

    #[test]
    fn no_variables_means_defaults() {
        assert_eq!(DeskConfig::from_lookup(lookup(&[])), Ok(DeskConfig::default()));
    }

    #[test]
    fn variables_override_defaults() {
        let config = DeskConfig::from_lookup(lookup(&[
            ("EVENTDESK_EVENT_ID_PREFIX", "EVT-"),
            ("EVENTDESK_ID_WIDTH", "5"),
            ("EVENTDESK_SECRET_MARKER", "Secret Conference"),
            ("EVENTDESK_SECRET_MATCH", "Exact"),
        ]));

        let Ok(config) = config else {
            unreachable!("configuration should load: {config:?}");
        };
        assert_eq!(config.event_ids().next_id(), "EVT-00001");
        assert_eq!(
            config.secret_marker,
            SecretMarker::Exact("Secret Conference".to_string())
        );
    }

    #[test]
    fn bad_width_is_a_parse_error() {
        let err = DeskConfig::from_lookup(lookup(&[("EVENTDESK_ID_WIDTH", "wide")]));
        assert!(matches!(
            err,
            Err(ConfigError::ParseError { variable: "EVENTDESK_ID_WIDTH", .. })
        ));
    }

    #[test]
    fn out_of_range_width_fails_validation() {
        let err = DeskConfig::from_lookup(lookup(&[("EVENTDESK_ID_WIDTH", "0")]));
        assert!(matches!(err, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn unknown_match_mode_is_rejected() {
        let err = DeskConfig::from_lookup(lookup(&[("EVENTDESK_SECRET_MATCH", "regex")]));
        assert!(matches!(err, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn clashing_prefixes_fail_validation() {
        let config = DeskConfig {
            participant_id_prefix: "EV".to_string(),
            ..DeskConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_with_missing_keys_defaulted() {
        let config: Result<DeskConfig, _> = serde_json::from_str(
            r#"{ "id_width": 4, "secret_marker": { "match": "exact", "value": "Hidden" } }"#,
        );
        let Ok(config) = config else {
            unreachable!("configuration should deserialize");
        };
        assert_eq!(config.id_width, 4);
        assert_eq!(config.event_id_prefix, "EV");
        assert_eq!(config.secret_marker, SecretMarker::Exact("Hidden".to_string()));
    }
}
