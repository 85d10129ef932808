//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `motionlux.toml` in the working directory (or wherever
//! `MOTIONLUX_CONFIG` points). Every field has a sensible default so the
//! file is optional. Environment variables take precedence over file values.

use motionlux_domain::config::RoomOptions;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Demo-mode settings.
    pub demo: DemoConfig,
    /// One entry per automated room.
    pub rooms: Vec<RoomOptions>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Demo-mode configuration.
///
/// With the demo enabled, each room's entities are seeded on the virtual
/// hub and event-style motion sensors are tripped periodically.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Seed the virtual hub and simulate motion.
    pub enabled: bool,
    /// Seconds between simulated motion pulses.
    pub motion_interval_secs: u64,
}

impl Config {
    /// Load configuration from `motionlux.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// loaded values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("MOTIONLUX_CONFIG").unwrap_or_else(|_| "motionlux.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_log_override(
            std::env::var("MOTIONLUX_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        );
    }

    fn apply_log_override(&mut self, motionlux_log: Option<String>, rust_log: Option<String>) {
        // The tool-specific variable beats the generic one.
        if let Some(val) = rust_log {
            self.logging.filter = val;
        }
        if let Some(val) = motionlux_log {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, options) in self.rooms.iter().enumerate() {
            if options.room.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "rooms[{index}]: room name must not be empty"
                )));
            }
            if self.rooms[..index].iter().any(|other| other.room == options.room) {
                return Err(ConfigError::Validation(format!(
                    "room {:?} is configured twice",
                    options.room
                )));
            }
        }
        if self.demo.enabled && self.demo.motion_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "demo.motion_interval_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "motionluxd=info,motionlux=info".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            motion_interval_secs: 60,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert!(config.rooms.is_empty());
        assert!(config.demo.enabled);
        assert_eq!(config.demo.motion_interval_secs, 60);
        assert_eq!(config.logging.filter, "motionluxd=info,motionlux=info");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.rooms.is_empty());
        assert!(config.demo.enabled);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [logging]
            filter = 'debug'

            [demo]
            enabled = false
            motion_interval_secs = 10

            [[rooms]]
            room = 'bathroom'
            lights = ['light.bathroom']
            motion = ['binary_sensor.motion_sensor_bathroom']
            humidity = ['sensor.humidity_bathroom']
            humidity_threshold = 75.0
            delay = 600

            [[rooms]]
            room = 'office'
            motion_state_on = 'on'
            motion_state_off = 'off'

            [[rooms.daytimes]]
            starttime = '07:00'
            name = 'work'
            light = 100
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert!(!config.demo.enabled);
        assert_eq!(config.rooms.len(), 2);
        assert_eq!(config.rooms[0].room, "bathroom");
        assert_eq!(config.rooms[0].humidity_threshold, Some(75.0));
        assert_eq!(config.rooms[0].delay, 600);
        assert_eq!(config.rooms[1].daytimes.len(), 1);
        assert_eq!(config.rooms[1].daytimes[0].starttime, "07:00");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [[rooms]]
            room = 'hall'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.rooms.len(), 1);
        assert_eq!(config.rooms[0].delay, 150);
        assert_eq!(config.demo.motion_interval_secs, 60);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert!(config.rooms.is_empty());
    }

    #[test]
    fn should_reject_duplicate_room_names() {
        let toml = "
            [[rooms]]
            room = 'hall'
            [[rooms]]
            room = 'hall'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(message)) if message.contains("hall")
        ));
    }

    #[test]
    fn should_reject_an_empty_room_name() {
        let toml = "
            [[rooms]]
            room = '  '
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_a_zero_motion_interval_while_the_demo_runs() {
        let toml = "
            [demo]
            enabled = true
            motion_interval_secs = 0
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_allow_a_zero_motion_interval_with_the_demo_off() {
        let toml = "
            [demo]
            enabled = false
            motion_interval_secs = 0
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_prefer_the_tool_specific_log_variable() {
        let mut config = Config::default();
        config.apply_log_override(
            Some("motionluxd=debug".to_string()),
            Some("warn".to_string()),
        );
        assert_eq!(config.logging.filter, "motionluxd=debug");
    }

    #[test]
    fn should_fall_back_to_the_generic_log_variable() {
        let mut config = Config::default();
        config.apply_log_override(None, Some("warn".to_string()));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_keep_the_file_filter_without_log_variables() {
        let mut config = Config::default();
        config.apply_log_override(None, None);
        assert_eq!(config.logging.filter, "motionluxd=info,motionlux=info");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_report_parse_error_for_malformed_entity_refs() {
        let toml = "
            [[rooms]]
            room = 'hall'
            lights = ['hall_light']
        ";
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
