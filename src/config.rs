use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

pub const CELL_SIZE: u32 = 20;
pub const TICK_INTERVAL_MS: f64 = 150.0;
pub const TARGET_COUNT: usize = 5;
pub const INITIAL_LENGTH: usize = 5;
pub const MAX_LENGTH: usize = 30;
pub const EFFECT_LIFETIME_FRAMES: u32 = 20;
pub const PLACEMENT_ATTEMPTS: u32 = 100;
pub const OFF_BEST_PROBABILITY: f64 = 0.15;
/// Upper bound on `target_count`; every reset places the whole set again.
pub const MAX_TARGET_COUNT: usize = 256;

/// Environment variable the host binary reads a JSON override path from.
pub const CONFIG_ENV: &str = "SNAKE_BACKDROP_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Edge of one grid cell in pixels.
    pub cell_size: u32,
    pub tick_interval_ms: f64,
    /// Coins kept on the board.
    pub target_count: usize,
    pub initial_length: usize,
    pub max_length: usize,
    pub effect_lifetime_frames: u32,
    /// Random samples tried before a placement gives up.
    pub placement_attempts: u32,
    /// Chance of taking the second-best direction instead of the best.
    pub off_best_probability: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            target_count: TARGET_COUNT,
            initial_length: INITIAL_LENGTH,
            max_length: MAX_LENGTH,
            effect_lifetime_frames: EFFECT_LIFETIME_FRAMES,
            placement_attempts: PLACEMENT_ATTEMPTS,
            off_best_probability: OFF_BEST_PROBABILITY,
        }
    }
}

impl SimConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(path, &text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| Err(ConfigError::Invalid { field, reason });

        if self.cell_size == 0 {
            return invalid("cell_size", "must be at least 1 pixel".into());
        }
        if !(self.tick_interval_ms.is_finite() && self.tick_interval_ms > 0.0) {
            return invalid("tick_interval_ms", format!("must be a positive number, got {}", self.tick_interval_ms));
        }
        if self.target_count > MAX_TARGET_COUNT {
            return invalid("target_count", format!("must be at most {MAX_TARGET_COUNT}, got {}", self.target_count));
        }
        if self.initial_length < 2 {
            return invalid("initial_length", format!("must be at least 2, got {}", self.initial_length));
        }
        if self.max_length < self.initial_length {
            return invalid(
                "max_length",
                format!("{} is below initial_length {}", self.max_length, self.initial_length),
            );
        }
        if self.placement_attempts == 0 {
            return invalid("placement_attempts", "must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.off_best_probability) {
            return invalid("off_best_probability", format!("must be within [0, 1], got {}", self.off_best_probability));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(text: &str) -> Result<SimConfig, ConfigError> {
        SimConfig::from_json(Path::new("test.json"), text)
    }

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_interval_ms, 150.0);
        assert_eq!(config.effect_lifetime_frames, 20);
        assert_eq!(config.placement_attempts, 100);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = json(r#"{ "cell_size": 32, "target_count": 2 }"#).expect("valid override");
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.target_count, 2);
        assert_eq!(config.max_length, MAX_LENGTH);
        assert_eq!(config.off_best_probability, OFF_BEST_PROBABILITY);
    }

    #[test]
    fn target_count_at_the_cap_is_accepted() {
        let config = SimConfig { target_count: MAX_TARGET_COUNT, ..SimConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = json(r#"{ "cell_sise": 32 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err}");
    }

    #[test]
    fn validation_names_the_bad_field() {
        let cases = [
            (r#"{ "cell_size": 0 }"#, "cell_size"),
            (r#"{ "tick_interval_ms": 0 }"#, "tick_interval_ms"),
            (r#"{ "target_count": 2000000 }"#, "target_count"),
            (r#"{ "initial_length": 1 }"#, "initial_length"),
            (r#"{ "initial_length": 8, "max_length": 6 }"#, "max_length"),
            (r#"{ "placement_attempts": 0 }"#, "placement_attempts"),
            (r#"{ "off_best_probability": 1.5 }"#, "off_best_probability"),
        ];
        for (text, expected) in cases {
            match json(text) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "for {text}"),
                other => panic!("expected invalid {expected} for {text}, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("snake-backdrop-does-not-exist.json");
        let err = SimConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("snake-backdrop-does-not-exist.json"));
    }

    #[test]
    fn load_reads_a_file_from_disk() {
        let path = std::env::temp_dir().join(format!("snake-backdrop-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "max_length": 12 }"#).expect("write temp config");
        let loaded = SimConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.expect("config loads").max_length, 12);
    }
}
