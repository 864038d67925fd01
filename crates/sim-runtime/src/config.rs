//! YAML configuration loading.

use sim_core::SimConfig;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// YAML loaders for [`SimConfig`]. Missing keys fall back to the defaults.
pub trait LoadConfig: Sized {
    fn from_yaml_str(text: &str) -> Result<Self, ConfigError>;
    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError>;
}

impl LoadConfig for SimConfig {
    fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_yaml::from_str(text)?;
        validate_config(&cfg)?;
        Ok(cfg)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

pub fn validate_config(cfg: &SimConfig) -> Result<(), ConfigError> {
    if cfg.rng_seed.is_empty() {
        return Err(ConfigError::Invalid("rng_seed must not be empty".into()));
    }
    if cfg.cadence_ms == 0 {
        return Err(ConfigError::Invalid("cadence_ms must be positive".into()));
    }
    if cfg.max_ticks_per_call == 0 {
        return Err(ConfigError::Invalid("max_ticks_per_call must be positive".into()));
    }
    if let Some(bad) = cfg
        .genre_compatibility
        .iter()
        .find(|c| !c.score.is_finite() || c.score < 0.0)
    {
        return Err(ConfigError::Invalid(format!(
            "compatibility of {} and {} must be a non-negative number",
            bad.a.as_str(),
            bad.b.as_str()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sim_core::Genre;

    #[test]
    fn partial_yaml_uses_defaults() {
        let cfg = SimConfig::from_yaml_str("rng_seed: abc\nstarting_cash: '2500.50'\n").unwrap();
        assert_eq!(cfg.rng_seed, "abc");
        assert_eq!(cfg.starting_cash, Decimal::new(250_050, 2));
        assert_eq!(cfg.cadence_ms, 1000);
        assert_eq!(cfg.start, sim_core::starting_time());
    }

    #[test]
    fn compatibility_table_parses() {
        let text = "genre_compatibility:\n  - { a: Action, b: Puzzle, score: 0.5 }\n";
        let cfg = SimConfig::from_yaml_str(text).unwrap();
        assert_eq!(cfg.genre_compatibility.len(), 1);
        assert_eq!(cfg.genre_compatibility[0].b, Genre::Puzzle);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            SimConfig::from_yaml_str("cadence_ms: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimConfig::from_yaml_str("max_ticks_per_call: [1"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            SimConfig::from_file("/definitely/not/here.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
