use crate::model::Distance;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_initial_distance() -> Distance {
    Distance::Mid
}

fn default_time_limit() -> u32 {
    300
}

fn default_max_turns() -> u32 {
    30
}

fn default_seconds_per_turn() -> u32 {
    10
}

/// Battle-level settings read by the driver. Every field has a default, so `{}` is a valid file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleConfig {
    #[serde(default = "default_initial_distance")]
    pub initial_distance: Distance,
    /// Battle clock in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit: u32,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    #[serde(default = "default_seconds_per_turn")]
    pub seconds_per_turn: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            initial_distance: default_initial_distance(),
            time_limit: default_time_limit(),
            max_turns: default_max_turns(),
            seconds_per_turn: default_seconds_per_turn(),
        }
    }
}

impl BattleConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: BattleConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_turns == 0 {
            anyhow::bail!("maxTurns must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: BattleConfig = serde_json::from_str("{}").expect("valid config");
        assert_eq!(config, BattleConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config: BattleConfig =
            serde_json::from_str(r#"{"initialDistance": "far", "maxTurns": 5}"#).expect("valid config");
        assert_eq!(config.initial_distance, Distance::Far);
        assert_eq!(config.max_turns, 5);
        assert_eq!(config.time_limit, 300);
    }

    #[test]
    fn zero_turn_cap_is_rejected() {
        let config = BattleConfig {
            max_turns: 0,
            ..BattleConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
