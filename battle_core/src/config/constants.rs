//! Game constants configuration

use super::{parse_toml, ConfigError};
use crate::provider::LevelUpCount;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable game constants
///
/// Decimal values are written as quoted strings in TOML so they stay exact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub enemy: EnemyConstants,
    #[serde(default)]
    pub player: PlayerConstants,
    #[serde(default)]
    pub random_provider: RandomProviderConstants,
    #[serde(default)]
    pub gemini: GeminiConstants,
}

impl GameConstants {
    /// Load and validate constants from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse and validate constants from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let enemy = &self.enemy;
        if enemy.stat_spread_min <= BigDecimal::zero() || enemy.stat_spread_min > enemy.stat_spread_max {
            return Err(ConfigError::ValidationError(format!(
                "enemy stat spread must satisfy 0 < min <= max, got {}..{}",
                enemy.stat_spread_min, enemy.stat_spread_max
            )));
        }
        for (name, range) in [
            ("player.max_hp", &self.player.max_hp),
            ("player.attack_power", &self.player.attack_power),
            ("player.defense", &self.player.defense),
        ] {
            if range.min <= BigDecimal::zero() || range.min > range.max {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must satisfy 0 < min <= max, got {}..{}",
                    range.min, range.max
                )));
            }
        }
        let odds = &self.random_provider;
        for (name, chance) in [
            ("random_provider.critical_chance", odds.critical_chance),
            ("random_provider.flee_chance", odds.flee_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be between 0 and 1, got {chance}"
                )));
            }
        }
        if !(LevelUpCount::MIN..=LevelUpCount::MAX).contains(&odds.max_level_ups) {
            return Err(ConfigError::ValidationError(format!(
                "random_provider.max_level_ups must be between {} and {}, got {}",
                LevelUpCount::MIN,
                LevelUpCount::MAX,
                odds.max_level_ups
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConstants {
    /// Lower bound of enemy stats relative to the player's (0.85 = 85%)
    #[serde(default = "default_spread_min")]
    pub stat_spread_min: BigDecimal,
    /// Upper bound of enemy stats relative to the player's
    #[serde(default = "default_spread_max")]
    pub stat_spread_max: BigDecimal,
}

impl Default for EnemyConstants {
    fn default() -> Self {
        EnemyConstants {
            stat_spread_min: default_spread_min(),
            stat_spread_max: default_spread_max(),
        }
    }
}

fn default_spread_min() -> BigDecimal {
    BigDecimal::from((85, 2))
}
fn default_spread_max() -> BigDecimal {
    BigDecimal::from((115, 2))
}

/// Inclusive decimal range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: BigDecimal,
    pub max: BigDecimal,
}

impl StatRange {
    pub fn new(min: i64, max: i64) -> Self {
        StatRange {
            min: BigDecimal::from(min),
            max: BigDecimal::from(max),
        }
    }
}

/// Starting stat ranges for a new player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConstants {
    #[serde(default = "default_player_hp")]
    pub max_hp: StatRange,
    #[serde(default = "default_player_attack")]
    pub attack_power: StatRange,
    #[serde(default = "default_player_defense")]
    pub defense: StatRange,
}

impl Default for PlayerConstants {
    fn default() -> Self {
        PlayerConstants {
            max_hp: default_player_hp(),
            attack_power: default_player_attack(),
            defense: default_player_defense(),
        }
    }
}

fn default_player_hp() -> StatRange {
    StatRange::new(100, 150)
}
fn default_player_attack() -> StatRange {
    StatRange::new(20, 50)
}
fn default_player_defense() -> StatRange {
    StatRange::new(10, 20)
}

/// Odds used by the offline RNG provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomProviderConstants {
    #[serde(default = "default_critical_chance")]
    pub critical_chance: f64,
    #[serde(default = "default_flee_chance")]
    pub flee_chance: f64,
    /// Upper bound on level-ups per victory (capped at 100)
    #[serde(default = "default_max_level_ups")]
    pub max_level_ups: u32,
}

impl Default for RandomProviderConstants {
    fn default() -> Self {
        RandomProviderConstants {
            critical_chance: default_critical_chance(),
            flee_chance: default_flee_chance(),
            max_level_ups: default_max_level_ups(),
        }
    }
}

fn default_critical_chance() -> f64 {
    0.25
}
fn default_flee_chance() -> f64 {
    0.10
}
fn default_max_level_ups() -> u32 {
    100
}

/// Remote model endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConstants {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConstants {
    fn default() -> Self {
        GeminiConstants {
            model: default_model(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-pro".to_string()
}
fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
