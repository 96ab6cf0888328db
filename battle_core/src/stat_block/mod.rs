//! StatBlock - Numeric attributes of a combatant

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected stat values at creation time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    #[error("{stat} must be positive, got {value}")]
    NonPositive { stat: &'static str, value: BigDecimal },
    #[error("level must be at least 1")]
    ZeroLevel,
}

/// hp / attack / defense / level of one combatant
///
/// All numeric stats are arbitrary-precision decimals. A single victory can
/// award 100 compounding level-ups, which grows stats far past any
/// fixed-width type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub max_hp: BigDecimal,
    /// May drop below zero after a hit; only `> 0` counts as alive
    pub current_hp: BigDecimal,
    pub attack_power: BigDecimal,
    pub defense: BigDecimal,
    pub level: u32,
}

impl StatBlock {
    /// Create a level 1 stat block at full health
    pub fn new(
        max_hp: BigDecimal,
        attack_power: BigDecimal,
        defense: BigDecimal,
    ) -> Result<Self, StatError> {
        Self::with_level(1, max_hp, attack_power, defense)
    }

    /// Create a stat block at an arbitrary level, at full health
    pub fn with_level(
        level: u32,
        max_hp: BigDecimal,
        attack_power: BigDecimal,
        defense: BigDecimal,
    ) -> Result<Self, StatError> {
        if level == 0 {
            return Err(StatError::ZeroLevel);
        }
        let max_hp = ensure_positive("max_hp", max_hp)?;
        let attack_power = ensure_positive("attack_power", attack_power)?;
        let defense = ensure_positive("defense", defense)?;

        Ok(StatBlock {
            current_hp: max_hp.clone(),
            max_hp,
            attack_power,
            defense,
            level,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > BigDecimal::zero()
    }

    /// Reset current hp to max
    pub fn restore(&mut self) {
        self.current_hp = self.max_hp.clone();
    }

    /// Subtract damage from current hp without flooring at zero
    pub fn take_damage(&mut self, damage: &BigDecimal) {
        self.current_hp -= damage;
    }

    /// Scale every stat by `level * 2` (pre-increment level), restore, then bump the level
    pub fn level_up(&mut self) {
        let multiplier = level_multiplier(self.level);
        self.max_hp *= &multiplier;
        self.restore();
        self.attack_power *= &multiplier;
        self.defense *= &multiplier;
        self.level = self.level.saturating_add(1);
    }
}

/// Multiplier applied on a level-up from `level`: `level * 2`
pub fn level_multiplier(level: u32) -> BigDecimal {
    BigDecimal::from(u64::from(level) * 2)
}

fn ensure_positive(stat: &'static str, value: BigDecimal) -> Result<BigDecimal, StatError> {
    if value > BigDecimal::zero() {
        Ok(value)
    } else {
        Err(StatError::NonPositive { stat, value })
    }
}
