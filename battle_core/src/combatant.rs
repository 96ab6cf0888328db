//! Combatant - A stat block with identity and behavior

use crate::combat::{resolve_attack, AttackResult};
use crate::stat_block::{StatBlock, StatError};
use crate::types::{Criticality, Role};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A participant in a battle, either the player or an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub stats: StatBlock,
}

impl Combatant {
    /// Create a level 1 combatant at full health with a fresh id
    pub fn new(
        name: impl Into<String>,
        role: Role,
        max_hp: BigDecimal,
        attack_power: BigDecimal,
        defense: BigDecimal,
    ) -> Result<Self, StatError> {
        Ok(Combatant {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            stats: StatBlock::new(max_hp, attack_power, defense)?,
        })
    }

    /// Create a combatant around an existing stat block
    pub fn from_stats(id: Uuid, name: impl Into<String>, role: Role, stats: StatBlock) -> Self {
        Combatant {
            id,
            name: name.into(),
            role,
            stats,
        }
    }

    pub fn player(
        name: impl Into<String>,
        max_hp: BigDecimal,
        attack_power: BigDecimal,
        defense: BigDecimal,
    ) -> Result<Self, StatError> {
        Self::new(name, Role::Player, max_hp, attack_power, defense)
    }

    pub fn enemy(
        name: impl Into<String>,
        max_hp: BigDecimal,
        attack_power: BigDecimal,
        defense: BigDecimal,
    ) -> Result<Self, StatError> {
        Self::new(name, Role::Enemy, max_hp, attack_power, defense)
    }

    /// Attack `target`, returning the resolved hit
    pub fn attack(&self, target: &mut Combatant, criticality: Criticality) -> AttackResult {
        resolve_attack(&self.stats, &mut target.stats, criticality)
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn restore(&mut self) {
        self.stats.restore();
    }

    pub fn level_up(&mut self) {
        self.stats.level_up();
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Level: {}", self.stats.level)?;
        writeln!(f, "HP: {}/{}", self.stats.current_hp, self.stats.max_hp)?;
        writeln!(f, "Attack Power: {}", self.stats.attack_power)?;
        writeln!(f, "Defense: {}", self.stats.defense)
    }
}
