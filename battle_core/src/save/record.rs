//! Versioned on-disk records

use crate::combatant::Combatant;
use crate::config::GenerationConfig;
use crate::stat_block::{StatBlock, StatError};
use crate::types::Role;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Current save schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Persisted player, independent of the in-memory `Combatant` layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: Uuid,
    pub name: String,
    pub level: u32,
    pub max_hp: BigDecimal,
    pub current_hp: BigDecimal,
    pub attack_power: BigDecimal,
    pub defense: BigDecimal,
}

impl From<&Combatant> for PlayerRecord {
    fn from(player: &Combatant) -> Self {
        PlayerRecord {
            id: player.id,
            name: player.name.clone(),
            level: player.stats.level,
            max_hp: player.stats.max_hp.clone(),
            current_hp: player.stats.current_hp.clone(),
            attack_power: player.stats.attack_power.clone(),
            defense: player.stats.defense.clone(),
        }
    }
}

impl TryFrom<PlayerRecord> for Combatant {
    type Error = StatError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let mut stats =
            StatBlock::with_level(record.level, record.max_hp, record.attack_power, record.defense)?;
        stats.current_hp = record.current_hp;
        Ok(Combatant::from_stats(record.id, record.name, Role::Player, stats))
    }
}

/// One saved game: generation settings plus the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub schema_version: u32,
    pub game_name: String,
    pub generation: GenerationConfig,
    pub player: PlayerRecord,
}

impl SavedGame {
    pub fn new(game_name: impl Into<String>, generation: GenerationConfig, player: &Combatant) -> Self {
        SavedGame {
            schema_version: SCHEMA_VERSION,
            game_name: game_name.into(),
            generation,
            player: PlayerRecord::from(player),
        }
    }

    /// Replace the stored player with the current in-memory one
    pub fn update_player(&mut self, player: &Combatant) {
        self.player = PlayerRecord::from(player);
    }
}

impl fmt::Display for SavedGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.game_name.to_uppercase())?;
        write!(f, "{}", self.generation)
    }
}
