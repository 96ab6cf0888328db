//! battle_core - Turn-based combat and progression engine for generated battles
//!
//! This library provides:
//! - StatBlock / Combatant: decimal stats, the damage formula, level-ups
//! - ContentProvider: the seam through which enemy stats, names and decisions arrive
//! - BattleEngine: one player versus one enemy until someone falls or flees
//! - Progression: level-ups awarded after a victory
//! - SaveStore: versioned saved games

pub mod battle;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod progression;
pub mod provider;
pub mod save;
pub mod spawn;
pub mod stat_block;
pub mod types;

pub mod prelude;

// Re-export core types for convenience
pub use battle::{
    Battle, BattleEngine, BattleError, BattleObserver, BattleOutcome, BattleReport, DecisionSource,
    NoopObserver, Side, TurnContext,
};
pub use combat::AttackResult;
pub use combatant::Combatant;
pub use config::{ConfigError, GameConstants, GenerationConfig};
pub use progression::ProgressionReport;
pub use provider::{ContentProvider, LevelUpCount, ProviderError, RandomProvider, ScriptedProvider};
pub use save::{SaveError, SaveStore, SavedGame};
pub use stat_block::{StatBlock, StatError};
pub use types::{CombatChoice, Criticality, InvalidChoice, Role};

pub use bigdecimal::BigDecimal;
