//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Core types
pub use crate::combatant::Combatant;
pub use crate::stat_block::StatBlock;
pub use crate::types::{CombatChoice, Criticality, Role};

// Battle
pub use crate::battle::{BattleEngine, BattleObserver, BattleOutcome, BattleReport, DecisionSource, Side};

// Providers
pub use crate::provider::{ContentProvider, LevelUpCount, RandomProvider};

// Config and saves
pub use crate::config::{GameConstants, GenerationConfig};
pub use crate::save::{SaveStore, SavedGame};

pub use bigdecimal::BigDecimal;
