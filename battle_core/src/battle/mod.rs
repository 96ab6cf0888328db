//! Battle - One player versus one enemy, turn by turn

mod decision;
mod engine;
mod observer;
mod report;
mod state;

pub use decision::{AlwaysAttack, DecisionSource, ScriptedDecisions, TurnContext};
pub use engine::BattleEngine;
pub use observer::{BattleObserver, NoopObserver};
pub use report::{BattleReport, TurnAction, TurnRecord};
pub use state::{Battle, BattleOutcome, BattlePhase, Side};

use crate::provider::ProviderError;
use crate::stat_block::StatError;
use thiserror::Error;

/// Failure that aborts the battle in progress
#[derive(Error, Debug)]
pub enum BattleError {
    #[error("content provider failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("generated combatant is invalid: {0}")]
    InvalidCombatant(#[from] StatError),
    #[error("player input failed: {0}")]
    Input(#[from] std::io::Error),
}
