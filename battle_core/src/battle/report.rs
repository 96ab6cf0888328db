//! BattleReport - What happened in a finished battle

use super::state::{BattleOutcome, Side};
use crate::combat::AttackResult;
use crate::combatant::Combatant;
use crate::progression::ProgressionReport;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// Action taken on one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnAction {
    Attack(AttackResult),
    Flee,
}

/// One entry in the battle log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u64,
    pub side: Side,
    pub action: TurnAction,
}

/// Summary of a finished battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    /// Value of the turn counter when the battle ended
    pub turns: u64,
    pub log: Vec<TurnRecord>,
    /// The enemy as it stood at the end of the fight
    pub enemy: Combatant,
    /// Level-ups awarded, present only after a victory
    pub progression: Option<ProgressionReport>,
}

impl BattleReport {
    pub fn is_victory(&self) -> bool {
        self.outcome.is_victory()
    }

    /// Total damage dealt by one side over the whole battle
    pub fn damage_dealt_by(&self, side: Side) -> BigDecimal {
        self.log
            .iter()
            .filter(|record| record.side == side)
            .filter_map(|record| match &record.action {
                TurnAction::Attack(result) => Some(&result.damage),
                TurnAction::Flee => None,
            })
            .fold(BigDecimal::zero(), |total, damage| total + damage)
    }
}
