//! Battle observers - Hooks for presenting a battle as it happens

use super::state::{BattleOutcome, Side};
use crate::combat::AttackResult;
use crate::combatant::Combatant;
use crate::progression::ProgressionReport;

/// Receives battle events; every hook defaults to doing nothing
pub trait BattleObserver {
    fn on_battle_start(&mut self, _player: &Combatant, _enemy: &Combatant) {}

    fn on_turn_start(&mut self, _turn: u64, _side: Side, _player: &Combatant, _enemy: &Combatant) {}

    fn on_attack(&mut self, _attacker: &Combatant, _defender: &Combatant, _result: &AttackResult) {}

    fn on_flee(&mut self, _fleeing: &Combatant) {}

    fn on_battle_end(&mut self, _outcome: BattleOutcome, _player: &Combatant) {}

    fn on_progression(&mut self, _player: &Combatant, _report: &ProgressionReport) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BattleObserver for NoopObserver {}
