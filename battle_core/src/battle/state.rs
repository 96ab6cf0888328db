//! Battle state machine

use crate::combat::AttackResult;
use crate::combatant::Combatant;
use crate::types::Criticality;
use serde::{Deserialize, Serialize};

/// Whose turn it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Odd turns belong to the player, even turns to the enemy
    pub fn for_turn(turn: u64) -> Side {
        if turn % 2 == 1 {
            Side::Player
        } else {
            Side::Enemy
        }
    }
}

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    PlayerDefeated,
    EnemyDefeated,
    PlayerFled,
    EnemyFled,
}

impl BattleOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, BattleOutcome::EnemyDefeated | BattleOutcome::EnemyFled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Init,
    PlayerTurn,
    EnemyTurn,
    Finished(BattleOutcome),
}

/// One in-progress battle
///
/// Borrows the player exclusively for its lifetime and owns the enemy,
/// which is dropped with the battle.
#[derive(Debug)]
pub struct Battle<'p> {
    player: &'p mut Combatant,
    enemy: Combatant,
    turn: u64,
    player_fled: bool,
    enemy_fled: bool,
    phase: BattlePhase,
}

impl<'p> Battle<'p> {
    pub fn new(player: &'p mut Combatant, enemy: Combatant) -> Self {
        Battle {
            player,
            enemy,
            turn: 0,
            player_fled: false,
            enemy_fled: false,
            phase: BattlePhase::Init,
        }
    }

    pub fn player(&self) -> &Combatant {
        &*self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Classify the current state, `None` while the battle is still running
    ///
    /// Priority: player defeat, then player flight, then victory.
    pub fn classify(&self) -> Option<BattleOutcome> {
        if !self.player.is_alive() {
            Some(BattleOutcome::PlayerDefeated)
        } else if self.player_fled {
            Some(BattleOutcome::PlayerFled)
        } else if self.enemy_fled {
            Some(BattleOutcome::EnemyFled)
        } else if !self.enemy.is_alive() {
            Some(BattleOutcome::EnemyDefeated)
        } else {
            None
        }
    }

    /// Move to `Finished` once a terminal condition holds and return the phase
    pub fn settle(&mut self) -> BattlePhase {
        if let Some(outcome) = self.classify() {
            self.phase = BattlePhase::Finished(outcome);
        }
        self.phase
    }

    /// The recorded outcome, `None` until the battle has settled
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Bump the turn counter and return whose turn it now is
    pub fn advance_turn(&mut self) -> Side {
        self.turn += 1;
        let side = Side::for_turn(self.turn);
        self.phase = match side {
            Side::Player => BattlePhase::PlayerTurn,
            Side::Enemy => BattlePhase::EnemyTurn,
        };
        side
    }

    pub fn player_attacks(&mut self, criticality: Criticality) -> AttackResult {
        self.player.attack(&mut self.enemy, criticality)
    }

    pub fn enemy_attacks(&mut self, criticality: Criticality) -> AttackResult {
        self.enemy.attack(self.player, criticality)
    }

    pub fn player_flees(&mut self) {
        self.player_fled = true;
    }

    pub fn enemy_flees(&mut self) {
        self.enemy_fled = true;
    }

    /// Close the battle, restoring the player unless it settled in victory
    ///
    /// Returns the enemy as it stood at the end of the fight.
    pub fn conclude(self) -> Combatant {
        if !self.outcome().is_some_and(|outcome| outcome.is_victory()) {
            self.player.restore();
        }
        self.enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn fighter(name: &str, hp: i64, atk: i64, def: i64) -> Combatant {
        Combatant::player(name, BigDecimal::from(hp), BigDecimal::from(atk), BigDecimal::from(def)).unwrap()
    }

    #[test]
    fn test_turn_alternation() {
        for turn in 1..=50u64 {
            let expected = if turn % 2 == 1 { Side::Player } else { Side::Enemy };
            assert_eq!(Side::for_turn(turn), expected);
        }
    }

    #[test]
    fn test_advance_turn_sets_phase() {
        let mut player = fighter("Hero", 100, 30, 15);
        let mut battle = Battle::new(&mut player, fighter("Slime", 100, 30, 15));
        assert_eq!(battle.settle(), BattlePhase::Init);
        assert_eq!(battle.turn(), 0);

        assert_eq!(battle.advance_turn(), Side::Player);
        assert_eq!(battle.settle(), BattlePhase::PlayerTurn);
        assert_eq!(battle.advance_turn(), Side::Enemy);
        assert_eq!(battle.settle(), BattlePhase::EnemyTurn);
        assert_eq!(battle.turn(), 2);
    }

    #[test]
    fn test_not_over_while_nothing_happened() {
        let mut player = fighter("Hero", 100, 30, 15);
        let mut battle = Battle::new(&mut player, fighter("Slime", 100, 30, 15));
        assert_eq!(battle.classify(), None);
        assert_eq!(battle.settle(), BattlePhase::Init);
        assert_eq!(battle.outcome(), None);
    }

    #[test]
    fn test_classification_priority() {
        let mut player = fighter("Hero", 10, 30, 0);
        let mut battle = Battle::new(&mut player, fighter("Slime", 10, 100, 0));

        battle.enemy_flees();
        assert_eq!(battle.classify(), Some(BattleOutcome::EnemyFled));

        battle.player_flees();
        assert_eq!(battle.classify(), Some(BattleOutcome::PlayerFled));

        battle.enemy_attacks(Criticality::Normal);
        assert_eq!(battle.classify(), Some(BattleOutcome::PlayerDefeated));
        assert_eq!(battle.settle(), BattlePhase::Finished(BattleOutcome::PlayerDefeated));
        assert_eq!(battle.outcome(), Some(BattleOutcome::PlayerDefeated));
    }

    #[test]
    fn test_conclude_restores_on_loss_only() {
        let mut player = fighter("Hero", 50, 30, 0);
        let mut battle = Battle::new(&mut player, fighter("Slime", 100, 20, 0));
        battle.enemy_attacks(Criticality::Normal);
        battle.player_flees();
        assert_eq!(battle.settle(), BattlePhase::Finished(BattleOutcome::PlayerFled));
        let enemy = battle.conclude();
        assert_eq!(enemy.name, "Slime");
        assert_eq!(player.stats.current_hp, BigDecimal::from(50));

        let mut battle = Battle::new(&mut player, fighter("Slime", 100, 20, 0));
        battle.enemy_attacks(Criticality::Normal);
        battle.enemy_flees();
        assert_eq!(battle.settle(), BattlePhase::Finished(BattleOutcome::EnemyFled));
        battle.conclude();
        assert_eq!(player.stats.current_hp, BigDecimal::from(30));
    }

    #[test]
    fn test_conclude_before_settling_restores() {
        let mut player = fighter("Hero", 50, 30, 0);
        let mut battle = Battle::new(&mut player, fighter("Slime", 100, 20, 0));
        battle.enemy_attacks(Criticality::Normal);
        battle.conclude();
        assert_eq!(player.stats.current_hp, BigDecimal::from(50));
    }
}
