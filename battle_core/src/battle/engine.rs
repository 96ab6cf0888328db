//! BattleEngine - Runs a battle from enemy spawn to progression

use super::decision::{DecisionSource, TurnContext};
use super::observer::BattleObserver;
use super::report::{BattleReport, TurnAction, TurnRecord};
use super::state::{Battle, BattlePhase, Side};
use super::BattleError;
use crate::combatant::Combatant;
use crate::config::EnemyConstants;
use crate::progression;
use crate::provider::ContentProvider;
use crate::spawn::spawn_enemy;
use crate::types::CombatChoice;
use tracing::{debug, info};

/// Drives battles against a content provider
///
/// The engine does not catch provider or input errors; any failure aborts
/// the battle and is returned to the caller as-is.
pub struct BattleEngine<'a> {
    provider: &'a mut dyn ContentProvider,
    constants: &'a EnemyConstants,
}

impl<'a> BattleEngine<'a> {
    pub fn new(provider: &'a mut dyn ContentProvider, constants: &'a EnemyConstants) -> Self {
        BattleEngine { provider, constants }
    }

    /// Spawn an enemy, fight it, and level up the player on victory
    pub fn run(
        &mut self,
        player: &mut Combatant,
        player_decisions: &mut dyn DecisionSource,
        observer: &mut dyn BattleObserver,
    ) -> Result<BattleReport, BattleError> {
        let enemy = spawn_enemy(self.provider, player, self.constants)?;
        let mut report = self.fight(player, enemy, player_decisions, observer)?;

        if report.is_victory() {
            let progression = progression::award_victory(self.provider, player)?;
            observer.on_progression(player, &progression);
            report.progression = Some(progression);
        }

        Ok(report)
    }

    /// Fight an already spawned enemy until a terminal condition holds
    ///
    /// On any outcome other than victory the player is restored to full hp
    /// before returning. Progression is left to [`BattleEngine::run`].
    pub fn fight(
        &mut self,
        player: &mut Combatant,
        enemy: Combatant,
        player_decisions: &mut dyn DecisionSource,
        observer: &mut dyn BattleObserver,
    ) -> Result<BattleReport, BattleError> {
        info!(
            provider = self.provider.name(),
            player = %player.name,
            enemy = %enemy.name,
            "battle started"
        );

        let mut battle = Battle::new(player, enemy);
        let mut log = Vec::new();
        observer.on_battle_start(battle.player(), battle.enemy());

        let outcome = loop {
            if let BattlePhase::Finished(outcome) = battle.settle() {
                break outcome;
            }

            let side = battle.advance_turn();
            observer.on_turn_start(battle.turn(), side, battle.player(), battle.enemy());

            let action = match side {
                Side::Player => self.player_turn(&mut battle, player_decisions, observer)?,
                Side::Enemy => self.enemy_turn(&mut battle, observer)?,
            };
            log.push(TurnRecord {
                turn: battle.turn(),
                side,
                action,
            });
        };

        let turns = battle.turn();
        let enemy = battle.conclude();
        info!(?outcome, turns, "battle finished");
        observer.on_battle_end(outcome, player);

        Ok(BattleReport {
            outcome,
            turns,
            log,
            enemy,
            progression: None,
        })
    }

    fn player_turn(
        &mut self,
        battle: &mut Battle<'_>,
        decisions: &mut dyn DecisionSource,
        observer: &mut dyn BattleObserver,
    ) -> Result<TurnAction, BattleError> {
        let choice = decisions.choose(&TurnContext {
            turn: battle.turn(),
            player: battle.player(),
            enemy: battle.enemy(),
        })?;
        debug!(turn = battle.turn(), %choice, "player decided");

        match choice {
            CombatChoice::Attack => {
                let criticality = self.provider.decide_criticality()?;
                let result = battle.player_attacks(criticality);
                debug!(turn = battle.turn(), damage = %result.damage, ?criticality, "player attacked");
                observer.on_attack(battle.player(), battle.enemy(), &result);
                Ok(TurnAction::Attack(result))
            }
            CombatChoice::Flee => {
                battle.player_flees();
                observer.on_flee(battle.player());
                Ok(TurnAction::Flee)
            }
        }
    }

    fn enemy_turn(
        &mut self,
        battle: &mut Battle<'_>,
        observer: &mut dyn BattleObserver,
    ) -> Result<TurnAction, BattleError> {
        let choice = self.provider.decide_combat_choice(CombatChoice::all())?;
        debug!(turn = battle.turn(), %choice, "enemy decided");

        match choice {
            CombatChoice::Flee => {
                battle.enemy_flees();
                observer.on_flee(battle.enemy());
                Ok(TurnAction::Flee)
            }
            CombatChoice::Attack => {
                let criticality = self.provider.decide_criticality()?;
                let result = battle.enemy_attacks(criticality);
                debug!(turn = battle.turn(), damage = %result.damage, ?criticality, "enemy attacked");
                observer.on_attack(battle.enemy(), battle.player(), &result);
                Ok(TurnAction::Attack(result))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BattleOutcome, NoopObserver, ScriptedDecisions};
    use crate::provider::ScriptedProvider;
    use crate::types::Criticality;
    use bigdecimal::BigDecimal;

    fn d(value: i64) -> BigDecimal {
        BigDecimal::from(value)
    }

    fn hero() -> Combatant {
        Combatant::player("Hero", d(100), d(30), d(15)).unwrap()
    }

    fn slime() -> Combatant {
        Combatant::enemy("Slime", d(100), d(30), d(15)).unwrap()
    }

    #[test]
    fn test_worked_example_enemy_flees() {
        let mut provider = ScriptedProvider::new()
            .with_criticals([Criticality::Normal, Criticality::Critical, Criticality::Critical])
            .with_choices([CombatChoice::Attack, CombatChoice::Flee]);
        let constants = EnemyConstants::default();
        let mut engine = BattleEngine::new(&mut provider, &constants);
        let mut player = hero();
        let mut decisions = ScriptedDecisions::new([CombatChoice::Attack, CombatChoice::Attack]);

        let report = engine
            .fight(&mut player, slime(), &mut decisions, &mut NoopObserver)
            .unwrap();

        assert_eq!(report.outcome, BattleOutcome::EnemyFled);
        assert_eq!(report.turns, 4);
        assert_eq!(report.enemy.stats.current_hp, d(40));
        assert_eq!(report.damage_dealt_by(Side::Enemy), d(45));
        // Victory without progression leaves the player damaged
        assert_eq!(player.stats.current_hp, d(55));
        assert!(provider.is_exhausted());
    }

    #[test]
    fn test_player_flee_forfeits_attack() {
        let mut provider = ScriptedProvider::new();
        let constants = EnemyConstants::default();
        let mut engine = BattleEngine::new(&mut provider, &constants);
        let mut player = hero();
        let mut decisions = ScriptedDecisions::new([CombatChoice::Flee]);

        let report = engine
            .fight(&mut player, slime(), &mut decisions, &mut NoopObserver)
            .unwrap();

        assert_eq!(report.outcome, BattleOutcome::PlayerFled);
        assert_eq!(report.turns, 1);
        assert_eq!(report.log[0].action, TurnAction::Flee);
        assert_eq!(report.enemy.stats.current_hp, d(100));
    }

    #[test]
    fn test_provider_failure_aborts_battle() {
        // No criticality scripted: the first attack cannot resolve
        let mut provider = ScriptedProvider::new();
        let constants = EnemyConstants::default();
        let mut engine = BattleEngine::new(&mut provider, &constants);
        let mut player = hero();

        let err = engine
            .fight(
                &mut player,
                slime(),
                &mut ScriptedDecisions::always_attack(),
                &mut NoopObserver,
            )
            .unwrap_err();

        assert!(matches!(err, BattleError::Provider(_)));
    }

    #[test]
    fn test_input_failure_aborts_battle() {
        let mut provider = ScriptedProvider::new();
        let constants = EnemyConstants::default();
        let mut engine = BattleEngine::new(&mut provider, &constants);
        let mut player = hero();

        let err = engine
            .fight(&mut player, slime(), &mut ScriptedDecisions::default(), &mut NoopObserver)
            .unwrap_err();

        assert!(matches!(err, BattleError::Input(_)));
    }
}
