//! Combatant creation from provider-rolled stats

use crate::battle::BattleError;
use crate::combatant::Combatant;
use crate::config::{EnemyConstants, PlayerConstants, StatRange};
use crate::provider::{ContentProvider, ProviderError};
use bigdecimal::BigDecimal;
use tracing::debug;

/// Roll a fresh enemy scaled to the player's current stats
///
/// Max hp, attack and defense are each rolled independently within
/// `[spread_min * player_stat, spread_max * player_stat]`, then a name.
pub fn spawn_enemy(
    provider: &mut dyn ContentProvider,
    player: &Combatant,
    constants: &EnemyConstants,
) -> Result<Combatant, BattleError> {
    let stats = &player.stats;
    let max_hp = roll_relative(provider, &stats.max_hp, constants)?;
    let attack_power = roll_relative(provider, &stats.attack_power, constants)?;
    let defense = roll_relative(provider, &stats.defense, constants)?;
    let name = provider.roll_name()?;

    debug!(%name, %max_hp, %attack_power, %defense, "enemy spawned");
    Ok(Combatant::enemy(name, max_hp, attack_power, defense)?)
}

/// Roll a new level 1 player within the configured starting ranges
pub fn roll_player(
    provider: &mut dyn ContentProvider,
    name: impl Into<String>,
    constants: &PlayerConstants,
) -> Result<Combatant, BattleError> {
    let max_hp = roll_range(provider, &constants.max_hp)?;
    let attack_power = roll_range(provider, &constants.attack_power)?;
    let defense = roll_range(provider, &constants.defense)?;
    Ok(Combatant::player(name, max_hp, attack_power, defense)?)
}

fn roll_relative(
    provider: &mut dyn ContentProvider,
    base: &BigDecimal,
    constants: &EnemyConstants,
) -> Result<BigDecimal, ProviderError> {
    provider.roll_stat(base * &constants.stat_spread_min, base * &constants.stat_spread_max)
}

fn roll_range(provider: &mut dyn ContentProvider, range: &StatRange) -> Result<BigDecimal, ProviderError> {
    provider.roll_starting_stat(range.min.clone(), range.max.clone())
}
