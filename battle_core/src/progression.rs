//! Progression - Level-ups awarded after a victory

use crate::combatant::Combatant;
use crate::provider::{ContentProvider, LevelUpCount, ProviderError};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Before/after snapshot of a progression step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionReport {
    pub levels_gained: u32,
    pub level_before: u32,
    pub level_after: u32,
    pub max_hp_before: BigDecimal,
    pub max_hp_after: BigDecimal,
    pub attack_power_after: BigDecimal,
    pub defense_after: BigDecimal,
}

/// Ask the provider how many levels the player earned and apply them
pub fn award_victory(
    provider: &mut dyn ContentProvider,
    player: &mut Combatant,
) -> Result<ProgressionReport, ProviderError> {
    let count = provider.roll_level_up_count()?;
    Ok(apply_level_ups(player, count))
}

/// Level up `count` times in sequence, each step compounding on the last
pub fn apply_level_ups(player: &mut Combatant, count: LevelUpCount) -> ProgressionReport {
    let level_before = player.level();
    let max_hp_before = player.stats.max_hp.clone();

    for _ in 0..count.get() {
        player.level_up();
    }

    info!(
        player = %player.name,
        levels = count.get(),
        level = player.level(),
        "player leveled up"
    );

    ProgressionReport {
        levels_gained: count.get(),
        level_before,
        level_after: player.level(),
        max_hp_before,
        max_hp_after: player.stats.max_hp.clone(),
        attack_power_after: player.stats.attack_power.clone(),
        defense_after: player.stats.defense.clone(),
    }
}
