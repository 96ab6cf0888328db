//! Damage resolution - attack power versus defense

use super::result::AttackResult;
use crate::stat_block::StatBlock;
use crate::types::Criticality;
use bigdecimal::{BigDecimal, Zero};

/// Damage dealt by one attack: `max(0, attack * (crit ? 2 : 1) - defense)`
pub fn calculate_damage(
    attack_power: &BigDecimal,
    defense: &BigDecimal,
    criticality: Criticality,
) -> BigDecimal {
    let offense = if criticality.is_critical() {
        attack_power.double()
    } else {
        attack_power.clone()
    };
    let raw = offense - defense;
    raw.max(BigDecimal::zero())
}

/// Resolve an attack against a defender, mutating its current hp
///
/// There is no floor on the defender's hp; it can go negative.
pub fn resolve_attack(
    attacker: &StatBlock,
    defender: &mut StatBlock,
    criticality: Criticality,
) -> AttackResult {
    let hp_before = defender.current_hp.clone();
    let damage = calculate_damage(&attacker.attack_power, &defender.defense, criticality);
    defender.take_damage(&damage);

    AttackResult {
        criticality,
        is_killing_blow: hp_before > BigDecimal::zero() && !defender.is_alive(),
        damage,
        hp_before,
        hp_after: defender.current_hp.clone(),
    }
}
