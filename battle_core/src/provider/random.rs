//! RandomProvider - Offline content from a seeded RNG

use super::{ContentProvider, LevelUpCount, ProviderError};
use crate::config::RandomProviderConstants;
use crate::types::{CombatChoice, Criticality, InvalidChoice};
use bigdecimal::BigDecimal;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const NAME_PREFIXES: &[&str] = &[
    "Ash", "Bog", "Cinder", "Dread", "Frost", "Gloom", "Iron", "Moss", "Rot", "Storm", "Thorn", "Void",
];

const NAME_SUFFIXES: &[&str] = &[
    "fang", "maw", "wraith", "hide", "claw", "shade", "crawler", "golem", "wing", "horn",
];

/// Steps used to sample a fraction of the stat range
const ROLL_RESOLUTION: i64 = 10_000;

/// Content provider backed by a ChaCha RNG; reproducible for a given seed
pub struct RandomProvider {
    rng: ChaCha8Rng,
    constants: RandomProviderConstants,
}

impl RandomProvider {
    pub fn new(seed: u64, constants: RandomProviderConstants) -> Self {
        RandomProvider {
            rng: ChaCha8Rng::seed_from_u64(seed),
            constants,
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy(constants: RandomProviderConstants) -> Self {
        RandomProvider {
            rng: ChaCha8Rng::from_entropy(),
            constants,
        }
    }
}

impl ContentProvider for RandomProvider {
    fn roll_stat(&mut self, min: BigDecimal, max: BigDecimal) -> Result<BigDecimal, ProviderError> {
        if min >= max {
            return Ok(max);
        }
        let steps = self.rng.gen_range(0..=ROLL_RESOLUTION);
        let fraction = BigDecimal::from((steps, 4));
        let rolled = (&min + (&max - &min) * fraction).round(2);
        Ok(rolled.clamp(min, max))
    }

    fn roll_name(&mut self) -> Result<String, ProviderError> {
        let prefix = NAME_PREFIXES.choose(&mut self.rng).copied().unwrap_or("Nameless");
        let suffix = NAME_SUFFIXES.choose(&mut self.rng).copied().unwrap_or("one");
        Ok(format!("{prefix}{suffix}"))
    }

    fn decide_combat_choice(&mut self, options: &[CombatChoice]) -> Result<CombatChoice, ProviderError> {
        let can_flee = options.contains(&CombatChoice::Flee);
        if can_flee && self.rng.gen_bool(self.constants.flee_chance.clamp(0.0, 1.0)) {
            return Ok(CombatChoice::Flee);
        }
        if options.contains(&CombatChoice::Attack) {
            return Ok(CombatChoice::Attack);
        }
        options
            .first()
            .copied()
            .ok_or_else(|| InvalidChoice("no options offered".to_string()).into())
    }

    fn decide_criticality(&mut self) -> Result<Criticality, ProviderError> {
        let chance = self.constants.critical_chance.clamp(0.0, 1.0);
        Ok(Criticality::from(self.rng.gen_bool(chance)))
    }

    fn roll_level_up_count(&mut self) -> Result<LevelUpCount, ProviderError> {
        let max = self
            .constants
            .max_level_ups
            .clamp(LevelUpCount::MIN, LevelUpCount::MAX);
        let count = self.rng.gen_range(LevelUpCount::MIN..=max);
        LevelUpCount::try_from(i64::from(count))
    }

    fn name(&self) -> &str {
        "random"
    }
}
