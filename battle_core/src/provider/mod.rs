//! ContentProvider - Trait and implementations for battle content sources
//!
//! The engine never rolls its own randomness. Enemy stats, names and every
//! attack/flee or critical/normal decision come from a provider, which is
//! either a remote model, a seeded RNG, or a fixed script in tests.

pub mod random;
pub mod reply;
pub mod scripted;

pub use random::RandomProvider;
pub use scripted::ScriptedProvider;

use crate::types::{CombatChoice, Criticality, InvalidChoice};
use bigdecimal::BigDecimal;
use std::fmt;
use thiserror::Error;

/// Failure of a content provider call
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport, service, or exhaustion failure; fatal to the current battle
    #[error("content provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed reply to {request}: {reply:?}")]
    MalformedReply { request: &'static str, reply: String },
    #[error(transparent)]
    InvalidChoice(#[from] InvalidChoice),
    #[error("level-up count {0} is outside {min}..={max}", min = LevelUpCount::MIN, max = LevelUpCount::MAX)]
    OutOfRangeLevelUps(i64),
}

/// Number of level-ups awarded after a victory, always within `1..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelUpCount(u32);

impl LevelUpCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for LevelUpCount {
    type Error = ProviderError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            // In range, so the cast cannot truncate
            Ok(LevelUpCount(value as u32))
        } else {
            Err(ProviderError::OutOfRangeLevelUps(value))
        }
    }
}

impl fmt::Display for LevelUpCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of generated battle content
///
/// All calls block until the source answers. Any error is fatal to the
/// battle in progress; callers do not substitute defaults.
pub trait ContentProvider {
    /// A value in `[min, max]` for a freshly spawned enemy
    fn roll_stat(&mut self, min: BigDecimal, max: BigDecimal) -> Result<BigDecimal, ProviderError>;

    /// A value in `[min, max]` for a new player's starting stats
    fn roll_starting_stat(&mut self, min: BigDecimal, max: BigDecimal) -> Result<BigDecimal, ProviderError> {
        self.roll_stat(min, max)
    }

    /// A display name for a freshly spawned enemy
    fn roll_name(&mut self) -> Result<String, ProviderError>;

    /// The enemy's move for this turn, picked from `options`
    fn decide_combat_choice(&mut self, options: &[CombatChoice]) -> Result<CombatChoice, ProviderError>;

    /// Whether the next attack (by either side) is critical
    fn decide_criticality(&mut self) -> Result<Criticality, ProviderError>;

    /// How many times to level up the player after a victory
    fn roll_level_up_count(&mut self) -> Result<LevelUpCount, ProviderError>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}
