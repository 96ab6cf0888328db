//! Core enums shared by combatants, providers and the battle engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which side of a battle a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    Enemy,
}

/// What a combatant does on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatChoice {
    Attack,
    Flee,
}

impl CombatChoice {
    /// The two choices offered on every turn
    pub fn all() -> &'static [CombatChoice] {
        &[CombatChoice::Attack, CombatChoice::Flee]
    }

    /// Keyword used in prompts and replies
    pub fn keyword(&self) -> &'static str {
        match self {
            CombatChoice::Attack => "ATTACK",
            CombatChoice::Flee => "FLEE",
        }
    }
}

impl fmt::Display for CombatChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for CombatChoice {
    type Err = InvalidChoice;

    /// Strict parse: only the exact keywords are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATTACK" => Ok(CombatChoice::Attack),
            "FLEE" => Ok(CombatChoice::Flee),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

/// Whether an attack lands as a critical hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Critical,
    Normal,
}

impl Criticality {
    pub fn is_critical(&self) -> bool {
        matches!(self, Criticality::Critical)
    }

    /// Keyword used in prompts and replies
    pub fn keyword(&self) -> &'static str {
        match self {
            Criticality::Critical => "CRITICAL",
            Criticality::Normal => "NORMAL",
        }
    }
}

impl From<bool> for Criticality {
    fn from(is_critical: bool) -> Self {
        if is_critical {
            Criticality::Critical
        } else {
            Criticality::Normal
        }
    }
}

impl FromStr for Criticality {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CRITICAL" => Ok(Criticality::Critical),
            "NORMAL" => Ok(Criticality::Normal),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

/// A decision value outside the expected enumeration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid choice: {0:?}")]
pub struct InvalidChoice(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combat_choice_strict_parse() {
        assert_eq!("ATTACK".parse::<CombatChoice>(), Ok(CombatChoice::Attack));
        assert_eq!("FLEE".parse::<CombatChoice>(), Ok(CombatChoice::Flee));
        assert!("attack".parse::<CombatChoice>().is_err());
        assert!("RUN".parse::<CombatChoice>().is_err());
    }

    #[test]
    fn test_criticality_from_bool() {
        assert!(Criticality::from(true).is_critical());
        assert!(!Criticality::from(false).is_critical());
        assert_eq!("NORMAL".parse::<Criticality>(), Ok(Criticality::Normal));
    }
}
