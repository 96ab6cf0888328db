//! Player decision sources

use crate::combatant::Combatant;
use crate::types::CombatChoice;
use std::collections::VecDeque;
use std::io;

/// What a decision source can see when asked for a move
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub turn: u64,
    pub player: &'a Combatant,
    pub enemy: &'a Combatant,
}

/// Supplies the player's attack/flee choice each player turn
///
/// The console prompt implements this in the game binary; tests use
/// [`ScriptedDecisions`] or a closure.
pub trait DecisionSource {
    fn choose(&mut self, context: &TurnContext<'_>) -> io::Result<CombatChoice>;
}

impl<F> DecisionSource for F
where
    F: FnMut(&TurnContext<'_>) -> io::Result<CombatChoice>,
{
    fn choose(&mut self, context: &TurnContext<'_>) -> io::Result<CombatChoice> {
        self(context)
    }
}

/// Fixed sequence of player choices
#[derive(Debug, Default, Clone)]
pub struct ScriptedDecisions {
    choices: VecDeque<CombatChoice>,
}

impl ScriptedDecisions {
    pub fn new(choices: impl IntoIterator<Item = CombatChoice>) -> Self {
        ScriptedDecisions {
            choices: choices.into_iter().collect(),
        }
    }

    /// Attack on every turn
    pub fn always_attack() -> AlwaysAttack {
        AlwaysAttack
    }
}

/// Decision source that never flees
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAttack;

impl DecisionSource for AlwaysAttack {
    fn choose(&mut self, _context: &TurnContext<'_>) -> io::Result<CombatChoice> {
        Ok(CombatChoice::Attack)
    }
}

impl DecisionSource for ScriptedDecisions {
    fn choose(&mut self, _context: &TurnContext<'_>) -> io::Result<CombatChoice> {
        self.choices.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted player choices")
        })
    }
}
