//! ScriptedProvider - Replays fixed content for deterministic battles

use super::{ContentProvider, LevelUpCount, ProviderError};
use crate::types::{CombatChoice, Criticality};
use bigdecimal::BigDecimal;
use std::collections::VecDeque;

/// Content provider that answers from pre-loaded queues
///
/// Running out of scripted answers is reported as an unavailable provider,
/// which makes it easy to exercise mid-battle failures.
#[derive(Debug, Default, Clone)]
pub struct ScriptedProvider {
    stats: VecDeque<BigDecimal>,
    names: VecDeque<String>,
    choices: VecDeque<CombatChoice>,
    criticals: VecDeque<Criticality>,
    level_ups: VecDeque<i64>,
    /// Every `(min, max)` range passed to `roll_stat`, in call order
    pub stat_requests: Vec<(BigDecimal, BigDecimal)>,
    /// Every `(min, max)` range passed to `roll_starting_stat`, in call order
    pub starting_stat_requests: Vec<(BigDecimal, BigDecimal)>,
    /// Every option list passed to `decide_combat_choice`
    pub choice_requests: Vec<Vec<CombatChoice>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(mut self, stats: impl IntoIterator<Item = BigDecimal>) -> Self {
        self.stats.extend(stats);
        self
    }

    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = CombatChoice>) -> Self {
        self.choices.extend(choices);
        self
    }

    pub fn with_criticals(mut self, criticals: impl IntoIterator<Item = Criticality>) -> Self {
        self.criticals.extend(criticals);
        self
    }

    /// Raw level-up counts; out-of-range values are rejected when consumed
    pub fn with_level_ups(mut self, counts: impl IntoIterator<Item = i64>) -> Self {
        self.level_ups.extend(counts);
        self
    }

    /// Whether every scripted answer has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.stats.is_empty()
            && self.names.is_empty()
            && self.choices.is_empty()
            && self.criticals.is_empty()
            && self.level_ups.is_empty()
    }
}

fn exhausted(what: &str) -> ProviderError {
    ProviderError::Unavailable(format!("script has no more {what}"))
}

impl ContentProvider for ScriptedProvider {
    fn roll_stat(&mut self, min: BigDecimal, max: BigDecimal) -> Result<BigDecimal, ProviderError> {
        self.stat_requests.push((min, max));
        self.stats.pop_front().ok_or_else(|| exhausted("stats"))
    }

    fn roll_starting_stat(&mut self, min: BigDecimal, max: BigDecimal) -> Result<BigDecimal, ProviderError> {
        self.starting_stat_requests.push((min, max));
        self.stats.pop_front().ok_or_else(|| exhausted("stats"))
    }

    fn roll_name(&mut self) -> Result<String, ProviderError> {
        self.names.pop_front().ok_or_else(|| exhausted("names"))
    }

    fn decide_combat_choice(&mut self, options: &[CombatChoice]) -> Result<CombatChoice, ProviderError> {
        self.choice_requests.push(options.to_vec());
        self.choices.pop_front().ok_or_else(|| exhausted("combat choices"))
    }

    fn decide_criticality(&mut self) -> Result<Criticality, ProviderError> {
        self.criticals.pop_front().ok_or_else(|| exhausted("criticality decisions"))
    }

    fn roll_level_up_count(&mut self) -> Result<LevelUpCount, ProviderError> {
        let count = self.level_ups.pop_front().ok_or_else(|| exhausted("level-up counts"))?;
        LevelUpCount::try_from(count)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
