//! AttackResult - Outcome of one resolved attack

use crate::types::Criticality;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// Result of applying one attack to a defender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub criticality: Criticality,
    /// Damage after clamping negative raw damage to zero
    pub damage: BigDecimal,
    /// Defender hp before the hit
    pub hp_before: BigDecimal,
    /// Defender hp after the hit (may be negative)
    pub hp_after: BigDecimal,
    /// Whether this hit took the defender from alive to not alive
    pub is_killing_blow: bool,
}

impl AttackResult {
    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} damage", self.damage)];

        if self.criticality.is_critical() {
            parts.push("critical".to_string());
        }

        if self.damage.is_zero() {
            parts.push("blocked".to_string());
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(damage: i64, criticality: Criticality, fatal: bool) -> AttackResult {
        AttackResult {
            criticality,
            damage: BigDecimal::from(damage),
            hp_before: BigDecimal::from(50),
            hp_after: BigDecimal::from(50 - damage),
            is_killing_blow: fatal,
        }
    }

    #[test]
    fn test_summary_critical_fatal() {
        let summary = result(60, Criticality::Critical, true).summary();
        assert!(summary.contains("60 damage"));
        assert!(summary.contains("critical"));
        assert!(summary.contains("FATAL"));
    }

    #[test]
    fn test_summary_blocked() {
        let summary = result(0, Criticality::Normal, false).summary();
        assert_eq!(summary, "0 damage, blocked");
    }
}
