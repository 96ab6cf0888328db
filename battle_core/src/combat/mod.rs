//! Combat resolution - Apply one attack to a defending stat block

mod resolution;
mod result;

pub use resolution::{calculate_damage, resolve_attack};
pub use result::AttackResult;
