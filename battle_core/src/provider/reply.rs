//! Reply parsing - turn free-form text from a content service into typed values
//!
//! Choice and criticality replies are permissive: anything other than the
//! exact positive keyword is read as the negative case (attack, normal).
//! Numeric replies are strict; an unparsable number fails the call.

use super::{LevelUpCount, ProviderError};
use crate::types::{CombatChoice, Criticality};
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// First non-empty line of a reply, trimmed
pub fn first_line(reply: &str) -> &str {
    reply
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Parse a decimal number from the first line of a reply
pub fn parse_decimal_reply(reply: &str) -> Result<BigDecimal, ProviderError> {
    let line = first_line(reply).trim_end_matches(['.', '!']);
    BigDecimal::from_str(line).map_err(|_| ProviderError::MalformedReply {
            request: "stat",
            reply: reply.to_string(),
        })
}

/// Keep a rolled value inside the range that was asked for
pub fn clamp_to_range(value: BigDecimal, min: BigDecimal, max: BigDecimal) -> BigDecimal {
    if min > max {
        return value.clamp(max, min);
    }
    value.clamp(min, max)
}

/// Parse a display name, dropping markdown emphasis and quotes
pub fn parse_name_reply(reply: &str) -> Result<String, ProviderError> {
    let name = first_line(reply).trim_matches(|c: char| c == '*' || c == '"' || c.is_whitespace());
    if name.is_empty() {
        return Err(ProviderError::MalformedReply {
            request: "name",
            reply: reply.to_string(),
        });
    }
    Ok(name.to_string())
}

/// `FLEE` flees; every other reply attacks
pub fn parse_choice_reply(reply: &str) -> CombatChoice {
    match reply.trim() {
        "FLEE" => CombatChoice::Flee,
        _ => CombatChoice::Attack,
    }
}

/// `CRITICAL` crits; every other reply is a normal hit
pub fn parse_criticality_reply(reply: &str) -> Criticality {
    Criticality::from(reply.trim() == Criticality::Critical.keyword())
}

/// Parse and range-check a level-up count from the first line of a reply
pub fn parse_level_up_reply(reply: &str) -> Result<LevelUpCount, ProviderError> {
    let count: i64 = first_line(reply)
        .trim_end_matches('.')
        .parse()
        .map_err(|_| ProviderError::MalformedReply {
            request: "level-up count",
            reply: reply.to_string(),
        })?;
    LevelUpCount::try_from(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_reply() {
        assert_eq!(parse_decimal_reply("112.5").unwrap(), BigDecimal::from_str("112.5").unwrap());
        assert_eq!(parse_decimal_reply("  42\nsome chatter").unwrap(), BigDecimal::from(42));
        assert_eq!(parse_decimal_reply("17.25.").unwrap(), BigDecimal::from_str("17.25").unwrap());
        assert_eq!(parse_decimal_reply("7.9e40").unwrap(), BigDecimal::from_str("79e39").unwrap());
        assert!(parse_decimal_reply("about forty").is_err());
        assert!(parse_decimal_reply("").is_err());
    }

    #[test]
    fn test_clamp_to_range() {
        let min = BigDecimal::from(85);
        let max = BigDecimal::from(115);
        assert_eq!(clamp_to_range(BigDecimal::from(200), min.clone(), max.clone()), max);
        assert_eq!(clamp_to_range(BigDecimal::from(1), min.clone(), max.clone()), min);
        assert_eq!(clamp_to_range(BigDecimal::from(100), min.clone(), max.clone()), BigDecimal::from(100));
        // Swapped bounds are tolerated
        assert_eq!(clamp_to_range(BigDecimal::from(1), max, min.clone()), min);
    }

    #[test]
    fn test_parse_name_reply() {
        assert_eq!(parse_name_reply("**Gloomfang**\n").unwrap(), "Gloomfang");
        assert_eq!(parse_name_reply("\n\"Ash Wraith\"").unwrap(), "Ash Wraith");
        assert!(parse_name_reply("  \n ").is_err());
    }

    #[test]
    fn test_choice_reply_is_permissive() {
        assert_eq!(parse_choice_reply("FLEE"), CombatChoice::Flee);
        assert_eq!(parse_choice_reply("FLEE\n"), CombatChoice::Flee);
        assert_eq!(parse_choice_reply("ATTACK"), CombatChoice::Attack);
        assert_eq!(parse_choice_reply("flee"), CombatChoice::Attack);
        assert_eq!(parse_choice_reply("I choose to run"), CombatChoice::Attack);
    }

    #[test]
    fn test_criticality_reply_is_permissive() {
        assert_eq!(parse_criticality_reply("CRITICAL"), Criticality::Critical);
        assert_eq!(parse_criticality_reply("NORMAL"), Criticality::Normal);
        assert_eq!(parse_criticality_reply("Critical!"), Criticality::Normal);
    }

    #[test]
    fn test_parse_level_up_reply() {
        assert_eq!(parse_level_up_reply("37\n").unwrap().get(), 37);
        assert!(matches!(
            parse_level_up_reply("0"),
            Err(ProviderError::OutOfRangeLevelUps(0))
        ));
        assert!(matches!(
            parse_level_up_reply("150"),
            Err(ProviderError::OutOfRangeLevelUps(150))
        ));
        assert!(matches!(
            parse_level_up_reply("twelve"),
            Err(ProviderError::MalformedReply { .. })
        ));
    }
}
