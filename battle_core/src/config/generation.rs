//! Text generation settings stored with each saved game

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sampling parameters forwarded to the content model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// 0.0 - 1.0
    pub temperature: f64,
    /// 0.0 - 1.0
    pub top_p: f64,
    /// At least 1
    pub top_k: u32,
    /// At least 1
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            temperature: 0.9,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 2048,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "temperature must be between 0 and 1, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ConfigError::ValidationError(format!(
                "top_p must be between 0 and 1, got {}",
                self.top_p
            )));
        }
        if self.top_k < 1 {
            return Err(ConfigError::ValidationError("top_k must be at least 1".to_string()));
        }
        if self.max_output_tokens < 1 {
            return Err(ConfigError::ValidationError(
                "max_output_tokens must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Temperature: {}", self.temperature)?;
        writeln!(f, "Top P: {}", self.top_p)?;
        writeln!(f, "Top K: {}", self.top_k)?;
        writeln!(f, "Max output tokens: {}", self.max_output_tokens)
    }
}
