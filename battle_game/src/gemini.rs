//! Gemini content provider over the `generateContent` HTTP API
//!
//! Each call is a single stateless prompt; no chat history is carried
//! between requests. Replies are free text and go through the reply
//! parsers in `battle_core::provider::reply`.

use battle_core::config::GeminiConstants;
use battle_core::provider::reply::{
    clamp_to_range, parse_choice_reply, parse_criticality_reply, parse_decimal_reply,
    parse_level_up_reply, parse_name_reply,
};
use battle_core::{
    BigDecimal, CombatChoice, ContentProvider, Criticality, GenerationConfig, InvalidChoice,
    LevelUpCount, ProviderError,
};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Content provider backed by a Gemini model
pub struct GeminiProvider {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
    generation: GenerationConfig,
}

impl GeminiProvider {
    pub fn new(
        api_key: impl Into<String>,
        constants: &GeminiConstants,
        generation: GenerationConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(constants.timeout_secs))
            .build()?;
        Ok(GeminiProvider {
            client,
            url: format!(
                "{}/models/{}:generateContent",
                constants.api_url.trim_end_matches('/'),
                constants.model
            ),
            api_key: api_key.into(),
            generation,
        })
    }

    /// Send one prompt and return the reply text
    fn ask(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(prompt, "sending prompt");
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt, &self.generation))
            .send()
            .map_err(|e| ProviderError::Unavailable(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(ProviderError::Unavailable(format!(
                "Gemini returned {status}: {error_body}"
            )));
        }

        let json: Value = response
            .json()
            .map_err(|e| ProviderError::Unavailable(format!("Gemini response parse failed: {e}")))?;
        let reply = extract_text(&json)?;
        debug!(reply = %reply, "received reply");
        Ok(reply)
    }
}

/// Build a `generateContent` request for a single user prompt
fn request_body(prompt: &str, generation: &GenerationConfig) -> Value {
    let safety_settings: Vec<Value> = SAFETY_CATEGORIES
        .iter()
        .map(|category| {
            json!({
                "category": category,
                "threshold": "BLOCK_MEDIUM_AND_ABOVE"
            })
        })
        .collect();

    json!({
        "contents": [
            {"role": "user", "parts": [{"text": prompt}]}
        ],
        "generationConfig": {
            "temperature": generation.temperature,
            "topP": generation.top_p,
            "topK": generation.top_k,
            "maxOutputTokens": generation.max_output_tokens
        },
        "safetySettings": safety_settings
    })
}

/// Concatenate the text parts of the first candidate
fn extract_text(json: &Value) -> Result<String, ProviderError> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ProviderError::Unavailable(
                "Gemini response missing candidates[0].content.parts".to_owned(),
            )
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        return Err(ProviderError::Unavailable("Gemini returned an empty reply".to_owned()));
    }
    Ok(text)
}

fn enemy_stat_prompt(min: &BigDecimal, max: &BigDecimal) -> String {
    format!("Please enter any float between {min} and {max} (one word response only)!")
}

fn starting_stat_prompt(min: &BigDecimal, max: &BigDecimal) -> String {
    format!("Please enter any float between {min} and {max} inclusive!")
}

fn choice_prompt(options: &[CombatChoice]) -> String {
    let quoted: Vec<String> = options.iter().map(|choice| format!("\"{choice}\"")).collect();
    format!("Enter {}!", quoted.join(" or "))
}

impl ContentProvider for GeminiProvider {
    fn roll_stat(&mut self, min: BigDecimal, max: BigDecimal) -> Result<BigDecimal, ProviderError> {
        let reply = self.ask(&enemy_stat_prompt(&min, &max))?;
        Ok(clamp_to_range(parse_decimal_reply(&reply)?, min, max))
    }

    fn roll_starting_stat(&mut self, min: BigDecimal, max: BigDecimal) -> Result<BigDecimal, ProviderError> {
        let reply = self.ask(&starting_stat_prompt(&min, &max))?;
        Ok(clamp_to_range(parse_decimal_reply(&reply)?, min, max))
    }

    fn roll_name(&mut self) -> Result<String, ProviderError> {
        let reply = self.ask("Generate a random monster name!")?;
        parse_name_reply(&reply)
    }

    fn decide_combat_choice(&mut self, options: &[CombatChoice]) -> Result<CombatChoice, ProviderError> {
        let fallback = options
            .first()
            .copied()
            .ok_or_else(|| InvalidChoice("no options offered".to_string()))?;
        let reply = self.ask(&choice_prompt(options))?;
        let choice = parse_choice_reply(&reply);
        Ok(if options.contains(&choice) { choice } else { fallback })
    }

    fn decide_criticality(&mut self) -> Result<Criticality, ProviderError> {
        let reply = self.ask(&format!(
            "Enter \"{}\" or \"{}\"!",
            Criticality::Critical.keyword(),
            Criticality::Normal.keyword()
        ))?;
        Ok(parse_criticality_reply(&reply))
    }

    fn roll_level_up_count(&mut self) -> Result<LevelUpCount, ProviderError> {
        let reply = self.ask(&format!(
            "Please enter an integer between {} and {} inclusive!",
            LevelUpCount::MIN,
            LevelUpCount::MAX
        ))?;
        parse_level_up_reply(&reply)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
